use crate::types::{Config, EngineKind};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rustfinder-api",
    about = "HTTP API for passive subdomain enumeration",
    long_about = "RustFinder API exposes subdomain enumeration over HTTP.\nRequests are validated, handed to the configured enumeration engine, and the results are returned as aggregated JSON."
)]
pub struct Args {
    /// Port to listen on (default 8005)
    #[arg(value_name = "PORT")]
    pub port: Option<String>,

    /// Address to bind
    #[arg(long = "host", value_name = "ADDR")]
    pub host: Option<String>,

    /// Configuration file path (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Enumeration engine backend
    #[arg(short = 'e', long = "engine", value_enum)]
    pub engine: Option<EngineKind>,

    /// Path to the subfinder binary
    #[arg(long = "subfinder-path", value_name = "PATH")]
    pub subfinder_path: Option<PathBuf>,

    /// Domains enumerated at once in a batch request
    #[arg(long = "batch-concurrency", value_name = "N")]
    pub batch_concurrency: Option<usize>,

    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Valid port from the positional argument. Anything outside 1..=65535 is ignored.
    pub fn port(&self) -> Option<u16> {
        self.port
            .as_deref()
            .and_then(|p| p.trim().parse::<u16>().ok())
            .filter(|p| *p > 0)
    }

    /// Command-line values take precedence over file and environment settings.
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port() {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(engine) = self.engine {
            config.engine.kind = engine;
        }
        if let Some(path) = &self.subfinder_path {
            config.engine.subfinder_path = path.clone();
        }
        if let Some(concurrency) = self.batch_concurrency {
            config.engine.batch_concurrency = concurrency;
        }
    }
}
