// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub defaults: EnumerationOptions,
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8005,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Run the external `subfinder` binary
    Subfinder,
    /// Query the built-in passive sources
    Passive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub kind: EngineKind,
    pub subfinder_path: PathBuf,
    /// Domains enumerated at once in a batch request. 1 keeps batches sequential.
    pub batch_concurrency: usize,
    pub user_agent: String,
    pub proxy: Option<String>,
    pub rate_limits: HashMap<String, Option<u32>>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let mut rate_limits = HashMap::new();
        rate_limits.insert("crtsh".to_string(), Some(2));
        rate_limits.insert("hackertarget".to_string(), Some(1));
        rate_limits.insert("anubis".to_string(), Some(5));

        Self {
            kind: EngineKind::Subfinder,
            subfinder_path: PathBuf::from("subfinder"),
            batch_concurrency: 1,
            user_agent: "RustFinder/1.0".to_string(),
            proxy: None,
            rate_limits,
        }
    }
}

/// Caller-facing enumeration options.
///
/// `Default` yields the service defaults. When deserialized from a request,
/// omitted fields are zero/false, which the translator treats as "use the default"
/// for numbers and as an explicit `false` for flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationOptions {
    #[serde(default)]
    pub threads: i64,
    #[serde(default)]
    pub timeout: i64,
    #[serde(default)]
    pub max_enumeration_time: i64,
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub only_recursive: bool,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            threads: 10,
            timeout: 30,
            max_enumeration_time: 10,
            all: false,
            only_recursive: false,
        }
    }
}

/// Resolved configuration handed to an engine. Built by `options::translate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub threads: u32,
    /// Per-source network timeout, seconds.
    pub timeout: u32,
    /// Ceiling on one domain's enumeration, minutes.
    pub max_enumeration_time: u32,
    pub all: bool,
    pub only_recursive: bool,
    pub(crate) structured_output: bool,
}

impl EngineConfig {
    pub fn structured_output(&self) -> bool {
        self.structured_output
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumerateRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub options: Option<EnumerationOptions>,
}

/// One line of structured engine output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDiscoveryRecord {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainResult {
    pub subdomain: String,
    pub sources: Vec<String>,
    pub source_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStatus {
    pub domain: String,
    pub success: bool,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationResponse {
    pub success: bool,
    pub results: Vec<SubdomainResult>,
    pub count: usize,
    pub duration: String,
    /// Per-domain outcome, batch requests only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<DomainStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

pub struct SourceInfo {
    pub is_default: bool,
    pub recursive: bool,
}

#[derive(Debug, Error)]
pub enum RustFinderError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to create subfinder runner: {0}")]
    EngineInit(String),

    #[error("Failed to enumerate subdomains: {0}")]
    EngineInvocation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source error in {source_name}: {message}")]
    SourceError {
        source_name: String,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}
