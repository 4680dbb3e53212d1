// src/engines/subfinder.rs
use crate::engines::{Engine, EngineFactory};
use crate::types::{EngineConfig, RustFinderError};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Builds engines that shell out to the `subfinder` binary.
#[derive(Debug, Clone)]
pub struct SubfinderFactory {
    binary: PathBuf,
}

impl SubfinderFactory {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl EngineFactory for SubfinderFactory {
    fn create(&self, config: &EngineConfig) -> Result<Box<dyn Engine>, RustFinderError> {
        let binary = which::which(&self.binary).map_err(|e| {
            RustFinderError::EngineInit(format!("{}: {}", self.binary.display(), e))
        })?;

        Ok(Box::new(SubfinderEngine {
            binary,
            config: config.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct SubfinderEngine {
    binary: PathBuf,
    config: EngineConfig,
}

impl SubfinderEngine {
    fn args(&self, domain: &str) -> Vec<String> {
        let mut args = vec![
            "-d".to_string(),
            domain.to_string(),
            "-silent".to_string(),
            "-t".to_string(),
            self.config.threads.to_string(),
            "-timeout".to_string(),
            self.config.timeout.to_string(),
            "-max-time".to_string(),
            self.config.max_enumeration_time.to_string(),
        ];

        if self.config.structured_output() {
            args.push("-json".to_string());
        }
        if self.config.all {
            args.push("-all".to_string());
        }
        if self.config.only_recursive {
            args.push("-recursive".to_string());
        }

        args
    }
}

#[async_trait]
impl Engine for SubfinderEngine {
    fn name(&self) -> &str {
        "subfinder"
    }

    async fn enumerate(&self, domain: &str) -> Result<Vec<String>, RustFinderError> {
        let args = self.args(domain);
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RustFinderError::EngineInvocation(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("subfinder exited with {}", output.status),
                stderr => stderr.to_string(),
            };
            return Err(RustFinderError::EngineInvocation(message));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
