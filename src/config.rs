// src/config.rs
use crate::types::{Config, EngineKind, EngineSettings, EnumerationOptions, RustFinderError, ServerConfig};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// `[defaults]` table. Unset keys keep the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultsSection {
    threads: Option<i64>,
    timeout: Option<i64>,
    max_enumeration_time: Option<i64>,
    all: Option<bool>,
    only_recursive: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    server: ServerConfig,
    defaults: DefaultsSection,
    engine: EngineSettings,
}

/// Load configuration from an optional TOML file, then apply environment overrides.
pub fn load_config(config_path: Option<&Path>) -> Result<Config, RustFinderError> {
    let mut config = match config_path {
        Some(path) => parse_config_file(path)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config)?;

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<Config, RustFinderError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RustFinderError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let file: FileConfig = toml::from_str(&contents).map_err(|e| {
        RustFinderError::ConfigError(format!("Failed to parse config file {}: {}", path.display(), e))
    })?;

    let base = EnumerationOptions::default();
    let defaults = EnumerationOptions {
        threads: file.defaults.threads.unwrap_or(base.threads),
        timeout: file.defaults.timeout.unwrap_or(base.timeout),
        max_enumeration_time: file
            .defaults
            .max_enumeration_time
            .unwrap_or(base.max_enumeration_time),
        all: file.defaults.all.unwrap_or(base.all),
        only_recursive: file.defaults.only_recursive.unwrap_or(base.only_recursive),
    };

    Ok(Config {
        server: file.server,
        defaults,
        engine: file.engine,
    })
}

fn apply_env_overrides(config: &mut Config) -> Result<(), RustFinderError> {
    if let Ok(host) = env::var("RUSTFINDER_API_HOST") {
        config.server.host = host;
    }
    if let Ok(port) = env::var("RUSTFINDER_API_PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| RustFinderError::ConfigError(format!("Invalid RUSTFINDER_API_PORT {:?}: {}", port, e)))?;
    }
    if let Ok(kind) = env::var("RUSTFINDER_ENGINE") {
        config.engine.kind = parse_engine_kind(&kind)?;
    }
    if let Ok(path) = env::var("SUBFINDER_PATH") {
        config.engine.subfinder_path = PathBuf::from(path);
    }
    if let Ok(concurrency) = env::var("RUSTFINDER_BATCH_CONCURRENCY") {
        config.engine.batch_concurrency = concurrency.trim().parse().map_err(|e| {
            RustFinderError::ConfigError(format!(
                "Invalid RUSTFINDER_BATCH_CONCURRENCY {:?}: {}",
                concurrency, e
            ))
        })?;
    }
    Ok(())
}

fn parse_engine_kind(value: &str) -> Result<EngineKind, RustFinderError> {
    match value.trim().to_lowercase().as_str() {
        "subfinder" => Ok(EngineKind::Subfinder),
        "passive" => Ok(EngineKind::Passive),
        other => Err(RustFinderError::ConfigError(format!("Unknown engine: {}", other))),
    }
}

pub fn validate_config(config: &Config) -> Result<(), RustFinderError> {
    if config.server.port == 0 {
        return Err(RustFinderError::ConfigError("Port must be greater than 0".to_string()));
    }
    if config.defaults.threads <= 0 {
        return Err(RustFinderError::ConfigError("Default threads must be greater than 0".to_string()));
    }
    if config.defaults.timeout <= 0 {
        return Err(RustFinderError::ConfigError("Default timeout must be greater than 0".to_string()));
    }
    if config.defaults.max_enumeration_time <= 0 {
        return Err(RustFinderError::ConfigError(
            "Default max_enumeration_time must be greater than 0".to_string(),
        ));
    }
    if config.engine.batch_concurrency == 0 {
        return Err(RustFinderError::ConfigError(
            "batch_concurrency must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
