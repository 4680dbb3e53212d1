// src/engines/mod.rs
use crate::types::{EngineConfig, EngineKind, EngineSettings, RustFinderError};
use async_trait::async_trait;
use std::sync::Arc;

mod passive;
mod subfinder;

pub use passive::{PassiveEngine, PassiveFactory};
pub use subfinder::{SubfinderEngine, SubfinderFactory};

/// An enumeration engine bound to one configuration.
///
/// `enumerate` returns the raw output lines for one domain. Lines are expected
/// to be `{"host", "source", "input"}` records but the caller tolerates anything.
#[async_trait]
pub trait Engine: Send + Sync {
    fn name(&self) -> &str;
    async fn enumerate(&self, domain: &str) -> Result<Vec<String>, RustFinderError>;
}

/// Builds an engine for a request. Failures surface as `EngineInit`.
pub trait EngineFactory: Send + Sync {
    fn create(&self, config: &EngineConfig) -> Result<Box<dyn Engine>, RustFinderError>;
}

pub fn create_factory(settings: &EngineSettings) -> Arc<dyn EngineFactory> {
    match settings.kind {
        EngineKind::Subfinder => Arc::new(SubfinderFactory::new(settings.subfinder_path.clone())),
        EngineKind::Passive => Arc::new(PassiveFactory::new(settings.clone())),
    }
}
