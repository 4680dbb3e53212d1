// src/lib.rs
pub mod api;
pub mod cli;
pub mod config;
pub mod engines;
pub mod error;
pub mod options;
pub mod orchestrator;
pub mod results;
pub mod session;
pub mod sources;
pub mod types;
pub mod utils;

pub use api::router;
pub use cli::Args;
pub use engines::{create_factory, Engine, EngineFactory};
pub use orchestrator::Orchestrator;
pub use types::{Config, EngineConfig, EnumerationOptions, EnumerationResponse, RustFinderError, SubdomainResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
