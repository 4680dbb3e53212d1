// src/engines/passive.rs
use crate::engines::{Engine, EngineFactory};
use crate::session::Session;
use crate::sources::{select_sources, Source};
use crate::types::{EngineConfig, EngineSettings, RawDiscoveryRecord, RustFinderError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::{info, warn};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// Builds in-process engines that query the passive sources directly.
#[derive(Debug, Clone)]
pub struct PassiveFactory {
    settings: EngineSettings,
}

impl PassiveFactory {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

impl EngineFactory for PassiveFactory {
    fn create(&self, config: &EngineConfig) -> Result<Box<dyn Engine>, RustFinderError> {
        let sources = select_sources(config.all, config.only_recursive);
        if sources.is_empty() {
            return Err(RustFinderError::EngineInit(
                "No sources match the requested options".to_string(),
            ));
        }

        let session = Session::new(&self.settings, Duration::from_secs(u64::from(config.timeout)))
            .map_err(|e| RustFinderError::EngineInit(e.to_string()))?;

        Ok(Box::new(PassiveEngine::new(session, sources, config.clone())))
    }
}

pub struct PassiveEngine {
    session: Session,
    sources: Vec<Box<dyn Source>>,
    config: EngineConfig,
}

impl PassiveEngine {
    pub fn new(session: Session, sources: Vec<Box<dyn Source>>, config: EngineConfig) -> Self {
        Self {
            session,
            sources,
            config,
        }
    }
}

#[async_trait]
impl Engine for PassiveEngine {
    fn name(&self) -> &str {
        "passive"
    }

    async fn enumerate(&self, domain: &str) -> Result<Vec<String>, RustFinderError> {
        let max_time = Duration::from_secs(u64::from(self.config.max_enumeration_time) * 60);
        let deadline = Instant::now() + max_time;
        let session = &self.session;
        let sources = &self.sources;

        let mut pending = stream::iter(0..sources.len())
            .map(|i| async move {
                let source = &sources[i];
                let started = Instant::now();
                let result = source.enumerate(domain, session).await;
                (source.name(), started.elapsed(), result)
            })
            .buffer_unordered((self.config.threads as usize).max(1));

        let mut seen = HashSet::new();
        let mut lines = Vec::new();

        loop {
            let (source_name, elapsed, result) =
                match tokio::time::timeout_at(deadline, pending.next()).await {
                    Ok(Some(outcome)) => outcome,
                    Ok(None) => break,
                    Err(_) => {
                        warn!(
                            "Enumeration of {} hit the {:?} limit, returning partial results",
                            domain, max_time
                        );
                        break;
                    }
                };

            let hosts = match result {
                Ok(hosts) => hosts,
                Err(e) => {
                    warn!("{}: Failed to enumerate {}: {}", source_name, domain, e);
                    continue;
                }
            };

            info!(
                "{}: Found {} subdomains for {} in {:?}",
                source_name,
                hosts.len(),
                domain,
                elapsed
            );

            for host in hosts {
                if !seen.insert((host.clone(), source_name)) {
                    continue;
                }

                let record = RawDiscoveryRecord {
                    host,
                    source: source_name.to_string(),
                    input: domain.to_string(),
                };

                if self.config.structured_output() {
                    let line = serde_json::to_string(&record)
                        .map_err(|e| RustFinderError::ParseError(e.to_string()))?;
                    lines.push(line);
                } else {
                    lines.push(record.host);
                }
            }
        }

        Ok(lines)
    }
}
