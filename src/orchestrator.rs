// src/orchestrator.rs
use crate::engines::{Engine, EngineFactory};
use crate::error::Result;
use crate::options::translate;
use crate::results::{normalize, Aggregator};
use crate::types::{
    DomainStatus, EngineConfig, EnumerationOptions, EnumerationResponse, RustFinderError,
};
use crate::utils::{format_duration, is_valid_domain};
use futures::stream::{self, StreamExt};
use log::{error, info};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Instant;

/// Coordinates validation, engine invocation and aggregation for a request.
///
/// Holds no per-request state: every call builds its own engine and
/// aggregator, so one orchestrator is shared across all requests.
pub struct Orchestrator {
    factory: Arc<dyn EngineFactory>,
    defaults: EnumerationOptions,
    batch_concurrency: usize,
}

impl Orchestrator {
    pub fn new(factory: Arc<dyn EngineFactory>, defaults: EnumerationOptions) -> Self {
        Self {
            factory,
            defaults,
            batch_concurrency: 1,
        }
    }

    /// Let a batch run up to `concurrency` domains at once. Results keep the
    /// requested domain order regardless.
    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    pub fn engine_config(&self, overrides: Option<&EnumerationOptions>) -> EngineConfig {
        translate(&self.defaults, overrides)
    }

    pub async fn enumerate(&self, domain: &str, config: &EngineConfig) -> Result<EnumerationResponse> {
        if domain.is_empty() {
            return Err(RustFinderError::InvalidInput("Domain is required".to_string()));
        }
        if !is_valid_domain(domain) {
            return Err(RustFinderError::InvalidInput("Invalid domain format".to_string()));
        }

        let start_time = Instant::now();

        let engine = self.create_engine(config)?;
        info!("Enumerating subdomains for: {} ({} engine)", domain, engine.name());
        let lines = engine.enumerate(domain).await.map_err(invocation_error)?;

        let mut aggregator = Aggregator::new();
        aggregator.extend(normalize(&lines));
        let results = aggregator.into_results();
        let duration = start_time.elapsed();

        info!(
            "Completed enumeration for {}: found {} unique subdomains in {:?}",
            domain,
            results.len(),
            duration
        );

        Ok(EnumerationResponse {
            success: true,
            count: results.len(),
            results,
            duration: format_duration(duration),
            domains: Vec::new(),
        })
    }

    pub async fn enumerate_batch(
        &self,
        domains: &[String],
        config: &EngineConfig,
    ) -> Result<EnumerationResponse> {
        if domains.is_empty() {
            return Err(RustFinderError::InvalidInput(
                "Domains array is required and cannot be empty".to_string(),
            ));
        }
        if let Some(invalid) = domains.iter().find(|domain| !is_valid_domain(domain)) {
            return Err(RustFinderError::InvalidInput(format!(
                "Invalid domain format: {}",
                invalid
            )));
        }

        let start_time = Instant::now();

        let engine = self.create_engine(config)?;
        let engine: &dyn Engine = engine.as_ref();
        info!(
            "Starting enumeration for {} domains ({} engine)",
            domains.len(),
            engine.name()
        );

        // `buffered` yields in input order, so the merge below stays deterministic
        // even when several domains are in flight.
        let mut outcomes = stream::iter(domains.iter().cloned())
            .map(|domain| async move {
                let outcome = engine.enumerate(&domain).await;
                (domain, outcome)
            })
            .buffered(self.batch_concurrency);

        let mut aggregator = Aggregator::new();
        let mut statuses = Vec::with_capacity(domains.len());

        while let Some((domain, outcome)) = outcomes.next().await {
            match outcome {
                Ok(lines) => {
                    let records = normalize(&lines);
                    let found = records
                        .iter()
                        .map(|record| record.host.as_str())
                        .collect::<HashSet<_>>()
                        .len();
                    aggregator.extend(records);

                    info!(
                        "Completed enumeration for {}: found {} unique subdomains",
                        domain, found
                    );
                    statuses.push(DomainStatus {
                        domain,
                        success: true,
                        count: found,
                        error: None,
                    });
                }
                Err(e) => {
                    let e = invocation_error(e);
                    error!("Failed to enumerate {}: {}", domain, e);
                    statuses.push(DomainStatus {
                        domain,
                        success: false,
                        count: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let results = aggregator.into_results();
        let duration = start_time.elapsed();

        info!(
            "Batch enumeration completed: {} unique subdomains from {} domains in {:.2}s",
            results.len(),
            domains.len(),
            duration.as_secs_f64()
        );

        Ok(EnumerationResponse {
            success: true,
            count: results.len(),
            results,
            duration: format_duration(duration),
            domains: statuses,
        })
    }

    fn create_engine(&self, config: &EngineConfig) -> Result<Box<dyn Engine>> {
        self.factory.create(config).map_err(|e| match e {
            RustFinderError::EngineInit(_) => e,
            other => RustFinderError::EngineInit(other.to_string()),
        })
    }
}

fn invocation_error(e: RustFinderError) -> RustFinderError {
    match e {
        RustFinderError::EngineInvocation(_) => e,
        other => RustFinderError::EngineInvocation(other.to_string()),
    }
}
