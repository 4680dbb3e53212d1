// src/session.rs
use crate::types::{EngineSettings, RustFinderError};
use governor::{Jitter, Quota};
use reqwest::Client;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct Session {
    pub client: Client,
    rate_limiters: Arc<HashMap<String, Arc<governor::DefaultDirectRateLimiter>>>,
}

impl Session {
    pub fn new(settings: &EngineSettings, timeout: Duration) -> Result<Self, RustFinderError> {
        let mut client_builder = Client::builder()
            .timeout(timeout)
            .user_agent(&settings.user_agent)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10);

        if let Some(proxy_url) = &settings.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| RustFinderError::ConfigError(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .map_err(|e| RustFinderError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let mut rate_limiters = HashMap::new();
        for (source, rate_limit) in &settings.rate_limits {
            if let Some(limit) = rate_limit.and_then(NonZeroU32::new) {
                let quota = Quota::per_second(limit).allow_burst(NonZeroU32::MIN);
                rate_limiters.insert(source.clone(), Arc::new(governor::RateLimiter::direct(quota)));
            }
        }

        Ok(Session {
            client,
            rate_limiters: Arc::new(rate_limiters),
        })
    }

    pub async fn wait_for_rate_limit(&self, source: &str) {
        if let Some(limiter) = self.rate_limiters.get(source) {
            limiter
                .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
                .await;
        }
    }

    /// GET `url` on behalf of `source`, honoring its rate limit.
    pub async fn get(&self, source: &str, url: &str) -> Result<reqwest::Response, RustFinderError> {
        self.wait_for_rate_limit(source).await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RustFinderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RustFinderError::SourceError {
                source_name: source.to_string(),
                message: format!("HTTP error: {}", response.status()),
            });
        }

        Ok(response)
    }

    pub async fn get_json<T>(&self, source: &str, url: &str) -> Result<T, RustFinderError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.get(source, url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| RustFinderError::ParseError(e.to_string()))
    }
}
