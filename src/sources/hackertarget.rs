// src/sources/hackertarget.rs
use crate::session::Session;
use crate::sources::{clean_host, Source};
use crate::types::{RustFinderError, SourceInfo};
use async_trait::async_trait;

/// HackerTarget API source
#[derive(Debug, Clone)]
pub struct HackerTargetSource {
    name: String,
    base_url: String,
}

impl Default for HackerTargetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HackerTargetSource {
    pub fn new() -> Self {
        Self {
            name: "hackertarget".to_string(),
            base_url: "https://api.hackertarget.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Source for HackerTargetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            is_default: true,
            recursive: true,
        }
    }

    async fn enumerate(&self, domain: &str, session: &Session) -> Result<Vec<String>, RustFinderError> {
        let url = format!("{}/hostsearch/?q={}", self.base_url, domain);
        let text = session.get(&self.name, &url).await?.text().await?;

        if text.starts_with("error") || text.starts_with("API count exceeded") {
            return Err(RustFinderError::SourceError {
                source_name: self.name.to_string(),
                message: text.trim().to_string(),
            });
        }

        // one "host,ip" pair per line
        let results = text
            .lines()
            .filter_map(|line| line.split(',').next())
            .filter_map(|host| clean_host(host, domain))
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineSettings;
    use std::time::Duration;

    #[tokio::test]
    async fn test_parses_host_ip_pairs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hostsearch/?q=example.com")
            .with_status(200)
            .with_body("www.example.com,93.184.216.34\nmail.example.com,93.184.216.35\n\nevil.org,1.2.3.4\n")
            .create_async()
            .await;

        let session = Session::new(&EngineSettings::default(), Duration::from_secs(5)).unwrap();
        let source = HackerTargetSource::new().with_base_url(server.url());
        let hosts = source.enumerate("example.com", &session).await.unwrap();

        assert_eq!(hosts, vec!["www.example.com", "mail.example.com"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_quota_message_is_source_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/hostsearch/?q=example.com")
            .with_status(200)
            .with_body("API count exceeded - Increase Quota with Membership")
            .create_async()
            .await;

        let session = Session::new(&EngineSettings::default(), Duration::from_secs(5)).unwrap();
        let source = HackerTargetSource::new().with_base_url(server.url());
        let err = source.enumerate("example.com", &session).await.unwrap_err();

        assert!(matches!(err, RustFinderError::SourceError { .. }));
    }
}
