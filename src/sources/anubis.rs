// src/sources/anubis.rs
use crate::session::Session;
use crate::sources::{clean_host, Source};
use crate::types::{RustFinderError, SourceInfo};
use async_trait::async_trait;

/// Anubis subdomain database. Slow, so only enabled with `all`.
#[derive(Debug, Clone)]
pub struct AnubisSource {
    name: String,
    base_url: String,
}

impl Default for AnubisSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AnubisSource {
    pub fn new() -> Self {
        Self {
            name: "anubis".to_string(),
            base_url: "https://jonlu.ca/anubis".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Source for AnubisSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            is_default: false,
            recursive: true,
        }
    }

    async fn enumerate(&self, domain: &str, session: &Session) -> Result<Vec<String>, RustFinderError> {
        let url = format!("{}/subdomains/{}", self.base_url, domain);
        let hosts: Vec<String> = session.get_json(&self.name, &url).await?;

        Ok(hosts
            .iter()
            .filter_map(|host| clean_host(host, domain))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineSettings;
    use std::time::Duration;

    #[tokio::test]
    async fn test_parses_host_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/subdomains/example.com")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["dev.example.com", "*.example.com", "cdn.other.net"]"#)
            .create_async()
            .await;

        let session = Session::new(&EngineSettings::default(), Duration::from_secs(5)).unwrap();
        let source = AnubisSource::new().with_base_url(server.url());
        let hosts = source.enumerate("example.com", &session).await.unwrap();

        assert_eq!(hosts, vec!["dev.example.com"]);
    }
}
