// src/sources/crtsh.rs
use crate::session::Session;
use crate::sources::{clean_host, Source};
use crate::types::{RustFinderError, SourceInfo};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CrtShResponse {
    name_value: String,
}

/// CRT.sh certificate transparency logs source
#[derive(Debug, Clone)]
pub struct CrtShSource {
    name: String,
    base_url: String,
}

impl Default for CrtShSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CrtShSource {
    pub fn new() -> Self {
        Self {
            name: "crtsh".to_string(),
            base_url: "https://crt.sh".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Source for CrtShSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            is_default: true,
            recursive: false,
        }
    }

    async fn enumerate(&self, domain: &str, session: &Session) -> Result<Vec<String>, RustFinderError> {
        let url = format!("{}/?q=%25.{}&output=json", self.base_url, domain);
        let text = session.get(&self.name, &url).await?.text().await?;

        let crt_results: Vec<CrtShResponse> =
            serde_json::from_str(&text).map_err(|e| RustFinderError::SourceError {
                source_name: self.name.to_string(),
                message: format!("Failed to parse JSON: {}", e),
            })?;

        // name_value can hold several names separated by newlines
        let mut results: Vec<String> = crt_results
            .iter()
            .flat_map(|entry| entry.name_value.lines())
            .filter_map(|line| clean_host(line, domain))
            .collect();

        results.sort();
        results.dedup();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineSettings;
    use mockito::Matcher;
    use std::time::Duration;

    #[tokio::test]
    async fn test_parses_certificate_names() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("q".into(), "%.example.com".into()))
            .with_status(200)
            .with_body(
                r#"[
                    {"id": 1, "name_value": "www.example.com\n*.example.com"},
                    {"id": 2, "name_value": "API.example.com\nwww.example.com"},
                    {"id": 3, "name_value": "unrelated.org"}
                ]"#,
            )
            .create_async()
            .await;

        let session = Session::new(&EngineSettings::default(), Duration::from_secs(5)).unwrap();
        let source = CrtShSource::new().with_base_url(server.url());
        let hosts = source.enumerate("example.com", &session).await.unwrap();

        assert_eq!(hosts, vec!["api.example.com", "www.example.com"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_body_is_source_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let session = Session::new(&EngineSettings::default(), Duration::from_secs(5)).unwrap();
        let source = CrtShSource::new().with_base_url(server.url());
        let err = source.enumerate("example.com", &session).await.unwrap_err();

        assert!(matches!(err, RustFinderError::SourceError { .. }));
    }
}
