// src/sources/mod.rs
use crate::session::Session;
use crate::types::{RustFinderError, SourceInfo};
use async_trait::async_trait;

mod anubis;
mod crtsh;
mod hackertarget;

pub use anubis::AnubisSource;
pub use crtsh::CrtShSource;
pub use hackertarget::HackerTargetSource;

/// A passive data provider queried by the built-in engine.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;
    fn info(&self) -> SourceInfo;
    /// Hostnames under `domain` known to this source.
    async fn enumerate(&self, domain: &str, session: &Session) -> Result<Vec<String>, RustFinderError>;
}

pub fn create_source(name: &str) -> Option<Box<dyn Source>> {
    match name.to_lowercase().as_str() {
        "crtsh" => Some(Box::new(CrtShSource::new())),
        "hackertarget" => Some(Box::new(HackerTargetSource::new())),
        "anubis" => Some(Box::new(AnubisSource::new())),
        _ => None,
    }
}

pub fn get_all_sources() -> Vec<Box<dyn Source>> {
    ["crtsh", "hackertarget", "anubis"]
        .into_iter()
        .filter_map(create_source)
        .collect()
}

/// Sources enabled by the `all` and `only_recursive` flags.
pub fn select_sources(all: bool, only_recursive: bool) -> Vec<Box<dyn Source>> {
    get_all_sources()
        .into_iter()
        .filter(|source| {
            let info = source.info();
            (all || info.is_default) && (!only_recursive || info.recursive)
        })
        .collect()
}

/// Lowercased, trimmed hostname if it belongs to `domain`.
pub(crate) fn clean_host(candidate: &str, domain: &str) -> Option<String> {
    let host = candidate.trim().trim_end_matches('.').to_lowercase();
    if host.starts_with('*') {
        return None;
    }
    if host == domain || host.ends_with(&format!(".{}", domain)) {
        Some(host)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sources: &[Box<dyn Source>]) -> Vec<String> {
        sources.iter().map(|s| s.name().to_string()).collect()
    }

    #[test]
    fn test_create_source() {
        assert!(create_source("crtsh").is_some());
        assert!(create_source("HackerTarget").is_some());
        assert!(create_source("invalid").is_none());
    }

    #[test]
    fn test_select_sources() {
        assert_eq!(names(&select_sources(false, false)), vec!["crtsh", "hackertarget"]);
        assert_eq!(
            names(&select_sources(true, false)),
            vec!["crtsh", "hackertarget", "anubis"]
        );
        assert_eq!(names(&select_sources(false, true)), vec!["hackertarget"]);
        assert_eq!(names(&select_sources(true, true)), vec!["hackertarget", "anubis"]);
    }

    #[test]
    fn test_clean_host() {
        assert_eq!(clean_host(" API.Example.com. ", "example.com"), Some("api.example.com".to_string()));
        assert_eq!(clean_host("example.com", "example.com"), Some("example.com".to_string()));
        assert_eq!(clean_host("*.example.com", "example.com"), None);
        assert_eq!(clean_host("badexample.com", "example.com"), None);
        assert_eq!(clean_host("other.org", "example.com"), None);
    }
}
