// src/results.rs
use crate::types::{RawDiscoveryRecord, SubdomainResult};
use indexmap::{IndexMap, IndexSet};
use log::debug;

/// Source label given to lines that are not structured records.
pub const FALLBACK_SOURCE: &str = "subfinder";

/// Parse engine output lines into discovery records.
///
/// Blank lines and `{}` are skipped, as are records whose `host` is missing or
/// empty. Other missing fields default to empty. A line that does not parse as
/// a record is kept whole as a hostname attributed to [`FALLBACK_SOURCE`].
pub fn normalize<I, S>(lines: I) -> Vec<RawDiscoveryRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line == "{}" {
            continue;
        }

        match serde_json::from_str::<RawDiscoveryRecord>(line) {
            Ok(record) if !record.host.trim().is_empty() => records.push(record),
            Ok(_) => debug!("Skipping record without host: {}", line),
            Err(_) => records.push(RawDiscoveryRecord {
                host: line.to_string(),
                source: FALLBACK_SOURCE.to_string(),
                input: String::new(),
            }),
        }
    }

    records
}

/// Folds discovery records into per-subdomain results.
///
/// A subdomain keeps the position of its first occurrence. Sources are kept in
/// the order they were first seen for that subdomain.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: IndexMap<String, IndexSet<String>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RawDiscoveryRecord) {
        self.entries
            .entry(record.host)
            .or_default()
            .insert(record.source);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_results(self) -> Vec<SubdomainResult> {
        self.entries
            .into_iter()
            .map(|(subdomain, sources)| {
                let sources: Vec<String> = sources.into_iter().collect();
                SubdomainResult {
                    subdomain,
                    source_count: sources.len(),
                    sources,
                }
            })
            .collect()
    }
}

impl Extend<RawDiscoveryRecord> for Aggregator {
    fn extend<T: IntoIterator<Item = RawDiscoveryRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

pub fn aggregate(records: Vec<RawDiscoveryRecord>) -> Vec<SubdomainResult> {
    let mut aggregator = Aggregator::new();
    aggregator.extend(records);
    aggregator.into_results()
}
