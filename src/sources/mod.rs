pub mod commoncrawl;
pub mod http;
pub mod wayback;

#[cfg(test)]
mod tests;

pub use commoncrawl::CommonCrawlSource;
pub use wayback::WaybackSource;

use crate::config::SourceEndpoints;
use crate::error::{ConfigError, FetchError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// An archive backend that can list historical URLs for a domain.
///
/// Adding a backend means implementing this trait and registering the
/// implementation in a [`SourceRegistry`]; the fetcher only sees the trait.
#[async_trait]
pub trait Source: Send + Sync {
    /// Name the source is selected by
    fn name(&self) -> &str;

    /// Fetch every URL the backend knows for `domain` in a single request
    async fn fetch(&self, domain: &str) -> Result<Vec<String>, FetchError>;
}

/// Backends built into the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Internet Archive Wayback Machine CDX API
    Wayback,
    /// Common Crawl URL index
    CommonCrawl,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Wayback, SourceKind::CommonCrawl];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Wayback => "wayback",
            SourceKind::CommonCrawl => "commoncrawl",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FetchError::UnknownSource(s.to_string()))
    }
}

/// Lookup table from source name to adapter
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in source
    pub fn with_defaults(
        client: reqwest::Client,
        endpoints: &SourceEndpoints,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for kind in SourceKind::ALL {
            let source: Arc<dyn Source> = match kind {
                SourceKind::Wayback => {
                    Arc::new(WaybackSource::new(client.clone(), &endpoints.wayback)?)
                }
                SourceKind::CommonCrawl => Arc::new(CommonCrawlSource::new(
                    client.clone(),
                    &endpoints.commoncrawl,
                    &endpoints.commoncrawl_index,
                )?),
            };
            registry.register(source);
        }
        Ok(registry)
    }

    /// Register a source under its own name, replacing any previous one
    pub fn register(&mut self, source: Arc<dyn Source>) {
        ::log::debug!("Registering source: {}", source.name());
        self.sources.insert(source.name().to_string(), source);
    }

    /// Look up a source by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Source>, FetchError> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::UnknownSource(name.to_string()))
    }

    /// Registered source names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.names())
            .finish()
    }
}
