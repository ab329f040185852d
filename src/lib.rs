// Re-export modules
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod results;
pub mod sink;
pub mod sources;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{RunConfig, SourceEndpoints};
pub use error::{ConfigError, Error, FetchError, Result};
pub use fetcher::{Fetcher, run_all};
pub use filter::{ParamFilter, ParamFilterConfig};
pub use results::{FetchReport, RunSummary};
pub use sources::{Source, SourceKind, SourceRegistry};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main builder: fetch archived URLs for a set of domains, keep the ones
/// with query parameters and write them out.
pub struct ParamSpider {
    config: RunConfig,
    extra_sources: Vec<Arc<dyn Source>>,
}

impl ParamSpider {
    /// Create a new builder for the given domains with default settings
    pub fn new(domains: Vec<String>) -> Self {
        Self::from_config(RunConfig::new(domains))
    }

    /// Create a builder from a complete configuration
    pub fn from_config(config: RunConfig) -> Self {
        Self {
            config,
            extra_sources: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_config_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        Ok(Self::from_config(RunConfig::from_file(path)?))
    }

    /// Set the source names queried for every domain
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.config.sources = sources;
        self
    }

    /// Set the output file
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the backend endpoints
    pub fn with_endpoints(mut self, endpoints: SourceEndpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Drop parameter URLs matching any of these regexes
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.exclude_patterns = patterns;
        self
    }

    /// Register an additional source alongside the built-in ones
    pub fn with_source(mut self, source: Arc<dyn Source>) -> Self {
        self.extra_sources.push(source);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Build the filter described by the configuration
    pub fn param_filter(&self) -> std::result::Result<ParamFilter, ConfigError> {
        Ok(ParamFilter::new(ParamFilterConfig {
            exclude_patterns: self.config.exclude_patterns.clone(),
        })?)
    }

    /// Build the source registry: built-ins first, then extra sources
    pub fn registry(&self) -> Result<SourceRegistry> {
        let client = sources::http::build_client(self.config.timeout()).map_err(Error::Client)?;
        let mut registry = SourceRegistry::with_defaults(client, &self.config.endpoints)?;
        for source in &self.extra_sources {
            registry.register(Arc::clone(source));
        }
        Ok(registry)
    }

    /// Fetch every domain from every configured source.
    ///
    /// Fails only on configuration problems; per-task failures are logged
    /// and reflected in the report counts.
    pub async fn fetch(&self) -> Result<FetchReport> {
        self.config.validate()?;

        let domains = self.config.target_domains();
        let registry = Arc::new(self.registry()?);
        ::log::info!(
            "Fetching {} domains from sources [{}] ({} tasks)",
            domains.len(),
            self.config.sources.join(", "),
            utils::task_count(&domains, &self.config.sources)
        );

        let fetcher = Fetcher::new(registry, self.config.timeout());
        Ok(fetcher.run(&domains, &self.config.sources).await)
    }

    /// Write parameter URLs to the configured output file
    pub fn save(&self, urls: &[String]) -> Result<()> {
        sink::save(urls, &self.config.output).map_err(|source| Error::Save {
            path: self.config.output.clone(),
            source,
        })
    }

    /// Fetch, filter and save in one go
    pub async fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;
        let filter = self.param_filter()?;

        let report = self.fetch().await?;
        let param_urls = filter.filter(&report.urls);
        ::log::info!(
            "Found {} URLs with parameters out of {}",
            param_urls.len(),
            report.urls.len()
        );

        self.save(&param_urls)?;

        Ok(RunSummary {
            fetched: report.urls.len(),
            param_urls: param_urls.len(),
            output: self.config.output.clone(),
        })
    }
}
