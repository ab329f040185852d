use crate::error::ConfigError;
use crate::sources::SourceKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base URLs of the archive backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEndpoints {
    /// Wayback Machine CDX search endpoint
    #[serde(default = "default_wayback_endpoint")]
    pub wayback: String,

    /// Common Crawl index server (without the index path)
    #[serde(default = "default_commoncrawl_endpoint")]
    pub commoncrawl: String,

    /// Common Crawl index to query, e.g. CC-MAIN-2023-04
    #[serde(default = "default_commoncrawl_index")]
    pub commoncrawl_index: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            wayback: default_wayback_endpoint(),
            commoncrawl: default_commoncrawl_endpoint(),
            commoncrawl_index: default_commoncrawl_index(),
        }
    }
}

impl SourceEndpoints {
    /// Override endpoints from WAYBACK_ENDPOINT / COMMONCRAWL_ENDPOINT if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("WAYBACK_ENDPOINT") {
            if !url.is_empty() {
                self.wayback = url;
            }
        }
        if let Ok(url) = std::env::var("COMMONCRAWL_ENDPOINT") {
            if !url.is_empty() {
                self.commoncrawl = url;
            }
        }
        self
    }
}

/// Everything a run needs: targets, backends, output and timeout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Target domains
    #[serde(default)]
    pub domains: Vec<String>,

    /// Source names to query for every domain
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// File the parameter URLs are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Regex patterns; matching URLs are dropped after the parameter check
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    #[serde(default)]
    pub endpoints: SourceEndpoints,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            sources: default_sources(),
            output: default_output(),
            timeout_secs: default_timeout_secs(),
            exclude_patterns: Vec::new(),
            endpoints: SourceEndpoints::default(),
        }
    }
}

impl RunConfig {
    /// Create a configuration for the given domains with default values
    pub fn new(domains: Vec<String>) -> Self {
        Self {
            domains,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Domains to dispatch: trimmed, blank entries dropped
    pub fn target_domains(&self) -> Vec<String> {
        self.domains
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// A run without domains must not reach the network
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_domains().is_empty() {
            return Err(ConfigError::NoDomains);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn default_sources() -> Vec<String> {
    SourceKind::ALL
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect()
}

fn default_output() -> PathBuf {
    PathBuf::from("param_urls.txt")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_wayback_endpoint() -> String {
    "http://web.archive.org/cdx/search/cdx".to_string()
}

fn default_commoncrawl_endpoint() -> String {
    "http://index.commoncrawl.org".to_string()
}

fn default_commoncrawl_index() -> String {
    "CC-MAIN-2023-04".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new(vec!["example.com".to_string()]);
        assert_eq!(config.sources, vec!["wayback", "commoncrawl"]);
        assert_eq!(config.output, PathBuf::from("param_urls.txt"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.endpoints.commoncrawl_index, "CC-MAIN-2023-04");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_domains() {
        let config = RunConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::NoDomains)));

        let blank = RunConfig::new(vec!["  ".to_string()]);
        assert!(matches!(blank.validate(), Err(ConfigError::NoDomains)));
    }

    #[test]
    fn test_target_domains_drop_blanks() {
        let config = RunConfig::new(vec![
            "a.com".to_string(),
            "".to_string(),
            "  ".to_string(),
            " b.com ".to_string(),
        ]);
        assert_eq!(config.target_domains(), vec!["a.com", "b.com"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = RunConfig::new(vec!["a.com".to_string()]);
        config.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            RunConfig::from_json(r#"{"domains": ["a.com"], "timeout_secs": 3}"#).unwrap();
        assert_eq!(config.domains, vec!["a.com"]);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(
            config.endpoints.wayback,
            "http://web.archive.org/cdx/search/cdx"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"domains": ["a.com", "b.com"], "sources": ["wayback"], "output": "out.txt"}}"#
        )
        .unwrap();

        let config = RunConfig::from_file(file.path()).unwrap();
        assert_eq!(config.domains.len(), 2);
        assert_eq!(config.sources, vec!["wayback"]);
        assert_eq!(config.output, PathBuf::from("out.txt"));
    }

    #[test]
    fn test_from_file_errors() {
        assert!(matches!(
            RunConfig::from_file("/nonexistent/param-spider.json"),
            Err(ConfigError::Read(_))
        ));
        assert!(matches!(
            RunConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
