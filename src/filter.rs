use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse "has a key=value after the `?`" pattern.
///
/// Deliberately greedy: it does not split or validate parameters, so any
/// URL with a `?` followed somewhere by a non-empty `x=y` qualifies.
pub const PARAM_PATTERN: &str = r"\?.+=.+";

/// Configuration for parameter URL filtering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamFilterConfig {
    /// Regex patterns for URLs to drop even if they carry parameters
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Selects URLs that carry at least one query parameter with a value
#[derive(Debug)]
pub struct ParamFilter {
    param_regex: Regex,
    exclude_regexes: Vec<Regex>,
}

impl Default for ParamFilter {
    fn default() -> Self {
        Self::new(ParamFilterConfig::default()).expect("Parameter pattern should be valid")
    }
}

impl ParamFilter {
    /// Create a new filter, compiling any exclude patterns
    pub fn new(config: ParamFilterConfig) -> Result<Self, regex::Error> {
        let param_regex = Regex::new(PARAM_PATTERN)?;

        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            param_regex,
            exclude_regexes,
        })
    }

    /// Whether a single URL qualifies
    pub fn is_param_url(&self, url: &str) -> bool {
        if !self.param_regex.is_match(url) {
            return false;
        }

        !self.exclude_regexes.iter().any(|regex| regex.is_match(url))
    }

    /// Keep the qualifying URLs, in input order, duplicates included
    pub fn filter(&self, urls: &[String]) -> Vec<String> {
        urls.iter()
            .filter(|url| self.is_param_url(url))
            .cloned()
            .collect()
    }
}

/// Filter with the default configuration
pub fn filter(urls: &[String]) -> Vec<String> {
    ParamFilter::default().filter(urls)
}
