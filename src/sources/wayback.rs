use super::Source;
use super::http::{get_body, with_domain_query};
use crate::error::{ConfigError, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Wayback Machine CDX search adapter
#[derive(Debug, Clone)]
pub struct WaybackSource {
    client: Client,
    endpoint: Url,
}

impl WaybackSource {
    pub fn new(client: Client, endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        Ok(Self { client, endpoint })
    }

    /// CDX query for every capture under `domain`, one row per unique URL key
    pub fn query_url(&self, domain: &str) -> Url {
        with_domain_query(
            self.endpoint.clone(),
            domain,
            &[
                ("output", "json"),
                ("fl", "original"),
                ("collapse", "urlkey"),
            ],
        )
    }
}

#[async_trait]
impl Source for WaybackSource {
    fn name(&self) -> &str {
        "wayback"
    }

    async fn fetch(&self, domain: &str) -> Result<Vec<String>, FetchError> {
        let body = get_body(&self.client, self.query_url(domain)).await?;
        let urls = parse_rows(&body)?;
        ::log::debug!("wayback returned {} URLs for {}", urls.len(), domain);
        Ok(urls)
    }
}

/// Parse a CDX JSON body: an array of rows whose first column is the URL.
///
/// Empty rows and rows with a non-string first column are skipped.
pub fn parse_rows(body: &str) -> Result<Vec<String>, FetchError> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;

    Ok(rows
        .into_iter()
        .filter_map(|row| match row.into_iter().next() {
            Some(Value::String(url)) => Some(url),
            _ => None,
        })
        .collect())
}
