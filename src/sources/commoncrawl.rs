use super::Source;
use super::http::{get_body, with_domain_query};
use crate::error::{ConfigError, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Common Crawl URL index adapter
#[derive(Debug, Clone)]
pub struct CommonCrawlSource {
    client: Client,
    endpoint: Url,
}

impl CommonCrawlSource {
    /// `server` is the index host, `index` the crawl name (e.g. CC-MAIN-2023-04)
    pub fn new(client: Client, server: &str, index: &str) -> Result<Self, ConfigError> {
        let raw = format!("{}/{}-index", server.trim_end_matches('/'), index);
        let endpoint = Url::parse(&raw).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: raw.clone(),
            source: e,
        })?;
        Ok(Self { client, endpoint })
    }

    pub fn query_url(&self, domain: &str) -> Url {
        with_domain_query(self.endpoint.clone(), domain, &[("output", "json")])
    }
}

#[async_trait]
impl Source for CommonCrawlSource {
    fn name(&self) -> &str {
        "commoncrawl"
    }

    async fn fetch(&self, domain: &str) -> Result<Vec<String>, FetchError> {
        let body = get_body(&self.client, self.query_url(domain)).await?;
        let urls = parse_records(&body)?;
        ::log::debug!("commoncrawl returned {} URLs for {}", urls.len(), domain);
        Ok(urls)
    }
}

/// Parse index records into their `url` fields.
///
/// Accepts a JSON array of objects, or newline-terminated objects one per
/// line (the format the live index serves, even for a single capture). A
/// lone object without a line terminator is not a record stream. Records
/// without a string `url` are skipped; anything that is not an object is a
/// decode error.
pub fn parse_records(body: &str) -> Result<Vec<String>, FetchError> {
    let mut values = serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()?;

    let records = match values.len() {
        0 => return Err(FetchError::Decode("empty response body".to_string())),
        1 => match values.pop() {
            Some(Value::Array(items)) => items,
            Some(record @ Value::Object(_)) if is_line_terminated(body) => vec![record],
            _ => {
                return Err(FetchError::Decode(
                    "expected an array or lines of index records".to_string(),
                ));
            }
        },
        _ => values,
    };

    let mut urls = Vec::with_capacity(records.len());
    for record in records {
        match record {
            Value::Object(mut fields) => {
                if let Some(Value::String(url)) = fields.remove("url") {
                    urls.push(url);
                }
            }
            other => {
                return Err(FetchError::Decode(format!(
                    "expected an index record object, got {other}"
                )));
            }
        }
    }
    Ok(urls)
}

fn is_line_terminated(body: &str) -> bool {
    body.trim_end_matches([' ', '\t', '\r']).ends_with('\n')
}
