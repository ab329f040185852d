use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Build the HTTP client shared by every source
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("param-spider/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Issue a single GET and return the body of a successful response.
///
/// Connection, DNS and timeout failures become `Transport`; any non-2xx
/// status becomes `HttpStatus`.
pub async fn get_body(client: &Client, url: Url) -> Result<String, FetchError> {
    ::log::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            code: status.as_u16(),
        });
    }

    response.text().await.map_err(FetchError::Transport)
}

/// Append the `url={domain}/*` query every archive index takes
pub fn with_domain_query(mut endpoint: Url, domain: &str, extra: &[(&str, &str)]) -> Url {
    {
        let mut query = endpoint.query_pairs_mut();
        query.append_pair("url", &format!("{domain}/*"));
        for (key, value) in extra {
            query.append_pair(key, value);
        }
    }
    endpoint
}
