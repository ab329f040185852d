use crate::error::FetchError;
use crate::results::FetchReport;
use crate::sources::{Source, SourceRegistry};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::timeout;

/// Fans out one task per (domain, source) pair and merges what comes back.
#[derive(Debug, Clone)]
pub struct Fetcher {
    registry: Arc<SourceRegistry>,
    timeout: Duration,
}

/// Result slot a single task hands back to the fetcher
struct TaskResult {
    domain: String,
    source: String,
    result: Result<Vec<String>, FetchError>,
}

impl Fetcher {
    pub fn new(registry: Arc<SourceRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Fetch every domain from every source and return the merged URLs
    pub async fn run_all(&self, domains: &[String], sources: &[String]) -> Vec<String> {
        self.run(domains, sources).await.urls
    }

    /// Like [`Fetcher::run_all`] but also reports per-task outcomes.
    ///
    /// All tasks start immediately. Failures are logged and contribute
    /// nothing; this returns only after every task has finished.
    pub async fn run(&self, domains: &[String], sources: &[String]) -> FetchReport {
        let mut report = FetchReport::default();
        let mut tasks = JoinSet::new();

        for domain in domains {
            for source_name in sources {
                let source = match self.registry.get(source_name) {
                    Ok(source) => source,
                    Err(e) => {
                        ::log::warn!("{} (skipping {})", e, domain);
                        report.skipped += 1;
                        continue;
                    }
                };

                ::log::trace!("Dispatching {} from {}", domain, source_name);
                tasks.spawn(fetch_one(
                    source,
                    domain.clone(),
                    source_name.clone(),
                    self.timeout,
                ));
            }
        }

        ::log::info!("Dispatched {} fetch tasks", tasks.len());

        // Each task owns its result until here, so merging needs no lock
        while let Some(joined) = tasks.join_next().await {
            let task = match joined {
                Ok(task) => task,
                Err(e) => {
                    ::log::error!("Fetch task aborted: {}", e);
                    report.failed += 1;
                    continue;
                }
            };

            match task.result {
                Ok(urls) => {
                    ::log::info!(
                        "Fetched {} URLs for {} from {}",
                        urls.len(),
                        task.domain,
                        task.source
                    );
                    report.succeeded += 1;
                    report.urls.extend(urls);
                }
                Err(e) => {
                    ::log::error!(
                        "Error fetching URLs for {} from {}: {}",
                        task.domain,
                        task.source,
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        ::log::debug!(
            "All fetch tasks complete: {} succeeded, {} failed, {} skipped",
            report.succeeded,
            report.failed,
            report.skipped
        );

        report
    }
}

/// Run one source for one domain, bounded by `limit`
async fn fetch_one(
    source: Arc<dyn Source>,
    domain: String,
    source_name: String,
    limit: Duration,
) -> TaskResult {
    let result = match timeout(limit, source.fetch(&domain)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(limit)),
    };

    TaskResult {
        domain,
        source: source_name,
        result,
    }
}

/// Fetch every domain from every named source using `registry`
pub async fn run_all(
    registry: Arc<SourceRegistry>,
    domains: &[String],
    sources: &[String],
    timeout: Duration,
) -> Vec<String> {
    Fetcher::new(registry, timeout)
        .run_all(domains, sources)
        .await
}
