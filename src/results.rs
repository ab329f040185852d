use std::path::PathBuf;

/// Outcome of fanning out every fetch task
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// URLs from every successful task, in completion order
    pub urls: Vec<String>,

    /// Tasks whose source returned a result
    pub succeeded: usize,

    /// Tasks that failed (transport, timeout, status or decode errors)
    pub failed: usize,

    /// Tasks skipped because their source name is unknown
    pub skipped: usize,
}

impl FetchReport {
    /// Total number of tasks accounted for
    pub fn tasks(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub fetched: usize,
    pub param_urls: usize,
    pub output: PathBuf,
}
