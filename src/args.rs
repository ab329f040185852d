use clap::Parser;
use param_spider::RunConfig;
use param_spider::utils::split_list;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "param-spider")]
#[command(about = "Find archived URLs with query parameters for a set of domains")]
#[command(version)]
pub struct Args {
    /// Comma-separated list of domains to search for parameter URLs
    #[arg(short, long)]
    pub domains: Option<String>,

    /// Output file to save URLs with parameters
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated list of sources to fetch URLs from (e.g., wayback,commoncrawl)
    #[arg(short, long)]
    pub sources: Option<String>,

    /// Timeout in seconds for HTTP requests
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Common Crawl index to query
    #[arg(long)]
    pub commoncrawl_index: Option<String>,
}

impl Args {
    /// Apply command-line values on top of `base`
    pub fn apply(self, mut base: RunConfig) -> RunConfig {
        if let Some(domains) = self.domains {
            base.domains = split_list(&domains);
        }
        if let Some(sources) = self.sources {
            base.sources = split_list(&sources);
        }
        if let Some(output) = self.output {
            base.output = output;
        }
        if let Some(timeout) = self.timeout {
            base.timeout_secs = timeout;
        }
        if let Some(index) = self.commoncrawl_index {
            base.endpoints.commoncrawl_index = index;
        }
        base.endpoints = base.endpoints.with_env_overrides();
        base
    }
}
