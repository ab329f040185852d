use clap::{CommandFactory, Parser};
use param_spider::{ParamSpider, RunConfig};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let base = match &args.config {
        Some(path) => match RunConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => RunConfig::default(),
    };

    let config = args.apply(base);
    if let Err(e) = config.validate() {
        ::log::error!("{}", e);
        if let Err(e) = Args::command().print_help() {
            ::log::error!("Failed to print usage: {}", e);
        }
        return ExitCode::FAILURE;
    }

    let spider = ParamSpider::from_config(config);
    let filter = match spider.param_filter() {
        Ok(filter) => filter,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Fetching URLs from sources...");
    let report = match spider.fetch().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    ::log::info!(
        "{} of {} fetch tasks succeeded ({} failed, {} skipped)",
        report.succeeded,
        report.tasks(),
        report.failed,
        report.skipped
    );

    println!("Extracting URLs with parameters...");
    let param_urls = filter.filter(&report.urls);
    println!("Found {} URLs with parameters.", param_urls.len());

    println!("Saving URLs to {}...", spider.config().output.display());
    if let Err(e) = spider.save(&param_urls) {
        ::log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    println!("Done!");
    ExitCode::SUCCESS
}
