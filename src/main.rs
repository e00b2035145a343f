use clap::Parser;
use gameweek_etl::app::{report_outcome, run_ingest};
use gameweek_etl::config::usage_exit_code;
use gameweek_etl::utils::{logger, validation::Validate};
use gameweek_etl::CliConfig;

#[tokio::main]
async fn main() {
    // A .env in the working directory or one of its parents may carry MONGODB_URI.
    dotenv::dotenv().ok();
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_code(&e));
        }
    };

    logger::init_logger(config.verbose, config.json_logs);
    tracing::info!("Starting gameweek-etl");

    if let Err(e) = config.validate() {
        tracing::debug!("Configuration validation failed: {}", e);
        tracing::debug!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }

    let result = run_ingest(&config, config.selector(), config.dry_run).await;
    std::process::exit(report_outcome(&result));
}
