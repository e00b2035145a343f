use clap::Parser;
use gameweek_etl::app::{report_outcome, run_ingest};
use gameweek_etl::config::usage_exit_code;
use gameweek_etl::core::GameweekSelector;
use gameweek_etl::utils::{logger, validation::Validate};
use gameweek_etl::TomlConfig;

#[derive(Parser)]
#[command(name = "toml_ingest", version)]
#[command(about = "Gameweek ingestion driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "gameweek-etl.toml")]
    config: String,

    /// Override run.gameweek from the config
    #[arg(short, long)]
    gameweek: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Fetch and transform only, without writing to the store
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_code(&e));
        }
    };

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    if let Some(index) = args.gameweek {
        config.run.gameweek = Some(index);
        config.run.latest = false;
    }

    logger::init_logger(args.verbose || config.logging.verbose, config.logging.json);
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::debug!("Configuration validation failed: {}", e);
        tracing::debug!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }

    let selector = match config.selector() {
        Ok(selector) => selector,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };
    if let GameweekSelector::Fixed(gameweek) = selector {
        tracing::debug!("Gameweek fixed to {}", gameweek);
    }

    let dry_run = args.dry_run || config.run.dry_run;
    let result = run_ingest(&config, selector, dry_run).await;
    std::process::exit(report_outcome(&result));
}
