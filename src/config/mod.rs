pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::http::FPL_API_BASE;
#[cfg(feature = "cli")]
use crate::adapters::mongo::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, Gameweek, GameweekSelector};
#[cfg(feature = "cli")]
use crate::utils::error::{Result, Stage};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "gameweek-etl", version)]
#[command(about = "Loads one gameweek of FPL live player stats into MongoDB")]
pub struct CliConfig {
    /// Gameweek to ingest
    #[arg(short, long, env = "GAMEWEEK", required_unless_present = "latest")]
    pub gameweek: Option<u32>,

    /// Ingest the most recent finished gameweek instead of a fixed one
    #[arg(long)]
    pub latest: bool,

    #[arg(long, default_value = FPL_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub database: String,

    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Overall HTTP request timeout; the client default applies when unset
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Fetch and transform only, without writing to the store")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn selector(&self) -> GameweekSelector {
        match self.gameweek {
            Some(index) if !self.latest => GameweekSelector::Fixed(Gameweek::new(index)),
            _ => GameweekSelector::Latest,
        }
    }
}

/// Exit status for a command line clap rejected. `--help` and `--version`
/// are not failures; anything else is a configuration error.
#[cfg(feature = "cli")]
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        Stage::Config.exit_code()
    } else {
        0
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn mongodb_uri(&self) -> Option<&str> {
        self.mongodb_uri.as_deref().filter(|uri| !uri.is_empty())
    }

    fn database(&self) -> &str {
        &self.database
    }

    fn collection(&self) -> &str {
        &self.collection
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_database_name("database", &self.database)?;
        validation::validate_collection_name("collection", &self.collection)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
