pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{FplClient, MongoStore};
pub use crate::core::etl::EtlEngine;
pub use crate::core::pipeline::GameweekPipeline;
pub use crate::core::{Batch, Gameweek, GameweekSelector, Record, RunSummary};
pub use utils::error::{EtlError, Result};
