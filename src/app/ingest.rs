use crate::adapters::{FplClient, MongoStore};
use crate::core::etl::EtlEngine;
use crate::core::pipeline::GameweekPipeline;
use crate::core::{Batch, ConfigProvider, Gameweek, GameweekSelector, RunSummary};
use crate::utils::error::Result;

#[derive(Debug)]
pub enum IngestOutcome {
    Loaded(RunSummary),
    DryRun(Batch),
}

pub async fn resolve_gameweek(client: &FplClient, selector: GameweekSelector) -> Result<Gameweek> {
    match selector {
        GameweekSelector::Fixed(gameweek) => Ok(gameweek),
        GameweekSelector::Latest => client.latest_finished_gameweek().await,
    }
}

/// Wires the FPL client and MongoDB store from `config` and runs one
/// ingestion.
pub async fn run_ingest<C: ConfigProvider>(
    config: &C,
    selector: GameweekSelector,
    dry_run: bool,
) -> Result<IngestOutcome> {
    let client = FplClient::from_config(config)?;
    let gameweek = resolve_gameweek(&client, selector).await?;
    let store = MongoStore::from_config(config);
    let engine = EtlEngine::new(GameweekPipeline::new(client, store, gameweek));

    if dry_run {
        Ok(IngestOutcome::DryRun(engine.preview().await?))
    } else {
        Ok(IngestOutcome::Loaded(engine.run().await?))
    }
}

/// Prints the outcome of a run and returns the process exit code.
pub fn report_outcome(result: &Result<IngestOutcome>) -> i32 {
    match result {
        Ok(IngestOutcome::Loaded(summary)) => {
            println!(
                "Gameweek {} uploaded successfully! ({} of {} players inserted)",
                summary.gameweek, summary.inserted, summary.fetched
            );
            0
        }
        Ok(IngestOutcome::DryRun(batch)) => {
            println!(
                "Dry run: gameweek {} would insert {} documents",
                batch.gameweek,
                batch.len()
            );
            if let Some(sample) = batch.records.first() {
                let rendered = serde_json::to_string_pretty(sample).unwrap_or_default();
                println!("Sample document:\n{}", rendered);
            }
            0
        }
        Err(e) => {
            tracing::debug!("Ingestion failed at stage {:?}", e.stage());
            tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("Error uploading gameweek: {}", e);
            e.exit_code()
        }
    }
}
