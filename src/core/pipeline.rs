use crate::core::load::load_batch;
use crate::core::transform::augment_records;
use crate::core::{
    Batch, DocumentStore, Gameweek, LoadReport, Pipeline, PlayerSource, Record,
};
use crate::utils::error::Result;

/// Fetches one gameweek's live stats, tags them and bulk-inserts them.
pub struct GameweekPipeline<S: PlayerSource, D: DocumentStore> {
    source: S,
    store: D,
    gameweek: Gameweek,
}

impl<S: PlayerSource, D: DocumentStore> GameweekPipeline<S, D> {
    pub fn new(source: S, store: D, gameweek: Gameweek) -> Self {
        Self {
            source,
            store,
            gameweek,
        }
    }
}

#[async_trait::async_trait]
impl<S: PlayerSource, D: DocumentStore> Pipeline for GameweekPipeline<S, D> {
    fn gameweek(&self) -> Gameweek {
        self.gameweek
    }

    async fn extract(&self) -> Result<Vec<Record>> {
        let players = self.source.fetch_live(self.gameweek).await?;
        tracing::info!("Fetched {} players from API", players.len());
        Ok(players)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<Batch> {
        Ok(augment_records(data, self.gameweek))
    }

    async fn load(&self, batch: Batch) -> Result<LoadReport> {
        load_batch(&self.store, &batch).await
    }
}
