use crate::core::{Batch, Pipeline, RunSummary};
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let gameweek = self.pipeline.gameweek();
        tracing::info!("Starting ingestion for gameweek {}", gameweek);

        let batch = self.extract_and_transform().await?;
        let fetched = batch.len();

        tracing::debug!("Loading {} records", fetched);
        let report = self.pipeline.load(batch).await?;

        tracing::info!(
            "Gameweek {} uploaded successfully ({} documents in {:?})",
            gameweek,
            report.inserted,
            started.elapsed()
        );

        Ok(RunSummary {
            gameweek,
            fetched,
            inserted: report.inserted,
        })
    }

    /// Runs extract and transform only. The store is never touched.
    pub async fn preview(&self) -> Result<Batch> {
        tracing::info!(
            "Dry run for gameweek {}, nothing will be written",
            self.pipeline.gameweek()
        );
        self.extract_and_transform().await
    }

    async fn extract_and_transform(&self) -> Result<Batch> {
        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;

        tracing::debug!("Transforming {} records", raw_data.len());
        self.pipeline.transform(raw_data).await
    }
}
