use crate::domain::model::RunSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::{EtlError, Result};
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_secs(120);

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    batch_size: usize,
    batch_pause: Duration,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: DEFAULT_BATCH_PAUSE,
        }
    }

    pub fn with_batching(mut self, batch_size: usize, batch_pause: Duration) -> Self {
        self.batch_size = batch_size;
        self.batch_pause = batch_pause;
        self
    }

    /// Extracts everything, then transforms and loads one batch at a time,
    /// sleeping `batch_pause` between batches.
    pub async fn run(&self) -> Result<RunSummary> {
        if self.batch_size == 0 {
            return Err(EtlError::InvalidConfigValueError {
                field: "batch_size".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        tracing::info!("Starting website enrichment run");

        let records = self.pipeline.extract().await?;
        let total_batches = records.len().div_ceil(self.batch_size);
        tracing::info!(
            "Extracted {} records, {} batches of up to {}",
            records.len(),
            total_batches,
            self.batch_size
        );

        let mut summary = RunSummary::default();
        let mut remaining = records.into_iter().peekable();
        let mut batch_number = 0;

        while remaining.peek().is_some() {
            batch_number += 1;
            let batch: Vec<_> = remaining.by_ref().take(self.batch_size).collect();
            tracing::info!(
                "Processing batch {}/{} ({} records)",
                batch_number,
                total_batches,
                batch.len()
            );

            let result = self.pipeline.transform(batch).await?;
            let stats = result.stats;
            let written = result.processed_records.len();
            let output_path = self.pipeline.load(result, batch_number).await?;

            tracing::info!(
                "Batch {}: {} read, {} written, {} found, {} already known, {} not found, {} duplicates dropped",
                batch_number,
                stats.input_records,
                written,
                stats.resolved,
                stats.existing_websites,
                stats.unresolved,
                stats.duplicates_dropped
            );

            summary.batches += 1;
            summary.records_written += written;
            summary.output_files.push(output_path);

            if remaining.peek().is_some() && !self.batch_pause.is_zero() {
                tracing::info!(
                    "Sleeping for {:?} to avoid rate limiting...",
                    self.batch_pause
                );
                tokio::time::sleep(self.batch_pause).await;
            }
        }

        tracing::info!(
            "Run finished: {} batches, {} records written",
            summary.batches,
            summary.records_written
        );
        Ok(summary)
    }
}
