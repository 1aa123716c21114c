use crate::core::resolver::WebsiteResolver;
use crate::domain::model::{BatchStats, CompanyRecord, TransformResult, OUTPUT_COLUMNS};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Batch driver: reads company CSVs, fills in missing websites, writes one CSV per batch.
///
/// Storage is rooted at the input directory; `output_dir` resolves against it.
pub struct CompanyPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    resolver: WebsiteResolver,
    run_stamp: String,
}

impl<S: Storage, C: ConfigProvider> CompanyPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let resolver = WebsiteResolver::from_config(&config)?;
        Ok(Self::with_resolver(storage, config, resolver))
    }

    pub fn with_resolver(storage: S, config: C, resolver: WebsiteResolver) -> Self {
        Self {
            storage,
            config,
            resolver,
            run_stamp: chrono::Local::now().format("%Y%m%dT%H%M%S").to_string(),
        }
    }

    /// Fixes the output file prefix, normally the run start time.
    pub fn with_run_stamp(mut self, run_stamp: impl Into<String>) -> Self {
        self.run_stamp = run_stamp.into();
        self
    }

    pub fn output_file_name(&self, batch_number: usize) -> String {
        format!("processed_batch_{}_{:04}.csv", self.run_stamp, batch_number)
    }

    async fn read_csv(&self, file_name: &str) -> Result<Vec<CompanyRecord>> {
        let data = self.storage.read_file(file_name).await?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_slice());

        let headers = reader.headers()?.clone();
        let mut records = Vec::new();

        for row in reader.records() {
            let row = row?;
            let mut record = CompanyRecord::new();
            for (column, value) in headers.iter().zip(row.iter()) {
                record.data.insert(column.to_string(), value.to_string());
            }
            records.push(record);
        }

        Ok(records)
    }
}

pub fn render_csv(records: &[CompanyRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.write_record(record.output_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::ProcessingError {
            message: format!("failed to flush CSV output: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CompanyPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<CompanyRecord>> {
        let files = self.storage.list_files(".", "csv").await?;
        tracing::debug!("Found {} input files", files.len());

        let mut records = Vec::new();
        for file in files {
            let file_records = self.read_csv(&file).await?;
            tracing::info!("Read {} companies from {}", file_records.len(), file);
            records.extend(file_records);
        }

        Ok(records)
    }

    async fn transform(&self, batch: Vec<CompanyRecord>) -> Result<TransformResult> {
        let mut stats = BatchStats {
            input_records: batch.len(),
            ..BatchStats::default()
        };
        // Dedup only within this batch.
        let mut seen: HashSet<String> = HashSet::new();
        let mut processed_records = Vec::new();

        for mut record in batch {
            let company_name = record.company_name().to_string();
            if !seen.insert(company_name.clone()) {
                tracing::debug!("Skipping duplicate company: {}", company_name);
                stats.duplicates_dropped += 1;
                continue;
            }

            tracing::info!("Company: {}", company_name);

            let website = if let Some(existing) = record.website() {
                stats.existing_websites += 1;
                Some(existing.to_string())
            } else if company_name.trim().is_empty() {
                tracing::warn!("Record has no company name, skipping website search");
                stats.unresolved += 1;
                None
            } else {
                match self.resolver.find_website(&company_name).await {
                    Some(url) => {
                        record.set_website(url.clone());
                        stats.resolved += 1;
                        Some(url)
                    }
                    None => {
                        stats.unresolved += 1;
                        None
                    }
                }
            };

            tracing::info!(
                "Website: {}",
                website.as_deref().unwrap_or("No website found")
            );
            processed_records.push(record);
        }

        let csv_output = render_csv(&processed_records)?;

        Ok(TransformResult {
            processed_records,
            csv_output,
            stats,
        })
    }

    async fn load(&self, result: TransformResult, batch_number: usize) -> Result<String> {
        let output_path = Path::new(self.config.output_dir())
            .join(self.output_file_name(batch_number))
            .to_string_lossy()
            .into_owned();

        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.processed_records.len(),
            result.csv_output.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.csv_output.as_bytes())
            .await?;

        tracing::info!(
            "Finished processing batch. Results saved to {}.",
            output_path
        );
        Ok(output_path)
    }
}
