use clap::Parser;
use company_website_etl::core::{ConfigProvider, Pipeline};
use company_website_etl::utils::error::ErrorSeverity;
use company_website_etl::utils::{logger, validation::Validate};
use company_website_etl::{CliConfig, CompanyPipeline, EtlEngine, EtlError, LocalStorage, TomlConfig};
use std::collections::HashSet;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting company-website-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let dry_run = cli.dry_run;
    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config, dry_run).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli, dry_run).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> Result<(), EtlError> {
    config.validate()?;

    let batch_size = config.batch_size();
    let batch_pause = config.batch_pause();
    let storage = LocalStorage::new(config.input_dir().to_string());
    let pipeline = CompanyPipeline::new(storage, config)?;

    if dry_run {
        return perform_dry_run(&pipeline, batch_size).await;
    }

    let engine = EtlEngine::new(pipeline).with_batching(batch_size, batch_pause);
    let summary = engine.run().await?;

    tracing::info!("✅ Enrichment completed successfully!");
    println!(
        "✅ {} batches, {} companies written",
        summary.batches, summary.records_written
    );
    for path in &summary.output_files {
        println!("📁 {}", path);
    }

    Ok(())
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P, batch_size: usize) -> Result<(), EtlError> {
    tracing::info!("🔍 DRY RUN MODE - no searches will be made");

    let records = pipeline.extract().await?;
    println!("🔍 Dry Run Analysis:");
    println!("  Records: {}", records.len());

    for (index, batch) in records.chunks(batch_size.max(1)).enumerate() {
        let mut seen = HashSet::new();
        let unique: Vec<_> = batch
            .iter()
            .filter(|record| seen.insert(record.company_name()))
            .collect();
        let to_search = unique.iter().filter(|record| !record.has_website()).count();

        println!(
            "  Batch {}: {} records, {} unique companies, {} need a website search",
            index + 1,
            batch.len(),
            unique.len(),
            to_search
        );
    }

    Ok(())
}
