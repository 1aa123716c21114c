use crate::core::etl::{DEFAULT_BATCH_PAUSE, DEFAULT_BATCH_SIZE};
use crate::core::resolver::{DEFAULT_LANG, DEFAULT_NUM_RESULTS, DEFAULT_QUERY_SUFFIX};
use crate::core::validator::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MIN_CONTENT_CHARS};
use crate::core::{ConfigProvider, SearchConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_provider, validate_search, Validate};
use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "company-website-etl")]
#[command(about = "Finds and validates official websites for company register CSV files")]
pub struct CliConfig {
    /// Directory scanned for input .csv files
    #[arg(long, default_value = super::DEFAULT_INPUT_DIR)]
    pub input_dir: String,

    /// Output directory, relative to the input directory unless absolute
    #[arg(long, default_value = super::DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Load settings from a TOML file instead of the flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Pause between batches, in seconds
    #[arg(long, default_value_t = DEFAULT_BATCH_PAUSE.as_secs())]
    pub batch_pause_secs: u64,

    #[command(flatten)]
    #[serde(flatten)]
    pub search: SearchArgs,

    /// List input files and batch counts without searching
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Search and validation flags, shared by every binary that resolves websites.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = super::DEFAULT_SEARCH_ENDPOINT)]
    pub search_endpoint: String,

    /// Search results considered per company
    #[arg(long, default_value_t = DEFAULT_NUM_RESULTS)]
    pub num_results: usize,

    #[arg(long, default_value = DEFAULT_LANG)]
    pub lang: String,

    #[arg(long, default_value = DEFAULT_QUERY_SUFFIX)]
    pub query_suffix: String,

    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub fetch_timeout_secs: u64,

    /// A page needs more visible characters than this to count as a real site
    #[arg(long, default_value_t = DEFAULT_MIN_CONTENT_CHARS)]
    pub min_content_chars: usize,
}

impl ConfigProvider for CliConfig {
    fn input_dir(&self) -> &str {
        &self.input_dir
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn batch_pause(&self) -> Duration {
        Duration::from_secs(self.batch_pause_secs)
    }
}

impl SearchConfig for CliConfig {
    fn search_endpoint(&self) -> &str {
        self.search.search_endpoint()
    }

    fn num_results(&self) -> usize {
        self.search.num_results()
    }

    fn lang(&self) -> &str {
        self.search.lang()
    }

    fn query_suffix(&self) -> &str {
        self.search.query_suffix()
    }

    fn fetch_timeout(&self) -> Duration {
        self.search.fetch_timeout()
    }

    fn min_content_chars(&self) -> usize {
        self.search.min_content_chars()
    }
}

impl SearchConfig for SearchArgs {
    fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    fn num_results(&self) -> usize {
        self.num_results
    }

    fn lang(&self) -> &str {
        &self.lang
    }

    fn query_suffix(&self) -> &str {
        &self.query_suffix
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    fn min_content_chars(&self) -> usize {
        self.min_content_chars
    }
}

impl Validate for SearchArgs {
    fn validate(&self) -> Result<()> {
        validate_search(self)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
