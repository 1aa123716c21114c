use crate::core::etl::{DEFAULT_BATCH_PAUSE, DEFAULT_BATCH_SIZE};
use crate::core::resolver::{DEFAULT_LANG, DEFAULT_NUM_RESULTS, DEFAULT_QUERY_SUFFIX};
use crate::core::validator::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MIN_CONTENT_CHARS};
use crate::core::{ConfigProvider, SearchConfig as SearchConfigTrait};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_provider, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings file; every section and key is optional and falls back to the CLI defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
    pub search: SearchConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub size: Option<usize>,
    pub pause_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: Option<String>,
    pub num_results: Option<usize>,
    pub lang: Option<String>,
    pub query_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub timeout_seconds: Option<u64>,
    pub min_content_chars: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SEARCH_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_dir(&self) -> &str {
        self.input.dir.as_deref().unwrap_or(super::DEFAULT_INPUT_DIR)
    }

    fn output_dir(&self) -> &str {
        self.output.dir.as_deref().unwrap_or(super::DEFAULT_OUTPUT_DIR)
    }

    fn batch_size(&self) -> usize {
        self.batch.size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    fn batch_pause(&self) -> Duration {
        self.batch
            .pause_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_BATCH_PAUSE)
    }
}

impl SearchConfigTrait for TomlConfig {
    fn search_endpoint(&self) -> &str {
        self.search
            .endpoint
            .as_deref()
            .unwrap_or(super::DEFAULT_SEARCH_ENDPOINT)
    }

    fn num_results(&self) -> usize {
        self.search.num_results.unwrap_or(DEFAULT_NUM_RESULTS)
    }

    fn lang(&self) -> &str {
        self.search.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    fn query_suffix(&self) -> &str {
        self.search
            .query_suffix
            .as_deref()
            .unwrap_or(DEFAULT_QUERY_SUFFIX)
    }

    fn fetch_timeout(&self) -> Duration {
        self.validation
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT)
    }

    fn min_content_chars(&self) -> usize {
        self.validation
            .min_content_chars
            .unwrap_or(DEFAULT_MIN_CONTENT_CHARS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
