use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and try again later",
            EtlError::CsvError(_) => {
                "Make sure every input .csv file has a header row and consistent columns"
            }
            EtlError::IoError(_) => {
                "Check that the input directory exists and the output directory is writable"
            }
            EtlError::ConfigError { .. } | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration file syntax and values"
            }
            EtlError::InvalidConfigValueError { .. } => {
                "Correct the reported value; run with --help to see accepted options"
            }
            EtlError::ProcessingError { .. } => "Inspect the input records reported in the log",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("File system problem: {}", self),
        }
    }
}

/// Why a candidate website was not accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteRejection {
    #[error("page returned 404 Not Found")]
    NotFound,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("page has minimal content ({chars} characters)")]
    ThinContent { chars: usize },
}

/// Failure of the search step itself, as opposed to every candidate being rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(String),

    #[error("search provider returned HTTP {0}")]
    Status(u16),

    #[error("search provider is rate limiting requests")]
    RateLimited,

    #[error("could not read search results: {0}")]
    Parse(String),
}

/// Transport-level failure of a page fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FetchError(pub String);
