use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Shared checks for every `ConfigProvider` implementation.
pub fn validate_provider<C: crate::domain::ports::ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("input_dir", config.input_dir())?;
    validate_path("output_dir", config.output_dir())?;
    validate_positive_number("batch_size", config.batch_size(), 1)?;
    validate_search(config)
}

/// Checks for the search and validation settings alone.
pub fn validate_search<C: crate::domain::ports::SearchConfig + ?Sized>(config: &C) -> Result<()> {
    validate_url("search_endpoint", config.search_endpoint())?;
    validate_range("num_results", config.num_results(), 1, 100)?;
    validate_non_empty_string("lang", config.lang())?;
    validate_range("fetch_timeout_secs", config.fetch_timeout().as_secs(), 1, 300)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("search_endpoint", "https://www.google.com/search").is_ok());
        assert!(validate_url("search_endpoint", "http://localhost:8080/search").is_ok());
        assert!(validate_url("search_endpoint", "").is_err());
        assert!(validate_url("search_endpoint", "invalid-url").is_err());
        assert!(validate_url("search_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("batch_size", 50, 1).is_ok());
        assert!(validate_positive_number("batch_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_and_strings() {
        assert!(validate_range("num_results", 5, 1, 100).is_ok());
        assert!(validate_range("num_results", 0, 1, 100).is_err());
        assert!(validate_non_empty_string("lang", "en").is_ok());
        assert!(validate_non_empty_string("lang", "  ").is_err());
        assert!(validate_path("output_dir", "").is_err());
    }
}
