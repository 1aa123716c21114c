use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FIELD_BUSINESS_ID: &str = "Y-tunnus";
pub const FIELD_COMPANY_NAME: &str = "company_name";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_WEBSITE: &str = "website";
pub const FIELD_REGISTRATION_DATE: &str = "registrationDate";
pub const FIELD_DETAILS_URI: &str = "detailsUri";
pub const FIELD_COMPANY_FORM: &str = "companyForm";

/// Column order of every batch output file.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    FIELD_BUSINESS_ID,
    FIELD_COMPANY_NAME,
    FIELD_ADDRESS,
    FIELD_WEBSITE,
    FIELD_REGISTRATION_DATE,
    FIELD_DETAILS_URI,
    FIELD_COMPANY_FORM,
];

/// One row of company register data, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub data: HashMap<String, String>,
}

impl CompanyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.data.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    /// Dedup key; a missing column counts as the empty name.
    pub fn company_name(&self) -> &str {
        self.get(FIELD_COMPANY_NAME).unwrap_or("")
    }

    /// The current website; an empty field counts as missing.
    pub fn website(&self) -> Option<&str> {
        self.get(FIELD_WEBSITE).filter(|w| !w.is_empty())
    }

    pub fn has_website(&self) -> bool {
        self.website().is_some()
    }

    pub fn set_website(&mut self, url: String) {
        self.data.insert(FIELD_WEBSITE.to_string(), url);
    }

    /// Values in `OUTPUT_COLUMNS` order, missing columns written as empty.
    pub fn output_row(&self) -> Vec<&str> {
        OUTPUT_COLUMNS
            .iter()
            .map(|column| self.get(column).unwrap_or(""))
            .collect()
    }
}

/// Per-batch counters, reported after each batch is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub input_records: usize,
    pub duplicates_dropped: usize,
    pub existing_websites: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub processed_records: Vec<CompanyRecord>,
    pub csv_output: String,
    pub stats: BatchStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub records_written: usize,
    pub output_files: Vec<String>,
}
