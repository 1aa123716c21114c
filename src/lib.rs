pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::LocalStorage;
pub use crate::core::{
    etl::EtlEngine,
    pipeline::CompanyPipeline,
    resolver::{Resolution, WebsiteResolver},
    validator::SiteValidator,
};
pub use domain::model::{CompanyRecord, RunSummary};
pub use utils::error::{EtlError, Result};
