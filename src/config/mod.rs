#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, SearchArgs};
pub use toml_config::TomlConfig;

pub const DEFAULT_INPUT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_DIR: &str = "processed_files";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";
