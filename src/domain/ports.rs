use crate::domain::model::{CompanyRecord, TransformResult};
use crate::utils::error::{FetchError, Result, SearchError};
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// File names (not paths) directly inside `dir` ending in `.{extension}`, sorted.
    fn list_files(
        &self,
        dir: &str,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

/// Settings needed to resolve and validate websites.
pub trait SearchConfig: Send + Sync {
    fn search_endpoint(&self) -> &str;
    fn num_results(&self) -> usize;
    fn lang(&self) -> &str;
    fn query_suffix(&self) -> &str;
    fn fetch_timeout(&self) -> Duration;
    fn min_content_chars(&self) -> usize;
}

pub trait ConfigProvider: SearchConfig {
    fn input_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn batch_pause(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CompanyRecord>>;
    async fn transform(&self, batch: Vec<CompanyRecord>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult, batch_number: usize) -> Result<String>;
}

/// Ranked web search.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        lang: &str,
    ) -> std::result::Result<Vec<String>, SearchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<FetchedPage, FetchError>;
}

pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, body: &[u8]) -> String;
}
