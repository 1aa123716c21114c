use crate::domain::ports::{FetchedPage, PageFetcher};
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("company-website-etl/", env!("CARGO_PKG_VERSION"));

/// Page fetcher backed by a shared reqwest client. Redirects are followed.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError(e.to_string()))?;

        let status = response.status().as_u16();
        tracing::debug!("GET {} -> {}", url, status);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError(format!("failed to read body: {}", e)))?;

        Ok(FetchedPage {
            status,
            body: body.to_vec(),
        })
    }
}
