use crate::domain::ports::{PageFetcher, TextExtractor};
use crate::utils::error::SiteRejection;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 100;

/// Decides whether a candidate URL is a real, content-bearing website.
///
/// A candidate is accepted when it does not answer 404 and its visible text is
/// longer than `min_content_chars` characters. Every failure, including
/// transport errors, is a rejection; nothing is returned to the caller as an error.
pub struct SiteValidator {
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn TextExtractor>,
    timeout: Duration,
    min_content_chars: usize,
}

impl SiteValidator {
    pub fn new(
        fetcher: impl PageFetcher + 'static,
        extractor: impl TextExtractor + 'static,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            extractor: Box::new(extractor),
            timeout: DEFAULT_FETCH_TIMEOUT,
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_content_chars(mut self, min_content_chars: usize) -> Self {
        self.min_content_chars = min_content_chars;
        self
    }

    pub async fn check(&self, url: &str) -> Result<(), SiteRejection> {
        tracing::info!("Checking website: {}", url);

        let page = match self.fetcher.get(url, self.timeout).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error accessing {}: {}, rejecting candidate", url, e);
                return Err(SiteRejection::Transport(e.0));
            }
        };

        if page.status == 404 {
            tracing::info!("Website returned 404, rejecting candidate");
            return Err(SiteRejection::NotFound);
        }

        let text = self.extractor.extract_text(&page.body);
        let chars = text.chars().count();

        if chars > self.min_content_chars {
            tracing::info!("Website is valid and has content ({} characters)", chars);
            Ok(())
        } else {
            tracing::info!("Website has minimal content ({} characters)", chars);
            Err(SiteRejection::ThinContent { chars })
        }
    }

    pub async fn is_valid(&self, url: &str) -> bool {
        self.check(url).await.is_ok()
    }
}
