use crate::adapters::{GoogleSearch, HtmlTextExtractor, ReqwestFetcher};
use crate::core::validator::SiteValidator;
use crate::domain::ports::{SearchConfig, SearchProvider};
use crate::utils::error::{Result, SearchError};

pub const DEFAULT_QUERY_SUFFIX: &str = "official site";
pub const DEFAULT_NUM_RESULTS: usize = 5;
pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub query_suffix: String,
    pub num_results: usize,
    pub lang: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
            num_results: DEFAULT_NUM_RESULTS,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

/// Outcome of resolving one company name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    /// Search worked but no candidate was accepted (or there were none).
    Exhausted { candidates: usize },
    SearchFailed(SearchError),
}

impl Resolution {
    pub fn into_url(self) -> Option<String> {
        match self {
            Resolution::Found(url) => Some(url),
            Resolution::Exhausted { .. } | Resolution::SearchFailed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Turns a company name into at most one validated website URL.
pub struct WebsiteResolver {
    search: Box<dyn SearchProvider>,
    validator: SiteValidator,
    settings: ResolverSettings,
}

impl WebsiteResolver {
    pub fn new(search: impl SearchProvider + 'static, validator: SiteValidator) -> Self {
        Self {
            search: Box::new(search),
            validator,
            settings: ResolverSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Resolver wired to the real search endpoint and HTTP client.
    pub fn from_config<C: SearchConfig + ?Sized>(config: &C) -> Result<Self> {
        let search = GoogleSearch::new(config.search_endpoint())?;
        let validator = SiteValidator::new(ReqwestFetcher::new()?, HtmlTextExtractor)
            .with_timeout(config.fetch_timeout())
            .with_min_content_chars(config.min_content_chars());

        Ok(Self::new(search, validator).with_settings(ResolverSettings {
            query_suffix: config.query_suffix().to_string(),
            num_results: config.num_results(),
            lang: config.lang().to_string(),
        }))
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn validator(&self) -> &SiteValidator {
        &self.validator
    }

    pub fn query_for(&self, company_name: &str) -> String {
        let suffix = self.settings.query_suffix.trim();
        if suffix.is_empty() {
            company_name.to_string()
        } else {
            format!("{} {}", company_name, suffix)
        }
    }

    pub async fn resolve(&self, company_name: &str) -> Resolution {
        tracing::info!("Searching for website for company: {}", company_name);
        let query = self.query_for(company_name);

        let candidates = match self
            .search
            .search(&query, self.settings.num_results, &self.settings.lang)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Error during search for {}: {}", company_name, e);
                return Resolution::SearchFailed(e);
            }
        };

        tracing::debug!("{} candidates for '{}'", candidates.len(), query);

        for url in &candidates {
            if self.validator.is_valid(url).await {
                return Resolution::Found(url.clone());
            }
        }

        tracing::info!(
            "No valid website among {} candidates for {}",
            candidates.len(),
            company_name
        );
        Resolution::Exhausted {
            candidates: candidates.len(),
        }
    }

    pub async fn find_website(&self, company_name: &str) -> Option<String> {
        self.resolve(company_name).await.into_url()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::validator::tests::{rich_page, MockFetcher};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    pub(crate) struct MockSearch {
        results: Arc<Mutex<HashMap<String, std::result::Result<Vec<String>, SearchError>>>>,
        pub(crate) queries: Arc<Mutex<Vec<(String, usize, String)>>>,
    }

    impl MockSearch {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn results(self, query: &str, urls: &[&str]) -> Self {
            self.results.lock().unwrap().insert(
                query.to_string(),
                Ok(urls.iter().map(|u| u.to_string()).collect()),
            );
            self
        }

        pub(crate) fn failure(self, query: &str, error: SearchError) -> Self {
            self.results
                .lock()
                .unwrap()
                .insert(query.to_string(), Err(error));
            self
        }

        pub(crate) fn queries(&self) -> Vec<(String, usize, String)> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchProvider for MockSearch {
        async fn search(
            &self,
            query: &str,
            num_results: usize,
            lang: &str,
        ) -> std::result::Result<Vec<String>, SearchError> {
            self.queries
                .lock()
                .unwrap()
                .push((query.to_string(), num_results, lang.to_string()));
            self.results
                .lock()
                .unwrap()
                .get(query)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_query_uses_suffix_count_and_language() {
        let search = MockSearch::new();
        let resolver = WebsiteResolver::new(search.clone(), SiteValidator::new(MockFetcher::new(), HtmlTextExtractor));

        resolver.resolve("Acme Oy").await;

        assert_eq!(
            search.queries(),
            vec![("Acme Oy official site".to_string(), 5, "en".to_string())]
        );
    }

    #[tokio::test]
    async fn test_first_accepted_candidate_wins() {
        let search = MockSearch::new().results(
            "Acme Oy official site",
            &["https://u1.example/", "https://u2.example/", "https://u3.example/"],
        );
        let fetcher = MockFetcher::new()
            .page("https://u1.example/", 404, &rich_page())
            .page("https://u2.example/", 200, "<p>Parked</p>")
            .page("https://u3.example/", 200, &rich_page());
        let resolver = WebsiteResolver::new(search, SiteValidator::new(fetcher.clone(), HtmlTextExtractor));

        let resolution = resolver.resolve("Acme Oy").await;

        assert_eq!(resolution, Resolution::Found("https://u3.example/".to_string()));
        assert_eq!(
            fetcher.requested(),
            vec![
                "https://u1.example/".to_string(),
                "https://u2.example/".to_string(),
                "https://u3.example/".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_later_candidates_are_not_fetched() {
        let search = MockSearch::new().results(
            "Acme Oy official site",
            &["https://good.example/", "https://other.example/"],
        );
        let fetcher = MockFetcher::new()
            .page("https://good.example/", 200, &rich_page())
            .page("https://other.example/", 200, &rich_page());
        let resolver = WebsiteResolver::new(search, SiteValidator::new(fetcher.clone(), HtmlTextExtractor));

        let url = resolver.find_website("Acme Oy").await;

        assert_eq!(url.as_deref(), Some("https://good.example/"));
        assert_eq!(fetcher.requested(), vec!["https://good.example/".to_string()]);
    }

    #[tokio::test]
    async fn test_no_results_is_none() {
        let resolver =
            WebsiteResolver::new(MockSearch::new(), SiteValidator::new(MockFetcher::new(), HtmlTextExtractor));

        let resolution = resolver.resolve("Nonexistent Ghost Corp 12345xyz").await;

        assert_eq!(resolution, Resolution::Exhausted { candidates: 0 });
        assert_eq!(resolution.into_url(), None);
    }

    #[tokio::test]
    async fn test_all_candidates_rejected_is_none() {
        let search = MockSearch::new().results(
            "Ghost official site",
            &["https://down.example/", "https://thin.example/"],
        );
        let fetcher = MockFetcher::new()
            .failure("https://down.example/", "dns error")
            .page("https://thin.example/", 200, "<p>hi</p>");
        let resolver = WebsiteResolver::new(search, SiteValidator::new(fetcher, HtmlTextExtractor));

        assert_eq!(
            resolver.resolve("Ghost").await,
            Resolution::Exhausted { candidates: 2 }
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_reported_but_not_fatal() {
        let search = MockSearch::new().failure("Acme Oy official site", SearchError::RateLimited);
        let fetcher = MockFetcher::new();
        let resolver = WebsiteResolver::new(search, SiteValidator::new(fetcher.clone(), HtmlTextExtractor));

        let resolution = resolver.resolve("Acme Oy").await;

        assert_eq!(resolution, Resolution::SearchFailed(SearchError::RateLimited));
        assert!(!resolution.is_found());
        assert!(fetcher.requested().is_empty());
    }

    #[test]
    fn test_custom_settings() {
        let validator = SiteValidator::new(MockFetcher::new(), HtmlTextExtractor);
        let resolver = WebsiteResolver::new(MockSearch::new(), validator)
            .with_settings(ResolverSettings {
                query_suffix: "kotisivu".to_string(),
                num_results: 3,
                lang: "fi".to_string(),
            });

        assert_eq!(resolver.query_for("Acme Oy"), "Acme Oy kotisivu");
        assert_eq!(resolver.settings().num_results, 3);

        let validator = SiteValidator::new(MockFetcher::new(), HtmlTextExtractor);
        let bare = WebsiteResolver::new(MockSearch::new(), validator)
            .with_settings(ResolverSettings {
                query_suffix: String::new(),
                ..ResolverSettings::default()
            });
        assert_eq!(bare.query_for("Acme Oy"), "Acme Oy");
    }

    struct FinnishSearch;

    impl SearchConfig for FinnishSearch {
        fn search_endpoint(&self) -> &str {
            "https://www.google.fi/search"
        }
        fn num_results(&self) -> usize {
            3
        }
        fn lang(&self) -> &str {
            "fi"
        }
        fn query_suffix(&self) -> &str {
            "kotisivu"
        }
        fn fetch_timeout(&self) -> Duration {
            Duration::from_secs(4)
        }
        fn min_content_chars(&self) -> usize {
            100
        }
    }

    #[test]
    fn test_from_config_takes_search_settings() {
        let resolver = WebsiteResolver::from_config(&FinnishSearch).unwrap();

        assert_eq!(resolver.query_for("Acme Oy"), "Acme Oy kotisivu");
        assert_eq!(resolver.settings().num_results, 3);
        assert_eq!(resolver.settings().lang, "fi");
    }
}
