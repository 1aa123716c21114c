use crate::domain::ports::SearchProvider;
use crate::utils::error::{EtlError, Result, SearchError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use url::{Host, Url};

/// Plain-HTML result pages are served to text browsers.
const SEARCH_USER_AGENT: &str = "Lynx/2.9.0 libwww-FM/2.14 SSL-MM/1.4.1 OpenSSL/3.0.2";

/// Scrapes a Google-style `/search` HTML endpoint.
///
/// Result links come either as redirect links (`/url?q=<target>&sa=...`) or as
/// absolute URLs. Links pointing back at the search site itself (navigation,
/// account, maps, ...) are dropped.
#[derive(Debug, Clone)]
pub struct GoogleSearch {
    client: Client,
    endpoint: Url,
}

impl GoogleSearch {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| EtlError::InvalidConfigValueError {
            field: "search_endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let client = Client::builder().user_agent(SEARCH_USER_AGENT).build()?;
        Ok(Self { client, endpoint })
    }

    async fn fetch_page(
        &self,
        query: &str,
        page_size: usize,
        lang: &str,
        start: usize,
    ) -> std::result::Result<String, SearchError> {
        let num = page_size.to_string();
        let start = start.to_string();

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", query),
                ("num", num.as_str()),
                ("hl", lang),
                ("start", start.as_str()),
                ("safe", "active"),
            ])
            // Skips the cookie consent interstitial.
            .header(reqwest::header::COOKIE, "CONSENT=YES+")
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(SearchError::RateLimited),
            status if !status.is_success() => return Err(SearchError::Status(status.as_u16())),
            _ => {}
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        lang: &str,
    ) -> std::result::Result<Vec<String>, SearchError> {
        let mut results: Vec<String> = Vec::new();
        let mut start = 0;

        while results.len() < num_results {
            let html = self.fetch_page(query, num_results + 2, lang, start).await?;
            let links = parse_result_links(&html, &self.endpoint);

            let before = results.len();
            for link in links {
                if results.len() >= num_results {
                    break;
                }
                if !results.contains(&link) {
                    results.push(link);
                }
            }

            tracing::debug!(
                "Search page at offset {} gave {} new results for '{}'",
                start,
                results.len() - before,
                query
            );

            // No new links means the provider has run out of results.
            if results.len() == before {
                break;
            }
            start += num_results;
        }

        Ok(results)
    }
}

/// Candidate URLs of one result page, in page order, without duplicates.
pub fn parse_result_links(html: &str, search_endpoint: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links: Vec<String> = Vec::new();
    for element in document.select(&anchor) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(target) = result_target(href, search_endpoint) else {
            continue;
        };
        if belongs_to_search_site(&target, search_endpoint) {
            continue;
        }
        let target = target.to_string();
        if !links.contains(&target) {
            links.push(target);
        }
    }
    links
}

fn result_target(href: &str, search_endpoint: &Url) -> Option<Url> {
    let resolved = search_endpoint.join(href).ok()?;

    let target = if resolved.path() == "/url" && same_origin(&resolved, search_endpoint) {
        let (_, value) = resolved
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")?;
        Url::parse(&value).ok()?
    } else {
        resolved
    };

    match target.scheme() {
        "http" | "https" => Some(target),
        _ => None,
    }
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

fn belongs_to_search_site(target: &Url, search_endpoint: &Url) -> bool {
    if same_origin(target, search_endpoint) {
        return true;
    }

    // For a named search host, every host under its registrable domain is the search site too.
    let (Some(Host::Domain(search_host)), Some(Host::Domain(target_host))) =
        (search_endpoint.host(), target.host())
    else {
        return false;
    };

    let Some(base) = psl::domain_str(search_host) else {
        return target_host == search_host;
    };
    target_host == base || target_host.ends_with(&format!(".{}", base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn google() -> Url {
        Url::parse("https://www.google.com/search").unwrap()
    }

    #[test]
    fn test_parse_redirect_and_direct_links() {
        let html = r#"<html><body>
            <a href="/url?q=https://www.acme.fi/&amp;sa=U&amp;ved=abc">Acme</a>
            <a href="https://acme-oy.example/about">Acme about</a>
            <a href="/search?q=acme&amp;start=10">Next</a>
            <a href="https://accounts.google.com/ServiceLogin">Sign in</a>
            <a href="https://maps.google.com/maps?q=acme">Maps</a>
            <a href="/url?q=https://www.acme.fi/&amp;sa=U&amp;ved=def">Acme again</a>
            <a href="mailto:info@acme.fi">Mail</a>
        </body></html>"#;

        let links = parse_result_links(html, &google());
        assert_eq!(
            links,
            vec![
                "https://www.acme.fi/".to_string(),
                "https://acme-oy.example/about".to_string()
            ]
        );
    }

    #[test]
    fn test_country_code_endpoint_keeps_same_suffix_results() {
        let endpoint = Url::parse("https://www.google.co.uk/search").unwrap();
        let html = r#"<html><body>
            <a href="/url?q=https://www.acme.co.uk/&amp;sa=U">Acme</a>
            <a href="https://accounts.google.co.uk/ServiceLogin">Sign in</a>
            <a href="https://maps.google.co.uk/maps?q=acme">Maps</a>
            <a href="https://widgets.co.uk/">Widgets</a>
        </body></html>"#;

        assert_eq!(
            parse_result_links(html, &endpoint),
            vec![
                "https://www.acme.co.uk/".to_string(),
                "https://widgets.co.uk/".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_page_without_results() {
        let html = "<html><body><p>No results</p></body></html>";
        assert!(parse_result_links(html, &google()).is_empty());
    }

    #[test]
    fn test_other_port_on_same_ip_is_a_result() {
        let endpoint = Url::parse("http://127.0.0.1:4000/search").unwrap();
        let html = r#"<a href="http://127.0.0.1:5000/home">site</a>
                      <a href="http://127.0.0.1:4000/preferences">prefs</a>"#;
        assert_eq!(
            parse_result_links(html, &endpoint),
            vec!["http://127.0.0.1:5000/home".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_sends_query_and_limits_results() {
        let server = MockServer::start();
        let results_page = r#"<html><body>
            <a href="/url?q=https://one.example/">1</a>
            <a href="/url?q=https://two.example/">2</a>
            <a href="/url?q=https://three.example/">3</a>
        </body></html>"#;

        let search_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Acme Oy official site")
                .query_param("num", "4")
                .query_param("hl", "en")
                .query_param("start", "0");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(results_page);
        });

        let search = GoogleSearch::new(&server.url("/search")).unwrap();
        let results = search.search("Acme Oy official site", 2, "en").await.unwrap();

        search_mock.assert();
        assert_eq!(
            results,
            vec!["https://one.example/".to_string(), "https://two.example/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_pages_until_no_new_results() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET).path("/search").query_param("start", "0");
            then.status(200)
                .body(r#"<a href="/url?q=https://one.example/">1</a>"#);
        });
        let second = server.mock(|when, then| {
            when.method(GET).path("/search").query_param("start", "3");
            then.status(200)
                .body(r#"<a href="/url?q=https://one.example/">1</a>"#);
        });

        let search = GoogleSearch::new(&server.url("/search")).unwrap();
        let results = search.search("Acme", 3, "en").await.unwrap();

        first.assert();
        second.assert();
        assert_eq!(results, vec!["https://one.example/".to_string()]);
    }

    #[tokio::test]
    async fn test_search_rate_limited() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(429);
        });

        let search = GoogleSearch::new(&server.url("/search")).unwrap();
        let err = search.search("Acme", 5, "en").await.unwrap_err();
        assert_eq!(err, SearchError::RateLimited);
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(503);
        });

        let search = GoogleSearch::new(&server.url("/search")).unwrap();
        let err = search.search("Acme", 5, "en").await.unwrap_err();
        assert_eq!(err, SearchError::Status(503));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        assert!(GoogleSearch::new("not a url").is_err());
    }
}
