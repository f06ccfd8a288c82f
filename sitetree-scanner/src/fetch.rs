use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// A fetched response: its content type (if the server sent one) and, for
/// HTML responses only, the body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub content_type: Option<String>,
    pub body: Option<String>,
}

impl FetchedPage {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Some(body.into()),
        }
    }

    /// A response whose body was left unread.
    pub fn skipped(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            body: None,
        }
    }
}

/// A missing content type counts as HTML; otherwise the media type must be
/// `text/html` or `application/xhtml+xml`.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    media_type == "text/html" || media_type == "application/xhtml+xml"
}

/// Capability to retrieve a page. Implementations must be shareable across
/// crawl tasks.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// [`PageFetcher`] over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("Sitetree/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        debug!(%url, "fetching");

        let response = self.client.get(url.clone()).send().await?;
        trace!(%url, status = response.status().as_u16(), "response headers received");
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Dropping the response closes the body without reading it.
        if !is_html_content_type(content_type.as_deref()) {
            return Ok(FetchedPage {
                content_type,
                body: None,
            });
        }

        let body = response.text().await?;
        Ok(FetchedPage {
            content_type,
            body: Some(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_is_html_content_type_variants() {
        assert!(is_html_content_type(None));
        assert!(is_html_content_type(Some("text/html")));
        assert!(is_html_content_type(Some("text/html; charset=UTF-8")));
        assert!(is_html_content_type(Some("TEXT/HTML")));
        assert!(is_html_content_type(Some("application/xhtml+xml")));
        assert!(!is_html_content_type(Some("application/json")));
        assert!(!is_html_content_type(Some("image/png")));
        assert!(!is_html_content_type(Some("text/plain")));
    }

    #[tokio::test]
    async fn test_http_fetcher_reads_content_type_and_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&mock_server.uri()).unwrap();
        let fetched = fetcher.fetch(&url).await.unwrap();

        assert_eq!(fetched.content_type.as_deref(), Some("text/html"));
        assert!(fetched.body.unwrap().contains("hi"));
    }

    #[tokio::test]
    async fn test_http_fetcher_leaves_non_html_body_unread() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/video.mp4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(vec![0u8; 8 * 1024 * 1024], "application/octet-stream"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/video.mp4", mock_server.uri())).unwrap();
        let fetched = fetcher.fetch(&url).await.unwrap();

        assert_eq!(
            fetched.content_type.as_deref(),
            Some("application/octet-stream")
        );
        assert!(fetched.body.is_none());
    }

    #[tokio::test]
    async fn test_http_fetcher_does_not_fail_on_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw("<a href='/home'>home</a>", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();
        let fetched = fetcher.fetch(&url).await.unwrap();

        assert!(fetched.body.unwrap().contains("/home"));
    }

    #[tokio::test]
    async fn test_http_fetcher_connection_refused() {
        let fetcher = HttpFetcher::with_timeout(2).unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, crate::error::ScanError::HttpError(_)));
    }
}
