//! HTTP fetcher implementation
//!
//! This module opens evidence links:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests that follow a bounded number of redirects
//! - Error classification
//!
//! There is no retry. Any result other than `Success` means the evidence link
//! cannot be opened.

use crate::config::FetcherConfig;
use crate::page::{parse_evidence_url, Navigator, Page, StaticPage};
use crate::NavigationError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};

/// Maximum number of redirects followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The evidence link is not an absolute http(s) URL
    InvalidUrl {
        /// Parser or scheme error
        error: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// The parsed page, or why the link cannot be opened
    pub fn into_page(self) -> Result<StaticPage, NavigationError> {
        match self {
            Self::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!("Opened {} (HTTP {})", final_url, status_code);
                Ok(StaticPage::parse(&final_url, &body))
            }
            Self::InvalidUrl { error } => Err(NavigationError::InvalidUrl(error)),
            Self::ContentMismatch { content_type } => {
                Err(NavigationError::ContentMismatch(content_type))
            }
            Self::NetworkError { error } => Err(NavigationError::Network(error)),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The whole request, redirects and body included, is bounded by the navigation
/// timeout.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.navigation_timeout())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an evidence link
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | Unparsable URL or non-http(s) scheme | InvalidUrl |
/// | Timeout | NetworkError |
/// | Connection refused / DNS / TLS | NetworkError |
/// | Too many redirects | NetworkError |
/// | Content-Type present and not HTML | ContentMismatch |
/// | Any HTTP status with an HTML body | Success |
///
/// Error statuses still produce `Success`: the error page is what a reader of
/// the link would see, and it will simply fail to match any layout.
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let parsed = match parse_evidence_url(url) {
        Ok(parsed) => parsed,
        Err(error) => return FetchResult::InvalidUrl { error },
    };

    match client.get(parsed).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                tracing::warn!("{} answered with HTTP {}", final_url, status.as_u16());
            }

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            if !content_type.is_empty() && !is_html(&content_type) {
                return FetchResult::ContentMismatch { content_type };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: classify_error(&e),
                },
            }
        }
        Err(e) => FetchResult::NetworkError {
            error: classify_error(&e),
        },
    }
}

/// Opens evidence links with plain HTTP requests
///
/// Scripts on the page never run: layouts see exactly the HTML the server sent.
pub struct HttpNavigator {
    client: Client,
}

impl HttpNavigator {
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    fn engine(&self) -> &'static str {
        "static"
    }

    async fn open(&self, url: &str) -> Result<Box<dyn Page>, NavigationError> {
        let page = fetch_page(&self.client, url).await.into_page()?;
        Ok(Box::new(page))
    }
}

pub(crate) fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Too many redirects: {}", e)
    } else {
        e.to_string()
    }
}
