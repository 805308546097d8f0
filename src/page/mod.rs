//! Evidence pages
//!
//! This module contains:
//! - `Page`, the query surface layouts read a loaded document through
//! - `Navigator`, which opens an evidence link and hands back its `Page`
//! - Two navigators: a headless browser that runs the page's scripts first, and
//!   a plain HTTP fetcher that matches the served HTML as-is
//!
//! One navigator is created per run and reused for every record.

mod browser;
mod fetcher;
mod html;

pub use browser::BrowserSession;
pub use fetcher::{build_http_client, fetch_page, FetchResult, HttpNavigator};
pub use html::StaticPage;

use crate::config::{FetcherConfig, RenderEngine};
use crate::{ExtractError, ExtractResult, NavigationError};
use async_trait::async_trait;
use scraper::Selector;
use std::time::Duration;
use url::Url;

/// A loaded evidence page
///
/// Text is always the rendered text of an element: what a reader sees, with
/// whitespace runs collapsed to single spaces and trimmed.
#[async_trait]
pub trait Page: Send + Sync {
    /// URL the document was loaded from (after redirects)
    fn url(&self) -> &str;

    /// Waits up to `timeout` for an element matching `selector` to exist
    ///
    /// Returns `Ok(false)` when the time runs out, and `InvalidSelector` when
    /// `selector` is not valid CSS.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> ExtractResult<bool>;

    /// Rendered text of every element matching `selector`, in document order
    async fn texts(&self, selector: &str) -> ExtractResult<Vec<String>>;

    /// Rendered text of every `inner` element inside the first `scope` element
    async fn texts_within(&self, scope: &str, inner: &str) -> ExtractResult<Vec<String>>;

    /// Rendered text of the first element matching `selector`
    async fn text(&self, selector: &str) -> ExtractResult<String> {
        self.nth_text(selector, 0).await
    }

    /// Rendered text of the `n`-th (zero-based) element matching `selector`
    async fn nth_text(&self, selector: &str, n: usize) -> ExtractResult<String> {
        self.texts(selector)
            .await?
            .into_iter()
            .nth(n)
            .ok_or_else(|| ExtractError::MissingElement(selector.to_string()))
    }
}

/// Opens evidence links
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Short name shown in logs
    fn engine(&self) -> &'static str;

    /// Loads `url` and returns the document once it is ready to be matched
    async fn open(&self, url: &str) -> Result<Box<dyn Page>, NavigationError>;

    /// Releases whatever the navigator holds (browser process, connections)
    async fn close(&mut self) {}
}

/// Creates the navigator selected by `[fetcher] engine`
pub async fn open_navigator(config: &FetcherConfig) -> crate::Result<Box<dyn Navigator>> {
    let navigator: Box<dyn Navigator> = match config.engine {
        RenderEngine::Browser => Box::new(BrowserSession::launch(config).await?),
        RenderEngine::Static => Box::new(HttpNavigator::new(config)?),
    };
    tracing::info!("Opening evidence links with the {} engine", navigator.engine());
    Ok(navigator)
}

/// Evidence links must be absolute http(s) URLs
pub(crate) fn parse_evidence_url(url: &str) -> Result<Url, String> {
    let parsed = Url::parse(url.trim()).map_err(|e| e.to_string())?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("unsupported scheme '{}'", parsed.scheme()));
    }

    Ok(parsed)
}

pub(crate) fn parse_selector(selector: &str) -> ExtractResult<Selector> {
    Selector::parse(selector).map_err(|_| ExtractError::InvalidSelector(selector.to_string()))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
