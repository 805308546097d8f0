//! Headless browser navigator
//!
//! Evidence pages are opened in a single Chromium tab driven over the DevTools
//! protocol. Navigation waits for the page's load event within the navigation
//! timeout, so scripts have run by the time layouts are matched. Selector waits
//! poll the live DOM, and text is read from `innerText`.

use crate::config::FetcherConfig;
use crate::page::fetcher::is_html;
use crate::page::{collapse_whitespace, parse_evidence_url, parse_selector, Navigator, Page};
use crate::{BrowserError, ExtractError, ExtractResult, NavigationError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page as Tab;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How often a selector wait re-checks the DOM
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A running browser with the one tab every record is opened in
pub struct BrowserSession {
    browser: Mutex<Browser>,
    tab: Tab,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserSession {
    /// Launches Chromium and opens a blank tab
    pub async fn launch(config: &FetcherConfig) -> Result<Self, BrowserError> {
        let (browser, mut handler) = Browser::launch(browser_config(config)?).await?;

        // The protocol connection only makes progress while its handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        let tab = browser.new_page("about:blank").await?;
        tracing::info!(
            "Browser started (headless: {}, navigation timeout: {:?})",
            config.headless,
            config.navigation_timeout()
        );

        Ok(Self {
            browser: Mutex::new(browser),
            tab,
            handler,
            navigation_timeout: config.navigation_timeout(),
        })
    }
}

fn browser_config(config: &FetcherConfig) -> Result<BrowserConfig, BrowserError> {
    let mut builder = BrowserConfig::builder()
        .request_timeout(config.navigation_timeout())
        .arg(format!("--user-agent={}", config.user_agent));

    if !config.headless {
        builder = builder.with_head();
    }
    if let Some(executable) = &config.browser_executable {
        builder = builder.chrome_executable(executable);
    }

    builder.build().map_err(BrowserError::Config)
}

#[async_trait]
impl Navigator for BrowserSession {
    fn engine(&self) -> &'static str {
        "browser"
    }

    async fn open(&self, url: &str) -> Result<Box<dyn Page>, NavigationError> {
        let parsed = parse_evidence_url(url).map_err(NavigationError::InvalidUrl)?;

        match tokio::time::timeout(self.navigation_timeout, self.tab.goto(parsed.as_str())).await {
            Err(_) => return Err(NavigationError::Timeout(self.navigation_timeout)),
            Ok(Err(e)) => return Err(NavigationError::Network(e.to_string())),
            Ok(Ok(_)) => {}
        }

        let page = BrowserPage {
            tab: self.tab.clone(),
            url: parsed.to_string(),
        };

        // Chromium renders PDFs and images in a viewer; those are not articles
        let content_type: String = page
            .evaluate("document.contentType".to_string())
            .await
            .map_err(|e| NavigationError::Network(e.to_string()))?;
        if !is_html(&content_type) {
            return Err(NavigationError::ContentMismatch(content_type));
        }

        let final_url: String = page
            .evaluate("window.location.href".to_string())
            .await
            .unwrap_or_else(|_| page.url.clone());
        tracing::debug!("Loaded {}", final_url);

        Ok(Box::new(BrowserPage {
            url: final_url,
            ..page
        }))
    }

    async fn close(&mut self) {
        let browser = self.browser.get_mut();
        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close the browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!("Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();
        tracing::info!("Browser closed");
    }
}

/// The document currently shown in the session's tab
struct BrowserPage {
    tab: Tab,
    url: String,
}

#[derive(Deserialize)]
struct ScopedTexts {
    found: bool,
    texts: Vec<String>,
}

impl BrowserPage {
    /// Evaluates a script expression and deserializes its value
    async fn evaluate<T: DeserializeOwned>(&self, expression: String) -> ExtractResult<T> {
        let params = EvaluateParams::builder()
            .expression(expression)
            .return_by_value(true)
            .build()
            .map_err(ExtractError::Render)?;

        self.tab
            .evaluate_expression(params)
            .await
            .map_err(|e| ExtractError::Render(e.to_string()))?
            .into_value()
            .map_err(|e| ExtractError::Render(e.to_string()))
    }
}

#[async_trait]
impl Page for BrowserPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> ExtractResult<bool> {
        let expression = format!("document.querySelector({}) !== null", js_selector(selector)?);
        let deadline = Instant::now() + timeout;

        loop {
            if self.evaluate::<bool>(expression.clone()).await? {
                return Ok(true);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn texts(&self, selector: &str) -> ExtractResult<Vec<String>> {
        let expression = format!(
            "Array.from(document.querySelectorAll({}), e => e.innerText ?? e.textContent ?? '')",
            js_selector(selector)?
        );
        let texts: Vec<String> = self.evaluate(expression).await?;
        Ok(texts.iter().map(|text| collapse_whitespace(text)).collect())
    }

    async fn texts_within(&self, scope: &str, inner: &str) -> ExtractResult<Vec<String>> {
        let expression = format!(
            "(() => {{ \
                const scope = document.querySelector({}); \
                if (!scope) return {{ found: false, texts: [] }}; \
                const texts = Array.from(scope.querySelectorAll({}), e => e.innerText ?? e.textContent ?? ''); \
                return {{ found: true, texts }}; \
            }})()",
            js_selector(scope)?,
            js_selector(inner)?
        );

        let scoped: ScopedTexts = self.evaluate(expression).await?;
        if !scoped.found {
            return Err(ExtractError::MissingElement(scope.to_string()));
        }
        Ok(scoped.texts.iter().map(|text| collapse_whitespace(text)).collect())
    }
}

/// Validates `selector` and quotes it as a script string literal
fn js_selector(selector: &str) -> ExtractResult<String> {
    parse_selector(selector)?;
    serde_json::to_string(selector).map_err(|e| ExtractError::Render(e.to_string()))
}
