//! Static HTML documents
//!
//! `StaticPage` answers the `Page` queries straight from parsed HTML. Nothing
//! runs, so a selector is either present when the page is loaded or never.

use crate::page::{collapse_whitespace, parse_selector, Page};
use crate::{ExtractError, ExtractResult};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Elements whose content is never rendered as text
const NON_RENDERED: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements that start a new line in rendered text
const LINE_BREAKING: [&str; 13] = [
    "br", "p", "div", "li", "tr", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// A parsed HTML document
pub struct StaticPage {
    url: String,
    document: Html,
}

impl StaticPage {
    /// Parses `html` as the document found at `url`
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }

    /// Returns true if at least one element matches `selector`
    ///
    /// An invalid selector never matches.
    pub fn has_selector(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(parsed) => self.document.select(&parsed).next().is_some(),
            Err(_) => {
                tracing::warn!("Invalid selector '{}'", selector);
                false
            }
        }
    }
}

#[async_trait]
impl Page for StaticPage {
    fn url(&self) -> &str {
        &self.url
    }

    /// The document never changes, so there is nothing to wait for
    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> ExtractResult<bool> {
        let parsed = parse_selector(selector)?;
        Ok(self.document.select(&parsed).next().is_some())
    }

    async fn texts(&self, selector: &str) -> ExtractResult<Vec<String>> {
        let parsed = parse_selector(selector)?;
        Ok(self.document.select(&parsed).map(rendered_text).collect())
    }

    async fn texts_within(&self, scope: &str, inner: &str) -> ExtractResult<Vec<String>> {
        let scope_selector = parse_selector(scope)?;
        let inner_selector = parse_selector(inner)?;

        let container = self
            .document
            .select(&scope_selector)
            .next()
            .ok_or_else(|| ExtractError::MissingElement(scope.to_string()))?;

        Ok(container.select(&inner_selector).map(rendered_text).collect())
    }
}

/// Text of an element as a reader sees it
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if NON_RENDERED.contains(&name) {
                continue;
            }
            collect_text(child, out);
            if LINE_BREAKING.contains(&name) {
                out.push('\n');
            }
        }
    }
}
