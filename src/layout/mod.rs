//! Journal page layouts
//!
//! Journal platforms render article metadata with different DOM structures. Each
//! known structure is a `Layout` strategy: a set of selectors that identify it and
//! the rules for reading title, first author and published year out of it.
//!
//! Strategies live in a `LayoutRegistry` and are tried in registration order. The
//! first layout whose required selectors all appear on the page is used; there
//! is no scoring and no fallback beyond the registered list.
//!
//! A layout's selectors are waited for one after another, each for up to the
//! selector timeout, so the worst case for one layout is the timeout times its
//! number of selectors. The first selector that does not show up in time ends
//! that layout's attempt.

mod banner;
pub mod date;
mod ojs;
mod page_header;

pub use banner::BannerArticleLayout;
pub use ojs::OjsArticleLayout;
pub use page_header::PageHeaderLayout;

use crate::page::Page;
use crate::{ExtractError, ExtractResult};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// The three fields read from a matched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    pub title: String,
    pub first_author: String,
    pub published_year: String,
}

impl ExtractedFields {
    /// Builds the field set, rejecting empty values
    pub fn new(
        title: impl Into<String>,
        first_author: impl Into<String>,
        published_year: impl Into<String>,
    ) -> ExtractResult<Self> {
        let fields = Self {
            title: title.into(),
            first_author: first_author.into(),
            published_year: published_year.into(),
        };

        if fields.title.trim().is_empty() {
            return Err(ExtractError::EmptyField("title"));
        }
        if fields.first_author.trim().is_empty() {
            return Err(ExtractError::EmptyField("first_author"));
        }
        if fields.published_year.trim().is_empty() {
            return Err(ExtractError::EmptyField("published_year"));
        }

        Ok(fields)
    }
}

/// A recognised page structure
#[async_trait]
pub trait Layout: Send + Sync {
    /// Stable name used in logs
    fn name(&self) -> &'static str;

    /// Selectors that must all be present for this layout to apply
    fn required_selectors(&self) -> &[&'static str];

    /// Reads the metadata fields from a page this layout matched
    async fn extract(&self, page: &dyn Page) -> ExtractResult<ExtractedFields>;

    /// Waits for every required selector in turn, each for up to `timeout`
    async fn matches(&self, page: &dyn Page, timeout: Duration) -> bool {
        for selector in self.required_selectors() {
            match page.wait_for_selector(selector, timeout).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(
                        "Layout {}: '{}' did not appear within {:?}",
                        self.name(),
                        selector,
                        timeout
                    );
                    return false;
                }
                Err(e) => {
                    tracing::warn!("Layout {}: {}", self.name(), e);
                    return false;
                }
            }
        }

        true
    }
}

/// Ordered collection of layout strategies
#[derive(Default)]
pub struct LayoutRegistry {
    layouts: Vec<Box<dyn Layout>>,
}

impl LayoutRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in layouts, in matching order
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(OjsArticleLayout));
        registry.register(Box::new(PageHeaderLayout));
        registry.register(Box::new(BannerArticleLayout));
        registry
    }

    /// Appends a layout; it is tried after every layout registered before it
    pub fn register(&mut self, layout: Box<dyn Layout>) {
        self.layouts.push(layout);
    }

    /// Registered layouts in matching order
    pub fn layouts(&self) -> impl Iterator<Item = &dyn Layout> {
        self.layouts.iter().map(|layout| layout.as_ref())
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// First layout whose required selectors all appear on `page`
    ///
    /// Every selector wait is bounded by `timeout`.
    pub async fn find_match(&self, page: &dyn Page, timeout: Duration) -> Option<&dyn Layout> {
        let count = self.layouts.len();
        for (idx, layout) in self.layouts().enumerate() {
            tracing::debug!("Trying layout {}/{} ({})", idx + 1, count, layout.name());
            if layout.matches(page, timeout).await {
                tracing::debug!("Layout {} matched {}", layout.name(), page.url());
                return Some(layout);
            }
        }
        None
    }
}
