use crate::layout::date::year_from_longest_token;
use crate::layout::{ExtractedFields, Layout};
use crate::page::Page;
use crate::{ExtractError, ExtractResult};
use async_trait::async_trait;

const TITLE: &str = "h1.page_title";
const PUBLISHED: &str = ".entry_details .item.published .value";
const AUTHORS: &str = ".item.authors";
const AUTHOR_NAME: &str = ".name";

/// Open Journal Systems 3 article page
///
/// The author list is a block of `.name` entries; the published date is numeric
/// (`2023-05-01` or `01/05/2023`).
pub struct OjsArticleLayout;

#[async_trait]
impl Layout for OjsArticleLayout {
    fn name(&self) -> &'static str {
        "ojs-article"
    }

    fn required_selectors(&self) -> &[&'static str] {
        &[TITLE, PUBLISHED, AUTHORS]
    }

    async fn extract(&self, page: &dyn Page) -> ExtractResult<ExtractedFields> {
        let title = page.text(TITLE).await?;
        let published = page.text(PUBLISHED).await?;
        let first_author = page
            .texts_within(AUTHORS, AUTHOR_NAME)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ExtractError::MissingElement(format!("{} {}", AUTHORS, AUTHOR_NAME)))?;

        let year = year_from_longest_token(&published)
            .ok_or(ExtractError::UnparsableDate(published))?;

        ExtractedFields::new(title, first_author, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_millis(100);

    fn ojs_page(published: &str, authors: &str) -> StaticPage {
        let html = format!(
            r#"<html><body>
                <h1 class="page_title"> Study X </h1>
                <div class="entry_details">
                    <div class="item published">
                        <div class="label">Published</div>
                        <div class="value"><span>{}</span></div>
                    </div>
                </div>
                <section class="item authors">{}</section>
            </body></html>"#,
            published, authors
        );
        StaticPage::parse("https://journal.example.org/article/view/1", &html)
    }

    #[tokio::test]
    async fn test_matches_and_extracts() {
        let page = ojs_page(
            "2023-05-01",
            r#"<ul><li><span class="name">Jane Doe</span></li><li><span class="name">John Roe</span></li></ul>"#,
        );

        assert!(OjsArticleLayout.matches(&page, TIMEOUT).await);
        let fields = OjsArticleLayout.extract(&page).await.unwrap();
        assert_eq!(fields.title, "Study X");
        assert_eq!(fields.first_author, "Jane Doe");
        assert_eq!(fields.published_year, "2023");
    }

    #[tokio::test]
    async fn test_slash_date() {
        let page = ojs_page("01/05/2021", r#"<span class="name">Jane Doe</span>"#);
        let fields = OjsArticleLayout.extract(&page).await.unwrap();
        assert_eq!(fields.published_year, "2021");
    }

    #[tokio::test]
    async fn test_no_author_names_is_an_error() {
        let page = ojs_page("2023-05-01", "<p>Anonymous</p>");
        assert!(OjsArticleLayout.matches(&page, TIMEOUT).await);
        assert!(matches!(
            OjsArticleLayout.extract(&page).await,
            Err(ExtractError::MissingElement(_))
        ));
    }

    #[tokio::test]
    async fn test_does_not_match_other_layouts() {
        let page = StaticPage::parse(
            "https://example.com",
            r#"<h1 class="page-header">T</h1><div class="author"><strong>A</strong></div>"#,
        );
        assert!(!OjsArticleLayout.matches(&page, TIMEOUT).await);
    }
}
