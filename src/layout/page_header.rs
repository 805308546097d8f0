use crate::layout::date::year_after_comma;
use crate::layout::{ExtractedFields, Layout};
use crate::page::Page;
use crate::{ExtractError, ExtractResult};
use async_trait::async_trait;

const TITLE: &str = "h1.page-header";
const AUTHOR: &str = ".author strong";
const DATE: &str = ".date-published";

/// Zero-based index of the fallback date element
///
/// This is the second `.date-published` element in document order, not
/// `.date-published:nth-of-type(2)`. The `nth-of-type` form only matches when
/// the date is the second element of its tag among its siblings, so it misses
/// dates that sit in separate containers or after other `div`s.
const FALLBACK_DATE_INDEX: usize = 1;

/// Article page with a `page-header` title and `Month Day, Year` dates
///
/// Some of these pages carry two date elements (submitted and published). When
/// the first one is not in `Month Day, Year` form the second one is read.
pub struct PageHeaderLayout;

#[async_trait]
impl Layout for PageHeaderLayout {
    fn name(&self) -> &'static str {
        "page-header"
    }

    fn required_selectors(&self) -> &[&'static str] {
        &[TITLE, AUTHOR, DATE]
    }

    async fn extract(&self, page: &dyn Page) -> ExtractResult<ExtractedFields> {
        let title = page.text(TITLE).await?;
        let first_author = page.text(AUTHOR).await?;

        let first_date = page.text(DATE).await?;
        let date = if first_date.contains(',') {
            first_date
        } else {
            tracing::debug!("First {} has no comma, reading the second one", DATE);
            page.nth_text(DATE, FALLBACK_DATE_INDEX).await?
        };

        let year = year_after_comma(&date).ok_or(ExtractError::UnparsableDate(date))?;

        ExtractedFields::new(title, first_author, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_millis(100);

    fn page(dates: &str) -> StaticPage {
        let html = format!(
            r#"<html><body>
                <h1 class="page-header">Study X</h1>
                <div class="author"><strong>Jane Doe</strong>, University</div>
                {}
            </body></html>"#,
            dates
        );
        StaticPage::parse("https://journal.example.org/index.php/j/article/view/27", &html)
    }

    #[tokio::test]
    async fn test_extracts_fields() {
        let page = page(r#"<div class="date-published">March 3, 2022</div>"#);
        assert!(PageHeaderLayout.matches(&page, TIMEOUT).await);

        let fields = PageHeaderLayout.extract(&page).await.unwrap();
        assert_eq!(fields.title, "Study X");
        assert_eq!(fields.first_author, "Jane Doe");
        assert_eq!(fields.published_year, "2022");
    }

    #[tokio::test]
    async fn test_falls_back_to_second_date() {
        let page = page(
            r#"<div class="date-published">Submitted</div>
               <div class="date-published">June 9, 2021</div>"#,
        );
        let fields = PageHeaderLayout.extract(&page).await.unwrap();
        assert_eq!(fields.published_year, "2021");
    }

    #[tokio::test]
    async fn test_second_date_in_separate_container() {
        let page = page(
            r#"<section><div class="date-published">Submitted</div></section>
               <aside><span>Published</span><span class="date-published">June 9, 2021</span></aside>"#,
        );
        let fields = PageHeaderLayout.extract(&page).await.unwrap();
        assert_eq!(fields.published_year, "2021");
    }

    #[tokio::test]
    async fn test_no_usable_date_is_an_error() {
        let page = page(r#"<div class="date-published">2022</div>"#);
        assert_eq!(
            PageHeaderLayout.extract(&page).await,
            Err(ExtractError::MissingElement(DATE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_comma_without_space_is_an_error() {
        let page = page(r#"<div class="date-published">March 3,2022</div>"#);
        assert!(matches!(
            PageHeaderLayout.extract(&page).await,
            Err(ExtractError::UnparsableDate(_))
        ));
    }
}
