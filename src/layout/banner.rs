use crate::layout::date::year_after_comma;
use crate::layout::{ExtractedFields, Layout};
use crate::page::Page;
use crate::{ExtractError, ExtractResult};
use async_trait::async_trait;

const AUTHOR: &str = ".author-detail .author-name";
const TITLE: &str = "h3.banner-subtitle-article";
const DATE: &str = ".date-published";

/// Article page whose title sits in the banner subtitle
pub struct BannerArticleLayout;

#[async_trait]
impl Layout for BannerArticleLayout {
    fn name(&self) -> &'static str {
        "banner-article"
    }

    fn required_selectors(&self) -> &[&'static str] {
        &[AUTHOR, TITLE, DATE]
    }

    async fn extract(&self, page: &dyn Page) -> ExtractResult<ExtractedFields> {
        let title = page.text(TITLE).await?;
        let first_author = page.text(AUTHOR).await?;
        let date = page.text(DATE).await?;

        let year = year_after_comma(&date).ok_or(ExtractError::UnparsableDate(date))?;

        ExtractedFields::new(title, first_author, year)
    }
}
