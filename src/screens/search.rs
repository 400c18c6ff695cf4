use super::{Driver, Screen};
use crate::config::HarnessConfig;
use crate::engine::BrowserEngine;
use crate::error::VerifyResult;
use crate::resolver::ElementBinding;
use crate::selectors::SelectorStrategy;

pub struct SearchScreen<'a> {
    driver: Driver<'a>,
    search_box: ElementBinding,
}

impl<'a> SearchScreen<'a> {
    pub fn new(engine: &'a dyn BrowserEngine, config: &'a HarnessConfig) -> Self {
        Self {
            driver: Driver::new(engine, config),
            search_box: ElementBinding::new(
                "search box",
                SelectorStrategy::placeholder("Search by title, genre, team"),
            )
            .or(SelectorStrategy::css(r#"input[type="search"]"#))
            .or(SelectorStrategy::role("searchbox", "Search")),
        }
    }

    pub async fn assert_search_box_editable(&self) -> VerifyResult<()> {
        self.driver.assert_editable(&self.search_box).await
    }

    /// Focus the search box, require it to be editable, then type `term`.
    pub async fn enter_query(&self, term: &str) -> VerifyResult<()> {
        self.driver.click(&self.search_box).await?;
        self.assert_search_box_editable().await?;
        self.driver.fill(&self.search_box, term).await
    }

    pub async fn submit_query(&self) -> VerifyResult<()> {
        let handle = self.driver.resolve(&self.search_box).await?;
        self.driver.engine().press_key(&handle, "Enter").await?;
        Ok(())
    }

    /// A result entry whose accessible name contains `title` is visible.
    pub async fn assert_result_present(&self, title: &str) -> VerifyResult<()> {
        let result = ElementBinding::new(
            format!("search result '{}'", title),
            SelectorStrategy::role("link", title),
        )
        .or(SelectorStrategy::text(title));
        self.driver.assert_visible(&result).await
    }
}

impl Screen for SearchScreen<'_> {
    fn name(&self) -> &'static str {
        "Search"
    }

    fn bindings(&self) -> Vec<&ElementBinding> {
        vec![&self.search_box]
    }
}
