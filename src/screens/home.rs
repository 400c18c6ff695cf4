use super::{Driver, Screen};
use crate::config::HarnessConfig;
use crate::engine::BrowserEngine;
use crate::error::VerifyResult;
use crate::resolver::{ElementBinding, LocatorResolver};
use crate::selectors::SelectorStrategy;
use crate::verifier::{LazyContentVerifier, PollReport};

/// Top navigation entries, always in the initial viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Home,
    Search,
    Watchlist,
    Espn,
    Movies,
    Series,
    Originals,
}

impl NavEntry {
    pub const ALL: [NavEntry; 7] = [
        NavEntry::Home,
        NavEntry::Search,
        NavEntry::Watchlist,
        NavEntry::Espn,
        NavEntry::Movies,
        NavEntry::Series,
        NavEntry::Originals,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavEntry::Home => "Home",
            NavEntry::Search => "Search",
            NavEntry::Watchlist => "Watchlist",
            NavEntry::Espn => "ESPN",
            NavEntry::Movies => "Movies",
            NavEntry::Series => "Series",
            NavEntry::Originals => "Originals",
        }
    }

    fn test_id(self) -> String {
        format!(
            "navigation-item-{}-{}",
            self as usize,
            self.label().to_uppercase()
        )
    }

    fn binding(self) -> ElementBinding {
        ElementBinding::new(
            format!("{} navigation entry", self.label()),
            SelectorStrategy::test_id(self.test_id()),
        )
        .or(SelectorStrategy::role("link", self.label()))
    }
}

/// Rails that load lazily as the page is scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    RecommendedForYou,
    ContinueWatching,
    Top10,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::RecommendedForYou,
        Section::ContinueWatching,
        Section::Top10,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Section::RecommendedForYou => "Recommended For You",
            Section::ContinueWatching => "Continue Watching",
            Section::Top10 => "Top 10",
        }
    }

    fn binding(self) -> ElementBinding {
        ElementBinding::new(self.heading(), SelectorStrategy::role("heading", self.heading()))
            .or(SelectorStrategy::text(self.heading()))
    }
}

pub struct HomeScreen<'a> {
    driver: Driver<'a>,
    nav: [ElementBinding; 7],
    sections: [ElementBinding; 3],
    onboarding_close: ElementBinding,
}

impl<'a> HomeScreen<'a> {
    pub fn new(engine: &'a dyn BrowserEngine, config: &'a HarnessConfig) -> Self {
        Self {
            driver: Driver::new(engine, config),
            nav: NavEntry::ALL.map(NavEntry::binding),
            sections: Section::ALL.map(Section::binding),
            onboarding_close: ElementBinding::new(
                "onboarding banner close",
                SelectorStrategy::test_id("welch-onboarding-banner-closeIcon"),
            ),
        }
    }

    fn nav_binding(&self, entry: NavEntry) -> &ElementBinding {
        &self.nav[entry as usize]
    }

    fn section_binding(&self, section: Section) -> &ElementBinding {
        &self.sections[section as usize]
    }

    /// The Home entry is the first thing to render after profile selection,
    /// so it gets the navigation timeout.
    pub async fn assert_loaded(&self) -> VerifyResult<()> {
        let config = self.driver.config();
        self.driver
            .assert_visible_within(self.nav_binding(NavEntry::Home), config.navigation_timeout())
            .await
    }

    pub async fn assert_nav_entry_visible(&self, entry: NavEntry) -> VerifyResult<()> {
        self.driver.assert_visible(self.nav_binding(entry)).await
    }

    pub async fn assert_section_visible(&self, section: Section) -> VerifyResult<PollReport> {
        let config = self.driver.config();
        LazyContentVerifier::new(self.driver.engine(), &config.lazy_content)
            .with_terminal_wait(config.element_timeout())
            .verify(self.section_binding(section))
            .await
    }

    pub async fn open_search(&self) -> VerifyResult<()> {
        self.driver.click(self.nav_binding(NavEntry::Search)).await
    }

    /// Close the onboarding banner if one is showing. Returns whether it was.
    pub async fn dismiss_onboarding_banner(&self) -> VerifyResult<bool> {
        let engine = self.driver.engine();
        let resolver = LocatorResolver::new(engine, std::time::Duration::ZERO);
        let Some(handle) = resolver.try_resolve(&self.onboarding_close).await? else {
            return Ok(false);
        };
        if !engine.element_state(&handle).await?.visible {
            return Ok(false);
        }
        engine.click(&handle).await?;
        Ok(true)
    }
}

impl Screen for HomeScreen<'_> {
    fn name(&self) -> &'static str {
        "Home"
    }

    fn bindings(&self) -> Vec<&ElementBinding> {
        self.nav
            .iter()
            .chain(self.sections.iter())
            .chain(std::iter::once(&self.onboarding_close))
            .collect()
    }
}
