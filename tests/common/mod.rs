#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use streamcheck::{BrowserEngine, ElementHandle, ElementState, SelectorStrategy};

pub const BASE: &str = "https://www.disneyplus.com";
pub const LOGIN_URL: &str = "https://www.disneyplus.com/identity/login/enter-email";
pub const PASSWORD_URL: &str = "https://www.disneyplus.com/identity/login/enter-password";
pub const PROFILE_URL: &str = "https://www.disneyplus.com/select-profile";
pub const HOME_URL: &str = "https://www.disneyplus.com/home";
pub const SEARCH_URL: &str = "https://www.disneyplus.com/search";

pub const EMAIL: &str = "disney.bot@disneyplustesting.com";
pub const PASSWORD: &str = "Test123!";

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub count: usize,
    pub visible: bool,
    pub enabled: bool,
    pub editable: bool,
    /// Only attached while the URL contains this.
    pub route: Option<String>,
    /// Only attached once the page has been scrolled this many times since
    /// the last reload.
    pub after_scrolls: Option<u32>,
}

impl FakeElement {
    pub fn visible() -> Self {
        Self {
            count: 1,
            visible: true,
            enabled: true,
            editable: false,
            route: None,
            after_scrolls: None,
        }
    }

    pub fn input() -> Self {
        Self {
            editable: true,
            ..Self::visible()
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::visible()
        }
    }

    pub fn on(mut self, route: &str) -> Self {
        self.route = Some(route.to_string());
        self
    }

    pub fn after_scrolls(mut self, scrolls: u32) -> Self {
        self.after_scrolls = Some(scrolls);
        self
    }

    pub fn times(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeDom {
    pub url: String,
    pub elements: HashMap<String, FakeElement>,
    /// Filled values keyed by strategy label.
    pub values: HashMap<String, String>,
    pub scroll_position: u32,
    pub scrolls: u32,
    pub reloads: u32,
    pub navigations: Vec<String>,
    /// Element names, in click order.
    pub clicks: Vec<String>,
    pub clicked_strategies: Vec<SelectorStrategy>,
    pub keys: Vec<(String, String)>,
    pub locate_calls: HashMap<String, u32>,
}

impl FakeDom {
    pub fn add(&mut self, strategy: SelectorStrategy, element: FakeElement) {
        self.elements.insert(strategy.to_string(), element);
    }

    pub fn value_of(&self, strategy: &SelectorStrategy) -> Option<&str> {
        self.values.get(&strategy.to_string()).map(String::as_str)
    }

    fn attached(&self, strategy: &SelectorStrategy) -> Option<&FakeElement> {
        self.elements.get(&strategy.to_string()).filter(|el| {
            el.route.as_ref().map_or(true, |r| self.url.contains(r.as_str()))
                && el.after_scrolls.map_or(true, |n| self.scroll_position >= n)
        })
    }
}

type Effect = Arc<dyn Fn(&mut FakeDom) + Send + Sync>;

/// In-memory stand-in for a browser page. Elements are keyed by the label
/// of the strategy that finds them; clicks and fills can run effects that
/// mutate the page.
pub struct FakeEngine {
    dom: Mutex<FakeDom>,
    click_effects: HashMap<String, Effect>,
    fill_effects: HashMap<String, Effect>,
}

impl FakeEngine {
    pub fn new(url: &str) -> Self {
        Self {
            dom: Mutex::new(FakeDom {
                url: url.to_string(),
                ..FakeDom::default()
            }),
            click_effects: HashMap::new(),
            fill_effects: HashMap::new(),
        }
    }

    pub fn with(self, strategy: SelectorStrategy, element: FakeElement) -> Self {
        self.dom.lock().unwrap().add(strategy, element);
        self
    }

    pub fn on_click(
        mut self,
        strategy: SelectorStrategy,
        effect: impl Fn(&mut FakeDom) + Send + Sync + 'static,
    ) -> Self {
        self.click_effects
            .insert(strategy.to_string(), Arc::new(effect));
        self
    }

    pub fn on_fill(
        mut self,
        strategy: SelectorStrategy,
        effect: impl Fn(&mut FakeDom) + Send + Sync + 'static,
    ) -> Self {
        self.fill_effects.insert(strategy.to_string(), Arc::new(effect));
        self
    }

    pub fn dom(&self) -> std::sync::MutexGuard<'_, FakeDom> {
        self.dom.lock().unwrap()
    }

    pub fn locate_count(&self, strategy: &SelectorStrategy) -> u32 {
        self.dom()
            .locate_calls
            .get(&strategy.to_string())
            .copied()
            .unwrap_or(0)
    }

    fn attached_or_err(&self, handle: &ElementHandle) -> anyhow::Result<FakeElement> {
        self.dom()
            .attached(&handle.strategy)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("detached: {}", handle.strategy))
    }
}

#[async_trait]
impl BrowserEngine for FakeEngine {
    async fn navigate(&self, url: &str) -> anyhow::Result<()> {
        let mut dom = self.dom();
        dom.url = url.to_string();
        dom.navigations.push(url.to_string());
        dom.scroll_position = 0;
        Ok(())
    }

    async fn reload(&self) -> anyhow::Result<()> {
        let mut dom = self.dom();
        dom.reloads += 1;
        dom.scroll_position = 0;
        Ok(())
    }

    async fn current_url(&self) -> anyhow::Result<String> {
        Ok(self.dom().url.clone())
    }

    async fn locate(&self, strategy: &SelectorStrategy) -> anyhow::Result<usize> {
        let mut dom = self.dom();
        *dom.locate_calls.entry(strategy.to_string()).or_insert(0) += 1;
        Ok(dom.attached(strategy).map_or(0, |el| el.count))
    }

    async fn element_state(&self, handle: &ElementHandle) -> anyhow::Result<ElementState> {
        Ok(match self.dom().attached(&handle.strategy) {
            Some(el) => ElementState {
                attached: true,
                visible: el.visible,
                enabled: el.enabled,
                editable: el.enabled && el.editable,
            },
            None => ElementState::default(),
        })
    }

    async fn click(&self, handle: &ElementHandle) -> anyhow::Result<()> {
        self.attached_or_err(handle)?;
        let mut dom = self.dom();
        dom.clicks.push(handle.element.clone());
        dom.clicked_strategies.push(handle.strategy.clone());
        if let Some(effect) = self.click_effects.get(&handle.strategy.to_string()) {
            effect(&mut dom);
        }
        Ok(())
    }

    async fn fill(&self, handle: &ElementHandle, value: &str) -> anyhow::Result<()> {
        self.attached_or_err(handle)?;
        let mut dom = self.dom();
        dom.values
            .insert(handle.strategy.to_string(), value.to_string());
        if let Some(effect) = self.fill_effects.get(&handle.strategy.to_string()) {
            effect(&mut dom);
        }
        Ok(())
    }

    async fn press_key(&self, handle: &ElementHandle, key: &str) -> anyhow::Result<()> {
        self.attached_or_err(handle)?;
        self.dom()
            .keys
            .push((handle.element.clone(), key.to_string()));
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> anyhow::Result<serde_json::Value> {
        if script.contains("window.scrollBy") {
            let mut dom = self.dom();
            dom.scroll_position += 1;
            dom.scrolls += 1;
            return Ok(serde_json::json!(dom.scroll_position));
        }
        Ok(serde_json::Value::Null)
    }
}

pub fn email_input() -> SelectorStrategy {
    SelectorStrategy::role("textbox", "Email")
}

pub fn password_input() -> SelectorStrategy {
    SelectorStrategy::role("textbox", "Password")
}

pub fn search_box() -> SelectorStrategy {
    SelectorStrategy::placeholder("Search by title, genre, team")
}

pub fn heading(name: &str) -> SelectorStrategy {
    SelectorStrategy::role("heading", name)
}

/// The streaming app's happy paths: login with [`EMAIL`]/[`PASSWORD`],
/// profile pick, home with lazily rendered rails, and search.
pub fn fake_app() -> FakeEngine {
    let nav = [
        "navigation-item-0-HOME",
        "navigation-item-1-SEARCH",
        "navigation-item-2-WATCHLIST",
        "navigation-item-3-ESPN",
        "navigation-item-4-MOVIES",
        "navigation-item-5-SERIES",
        "navigation-item-6-ORIGINALS",
    ];

    let mut engine = FakeEngine::new("about:blank")
        // enter-email
        .with(email_input(), FakeElement::input().on("enter-email"))
        .with(
            SelectorStrategy::test_id("continue-btn"),
            FakeElement::visible().on("enter-email"),
        )
        .on_click(SelectorStrategy::test_id("continue-btn"), |dom| {
            let email = dom.value_of(&email_input()).unwrap_or("").to_string();
            if email.contains('@') {
                dom.url = PASSWORD_URL.to_string();
            } else {
                dom.add(
                    SelectorStrategy::text("This email isn't properly"),
                    FakeElement::visible().on("enter-email"),
                );
            }
        })
        // enter-password
        .with(password_input(), FakeElement::input().on("enter-password"))
        .with(
            SelectorStrategy::role("button", "Log In"),
            FakeElement::visible().on("enter-password"),
        )
        .on_click(SelectorStrategy::role("button", "Log In"), |dom| {
            if dom.value_of(&password_input()) == Some(PASSWORD) {
                dom.url = PROFILE_URL.to_string();
            } else {
                dom.add(
                    SelectorStrategy::text("We couldn't log you in."),
                    FakeElement::visible().on("enter-password"),
                );
            }
        })
        // select-profile
        .with(
            SelectorStrategy::test_id("profile-avatar-0"),
            FakeElement::visible().on("select-profile"),
        )
        .with(
            SelectorStrategy::test_id("edit-profiles-button"),
            FakeElement::visible().on("select-profile"),
        )
        .on_click(SelectorStrategy::test_id("profile-avatar-0"), |dom| {
            dom.url = HOME_URL.to_string();
        })
        // home
        .with(
            heading("Recommended For You"),
            FakeElement::visible().on("/home"),
        )
        .with(
            heading("Continue Watching"),
            FakeElement::visible().on("/home").after_scrolls(2),
        )
        .with(
            heading("Top 10"),
            FakeElement::visible().on("/home").after_scrolls(4),
        )
        .on_click(SelectorStrategy::test_id("navigation-item-1-SEARCH"), |dom| {
            dom.url = SEARCH_URL.to_string();
        })
        // search
        .with(search_box(), FakeElement::input().on("/search"))
        .on_fill(search_box(), |dom| {
            if dom.value_of(&search_box()) == Some("Deadpool") {
                dom.add(
                    SelectorStrategy::role("link", "Deadpool & Wolverine"),
                    FakeElement::visible().on("/search"),
                );
            }
        });

    for id in nav {
        engine = engine.with(SelectorStrategy::test_id(id), FakeElement::visible().on("/home"));
    }
    engine
}
