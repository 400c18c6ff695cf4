use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;

use crate::interaction::wait::poll_until;
use crate::selectors::SelectorStrategy;

/// A resolved element: the strategy that found it and its position among
/// that strategy's matches. Re-evaluated against the live DOM on every use,
/// so a handle never goes stale across navigations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub element: String,
    pub strategy: SelectorStrategy,
    pub index: usize,
}

/// Interactability snapshot of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementState {
    pub attached: bool,
    pub visible: bool,
    pub enabled: bool,
    pub editable: bool,
}

/// The browser-automation capabilities the harness consumes.
///
/// Implementations answer primitive queries; the bounded waits are provided
/// here on top of them so every engine polls the same way.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    async fn reload(&self) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Number of elements `strategy` matches right now.
    async fn locate(&self, strategy: &SelectorStrategy) -> Result<usize>;

    async fn element_state(&self, handle: &ElementHandle) -> Result<ElementState>;

    async fn click(&self, handle: &ElementHandle) -> Result<()>;

    /// Replace the element's value with `value`.
    async fn fill(&self, handle: &ElementHandle, value: &str) -> Result<()>;

    async fn press_key(&self, handle: &ElementHandle, key: &str) -> Result<()>;

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Time between successive checks in the default waits.
    fn poll_interval(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Wait until the element is visible. `Ok(false)` on timeout.
    async fn wait_for_visible(&self, handle: &ElementHandle, timeout: Duration) -> Result<bool> {
        poll_until(timeout, self.poll_interval(), move || async move {
            Ok::<_, anyhow::Error>(self.element_state(handle).await?.visible)
        })
        .await
    }

    /// Wait until the current URL matches `pattern`. `Ok(false)` on timeout.
    async fn wait_for_url(&self, pattern: &Regex, timeout: Duration) -> Result<bool> {
        poll_until(timeout, self.poll_interval(), move || async move {
            Ok::<_, anyhow::Error>(pattern.is_match(&self.current_url().await?))
        })
        .await
    }
}
