use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::page::Page;
use std::time::Duration;

use crate::engine::{BrowserEngine, ElementHandle, ElementState};
use crate::interaction::{click, keyboard, wait};
use crate::selectors;

/// [`BrowserEngine`] over a Chrome page, driven by evaluated JS.
#[derive(Clone)]
pub struct CdpEngine {
    page: Page,
    poll_interval: Duration,
}

impl CdpEngine {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            poll_interval: Duration::from_millis(100),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl BrowserEngine for CdpEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::info!("Navigating to: {}", url);
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {}", url))?;
        // goto() waits for the load event; give client-side rendering a beat.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.page.reload().await.context("Failed to reload")?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .page
            .url()
            .await
            .context("Failed to read page URL")?
            .unwrap_or_default())
    }

    async fn locate(&self, strategy: &selectors::SelectorStrategy) -> Result<usize> {
        let count: usize = self
            .page
            .evaluate(selectors::count_js(strategy)?)
            .await
            .with_context(|| format!("Failed to evaluate {}", strategy))?
            .into_value()
            .with_context(|| format!("Failed to parse match count for {}", strategy))?;
        Ok(count)
    }

    async fn element_state(&self, handle: &ElementHandle) -> Result<ElementState> {
        let element_js = selectors::nth_match_js(&handle.strategy, handle.index)?;
        wait::element_state(&self.page, &element_js).await
    }

    async fn click(&self, handle: &ElementHandle) -> Result<()> {
        let element_js = selectors::nth_match_js(&handle.strategy, handle.index)?;
        let method = click::hybrid_click(&self.page, &element_js, &handle.element).await?;
        tracing::debug!("Clicked '{}' via {:?}", handle.element, method);
        Ok(())
    }

    async fn fill(&self, handle: &ElementHandle, value: &str) -> Result<()> {
        let element_js = selectors::nth_match_js(&handle.strategy, handle.index)?;
        keyboard::fill(&self.page, &element_js, value).await
    }

    async fn press_key(&self, handle: &ElementHandle, key: &str) -> Result<()> {
        let element_js = selectors::nth_match_js(&handle.strategy, handle.index)?;
        keyboard::press_key(&self.page, &element_js, key).await
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("Failed to evaluate script")?;
        result
            .into_value()
            .context("Script returned no JSON value")
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
