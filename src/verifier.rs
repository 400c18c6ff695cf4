//! Bounded scroll-and-poll verification for sections that only render once
//! scrolled into range.
//!
//! Each invocation reloads the page, then checks the section up to
//! `max_attempts` times, scrolling one step and waiting the settle interval
//! after every miss. A single terminal check follows regardless of how the
//! loop ended; it alone decides the outcome. The terminal check may wait up
//! to the terminal wait for the section to show, but never scrolls.

use std::time::Duration;
use tokio::time::Instant;

use crate::config::LazyContentConfig;
use crate::engine::BrowserEngine;
use crate::error::{VerifyError, VerifyResult};
use crate::interaction::scroll::scroll_viewports_js;
use crate::resolver::{ElementBinding, LocatorResolver};

/// How a successful verification went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub section: String,
    pub attempts: u32,
    pub scrolls: u32,
    /// Whether the loop itself saw the section, as opposed to only the
    /// terminal check.
    pub seen_while_polling: bool,
}

pub struct LazyContentVerifier<'a> {
    engine: &'a dyn BrowserEngine,
    config: &'a LazyContentConfig,
    terminal_wait: Duration,
}

impl<'a> LazyContentVerifier<'a> {
    /// A verifier whose terminal check is a single immediate check.
    pub fn new(engine: &'a dyn BrowserEngine, config: &'a LazyContentConfig) -> Self {
        Self {
            engine,
            config,
            terminal_wait: Duration::ZERO,
        }
    }

    /// Let the terminal check wait up to `wait` for the section.
    pub fn with_terminal_wait(mut self, wait: Duration) -> Self {
        self.terminal_wait = wait;
        self
    }

    pub async fn verify(&self, section: &ElementBinding) -> VerifyResult<PollReport> {
        self.engine.reload().await?;

        let mut attempts = 0;
        let mut scrolls = 0;
        let mut visible = false;

        while attempts < self.config.max_attempts && !visible {
            attempts += 1;
            visible = self.is_visible(section).await?;
            tracing::debug!(
                "'{}' attempt {}/{}: visible={}",
                section.name(),
                attempts,
                self.config.max_attempts,
                visible
            );

            if !visible {
                let position = self
                    .engine
                    .evaluate(&scroll_viewports_js(self.config.scroll_delta_viewports))
                    .await?;
                scrolls += 1;
                tracing::debug!("Scrolled to {}", position);
                tokio::time::sleep(self.config.settle()).await;
            }
        }

        if !self.settles_visible(section).await? {
            return Err(VerifyError::SectionNotRendered {
                section: section.name().to_string(),
                attempts,
            });
        }

        tracing::info!("Section '{}' visible after {} attempt(s)", section.name(), attempts);
        Ok(PollReport {
            section: section.name().to_string(),
            attempts,
            scrolls,
            seen_while_polling: visible,
        })
    }

    async fn settles_visible(&self, section: &ElementBinding) -> VerifyResult<bool> {
        let start = Instant::now();
        let handle = match LocatorResolver::new(self.engine, self.terminal_wait)
            .resolve(section)
            .await
        {
            Ok(handle) => handle,
            Err(VerifyError::ElementNotFound { .. }) => return Ok(false),
            Err(e) => return Err(e),
        };
        let remaining = self.terminal_wait.saturating_sub(start.elapsed());
        Ok(self.engine.wait_for_visible(&handle, remaining).await?)
    }

    async fn is_visible(&self, section: &ElementBinding) -> VerifyResult<bool> {
        let resolver = LocatorResolver::new(self.engine, Duration::ZERO);
        match resolver.try_resolve(section).await? {
            Some(handle) => Ok(self.engine.element_state(&handle).await?.visible),
            None => Ok(false),
        }
    }
}
