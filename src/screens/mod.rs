//! One abstraction per logical screen of the application.
//!
//! Screens own their element bindings and borrow the session's engine.
//! Handles are resolved afresh on every call and never cached, since the
//! DOM may have been replaced by a navigation or re-render in between.

pub mod home;
pub mod login;
pub mod profile;
pub mod search;

pub use home::{HomeScreen, NavEntry, Section};
pub use login::{LoginScreen, SuccessCheck};
pub use profile::ProfileSelectScreen;
pub use search::SearchScreen;

use regex::Regex;
use std::time::Duration;

use crate::config::HarnessConfig;
use crate::engine::{BrowserEngine, ElementHandle};
use crate::error::{VerifyError, VerifyResult};
use crate::interaction::wait::poll_until;
use crate::resolver::{ElementBinding, LocatorResolver};

pub trait Screen {
    fn name(&self) -> &'static str;

    fn bindings(&self) -> Vec<&ElementBinding>;
}

/// The action and assertion primitives every screen is built from.
#[derive(Clone, Copy)]
pub struct Driver<'a> {
    engine: &'a dyn BrowserEngine,
    config: &'a HarnessConfig,
}

impl<'a> Driver<'a> {
    pub fn new(engine: &'a dyn BrowserEngine, config: &'a HarnessConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &'a dyn BrowserEngine {
        self.engine
    }

    pub fn config(&self) -> &'a HarnessConfig {
        self.config
    }

    pub fn resolver(&self) -> LocatorResolver<'a> {
        LocatorResolver::new(self.engine, self.config.element_timeout())
    }

    pub async fn resolve(&self, binding: &ElementBinding) -> VerifyResult<ElementHandle> {
        self.resolver().resolve(binding).await
    }

    pub async fn click(&self, binding: &ElementBinding) -> VerifyResult<()> {
        let handle = self.resolve(binding).await?;
        self.engine.click(&handle).await?;
        Ok(())
    }

    /// Fill a field that must already be visible, enabled and editable.
    pub async fn fill(&self, binding: &ElementBinding, value: &str) -> VerifyResult<()> {
        let handle = self.resolve(binding).await?;
        if !self
            .engine
            .wait_for_visible(&handle, self.config.element_timeout())
            .await?
        {
            return Err(VerifyError::interaction(binding.name(), "not visible"));
        }
        let state = self.engine.element_state(&handle).await?;
        if !state.enabled {
            return Err(VerifyError::interaction(binding.name(), "disabled"));
        }
        if !state.editable {
            return Err(VerifyError::interaction(binding.name(), "not editable"));
        }
        self.engine.fill(&handle, value).await?;
        Ok(())
    }

    pub async fn assert_visible(&self, binding: &ElementBinding) -> VerifyResult<()> {
        self.assert_visible_within(binding, self.config.element_timeout())
            .await
    }

    pub async fn assert_visible_within(
        &self,
        binding: &ElementBinding,
        timeout: Duration,
    ) -> VerifyResult<()> {
        let handle = LocatorResolver::new(self.engine, timeout)
            .resolve(binding)
            .await?;
        if self.engine.wait_for_visible(&handle, timeout).await? {
            Ok(())
        } else {
            Err(VerifyError::assertion(binding.name(), "to be visible"))
        }
    }

    /// Wait up to the element timeout for the field to be visible and
    /// editable.
    pub async fn assert_editable(&self, binding: &ElementBinding) -> VerifyResult<()> {
        let handle = self.resolve(binding).await?;
        let engine = self.engine;
        let handle = &handle;
        let editable = poll_until(
            self.config.element_timeout(),
            engine.poll_interval(),
            move || async move {
                let state = engine.element_state(handle).await?;
                Ok::<_, anyhow::Error>(state.visible && state.editable)
            },
        )
        .await?;
        if editable {
            Ok(())
        } else {
            Err(VerifyError::assertion(binding.name(), "to be editable"))
        }
    }

    /// Wait for the URL to match `pattern`. `Ok(false)` on timeout.
    pub async fn wait_for_route(&self, pattern: &str, timeout: Duration) -> VerifyResult<bool> {
        let regex = route_regex(pattern)?;
        Ok(self.engine.wait_for_url(&regex, timeout).await?)
    }

    pub async fn assert_url_matches(&self, pattern: &str) -> VerifyResult<()> {
        let url = self.engine.current_url().await?;
        if route_regex(pattern)?.is_match(&url) {
            Ok(())
        } else {
            Err(VerifyError::assertion(
                format!("URL {}", url),
                format!("to match /{}/", pattern),
            ))
        }
    }
}

fn route_regex(pattern: &str) -> VerifyResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| VerifyError::Config(format!("route pattern /{}/: {}", pattern, e)))
}
