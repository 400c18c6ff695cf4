use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything a scenario needs to know about the target application and how
/// patient to be with it. Passed explicitly into every scenario; there is no
/// global fixture state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub base_url: String,
    pub routes: RouteConfig,
    pub element_timeout_ms: u64,
    pub navigation_timeout_ms: u64,
    pub auth_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub lazy_content: LazyContentConfig,
    pub headless: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.disneyplus.com".into(),
            routes: RouteConfig::default(),
            element_timeout_ms: 5_000,
            navigation_timeout_ms: 30_000,
            auth_timeout_ms: 25_000,
            poll_interval_ms: 100,
            lazy_content: LazyContentConfig::default(),
            headless: true,
        }
    }
}

/// Literal contract points with the target application. Patterns are
/// regular expressions matched against the full current URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub login_path: String,
    pub email_entry_pattern: String,
    pub password_entry_pattern: String,
    pub post_login_pattern: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_path: "/identity/login/enter-email".into(),
            email_entry_pattern: "enter-email".into(),
            password_entry_pattern: "enter-password".into(),
            post_login_pattern: "select-profile".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyContentConfig {
    pub max_attempts: u32,
    pub settle_ms: u64,
    pub scroll_delta_viewports: f64,
}

impl Default for LazyContentConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            settle_ms: 1_000,
            scroll_delta_viewports: 1.0,
        }
    }
}

impl LazyContentConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl HarnessConfig {
    /// Defaults overridden by `STREAMCHECK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("STREAMCHECK_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("STREAMCHECK_HEADLESS") {
            config.headless = !matches!(value.as_str(), "0" | "false" | "no");
        }
        if let Some(value) = lookup("STREAMCHECK_ELEMENT_TIMEOUT_MS") {
            config.element_timeout_ms = value
                .parse()
                .with_context(|| format!("Invalid STREAMCHECK_ELEMENT_TIMEOUT_MS: {}", value))?;
        }
        if let Some(value) = lookup("STREAMCHECK_NAVIGATION_TIMEOUT_MS") {
            config.navigation_timeout_ms = value
                .parse()
                .with_context(|| format!("Invalid STREAMCHECK_NAVIGATION_TIMEOUT_MS: {}", value))?;
        }
        Ok(config)
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.routes.login_path)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Login credentials, supplied by the caller and used once per scenario.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Same account, different password.
    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self {
            email: self.email.clone(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
