use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;

use super::cdp::CdpEngine;
use super::launcher;
use crate::config::HarnessConfig;

/// One isolated Chrome instance with a throwaway profile and a single page.
/// Each scenario gets its own session; nothing is shared between sessions.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: tokio::task::JoinHandle<()>,
    _profile_dir: tempfile::TempDir,
    poll_interval: Duration,
}

impl BrowserSession {
    /// Launch a new browser and establish the CDP connection.
    pub async fn launch(config: &HarnessConfig) -> Result<Self> {
        let profile_dir = tempfile::tempdir().context("Failed to create Chrome profile dir")?;
        let chrome = launcher::find_chrome_binary()?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .user_data_dir(profile_dir.path())
            .window_size(1280, 720);

        if !config.headless {
            builder = builder.with_head();
        }
        for arg in launcher::default_chrome_args(config.headless) {
            builder = builder.arg(arg);
        }

        let browser_config = builder.build().map_err(|e| anyhow::anyhow!("{}", e))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch Chrome")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("Failed to create initial page")?;

        tracing::info!("Browser session started (headless: {})", config.headless);

        Ok(Self {
            browser,
            page,
            handler_task,
            _profile_dir: profile_dir,
            poll_interval: config.poll_interval(),
        })
    }

    /// Engine bound to this session's page.
    pub fn engine(&self) -> CdpEngine {
        CdpEngine::new(self.page.clone()).with_poll_interval(self.poll_interval)
    }

    /// Close the browser and stop the event handler.
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .context("Failed to close Chrome")?;
        self.handler_task.abort();
        tracing::info!("Browser session closed");
        Ok(())
    }
}
