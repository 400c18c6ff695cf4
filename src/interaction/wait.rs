use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::engine::ElementState;

/// Run `check` until it returns `true` or `timeout` elapses.
/// The check always runs at least once; `Ok(false)` means timed out.
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut check: F) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();
    loop {
        if check().await? {
            return Ok(true);
        }
        if start.elapsed() >= timeout {
            return Ok(false);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Read attachment, visibility and editability of the element `element_js`
/// evaluates to.
pub async fn element_state(page: &Page, element_js: &str) -> Result<ElementState> {
    let js = format!(
        r#"(() => {{
            const el = {element_js};
            if (!el || !el.isConnected) {{
                return {{ attached: false, visible: false, enabled: false, editable: false }};
            }}
            const style = getComputedStyle(el);
            const rect = el.getBoundingClientRect();
            const visible = style.display !== 'none'
                && style.visibility !== 'hidden'
                && parseFloat(style.opacity) > 0
                && rect.width > 0
                && rect.height > 0;
            const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true';
            const textual = el.tagName === 'INPUT' || el.tagName === 'TEXTAREA' || el.isContentEditable;
            const editable = enabled && textual && !el.readOnly && el.getAttribute('aria-readonly') !== 'true';
            return {{ attached: true, visible, enabled, editable }};
        }})()"#,
        element_js = element_js
    );

    let result: serde_json::Value = page
        .evaluate(js)
        .await
        .context("Failed to evaluate element state")?
        .into_value()
        .context("Failed to parse element state")?;

    Ok(ElementState {
        attached: result["attached"].as_bool().unwrap_or(false),
        visible: result["visible"].as_bool().unwrap_or(false),
        enabled: result["enabled"].as_bool().unwrap_or(false),
        editable: result["editable"].as_bool().unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_succeeds_on_third_check() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let found = poll_until(Duration::from_secs(5), Duration::from_millis(100), move || async move {
            Ok::<_, anyhow::Error>(counter.fetch_add(1, Ordering::SeqCst) >= 2)
        })
        .await
        .unwrap();
        assert!(found);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_times_out() {
        let start = Instant::now();
        let found = poll_until(Duration::from_millis(500), Duration::from_millis(100), || async {
            Ok::<_, anyhow::Error>(false)
        })
        .await
        .unwrap();
        assert!(!found);
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(start.elapsed() < Duration::from_millis(700));
    }

    #[tokio::test]
    async fn test_poll_until_propagates_errors() {
        let err = poll_until(Duration::from_secs(1), Duration::from_millis(10), || async {
            Err::<bool, _>(anyhow::anyhow!("target closed"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "target closed");
    }
}
