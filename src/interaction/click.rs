use anyhow::{bail, Context, Result};
use chromiumoxide::page::Page;
use serde::Deserialize;
use std::time::Duration;

/// How a click was finally delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMethod {
    /// Synthetic pointer sequence at the element's centre.
    MouseEvent,
    /// `el.click()`, for elements covered by an overlay or not rendered.
    JsClick,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClickTarget {
    error: Option<String>,
    visible: bool,
    unobscured: bool,
}

impl ClickTarget {
    fn method(&self) -> Result<ClickMethod> {
        if let Some(error) = &self.error {
            bail!("{}", error);
        }
        Ok(if self.visible && self.unobscured {
            ClickMethod::MouseEvent
        } else {
            ClickMethod::JsClick
        })
    }
}

/// Scroll the target to the centre of the viewport and report whether a
/// pointer at its centre would actually hit it.
fn target_js(element_js: &str, label: &str) -> Result<String> {
    let label = serde_json::to_string(label)?;
    Ok(format!(
        r#"(() => {{
            const el = {element_js};
            if (!el) return {{ error: 'no element for ' + {label} }};
            el.scrollIntoView({{ block: 'center', inline: 'center', behavior: 'instant' }});
            const rect = el.getBoundingClientRect();
            if (rect.width === 0 && rect.height === 0) {{
                return {{ error: {label} + ' has zero size' }};
            }}
            const style = getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden' || parseFloat(style.opacity) === 0) {{
                return {{ visible: false }};
            }}
            const hit = document.elementFromPoint(rect.left + rect.width / 2, rect.top + rect.height / 2);
            return {{ visible: true, unobscured: !!hit && (hit === el || el.contains(hit) || hit.contains(el)) }};
        }})()"#
    ))
}

fn dispatch_js(element_js: &str, method: ClickMethod) -> String {
    match method {
        ClickMethod::MouseEvent => format!(
            r#"(() => {{
                const el = {element_js};
                const rect = el.getBoundingClientRect();
                const at = {{
                    bubbles: true,
                    cancelable: true,
                    clientX: rect.left + rect.width / 2,
                    clientY: rect.top + rect.height / 2,
                    button: 0
                }};
                for (const type of ['pointerdown', 'mousedown', 'pointerup', 'mouseup', 'click']) {{
                    const Ctor = type.startsWith('pointer') ? PointerEvent : MouseEvent;
                    el.dispatchEvent(new Ctor(type, at));
                }}
                return true;
            }})()"#
        ),
        ClickMethod::JsClick => format!(
            r#"(() => {{
                const el = {element_js};
                if (!el) throw new Error('element detached before click');
                el.click();
                return true;
            }})()"#
        ),
    }
}

/// Click the element `element_js` evaluates to, preferring a real pointer
/// sequence and falling back to `el.click()` when something covers it.
pub async fn hybrid_click(page: &Page, element_js: &str, label: &str) -> Result<ClickMethod> {
    let target: ClickTarget = page
        .evaluate(target_js(element_js, label)?)
        .await
        .with_context(|| format!("Failed to inspect '{}' before clicking", label))?
        .into_value()
        .context("Failed to parse click target")?;
    let method = target.method()?;

    // scrollIntoView is instant but layout may still shift for a frame.
    tokio::time::sleep(Duration::from_millis(50)).await;

    page.evaluate(dispatch_js(element_js, method))
        .await
        .with_context(|| format!("Failed to click '{}'", label))?;
    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(json: serde_json::Value) -> ClickTarget {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_reachable_element_gets_pointer_events() {
        let p = target(serde_json::json!({ "visible": true, "unobscured": true }));
        assert_eq!(p.method().unwrap(), ClickMethod::MouseEvent);
    }

    #[test]
    fn test_covered_or_hidden_element_falls_back_to_js_click() {
        let covered = target(serde_json::json!({ "visible": true, "unobscured": false }));
        assert_eq!(covered.method().unwrap(), ClickMethod::JsClick);
        let hidden = target(serde_json::json!({ "visible": false }));
        assert_eq!(hidden.method().unwrap(), ClickMethod::JsClick);
    }

    #[test]
    fn test_target_error_aborts_click() {
        let p = target(serde_json::json!({ "error": "login button has zero size" }));
        assert_eq!(p.method().unwrap_err().to_string(), "login button has zero size");
    }

    #[test]
    fn test_target_label_is_json_escaped() {
        let js = target_js("null", r#"the "Log In" button"#).unwrap();
        assert!(js.contains(r#""the \"Log In\" button""#));
    }
}
