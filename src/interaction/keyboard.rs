use anyhow::{Context, Result};
use chromiumoxide::page::Page;

/// `key` -> (`code`, legacy `keyCode`) for the non-printable keys scenarios use.
const NAMED_KEYS: &[(&str, &str, u32)] = &[
    ("Enter", "Enter", 13),
    ("Tab", "Tab", 9),
    ("Escape", "Escape", 27),
    ("Backspace", "Backspace", 8),
    ("ArrowDown", "ArrowDown", 40),
    ("ArrowUp", "ArrowUp", 38),
    (" ", "Space", 32),
];

fn key_codes(key: &str) -> (String, u32) {
    if let Some((_, code, key_code)) = NAMED_KEYS.iter().find(|(k, _, _)| *k == key) {
        return (code.to_string(), *key_code);
    }
    match key.chars().next() {
        Some(c) if c.is_ascii_digit() => (format!("Digit{}", c), c as u32),
        Some(c) => (
            format!("Key{}", c.to_ascii_uppercase()),
            c.to_ascii_uppercase() as u32,
        ),
        None => (String::new(), 0),
    }
}

/// Replace the field's value through the prototype setter, so controlled
/// inputs see the change, then fire `input` and `change`.
fn fill_js(element_js: &str, value: &str) -> Result<String> {
    let value = serde_json::to_string(value)?;
    Ok(format!(
        r#"(() => {{
            const el = {element_js};
            if (!el) throw new Error('element detached before fill');
            el.scrollIntoView({{ block: 'center', behavior: 'instant' }});
            el.focus();
            if (el.isContentEditable) {{
                document.execCommand('selectAll', false, null);
                document.execCommand('insertText', false, {value});
                return true;
            }}
            const proto = el instanceof HTMLTextAreaElement
                ? HTMLTextAreaElement.prototype
                : HTMLInputElement.prototype;
            const setter = Object.getOwnPropertyDescriptor(proto, 'value')?.set;
            setter ? setter.call(el, {value}) : (el.value = {value});
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
        }})()"#
    ))
}

/// keydown/keypress/keyup on the element. Enter inside a form also submits
/// it, since synthetic key events carry no default action.
fn key_press_js(element_js: &str, key: &str) -> Result<String> {
    let (code, key_code) = key_codes(key);
    let key = serde_json::to_string(key)?;
    let code = serde_json::to_string(&code)?;
    Ok(format!(
        r#"(() => {{
            const el = {element_js} || document.activeElement || document.body;
            el.focus();
            const init = {{ key: {key}, code: {code}, keyCode: {key_code}, which: {key_code}, bubbles: true, cancelable: true }};
            for (const type of ['keydown', 'keypress', 'keyup']) {{
                el.dispatchEvent(new KeyboardEvent(type, init));
            }}
            if ({key} === 'Enter' && el.form) {{
                el.form.requestSubmit ? el.form.requestSubmit() : el.form.submit();
            }}
            return true;
        }})()"#
    ))
}

pub async fn fill(page: &Page, element_js: &str, value: &str) -> Result<()> {
    page.evaluate(fill_js(element_js, value)?)
        .await
        .context("Failed to fill element")?;
    Ok(())
}

pub async fn press_key(page: &Page, element_js: &str, key: &str) -> Result<()> {
    page.evaluate(key_press_js(element_js, key)?)
        .await
        .with_context(|| format!("Failed to press {}", key))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(key_codes("Enter"), ("Enter".to_string(), 13));
        assert_eq!(key_codes(" "), ("Space".to_string(), 32));
    }

    #[test]
    fn test_printable_keys() {
        assert_eq!(key_codes("d"), ("KeyD".to_string(), 68));
        assert_eq!(key_codes("7"), ("Digit7".to_string(), 55));
    }

    #[test]
    fn test_fill_value_is_json_escaped() {
        let js = fill_js("null", "Deadpool & \"Wolverine\"").unwrap();
        assert!(js.contains(r#""Deadpool & \"Wolverine\"""#));
    }

    #[test]
    fn test_enter_submits_enclosing_form() {
        let js = key_press_js("null", "Enter").unwrap();
        assert!(js.contains("requestSubmit"));
        assert!(js.contains("keyCode: 13"));
    }
}
