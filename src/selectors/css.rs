use anyhow::Result;

/// Elements matching a CSS selector.
pub fn matches_js(selector: &str) -> Result<String> {
    Ok(format!(
        "Array.from(document.querySelectorAll({sel}))",
        sel = serde_json::to_string(selector)?
    ))
}

/// Elements whose `data-testid` equals `id`.
pub fn test_id_matches_js(id: &str) -> Result<String> {
    Ok(format!(
        r#"Array.from(document.querySelectorAll('[data-testid="' + CSS.escape({id}) + '"]'))"#,
        id = serde_json::to_string(id)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_is_json_quoted() {
        let js = matches_js(r#"input[name="email"]"#).unwrap();
        assert_eq!(
            js,
            r#"Array.from(document.querySelectorAll("input[name=\"email\"]"))"#
        );
    }

    #[test]
    fn test_test_id_escapes_value() {
        let js = test_id_matches_js("navigation-item-0-HOME").unwrap();
        assert!(js.contains(r#"CSS.escape("navigation-item-0-HOME")"#));
        assert!(js.contains("[data-testid="));
    }
}
