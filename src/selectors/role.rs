use anyhow::Result;

const ROLE_HELPERS_JS: &str = r#"
    const inputRole = (el) => {
        const type = (el.getAttribute('type') || 'text').toLowerCase();
        const map = {
            text: 'textbox', email: 'textbox', password: 'textbox', tel: 'textbox', url: 'textbox',
            search: 'searchbox', number: 'spinbutton', checkbox: 'checkbox', radio: 'radio',
            submit: 'button', reset: 'button', button: 'button', image: 'button', range: 'slider'
        };
        return map[type] || 'textbox';
    };
    const roleOf = (el) => {
        const explicit = el.getAttribute('role');
        if (explicit) return explicit.split(/\s+/)[0].toLowerCase();
        switch (el.tagName) {
            case 'A': return el.hasAttribute('href') ? 'link' : null;
            case 'BUTTON': case 'SUMMARY': return 'button';
            case 'INPUT': return inputRole(el);
            case 'TEXTAREA': return 'textbox';
            case 'SELECT': return 'combobox';
            case 'IMG': return 'img';
            case 'H1': case 'H2': case 'H3': case 'H4': case 'H5': case 'H6': return 'heading';
            case 'NAV': return 'navigation';
            case 'LI': return 'listitem';
            default: return null;
        }
    };
    const nameOf = (el) => {
        const labelledBy = el.getAttribute('aria-labelledby');
        if (labelledBy) {
            const parts = labelledBy.split(/\s+/)
                .map((id) => document.getElementById(id))
                .filter(Boolean)
                .map((n) => n.textContent);
            if (parts.length) return parts.join(' ');
        }
        const aria = el.getAttribute('aria-label');
        if (aria) return aria;
        if (el.labels && el.labels.length) {
            return Array.from(el.labels).map((l) => l.textContent).join(' ');
        }
        if (el.tagName === 'IMG') return el.getAttribute('alt') || '';
        if (el.tagName === 'INPUT' && ['submit', 'button', 'reset'].includes((el.type || '').toLowerCase())) {
            return el.value || '';
        }
        if (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA') {
            return el.getAttribute('placeholder') || el.getAttribute('title') || '';
        }
        return el.textContent || el.getAttribute('title') || '';
    };
    const norm = (s) => (s || '').replace(/\s+/g, ' ').trim().toLowerCase();
    const hiddenFromTree = (el) => {
        if (el.closest('[aria-hidden="true"], [hidden]')) return true;
        if (typeof el.checkVisibility === 'function') {
            return !el.checkVisibility({ visibilityProperty: true });
        }
        for (let n = el; n; n = n.parentElement) {
            const style = getComputedStyle(n);
            if (style.display === 'none') return true;
        }
        return getComputedStyle(el).visibility === 'hidden';
    };
"#;

/// Elements with the given ARIA role whose accessible name contains `name`.
/// Like an accessibility-tree query, nodes that are `aria-hidden`, `hidden`,
/// or not rendered are left out.
pub fn matches_js(role: &str, name: &str) -> Result<String> {
    Ok(format!(
        r#"(() => {{
            {helpers}
            const role = {role};
            const name = norm({name});
            return Array.from(document.querySelectorAll('*'))
                .filter((el) => roleOf(el) === role
                    && !hiddenFromTree(el)
                    && norm(nameOf(el)).includes(name));
        }})()"#,
        helpers = ROLE_HELPERS_JS,
        role = serde_json::to_string(&role.to_lowercase())?,
        name = serde_json::to_string(name)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_is_lowercased_and_name_quoted() {
        let js = matches_js("Heading", "Top 10").unwrap();
        assert!(js.contains(r#"const role = "heading";"#));
        assert!(js.contains(r#"norm("Top 10")"#));
    }

    #[test]
    fn test_password_inputs_count_as_textboxes() {
        assert!(ROLE_HELPERS_JS.contains("password: 'textbox'"));
    }

    #[test]
    fn test_hidden_nodes_are_filtered_out() {
        let js = matches_js("heading", "Continue Watching").unwrap();
        assert!(js.contains("!hiddenFromTree(el)"));
        assert!(ROLE_HELPERS_JS.contains(r#"el.closest('[aria-hidden="true"], [hidden]')"#));
        assert!(ROLE_HELPERS_JS.contains("checkVisibility({ visibilityProperty: true })"));
        assert!(ROLE_HELPERS_JS.contains("style.display === 'none'"));
    }
}
