use anyhow::Result;

/// Elements whose own text contains `text`, compared case-insensitively with
/// whitespace collapsed. Each element appears once, in document order.
/// Text inside script, style, noscript and template elements never matches.
pub fn matches_js(text: &str) -> Result<String> {
    Ok(format!(
        r#"(() => {{
            const norm = (s) => (s || '').replace(/\s+/g, ' ').trim().toLowerCase();
            const target = norm({text});
            const results = [];
            const seen = new Set();
            const unrendered = new Set(['SCRIPT', 'STYLE', 'NOSCRIPT', 'TEMPLATE']);
            const walker = document.createTreeWalker(
                document.body,
                NodeFilter.SHOW_TEXT,
                {{
                    acceptNode: (node) => node.parentElement && !unrendered.has(node.parentElement.tagName)
                        ? NodeFilter.FILTER_ACCEPT
                        : NodeFilter.FILTER_REJECT
                }}
            );
            while (walker.nextNode()) {{
                const node = walker.currentNode;
                if (norm(node.textContent).includes(target)) {{
                    const el = node.parentElement;
                    if (el && !seen.has(el)) {{
                        seen.add(el);
                        results.push(el);
                    }}
                }}
            }}
            return results;
        }})()"#,
        text = serde_json::to_string(text)?
    ))
}
