pub mod css;
pub mod role;
pub mod text;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One rule for finding a DOM node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "by")]
pub enum SelectorStrategy {
    /// ARIA role (explicit or implicit) plus accessible name, matched as a
    /// case-insensitive substring.
    Role { role: String, name: String },
    /// `data-testid` attribute, exact.
    TestId { id: String },
    Css { selector: String },
    /// Visible text, case-insensitive substring.
    Text { text: String },
}

impl SelectorStrategy {
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId { id: id.into() }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Input with an exact placeholder, expressed as a CSS attribute rule.
    pub fn placeholder(placeholder: &str) -> Self {
        Self::css(format!(
            "[placeholder=\"{}\"]",
            placeholder.replace('\\', "\\\\").replace('"', "\\\"")
        ))
    }
}

impl std::fmt::Display for SelectorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Role { role, name } => write!(f, "role={}[name={:?}]", role, name),
            Self::TestId { id } => write!(f, "testid={}", id),
            Self::Css { selector } => write!(f, "css={}", selector),
            Self::Text { text } => write!(f, "text={:?}", text),
        }
    }
}

/// JS expression evaluating to an array of every element the strategy
/// matches, in document order.
pub fn matches_js(strategy: &SelectorStrategy) -> Result<String> {
    match strategy {
        SelectorStrategy::Role { role, name } => role::matches_js(role, name),
        SelectorStrategy::TestId { id } => css::test_id_matches_js(id),
        SelectorStrategy::Css { selector } => css::matches_js(selector),
        SelectorStrategy::Text { text } => text::matches_js(text),
    }
}

/// JS expression evaluating to the `index`-th match, or `null`.
pub fn nth_match_js(strategy: &SelectorStrategy, index: usize) -> Result<String> {
    Ok(format!(
        "(({matches})[{index}] || null)",
        matches = matches_js(strategy)?,
        index = index
    ))
}

/// JS expression evaluating to the number of matches.
pub fn count_js(strategy: &SelectorStrategy) -> Result<String> {
    Ok(format!("({}).length", matches_js(strategy)?))
}
