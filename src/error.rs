use thiserror::Error;

pub type VerifyResult<T> = Result<T, VerifyError>;

/// Failures surfaced by screens, the lazy-content verifier and scenarios.
///
/// Every variant is fatal to the step that produced it. Messages carry the
/// element name and the strategies that were tried so selector drift can be
/// diagnosed from the report alone.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("element '{element}' not found (tried: {})", tried.join(", "))]
    ElementNotFound { element: String, tried: Vec<String> },

    #[error("cannot interact with '{element}': {reason}")]
    InteractionError { element: String, reason: String },

    #[error("timed out after {timeout_ms}ms waiting for URL matching /{pattern}/")]
    NavigationTimeout { pattern: String, timeout_ms: u64 },

    #[error("authentication failed: expected route /{expected_route}/, still at {current_url}")]
    AuthenticationFailed {
        expected_route: String,
        current_url: String,
    },

    #[error("section '{section}' not rendered after {attempts} attempts")]
    SectionNotRendered { section: String, attempts: u32 },

    #[error("assertion failed for {subject}: expected {expected}")]
    AssertionFailed { subject: String, expected: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("browser engine error: {0:#}")]
    Engine(#[from] anyhow::Error),
}

/// A scenario aborted at `step` with `source`.
#[derive(Debug, Error)]
#[error("scenario '{scenario}' failed at step '{step}': {source}")]
pub struct ScenarioError {
    pub scenario: String,
    pub step: String,
    #[source]
    pub source: VerifyError,
}

impl VerifyError {
    pub(crate) fn assertion(subject: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::AssertionFailed {
            subject: subject.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn interaction(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InteractionError {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_lists_strategies() {
        let err = VerifyError::ElementNotFound {
            element: "email input".into(),
            tried: vec![
                r#"role=textbox[name="Email"]"#.into(),
                "css=input[type=email]".into(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("email input"));
        assert!(msg.contains(r#"role=textbox[name="Email"], css=input[type=email]"#));
    }

    #[test]
    fn test_section_not_rendered_message() {
        let err = VerifyError::SectionNotRendered {
            section: "Top 10".into(),
            attempts: 5,
        };
        assert_eq!(err.to_string(), "section 'Top 10' not rendered after 5 attempts");
    }

    #[test]
    fn test_scenario_error_names_step_and_cause() {
        let err = ScenarioError {
            scenario: "login_with_invalid_password".into(),
            step: "log in with the wrong password".into(),
            source: VerifyError::NavigationTimeout {
                pattern: "enter-password".into(),
                timeout_ms: 30_000,
            },
        };
        assert_eq!(
            err.to_string(),
            "scenario 'login_with_invalid_password' failed at step 'log in with the wrong password': \
             timed out after 30000ms waiting for URL matching /enter-password/"
        );
    }

    #[test]
    fn test_engine_error_keeps_context_chain() {
        let inner = anyhow::anyhow!("socket closed").context("Failed to evaluate click check");
        let err = VerifyError::from(inner);
        assert_eq!(
            err.to_string(),
            "browser engine error: Failed to evaluate click check: socket closed"
        );
    }
}
