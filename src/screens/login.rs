use super::{Driver, Screen};
use crate::config::{Credentials, HarnessConfig};
use crate::engine::BrowserEngine;
use crate::error::{VerifyError, VerifyResult};
use crate::resolver::ElementBinding;
use crate::selectors::SelectorStrategy;

/// What counts as a successful password submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCheck {
    /// Wait for the post-login route; failing to reach it is
    /// [`VerifyError::AuthenticationFailed`].
    UrlCheck,
    /// Click and return; the caller asserts the outcome.
    NoUrlCheck,
}

pub struct LoginScreen<'a> {
    driver: Driver<'a>,
    email_input: ElementBinding,
    password_input: ElementBinding,
    continue_button: ElementBinding,
    login_button: ElementBinding,
    email_error: ElementBinding,
    credential_error: ElementBinding,
}

impl<'a> LoginScreen<'a> {
    pub fn new(engine: &'a dyn BrowserEngine, config: &'a HarnessConfig) -> Self {
        Self {
            driver: Driver::new(engine, config),
            email_input: ElementBinding::new("email input", SelectorStrategy::role("textbox", "Email"))
                .or(SelectorStrategy::css(r#"input[type="email"]"#))
                .or(SelectorStrategy::css(r#"input[name="email"]"#)),
            password_input: ElementBinding::new(
                "password input",
                SelectorStrategy::role("textbox", "Password"),
            )
            .or(SelectorStrategy::css(r#"input[type="password"]"#)),
            continue_button: ElementBinding::new("continue button", SelectorStrategy::test_id("continue-btn"))
                .or(SelectorStrategy::role("button", "Continue")),
            login_button: ElementBinding::new("login button", SelectorStrategy::role("button", "Log In"))
                .or(SelectorStrategy::css(r#"button[type="submit"]"#)),
            // The app renders both errors into the same `error-message`
            // node, so only the wording tells them apart.
            email_error: ElementBinding::new(
                "email validation error",
                SelectorStrategy::text("This email isn't properly"),
            ),
            credential_error: ElementBinding::new(
                "credential error",
                SelectorStrategy::text("We couldn't log you in."),
            ),
        }
    }

    pub fn driver(&self) -> &Driver<'a> {
        &self.driver
    }

    /// Navigate to the email-entry route and wait for the email field.
    pub async fn open(&self) -> VerifyResult<()> {
        let config = self.driver.config();
        self.driver.engine().navigate(&config.login_url()).await?;
        self.driver
            .assert_visible_within(&self.email_input, config.navigation_timeout())
            .await
    }

    pub async fn enter_email(&self, email: &str) -> VerifyResult<()> {
        self.driver.fill(&self.email_input, email).await
    }

    pub async fn enter_password(&self, password: &str) -> VerifyResult<()> {
        self.driver.fill(&self.password_input, password).await
    }

    /// Click continue without expecting a route change.
    pub async fn click_continue(&self) -> VerifyResult<()> {
        self.driver.click(&self.continue_button).await
    }

    /// Click continue and wait for the password-entry route.
    pub async fn submit_email(&self) -> VerifyResult<()> {
        self.click_continue().await?;
        let config = self.driver.config();
        let pattern = &config.routes.password_entry_pattern;
        if self
            .driver
            .wait_for_route(pattern, config.navigation_timeout())
            .await?
        {
            Ok(())
        } else {
            Err(VerifyError::NavigationTimeout {
                pattern: pattern.clone(),
                timeout_ms: config.navigation_timeout_ms,
            })
        }
    }

    pub async fn submit_password(&self, check: SuccessCheck) -> VerifyResult<()> {
        self.driver.click(&self.login_button).await?;
        if check == SuccessCheck::NoUrlCheck {
            return Ok(());
        }

        let config = self.driver.config();
        let expected = &config.routes.post_login_pattern;
        if self
            .driver
            .wait_for_route(expected, config.auth_timeout())
            .await?
        {
            tracing::info!("Logged in");
            Ok(())
        } else {
            Err(VerifyError::AuthenticationFailed {
                expected_route: expected.clone(),
                current_url: self.driver.engine().current_url().await?,
            })
        }
    }

    /// Email, continue, password, log in. The first failing step aborts the
    /// whole login with its own error.
    pub async fn login(&self, credentials: &Credentials, check: SuccessCheck) -> VerifyResult<()> {
        tracing::info!("Logging in as {}", credentials.email);
        self.enter_email(&credentials.email).await?;
        self.submit_email().await?;
        self.enter_password(&credentials.password).await?;
        self.submit_password(check).await
    }

    pub async fn assert_email_validation_error(&self) -> VerifyResult<()> {
        self.driver.assert_visible(&self.email_error).await
    }

    pub async fn assert_credential_error(&self) -> VerifyResult<()> {
        self.driver.assert_visible(&self.credential_error).await
    }
}

impl Screen for LoginScreen<'_> {
    fn name(&self) -> &'static str {
        "Login"
    }

    fn bindings(&self) -> Vec<&ElementBinding> {
        vec![
            &self.email_input,
            &self.password_input,
            &self.continue_button,
            &self.login_button,
            &self.email_error,
            &self.credential_error,
        ]
    }
}
