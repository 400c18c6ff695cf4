//! The end-to-end scenarios for the streaming application.

use crate::error::VerifyError;
use crate::scenario::{Fixture, Scenario};
use crate::screens::{NavEntry, Section, SuccessCheck};

/// Inputs the scenarios need beyond the account credentials.
#[derive(Debug, Clone)]
pub struct SuiteInputs {
    pub invalid_password: String,
    pub search_query: String,
    pub expected_result: String,
}

impl Default for SuiteInputs {
    fn default() -> Self {
        Self {
            invalid_password: "Test".into(),
            search_query: "Deadpool".into(),
            expected_result: "Deadpool & Wolverine".into(),
        }
    }
}

pub fn login_with_valid_credentials() -> Scenario {
    Scenario::new("login_with_valid_credentials", Fixture::Anonymous)
        .step("log in", |ctx| async move {
            ctx.login_screen()
                .login(ctx.credentials(), SuccessCheck::UrlCheck)
                .await?;
            ctx.login_screen()
                .driver()
                .assert_url_matches(&ctx.config().routes.post_login_pattern)
                .await
        })
        .step("select primary profile", |ctx| async move {
            ctx.profile_screen().select_primary_profile().await?;
            ctx.home_screen().assert_loaded().await
        })
}

pub fn login_with_empty_email() -> Scenario {
    Scenario::new("login_with_empty_email", Fixture::Anonymous).step(
        "continue without an email",
        |ctx| async move {
            let login = ctx.login_screen();
            login.click_continue().await?;
            login.assert_email_validation_error().await?;
            login
                .driver()
                .assert_url_matches(&ctx.config().routes.email_entry_pattern)
                .await
        },
    )
}

pub fn login_with_invalid_password(invalid_password: &str) -> Scenario {
    let invalid_password = invalid_password.to_string();
    Scenario::new("login_with_invalid_password", Fixture::Anonymous).step(
        "log in with the wrong password",
        move |ctx| {
            let credentials = ctx.credentials().with_password(invalid_password.clone());
            async move {
                let login = ctx.login_screen();
                match login.login(&credentials, SuccessCheck::UrlCheck).await {
                    Err(VerifyError::AuthenticationFailed { .. }) => {}
                    Err(other) => return Err(other),
                    Ok(()) => {
                        return Err(VerifyError::AssertionFailed {
                            subject: "login with an invalid password".into(),
                            expected: "to be rejected".into(),
                        })
                    }
                }
                login.assert_credential_error().await
            }
        },
    )
}

pub fn home_sections_render() -> Scenario {
    Section::ALL
        .iter()
        .fold(
            Scenario::new("home_sections_render", Fixture::Authenticated),
            |scenario, section| {
                let section = *section;
                scenario.step(section.heading(), move |ctx| async move {
                    ctx.home_screen().assert_section_visible(section).await?;
                    Ok(())
                })
            },
        )
}

pub fn home_navigation_entries() -> Scenario {
    NavEntry::ALL
        .iter()
        .fold(
            Scenario::new("home_navigation_entries", Fixture::Authenticated).step(
                "home loaded",
                |ctx| async move { ctx.home_screen().assert_loaded().await },
            ),
            |scenario, entry| {
                let entry = *entry;
                scenario.step(format!("{} entry visible", entry.label()), move |ctx| async move {
                    ctx.home_screen().assert_nav_entry_visible(entry).await
                })
            },
        )
}

pub fn search_screen_opens() -> Scenario {
    Scenario::new("search_screen_opens", Fixture::Authenticated).step(
        "open search",
        |ctx| async move {
            ctx.home_screen().open_search().await?;
            ctx.search_screen().assert_search_box_editable().await
        },
    )
}

pub fn search_returns_result(query: &str, expected: &str) -> Scenario {
    let query = query.to_string();
    let expected = expected.to_string();
    Scenario::new("search_returns_result", Fixture::Authenticated)
        .step("open search", |ctx| async move {
            ctx.home_screen().open_search().await
        })
        .step(format!("search for {}", query), move |ctx| {
            let query = query.clone();
            async move {
                let search = ctx.search_screen();
                search.enter_query(&query).await?;
                search.submit_query().await
            }
        })
        .step(format!("{} is listed", expected), move |ctx| {
            let expected = expected.clone();
            async move { ctx.search_screen().assert_result_present(&expected).await }
        })
}

pub fn all(inputs: &SuiteInputs) -> Vec<Scenario> {
    vec![
        login_with_valid_credentials(),
        login_with_empty_email(),
        login_with_invalid_password(&inputs.invalid_password),
        home_sections_render(),
        home_navigation_entries(),
        search_screen_opens(),
        search_returns_result(&inputs.search_query, &inputs.expected_result),
    ]
}
