use super::{Driver, Screen};
use crate::config::HarnessConfig;
use crate::engine::BrowserEngine;
use crate::error::VerifyResult;
use crate::resolver::ElementBinding;
use crate::selectors::SelectorStrategy;

/// "Who's watching?" screen shown right after login.
pub struct ProfileSelectScreen<'a> {
    driver: Driver<'a>,
    primary_profile: ElementBinding,
    edit_profiles: ElementBinding,
}

impl<'a> ProfileSelectScreen<'a> {
    pub fn new(engine: &'a dyn BrowserEngine, config: &'a HarnessConfig) -> Self {
        Self {
            driver: Driver::new(engine, config),
            primary_profile: ElementBinding::new(
                "primary profile",
                SelectorStrategy::test_id("profile-avatar-0"),
            )
            .or(SelectorStrategy::css(r#"[data-testid^="profile-avatar"]"#)),
            edit_profiles: ElementBinding::new(
                "edit profiles button",
                SelectorStrategy::test_id("edit-profiles-button"),
            )
            .or(SelectorStrategy::role("button", "Edit Profiles")),
        }
    }

    /// Single click on the first profile; no wait beyond the click itself.
    pub async fn select_primary_profile(&self) -> VerifyResult<()> {
        self.driver.click(&self.primary_profile).await
    }

    pub async fn assert_loaded(&self) -> VerifyResult<()> {
        self.driver.assert_visible(&self.edit_profiles).await
    }
}

impl Screen for ProfileSelectScreen<'_> {
    fn name(&self) -> &'static str {
        "ProfileSelect"
    }

    fn bindings(&self) -> Vec<&ElementBinding> {
        vec![&self.primary_profile, &self.edit_profiles]
    }
}
