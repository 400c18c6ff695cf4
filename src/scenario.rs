//! Scenarios are ordered steps run strictly one after another against a
//! single isolated browser session. The first failing step ends the
//! scenario and is reported with its typed error.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

use crate::config::{Credentials, HarnessConfig};
use crate::engine::BrowserEngine;
use crate::error::{ScenarioError, VerifyResult};
use crate::screens::{HomeScreen, LoginScreen, ProfileSelectScreen, SearchScreen, SuccessCheck};

/// Everything a scenario runs against: its own session plus explicit
/// configuration and credentials.
pub struct ScenarioContext {
    engine: Arc<dyn BrowserEngine>,
    config: HarnessConfig,
    credentials: Credentials,
}

impl ScenarioContext {
    pub fn new(engine: Arc<dyn BrowserEngine>, config: HarnessConfig, credentials: Credentials) -> Self {
        Self {
            engine,
            config,
            credentials,
        }
    }

    pub fn engine(&self) -> &dyn BrowserEngine {
        self.engine.as_ref()
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn login_screen(&self) -> LoginScreen<'_> {
        LoginScreen::new(self.engine(), &self.config)
    }

    pub fn profile_screen(&self) -> ProfileSelectScreen<'_> {
        ProfileSelectScreen::new(self.engine(), &self.config)
    }

    pub fn home_screen(&self) -> HomeScreen<'_> {
        HomeScreen::new(self.engine(), &self.config)
    }

    pub fn search_screen(&self) -> SearchScreen<'_> {
        SearchScreen::new(self.engine(), &self.config)
    }
}

type StepFn = Box<dyn Fn(Arc<ScenarioContext>) -> BoxFuture<'static, VerifyResult<()>> + Send + Sync>;

pub struct Step {
    name: String,
    run: StepFn,
}

impl Step {
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Arc<ScenarioContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = VerifyResult<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(move |ctx| f(ctx).boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// Setup run before a scenario's own steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Land on the login screen.
    Anonymous,
    /// Land on the login screen, log in, and pick the primary profile.
    Authenticated,
}

impl Fixture {
    fn steps(self) -> Vec<Step> {
        let mut steps = vec![Step::new("open login screen", |ctx| async move {
            ctx.login_screen().open().await
        })];
        if self == Fixture::Authenticated {
            steps.push(Step::new("log in", |ctx| async move {
                ctx.login_screen()
                    .login(ctx.credentials(), SuccessCheck::UrlCheck)
                    .await
            }));
            steps.push(Step::new("select primary profile", |ctx| async move {
                ctx.profile_screen().select_primary_profile().await
            }));
        }
        steps
    }
}

#[derive(Debug)]
pub struct Scenario {
    name: String,
    fixture: Fixture,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, fixture: Fixture) -> Self {
        Self {
            name: name.into(),
            fixture,
            steps: Vec::new(),
        }
    }

    pub fn step<F, Fut>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Arc<ScenarioContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = VerifyResult<()>> + Send + 'static,
    {
        self.steps.push(Step::new(name, f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixture(&self) -> Fixture {
        self.fixture
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run fixture steps, then the scenario's own steps, stopping at the
    /// first failure.
    pub async fn run(&self, ctx: Arc<ScenarioContext>) -> ScenarioReport {
        let span = tracing::info_span!("scenario", name = %self.name);
        async {
            tracing::info!("Starting scenario");
            let mut completed = Vec::new();
            let setup = self.fixture.steps();

            for step in setup.iter().chain(self.steps.iter()) {
                let outcome = (step.run)(ctx.clone())
                    .instrument(tracing::info_span!("step", name = %step.name))
                    .await;
                match outcome {
                    Ok(()) => {
                        tracing::info!("Step '{}' passed", step.name);
                        completed.push(step.name.clone());
                    }
                    Err(source) => {
                        tracing::warn!("Step '{}' failed: {}", step.name, source);
                        return ScenarioReport {
                            scenario: self.name.clone(),
                            completed,
                            failure: Some(ScenarioError {
                                scenario: self.name.clone(),
                                step: step.name.clone(),
                                source,
                            }),
                        };
                    }
                }
            }

            tracing::info!("Scenario passed");
            ScenarioReport {
                scenario: self.name.clone(),
                completed,
                failure: None,
            }
        }
        .instrument(span)
        .await
    }
}

/// Outcome of one scenario run.
#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: String,
    /// Names of the steps that passed, fixture steps included.
    pub completed: Vec<String>,
    pub failure: Option<ScenarioError>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_result(self) -> Result<(), ScenarioError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
