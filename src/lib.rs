pub mod browser;
pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod resolver;
pub mod scenario;
pub mod screens;
pub mod selectors;
pub mod suite;
pub mod telemetry;
pub mod verifier;

pub use config::{Credentials, HarnessConfig};
pub use engine::{BrowserEngine, ElementHandle, ElementState};
pub use error::{ScenarioError, VerifyError, VerifyResult};
pub use resolver::{ElementBinding, LocatorResolver};
pub use scenario::{Fixture, Scenario, ScenarioContext, ScenarioReport};
pub use selectors::SelectorStrategy;
