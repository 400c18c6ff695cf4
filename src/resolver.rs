//! Logical element names mapped onto ordered selector strategies.
//!
//! Strategies are evaluated in declaration order and the first one that
//! matches wins. When a strategy matches several nodes the first in
//! document order is used, so duplicated legacy markup never turns into a
//! failure.

use std::time::Duration;
use tokio::time::Instant;

use crate::engine::{BrowserEngine, ElementHandle};
use crate::error::{VerifyError, VerifyResult};
use crate::selectors::SelectorStrategy;

/// A logical element and the strategies that may find it, most preferred
/// first. Always holds at least one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBinding {
    name: String,
    strategies: Vec<SelectorStrategy>,
}

impl ElementBinding {
    pub fn new(name: impl Into<String>, primary: SelectorStrategy) -> Self {
        Self {
            name: name.into(),
            strategies: vec![primary],
        }
    }

    /// Append a fallback strategy.
    pub fn or(mut self, fallback: SelectorStrategy) -> Self {
        self.strategies.push(fallback);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategies(&self) -> &[SelectorStrategy] {
        &self.strategies
    }

    fn tried(&self) -> Vec<String> {
        self.strategies.iter().map(ToString::to_string).collect()
    }
}

pub struct LocatorResolver<'a> {
    engine: &'a dyn BrowserEngine,
    timeout: Duration,
}

impl<'a> LocatorResolver<'a> {
    pub fn new(engine: &'a dyn BrowserEngine, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// One pass over the strategies against the current DOM.
    pub async fn try_resolve(&self, binding: &ElementBinding) -> VerifyResult<Option<ElementHandle>> {
        for strategy in binding.strategies() {
            let matches = self.engine.locate(strategy).await?;
            match matches {
                0 => {
                    tracing::debug!("'{}': {} matched nothing", binding.name(), strategy);
                }
                1 => return Ok(Some(handle(binding, strategy))),
                n => {
                    tracing::debug!(
                        "'{}': {} matched {} nodes, using the first",
                        binding.name(),
                        strategy,
                        n
                    );
                    return Ok(Some(handle(binding, strategy)));
                }
            }
        }
        Ok(None)
    }

    /// Retry [`try_resolve`](Self::try_resolve) until a strategy matches or
    /// the timeout elapses.
    pub async fn resolve(&self, binding: &ElementBinding) -> VerifyResult<ElementHandle> {
        let start = Instant::now();
        loop {
            if let Some(found) = self.try_resolve(binding).await? {
                return Ok(found);
            }
            if start.elapsed() >= self.timeout {
                return Err(VerifyError::ElementNotFound {
                    element: binding.name().to_string(),
                    tried: binding.tried(),
                });
            }
            tokio::time::sleep(self.engine.poll_interval()).await;
        }
    }
}

fn handle(binding: &ElementBinding, strategy: &SelectorStrategy) -> ElementHandle {
    ElementHandle {
        element: binding.name().to_string(),
        strategy: strategy.clone(),
        index: 0,
    }
}
