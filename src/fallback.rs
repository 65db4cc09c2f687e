//! Ordered fallback chains
//!
//! A chain is a list of named strategies tried one after another until one
//! of them succeeds. Strategies are lazy futures, nothing runs before
//! `run` polls it.

use futures::future::BoxFuture;
use std::future::Future;
use tracing::{info, warn};

use crate::error::Error;

pub struct Strategy<'a, T> {
    pub name: &'static str,
    attempt: BoxFuture<'a, Result<T, Error>>,
}

pub struct FallbackChain<'a, T> {
    label: String,
    strategies: Vec<Strategy<'a, T>>,
}

impl<'a, T> FallbackChain<'a, T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            strategies: Vec::new(),
        }
    }

    pub fn then<Fut>(mut self, name: &'static str, attempt: Fut) -> Self
    where
        Fut: Future<Output = Result<T, Error>> + Send + 'a,
    {
        self.strategies.push(Strategy {
            name,
            attempt: Box::pin(attempt),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub async fn run(self) -> Result<T, Error> {
        let Self { label, strategies } = self;
        let mut last_error = None;

        for (index, strategy) in strategies.into_iter().enumerate() {
            match strategy.attempt.await {
                Ok(value) => {
                    if index > 0 {
                        info!(
                            "{}: served by fallback strategy {}",
                            label, strategy.name
                        );
                    }
                    return Ok(value);
                },
                Err(e) => {
                    warn!("{}: strategy {} failed: {}", label, strategy.name, e);
                    last_error = Some(format!("{} ({})", strategy.name, e));
                },
            }
        }

        Err(Error::FallbackExhausted(format!(
            "{}: {}",
            label,
            last_error.unwrap_or_else(|| String::from("no strategies"))
        )))
    }
}
