//! A named test body and its isolated execution.
//!
//! Every run gets a fresh [`ResultPool`]. The body runs on the tokio runtime: synchronous bodies on the blocking
//! pool, asynchronous bodies as tasks. An error returned by the body, or a panic inside it, becomes an
//! [`ExecutionError`] that remembers how many assertions were recorded before it.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, warn};

use attest_core::Thrown;
use attest_core::value::panic_message;

use crate::assertion::Interruption;
use crate::expect::{Expect, expect_factory};
use crate::outcome::{Outcome, ResultPool};

/// A test body stopped before completing.
///
/// `message` uses the canonical `Kind: message` form, e.g. `RangeError: negative number`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ExecutionError {
    assertion_index: usize,
    message: String,
}

impl ExecutionError {
    pub fn new(assertion_index: usize, message: impl Into<String>) -> Self {
        Self {
            assertion_index,
            message: message.into(),
        }
    }

    /// Number of outcomes recorded before the body stopped.
    pub fn assertion_index(&self) -> usize {
        self.assertion_index
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wrap an error returned by a body.
    ///
    /// An `ExecutionError` raised by a nested run passes through unchanged. Interruptions and thrown errors keep
    /// their own `Kind: message` text; anything else is reported as `Error: ...` with its context chain.
    pub fn from_error(assertion_index: usize, error: &anyhow::Error) -> Self {
        if let Some(existing) = error.downcast_ref::<ExecutionError>() {
            return existing.clone();
        }
        let message = if let Some(interruption) = error.downcast_ref::<Interruption>() {
            interruption.to_string()
        } else if let Some(thrown) = error.downcast_ref::<Thrown>() {
            thrown.to_string()
        } else {
            format!("Error: {error:#}")
        };
        Self::new(assertion_index, message)
    }

    fn from_join_error(assertion_index: usize, error: JoinError) -> Self {
        if error.is_panic() {
            let payload = error.into_panic();
            Self::new(assertion_index, format!("Panic: {}", panic_message(payload.as_ref())))
        } else {
            Self::new(assertion_index, "Error: test task was cancelled")
        }
    }
}

/// Outcome log of a completed run, or why it stopped.
pub type TestRun = Result<Vec<Outcome>, ExecutionError>;

pub type BodyFuture = BoxFuture<'static, anyhow::Result<()>>;

type SyncBody = dyn Fn(&Expect) -> anyhow::Result<()> + Send + Sync;
type AsyncBody = dyn Fn(Expect) -> BodyFuture + Send + Sync;

#[derive(Clone)]
enum Body {
    Sync(Arc<SyncBody>),
    Async(Arc<AsyncBody>),
}

/// A named unit of work making assertions through the [`Expect`] it is given.
#[derive(Clone)]
pub struct Test {
    name: String,
    body: Body,
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.body {
            Body::Sync(_) => "sync",
            Body::Async(_) => "async",
        };
        f.debug_struct("Test")
            .field("name", &self.name)
            .field("body", &kind)
            .finish()
    }
}

impl Test {
    /// A test with a synchronous body.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Expect) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Body::Sync(Arc::new(body)),
        }
    }

    /// A test whose body is asynchronous.
    pub fn new_async<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Expect) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            body: Body::Async(Arc::new(move |expect| body(expect).boxed())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the body against a fresh pool.
    ///
    /// ## Returns
    /// - `Ok(outcomes)` when the body completes, in recording order (possibly empty).
    /// - `Err(ExecutionError)` when it returns an error or panics; outcomes recorded so far are dropped and
    ///   their count is kept as the error's assertion index.
    #[tracing::instrument(skip_all, fields(test = %self.name))]
    pub async fn run(&self) -> TestRun {
        let (expect, pool) = expect_factory();
        let joined = match &self.body {
            Body::Sync(body) => {
                let body = Arc::clone(body);
                tokio::task::spawn_blocking(move || body(&expect)).await
            }
            Body::Async(body) => {
                let body = Arc::clone(body);
                tokio::spawn(async move { body(expect).await }).await
            }
        };
        settle(joined, &pool)
    }
}

fn settle(joined: Result<anyhow::Result<()>, JoinError>, pool: &ResultPool) -> TestRun {
    let recorded = pool.len();
    let error = match joined {
        Ok(Ok(())) => {
            debug!(outcomes = recorded, "test body completed");
            return Ok(pool.snapshot());
        }
        Ok(Err(error)) => ExecutionError::from_error(recorded, &error),
        Err(join_error) => ExecutionError::from_join_error(recorded, join_error),
    };
    warn!(assertion_index = recorded, error = %error, "test body stopped");
    Err(error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use anyhow::{Context, bail};
    use attest_core::{ErrorKind, Thrown};

    use super::*;
    use crate::assertion::Assert;

    #[tokio::test]
    async fn completed_body_returns_outcomes() {
        let test = Test::new("arith", |e| {
            e.expect(1 + 1).to_be(2);
            e.expect(2 + 2).to_be(5);
            Ok(())
        });
        let outcomes = test.run().await.unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_pass());
        assert_eq!(outcomes[1].reason(), Some("expected value to be 5, but was actually 4"));
    }

    #[tokio::test]
    async fn thrown_error_keeps_assertion_index() {
        let test = Test::new("throws", |e| {
            e.expect(1).to_be(1);
            e.expect(2).to_be(2);
            Err(Thrown::new(ErrorKind::RangeError, "negative number").into())
        });
        let error = test.run().await.unwrap_err();
        assert_eq!(error.assertion_index(), 2);
        assert_eq!(error.message(), "RangeError: negative number");
    }

    #[tokio::test]
    async fn interruptions_and_plain_errors() {
        let interrupted = Test::new("usage", |e| {
            e.expect("x").number()?.to_be_an_integer();
            Ok(())
        });
        let error = interrupted.run().await.unwrap_err();
        assert_eq!(error.assertion_index(), 0);
        assert_eq!(error.message(), "TypeError: expected a number value, got a string value");

        let plain = Test::new("plain", |_| {
            let read: anyhow::Result<()> = Err(anyhow::anyhow!("disk on fire"));
            read.context("loading fixture")
        });
        assert_eq!(plain.run().await.unwrap_err().message(), "Error: loading fixture: disk on fire");
    }

    #[tokio::test]
    async fn panics_are_captured() {
        let test = Test::new("panics", |e| {
            e.expect(true).to_be(true);
            panic!("index out of bounds");
        });
        let error = test.run().await.unwrap_err();
        assert_eq!(error.assertion_index(), 1);
        assert_eq!(error.message(), "Panic: index out of bounds");
    }

    #[tokio::test]
    async fn async_bodies() {
        let test = Test::new_async("async", |e| async move {
            tokio::task::yield_now().await;
            e.expect(vec![1, 2]).sequence()?.to_be_of_length(2);
            bail!("late failure")
        });
        let error = test.run().await.unwrap_err();
        assert_eq!(error.assertion_index(), 1);
        assert_eq!(error.message(), "Error: late failure");
    }

    #[tokio::test]
    async fn runs_are_isolated() {
        let test = Test::new("once", |e| {
            e.expect(1).to_be(1);
            Ok(())
        });
        assert_eq!(test.run().await.unwrap().len(), 1);
        assert_eq!(test.run().await.unwrap().len(), 1);
    }

    #[test]
    fn nested_execution_errors_pass_through() {
        let inner = anyhow::Error::new(ExecutionError::new(3, "KeyError: id"));
        let outer = ExecutionError::from_error(7, &inner);
        assert_eq!(outer, ExecutionError::new(3, "KeyError: id"));
    }
}
