//! Bounded retry with exponential back-off
//!
//! The remote service rejects writes with a conflict while a previous build
//! or delete is still in flight. Those calls are repeated with unchanged
//! parameters until they succeed or the operation timeout elapses.

use lex_provider_common::{
    Operation, ProviderError, ResourceKind, ResourceTimeouts, RetryConfig, ServiceError,
};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of a failed attempt
#[derive(Debug)]
pub enum Attempt<E> {
    /// Try again after a pause
    Retry(E),
    /// Give up immediately
    Fail(E),
}

/// Why [`retry`] gave up
#[derive(Debug, PartialEq, Eq, Error)]
pub enum RetryError<E> {
    #[error("timed out after {elapsed:?} ({attempts} attempts): {last}")]
    Timeout {
        elapsed: Duration,
        attempts: u32,
        last: E,
    },
    #[error("{0}")]
    Fatal(E),
}

impl RetryError<ServiceError> {
    /// Annotate with the operation and resource identity
    pub fn into_provider_error(
        self,
        operation: Operation,
        kind: ResourceKind,
        id: &str,
    ) -> ProviderError {
        match self {
            RetryError::Timeout {
                elapsed,
                attempts,
                last,
            } => ProviderError::Timeout {
                operation,
                kind,
                id: id.to_string(),
                elapsed,
                attempts,
                last,
            },
            RetryError::Fatal(source) => ProviderError::Service {
                operation,
                kind,
                id: id.to_string(),
                source,
            },
        }
    }
}

/// Deadline and pacing for a retried operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl RetryPolicy {
    pub fn new(timeout: Duration, pacing: &RetryConfig) -> Self {
        Self {
            timeout,
            initial_interval: pacing.initial_interval(),
            max_interval: pacing.max_interval(),
        }
    }
}

/// Per-resource operation timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        ResourceTimeouts::default().into()
    }
}

impl From<ResourceTimeouts> for Timeouts {
    fn from(timeouts: ResourceTimeouts) -> Self {
        Self {
            update: timeouts.update_timeout(),
            delete: timeouts.delete_timeout(),
        }
    }
}

/// Run `op` until it succeeds, fails fatally, or the policy's timeout elapses
///
/// At least one attempt is always made. The closure receives the attempt
/// number, starting at 1. Pauses double from the initial interval up to the
/// max interval and never extend past the deadline.
pub fn retry<T, E, F>(policy: &RetryPolicy, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Result<T, Attempt<E>>,
{
    let start = Instant::now();
    // no deadline when the timeout does not fit in an Instant
    let deadline = start.checked_add(policy.timeout);
    let mut interval = policy.initial_interval;
    let mut attempts = 0;

    loop {
        attempts += 1;

        match op(attempts) {
            Ok(value) => {
                if attempts > 1 {
                    debug!(attempts, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(Attempt::Fail(err)) => return Err(RetryError::Fatal(err)),
            Err(Attempt::Retry(err)) => {
                let now = Instant::now();
                let pause = match deadline {
                    Some(deadline) if now >= deadline => {
                        return Err(RetryError::Timeout {
                            elapsed: now - start,
                            attempts,
                            last: err,
                        });
                    }
                    Some(deadline) => interval.min(deadline - now),
                    None => interval,
                };
                debug!(attempt = attempts, pause_ms = pause.as_millis() as u64, "will retry");
                thread::sleep(pause);
                interval = interval.saturating_mul(2).min(policy.max_interval);
            }
        }
    }
}

/// Retry a remote call while it reports a conflict
pub fn retry_on_conflict<T, F>(
    policy: &RetryPolicy,
    what: &str,
    mut call: F,
) -> Result<T, RetryError<ServiceError>>
where
    F: FnMut() -> Result<T, ServiceError>,
{
    retry(policy, |attempt| {
        call().map_err(|err| {
            if err.is_conflict() {
                warn!(attempt, resource = what, error = %err, "conflict, operation still in progress");
                Attempt::Retry(err)
            } else {
                Attempt::Fail(err)
            }
        })
    })
}
