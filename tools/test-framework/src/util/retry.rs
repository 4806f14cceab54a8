/*!
   Utilities for retrying test operations.
*/

use core::time::Duration;
use std::thread::sleep;
use std::time::Instant;
use tracing::{debug, trace};

use crate::error::Error;

/**
   The polling parameters of [`wait_until`].

   Both the interval and the timeout must be non-zero.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl WaitConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self, Error> {
        if interval.is_zero() {
            return Err(Error::config("polling interval must be non-zero".to_string()));
        }

        if timeout.is_zero() {
            return Err(Error::config("polling timeout must be non-zero".to_string()));
        }

        Ok(Self { interval, timeout })
    }

    pub fn from_secs(interval: u64, timeout: u64) -> Result<Self, Error> {
        Self::new(Duration::from_secs(interval), Duration::from_secs(timeout))
    }
}

/**
   Poll `check` at a fixed interval until it succeeds.

   A retryable error returned by `check` only means "not ready yet": it is
   logged and the check is tried again after `config.interval`. Errors that
   are not [retryable](Error::is_retryable) are returned right away.

   `check` is always called at least once, and never again once
   `config.timeout` has elapsed: a [`Timeout`](crate::error::ErrorDetail::Timeout)
   error mentioning `description` is returned instead.
*/
pub fn wait_until<R>(
    description: &str,
    config: &WaitConfig,
    mut check: impl FnMut() -> Result<R, Error>,
) -> Result<R, Error> {
    let start = Instant::now();
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;

        let last_error = match check() {
            Ok(res) => {
                trace!("{} succeeded after {} attempts", description, attempts);
                return Ok(res);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                debug!(
                    "attempt {} while waiting for {} failed: {}",
                    attempts, description, e
                );
                e
            }
        };

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(timeout_error(description, elapsed, &last_error));
        }

        // Never sleep past the deadline, nor attempt again once it is reached.
        sleep(config.interval.min(config.timeout - elapsed));

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(timeout_error(description, elapsed, &last_error));
        }
    }
}

fn timeout_error(description: &str, elapsed: Duration, last_error: &Error) -> Error {
    Error::timeout(description.to_string(), elapsed, last_error.to_string())
}

/**
   A simplified version of retry logic used for testing.
   We do not need complicated retry logic as we need this
   only to test eventual consistency which should reach
   within a few seconds.
*/
pub fn assert_eventually_succeed<R>(
    task_name: &str,
    attempts: u16,
    interval: Duration,
    mut task: impl FnMut() -> Result<R, Error>,
) -> Result<R, Error> {
    sleep(interval);
    for _ in 0..attempts {
        match task() {
            Ok(res) => return Ok(res),
            Err(e) => {
                trace!("retrying task that failed with error: {}", e);
                sleep(interval)
            }
        }
    }

    Err(Error::assertion(format!(
        "Expected task to eventually succeed, but failed after {} attempts: {}",
        attempts, task_name
    )))
}
