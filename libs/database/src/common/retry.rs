use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for the start-up connection.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds
    pub max_delay_ms: u64,
    /// Factor applied to the delay after each failure
    pub backoff_multiplier: f64,
    /// Randomize each delay to 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    /// Containers started together usually bring PostgreSQL up after the
    /// server, so this waits noticeably longer than the default.
    pub fn startup() -> Self {
        Self {
            max_retries: 10,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            ..Self::default()
        }
    }

    /// Nominal wait before each retry, capped at `max_delay_ms`.
    fn schedule(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::successors(Some(self.initial_delay_ms.min(self.max_delay_ms)), |delay| {
            Some(((*delay as f64 * self.backoff_multiplier) as u64).min(self.max_delay_ms))
        })
        .take(self.max_retries as usize)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Runs `operation` once, then once more after each delay of the schedule.
///
/// The last error is returned unchanged.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = match operation().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    for (attempt, delay) in config.schedule().enumerate() {
        let wait = if config.use_jitter {
            apply_jitter(delay)
        } else {
            delay
        };
        debug!(
            attempt = attempt + 1,
            max_retries = config.max_retries,
            wait_ms = wait,
            error = %last_error,
            "Connection attempt failed, retrying"
        );
        tokio::time::sleep(Duration::from_millis(wait)).await;

        match operation().await {
            Ok(value) => {
                debug!(retries = attempt + 1, "Connected after retrying");
                return Ok(value);
            }
            Err(e) => last_error = e,
        }
    }

    warn!(attempts = config.max_retries + 1, error = %last_error, "Giving up");
    Err(last_error)
}

/// Scales `delay` by a pseudo-random factor in `[0.5, 1.0)`.
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let random_factor =
        (RandomState::new().hash_one(std::time::SystemTime::now()) % 50) as f64 / 100.0 + 0.5;

    (delay as f64 * random_factor) as u64
}
