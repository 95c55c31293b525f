//! Fixed-interval polling
//!
//! Some endpoints (project language statistics) answer with an empty
//! result until the server has finished computing it. An empty result is
//! a reason to ask again, not an error; when the time budget runs out the
//! last result is returned as-is.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Polling schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between two attempts
    #[serde(with = "millis", rename = "interval_ms", default = "default_interval")]
    pub interval: Duration,
    /// Total time budget, measured from the first attempt
    #[serde(with = "millis", rename = "timeout_ms", default = "default_timeout")]
    pub timeout: Duration,
}

fn default_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            timeout: default_timeout(),
        }
    }
}

impl PollConfig {
    /// Create a schedule
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Run `fetch` until `is_ready` accepts its result or the time budget is
/// spent.
///
/// The first attempt is made immediately. Errors from `fetch` are returned
/// at once; only "not ready yet" is retried.
pub async fn poll_until<T, F, Fut, P>(config: PollConfig, mut fetch: F, is_ready: P) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let started = Instant::now();
    let mut attempts = 1u32;
    let mut last = fetch().await?;

    while !is_ready(&last) && started.elapsed() < config.timeout {
        tokio::time::sleep(config.interval).await;
        attempts += 1;
        debug!("Poll attempt {attempts} after {:?}", started.elapsed());
        last = fetch().await?;
    }

    if !is_ready(&last) {
        debug!("Gave up polling after {attempts} attempts; returning last result");
    }

    Ok(last)
}
