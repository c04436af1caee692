//! Waiting for an asynchronously loaded detector

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{LandmarkError, LandmarkSource};

/// Bounded polling policy for detector readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessPolicy {
    /// Number of readiness checks before giving up
    pub attempts: u32,
    /// Delay between checks (ms)
    pub interval_ms: u64,
}

impl ReadinessPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            attempts: 20,
            interval_ms: 500,
        }
    }
}

/// Poll `source` until it reports ready
///
/// Fails with [`LandmarkError::Unavailable`] once every attempt has been
/// used. The caller treats that as terminal.
pub async fn wait_until_ready<S>(source: &S, policy: &ReadinessPolicy) -> Result<(), LandmarkError>
where
    S: LandmarkSource + ?Sized,
{
    for attempt in 1..=policy.attempts {
        if source.is_ready() {
            info!("Landmark source '{}' ready after {} check(s)", source.name(), attempt);
            return Ok(());
        }
        debug!(
            "Landmark source '{}' not ready (attempt {}/{})",
            source.name(),
            attempt,
            policy.attempts
        );
        tokio::time::sleep(policy.interval()).await;
    }

    warn!(
        "Landmark source '{}' still unavailable after {} attempts",
        source.name(),
        policy.attempts
    );
    Err(LandmarkError::Unavailable {
        attempts: policy.attempts,
    })
}
