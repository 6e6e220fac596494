//! Lifecycle poll outcomes and timing settings.

use std::time::Duration;

pub use tether_common::{LifecycleState, PollOutcome, split_state_error};

use crate::domain::error::LifecycleError;

/// Reference cadence of the marker poll.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Five minutes at the reference cadence.
pub const DEFAULT_MAX_TICKS: u32 = 300;

/// Window for the tunnel readiness probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

/// How a poll session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ready,
    Failed { message: String },
    TimedOut,
}

impl Outcome {
    /// Map the terminal failures onto [`LifecycleError`].
    ///
    /// # Errors
    ///
    /// Returns `Failed` or `Timeout` for the matching outcomes.
    pub fn into_result(self) -> Result<(), LifecycleError> {
        match self {
            Self::Ready => Ok(()),
            Self::Failed { message } => Err(LifecycleError::Failed { message }),
            Self::TimedOut => Err(LifecycleError::Timeout),
        }
    }
}

/// Timing knobs for one lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleSettings {
    pub poll_interval: Duration,
    /// Ticks before the session gives up with [`Outcome::TimedOut`].
    pub max_ticks: u32,
    pub probe_timeout: Duration,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_ticks: DEFAULT_MAX_TICKS,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
