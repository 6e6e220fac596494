//! Lifecycle poller: turns the tool's progress marker into a terminal outcome.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::HashSet;

use anyhow::Result;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::ports::{LifecycleObserver, MarkerSource};
use crate::domain::EnvironmentKey;
use crate::domain::lifecycle::{
    LifecycleSettings, LifecycleState, Outcome, PollOutcome, split_state_error,
};

/// Read the marker once.
///
/// A missing marker means the tool has not started reporting, which reads as
/// `provisioning`. Only the first line of the file is considered.
///
/// # Errors
///
/// Returns an error if the marker exists but cannot be read.
pub async fn current_state(
    marker: &impl MarkerSource,
    key: &EnvironmentKey,
) -> Result<PollOutcome> {
    let Some(content) = marker.read_marker(key).await? else {
        return Ok(PollOutcome {
            state: LifecycleState::Provisioning,
            message: String::new(),
        });
    };
    let line = content.lines().next().unwrap_or_default();
    let outcome = split_state_error(line);
    let token = line.split_once(':').map_or(line, |(token, _)| token);
    if outcome.state == LifecycleState::Unknown && token != LifecycleState::Unknown.as_str() {
        warn!(
            environment = %key,
            raw = line,
            "unrecognised lifecycle state; the environment tool may be newer than tether"
        );
    }
    Ok(outcome)
}

/// Poll the marker until the environment is ready, fails, or runs out of ticks.
///
/// Each distinct state is reported to `observer` the first time it is seen.
/// Returns `None` when `cancel` fires between ticks; an in-flight read is
/// allowed to finish.
pub async fn wait_until_ready(
    marker: &impl MarkerSource,
    key: &EnvironmentKey,
    observer: &impl LifecycleObserver,
    settings: &LifecycleSettings,
    cancel: &CancellationToken,
) -> Option<Outcome> {
    let mut seen: HashSet<LifecycleState> = HashSet::new();
    let mut ticker = interval_at(
        Instant::now() + settings.poll_interval,
        settings.poll_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for tick in 1..=settings.max_ticks {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!(environment = %key, tick, "lifecycle poll cancelled");
                return None;
            }
            _ = ticker.tick() => {}
        }

        let outcome = match current_state(marker, key).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(environment = %key, error = %e, "cannot read progress marker");
                PollOutcome {
                    state: LifecycleState::Unknown,
                    message: String::new(),
                }
            }
        };
        debug!(environment = %key, tick, state = %outcome.state, "lifecycle tick");

        if seen.insert(outcome.state) {
            info!(environment = %key, state = %outcome.state, "lifecycle state changed");
            observer.state_changed(outcome.state, outcome.state.message());
        }

        match outcome.state {
            LifecycleState::Ready => return Some(Outcome::Ready),
            LifecycleState::Failed => {
                return Some(Outcome::Failed {
                    message: outcome.message,
                });
            }
            _ => {}
        }
    }

    warn!(environment = %key, ticks = settings.max_ticks, "lifecycle poll timed out");
    Some(Outcome::TimedOut)
}

/// Watch a ready environment for a later regression to `failed`.
///
/// Runs until `cancel` fires or a failure is seen; `on_failure` receives the
/// tool's message and is called at most once.
pub async fn watch_for_failure<F>(
    marker: &impl MarkerSource,
    key: &EnvironmentKey,
    settings: &LifecycleSettings,
    cancel: &CancellationToken,
    on_failure: F,
) where
    F: FnOnce(String),
{
    let mut ticker = interval_at(
        Instant::now() + settings.poll_interval,
        settings.poll_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }
        match current_state(marker, key).await {
            Ok(outcome) if outcome.state == LifecycleState::Failed => {
                warn!(environment = %key, message = %outcome.message, "environment failed after becoming ready");
                on_failure(outcome.message);
                return;
            }
            Ok(_) => {}
            Err(e) => debug!(environment = %key, error = %e, "cannot read progress marker"),
        }
    }
}
