//! Lifecycle states and the `<state>[:<message>]` marker line format.
//!
//! The remote environment tool rewrites a single line as it progresses. This
//! module owns the closed set of states and the line parser; reading the file
//! is left to the caller.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Progress of a remote development environment, as reported by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleState {
    Starting,
    Provisioning,
    StartingSync,
    Synchronizing,
    Activating,
    Attaching,
    Pulling,
    Ready,
    Failed,
    /// Fallback for a token outside the known set.
    Unknown,
    /// The marker file exists but its line is empty.
    #[serde(rename = "")]
    Blank,
}

/// A raw marker token that is not one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lifecycle state '{raw}'")]
pub struct UnknownLifecycleState {
    pub raw: String,
}

impl LifecycleState {
    /// Every state the tool is allowed to write.
    pub const ALL: [LifecycleState; 10] = [
        Self::Starting,
        Self::Provisioning,
        Self::StartingSync,
        Self::Synchronizing,
        Self::Activating,
        Self::Attaching,
        Self::Pulling,
        Self::Ready,
        Self::Failed,
        Self::Unknown,
    ];

    /// The token as it appears in the marker file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Provisioning => "provisioning",
            Self::StartingSync => "startingSync",
            Self::Synchronizing => "synchronizing",
            Self::Activating => "activating",
            Self::Attaching => "attaching",
            Self::Pulling => "pulling",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
            Self::Blank => "",
        }
    }

    /// `ready` and `failed` end a poll session.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    /// Human-readable progress text for the transient states.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Starting => Some("Starting your development environment..."),
            Self::Provisioning => Some("Provisioning your persistent volume..."),
            Self::StartingSync => Some("Starting the file synchronization service..."),
            Self::Synchronizing => Some("Synchronizing your files..."),
            Self::Activating => Some("Activating your development environment..."),
            Self::Attaching => Some("Attaching to your development environment..."),
            Self::Pulling => Some("Pulling your image..."),
            Self::Ready | Self::Failed | Self::Unknown | Self::Blank => None,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = UnknownLifecycleState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::Blank);
        }
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownLifecycleState { raw: s.to_string() })
    }
}

/// One parsed marker line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollOutcome {
    pub state: LifecycleState,
    /// Text after the first colon, verbatim. Empty when there is none.
    pub message: String,
}

/// Parse a `<state>` or `<state>:<message>` line.
///
/// Only the first colon splits; further colons belong to the message. An
/// unrecognised token becomes [`LifecycleState::Unknown`] and keeps its
/// message.
#[must_use]
pub fn split_state_error(line: &str) -> PollOutcome {
    let (token, message) = line.split_once(':').unwrap_or((line, ""));
    let state = token.parse().unwrap_or(LifecycleState::Unknown);
    PollOutcome {
        state,
        message: message.to_string(),
    }
}
