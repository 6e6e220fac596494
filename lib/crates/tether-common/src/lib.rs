//! Progress-marker contract shared between tether and the remote environment tool.

pub mod marker;
pub mod paths;

pub use marker::{LifecycleState, PollOutcome, UnknownLifecycleState, split_state_error};
pub use paths::{STATE_FILE_NAME, state_file_path};
