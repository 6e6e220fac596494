use std::path::{Path, PathBuf};

/// File name the remote environment tool writes its progress marker to.
pub const STATE_FILE_NAME: &str = "okteto.state";

/// Location of the progress marker for one environment:
/// `<state_dir>/<namespace>/<name>/okteto.state`.
#[must_use]
pub fn state_file_path(state_dir: &Path, namespace: &str, name: &str) -> PathBuf {
    state_dir.join(namespace).join(name).join(STATE_FILE_NAME)
}
