//! Human-readable terminal renderer.

use std::path::PathBuf;

use owo_colors::OwoColorize as _;

use crate::application::services::environment_up::UpOutcome;
use crate::domain::{EnvironmentSession, Manifest};
use crate::domain::lifecycle::{LifecycleState, PollOutcome};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("tether v{version}"));
    }

    /// Render the services and tests of a manifest.
    pub fn render_manifest(&self, manifest: &Manifest) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.header("Services:");
        if manifest.services().is_empty() {
            self.ctx.kv("(none)", "");
        }
        for service in manifest.services() {
            let workdir = if service.workdir.is_empty() {
                "-"
            } else {
                service.workdir.as_str()
            };
            let port = if service.port == 0 {
                "-".to_string()
            } else {
                service.port.to_string()
            };
            println!(
                "    {}  {}  {}",
                service.name.style(self.ctx.styles.bold),
                workdir.style(self.ctx.styles.dim),
                port.style(self.ctx.styles.dim),
            );
        }
        if !manifest.tests().is_empty() {
            println!();
            self.ctx.header("Tests:");
            for test in manifest.tests() {
                println!("    {}", test.name.style(self.ctx.styles.bold));
            }
        }
    }

    /// Render manifests found by discovery, one path per line.
    pub fn render_discovered(&self, paths: &[PathBuf]) {
        if self.ctx.quiet {
            return;
        }
        if paths.is_empty() {
            self.ctx.warn("No manifests found");
            return;
        }
        for path in paths {
            println!("  {}", path.display());
        }
    }

    /// Render the current lifecycle state of an environment.
    pub fn render_state(&self, environment: &str, outcome: &PollOutcome) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.kv("Environment:", environment);
        let state = match outcome.state {
            LifecycleState::Blank => "(blank)".to_string(),
            LifecycleState::Ready => outcome.state.style(self.ctx.styles.success).to_string(),
            LifecycleState::Failed => outcome.state.style(self.ctx.styles.error).to_string(),
            LifecycleState::Unknown => outcome.state.style(self.ctx.styles.warning).to_string(),
            other => other.to_string(),
        };
        self.ctx.kv("State:", &state);
        if let Some(text) = outcome.state.message() {
            self.ctx.kv("Progress:", text);
        }
        if !outcome.message.is_empty() {
            self.ctx.kv("Message:", &outcome.message);
        }
    }

    /// Render where a started environment can be reached.
    pub fn render_session(&self, session: &EnvironmentSession, outcome: UpOutcome) {
        if self.ctx.quiet {
            return;
        }
        if outcome == UpOutcome::Cancelled {
            self.ctx.warn(&format!("{} was cancelled and removed", session.key));
            return;
        }
        self.ctx.kv("Environment:", &session.key.to_string());
        self.ctx.kv("Service:", &session.service.name);
        if !session.service.workdir.is_empty() {
            self.ctx.kv("Workdir:", &session.service.workdir);
        }
        self.ctx
            .kv("SSH tunnel:", &format!("localhost:{}", session.remote_port));
    }

    /// Render a single readiness probe result.
    pub fn render_probe(&self, port: u16, ready: bool) {
        if ready {
            self.ctx.success(&format!("localhost:{port} is accepting connections"));
        } else {
            self.ctx.warn(&format!("localhost:{port} is not accepting connections"));
        }
    }
}
