//! `TerminalReporter`: Presentation-layer implementation of the progress ports.
//!
//! Wraps `&OutputContext` and implements `ProgressReporter` and
//! `LifecycleObserver` so application services can emit progress events
//! without depending on any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::{LifecycleObserver, ProgressReporter};
use crate::domain::lifecycle::LifecycleState;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
///
/// On a TTY, lifecycle states drive a spinner; otherwise each state is
/// printed as a step.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    pub(super) spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
        }
    }

    fn finish_spinner(&self, ok: bool, message: &str) -> bool {
        let Some(pb) = self.spinner.borrow_mut().take() else {
            return false;
        };
        if ok {
            progress::finish_ok(&pb, message);
        } else {
            progress::finish_error(&pb, message);
        }
        true
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        if !self.finish_spinner(true, message) {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        if !self.finish_spinner(false, message) {
            println!("  {} {message}", "!".style(self.ctx.styles.warning));
        }
    }
}

impl LifecycleObserver for TerminalReporter<'_> {
    fn state_changed(&self, state: LifecycleState, message: Option<&str>) {
        if self.ctx.quiet {
            return;
        }
        let text = message.map_or_else(|| state.to_string(), str::to_string);
        match state {
            LifecycleState::Ready => {
                self.finish_spinner(true, "Development environment activated");
            }
            LifecycleState::Failed => {
                self.finish_spinner(false, "Development environment failed");
            }
            LifecycleState::Blank => {}
            _ if self.ctx.show_progress() => {
                let mut slot = self.spinner.borrow_mut();
                match slot.as_ref() {
                    Some(pb) => pb.set_message(text),
                    None => *slot = Some(progress::spinner(&text)),
                }
            }
            _ => self.step(&text),
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.get_mut().take() {
            pb.finish_and_clear();
        }
    }
}
