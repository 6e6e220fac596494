//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once from the global flags and the loaded
//! configuration. Commands borrow it instead of constructing their own
//! output, tool, or marker instances.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::TetherConfig;
use crate::domain::error::EnvironmentError;
use crate::domain::lifecycle::LifecycleSettings;
use crate::domain::{Manifest, Service, select_service};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::{YamlConfigStore, state_dir};
use crate::infra::marker::StateFileMarker;
use crate::infra::tool::OktetoTool;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `TETHER_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Loaded configuration with environment overrides applied.
    pub config: TetherConfig,
    /// When `true`, skip interactive prompts.
    ///
    /// Set when `--yes` / `-y` is passed, in JSON mode, or when the `CI` or
    /// `TETHER_YES` environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but is invalid.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        Self::with_store(flags, &YamlConfigStore)
    }

    /// Construct an `AppContext` reading configuration from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to load.
    pub fn with_store(flags: &AppFlags, store: &impl ConfigStore) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("TETHER_YES").is_ok();
        let non_interactive = flags.behaviour.yes || flags.output.json || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet || flags.output.json),
            mode,
            config: store.load()?,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    #[must_use]
    pub fn lifecycle_settings(&self) -> LifecycleSettings {
        self.config.lifecycle.settings()
    }

    /// Resolve the namespace: the flag wins over configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingNamespace` when neither is set.
    pub fn namespace(&self, flag: Option<&str>) -> Result<String, EnvironmentError> {
        flag.map(str::to_string)
            .or_else(|| self.config.namespace.clone())
            .ok_or(EnvironmentError::MissingNamespace)
    }

    /// Marker reader rooted at the configured state directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn marker(&self) -> Result<StateFileMarker> {
        Ok(StateFileMarker::new(state_dir(&self.config)?))
    }

    #[must_use]
    pub fn tool(&self) -> OktetoTool<TokioCommandRunner> {
        OktetoTool::default_runner(&self.config.tool.binary)
    }

    /// Pick a service, prompting when several exist and prompts are allowed.
    ///
    /// # Errors
    ///
    /// Returns the selection error, or an error if the terminal prompt fails.
    pub fn select_service<'m>(
        &self,
        manifest: &'m Manifest,
        requested: Option<&str>,
    ) -> Result<&'m Service> {
        match select_service(manifest, requested) {
            Err(EnvironmentError::ServiceChoiceRequired { .. })
                if !self.non_interactive && self.output.is_tty =>
            {
                let services = manifest.distinct_services();
                let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
                let index = dialoguer::Select::new()
                    .with_prompt("Select the service to develop on")
                    .items(&names)
                    .default(0)
                    .interact()?;
                Ok(services[index])
            }
            other => Ok(other?),
        }
    }
}
