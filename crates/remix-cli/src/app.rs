//! The `remix` application.
//!
//! [`RemixCli`] owns the loaded configuration, installs logging, and
//! dispatches parsed [`CliArgs`] to the command handlers.

use crate::cli::{CliArgs, Command};
use crate::config::RemixConfig;
use crate::server::{self, ServerState};
use crate::{config_handlers, highlight_handlers, remix_handlers};
use remix_core::Result;
use remix_core::traits::ConfigProvider;
use remix_llm::Remixer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// RemixCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct RemixCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
    host: String,
    port: u16,
    remixer: Option<Remixer>,
}

impl RemixCli<RemixConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = RemixConfig::load(args.config.as_deref())?;
        let (host, port) = (config.server.host.clone(), config.server.port);
        Ok(Self::new(name, config).with_server(host, port))
    }
}

impl<C: ConfigProvider> RemixCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            remixer: None,
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Default address for `serve`.
    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Use `remixer` instead of building one from the configured API key.
    pub fn with_remixer(mut self, remixer: Remixer) -> Self {
        self.remixer = Some(remixer);
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Highlights(highlights)) => {
                highlight_handlers::handle_highlights(&*self.config, highlights).await
            }
            Some(Command::Remix(remix)) => {
                let remixer = self.remixer()?;
                remix_handlers::handle_remix(&*self.config, &remixer, remix).await
            }
            Some(Command::Serve { port }) => {
                let mut state = ServerState::from_config(&*self.config);
                if let Some(remixer) = &self.remixer {
                    state = state.with_remixer(remixer.clone());
                }
                let port = port.unwrap_or(self.port);
                tracing::info!("Starting {} server", self.config.project_name());
                server::serve(state, &self.host, port).await
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {} - use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    fn remixer(&self) -> Result<Remixer> {
        match &self.remixer {
            Some(remixer) => Ok(remixer.clone()),
            None => Remixer::from_config(&*self.config),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
