//! Tracing setup for hosts embedding the binder core.
//!
//! The binder, solver and checker only emit `tracing` events (`trace!` for
//! rule matches, `debug!` for lookup swaps, tie-break decisions and overload
//! picks). A host decides where they go by calling [`init_tracing`], which
//! reads two environment variables:
//!
//! - `XBASE_LOG` (falling back to `RUST_LOG`): an `EnvFilter` directive such
//!   as `debug` or `xbase_solver::tie_break=debug,xbase_binder=trace`
//! - `XBASE_LOG_FORMAT`: `text` (default), `tree` or `json`
//!
//! ```bash
//! XBASE_LOG=xbase_solver=trace XBASE_LOG_FORMAT=tree cargo test -p xbase
//! ```
//!
//! Nothing is installed when neither filter variable is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "XBASE_LOG";
pub const LOG_FORMAT_ENV: &str = "XBASE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented span tree via `tracing-tree`.
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Case-insensitive; unknown names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Some(Self::Text),
            "tree" => Some(Self::Tree),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Filter directive and output format for the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Read the configuration from the environment; `None` when no filter
    /// variable is set.
    pub fn from_env() -> Option<Self> {
        let filter = std::env::var(LOG_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()?;
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|name| LogFormat::parse(&name))
            .unwrap_or_default();
        Some(Self { filter, format })
    }

    /// Install the subscriber. Fails when one is already installed.
    pub fn try_init(&self) -> Result<(), TryInitError> {
        let filter = EnvFilter::builder().parse_lossy(&self.filter);
        match self.format {
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::default()
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_targets(true);
                Registry::default().with(filter).with(layer).try_init()
            }
            LogFormat::Json => {
                let layer = fmt::layer().json().with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).try_init()
            }
            LogFormat::Text => {
                let layer = fmt::layer().with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).try_init()
            }
        }
    }
}

/// Install the global subscriber described by the environment, if any.
///
/// Output goes to stderr. Calling this more than once is harmless; only the
/// first call installs a subscriber.
pub fn init_tracing() {
    if let Some(config) = TracingConfig::from_env() {
        let _ = config.try_init();
    }
}
