//! Diagnostic tracing for showcase-kit binaries.
//!
//! Tracing is for developers only: the scripted live log shown to users goes
//! through [`crate::engine::sink::LogSink`] and is unaffected by `RUST_LOG`.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where diagnostic output goes.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Compact lines on stderr, for headless commands.
    Stderr,
    /// Appended to a file, for the TUI which owns the terminal.
    File(PathBuf),
}

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=sk_core=debug showcase play --scenario demand-forecasting --file sales.csv
/// ```
pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init()
            .context("tracing subscriber already installed")?,
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
                .context("tracing subscriber already installed")?;
        }
    }

    Ok(())
}
