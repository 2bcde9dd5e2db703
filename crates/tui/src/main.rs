//! Main entry point for the showcase-tui binary.
//!
//! This executable opens the default scenario of the current directory.

use anyhow::Result;
use sk_tui::{run_app, AppOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let options = AppOptions {
        root: std::env::current_dir()?,
        ..AppOptions::default()
    };
    run_app(options).await
}
