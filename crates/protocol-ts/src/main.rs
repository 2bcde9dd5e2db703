//! Writes TypeScript declarations for the `sk-protocol` types.
//!
//! Browser front-ends mirror the same `Op`/`Event` stream as the TUI, so the
//! generated files are their contract with the Core.
//!
//! ```bash
//! sk-protocol-ts            # writes ./bindings
//! sk-protocol-ts web/types  # writes ./web/types
//! ```

use anyhow::{Context, Result};
use sk_protocol::{Event, GlobalConfig, Op, ParsedTable, PipelineState, RunReport, ScenarioScript};
use std::path::PathBuf;
use ts_rs::{Config, TS};

const DEFAULT_OUT_DIR: &str = "bindings";

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    let cfg = Config::new().with_out_dir(&out_dir);

    // Dependencies of each root type are exported alongside it.
    Op::export_all(&cfg).context("failed to export Op")?;
    Event::export_all(&cfg).context("failed to export Event")?;
    ScenarioScript::export_all(&cfg).context("failed to export ScenarioScript")?;
    RunReport::export_all(&cfg).context("failed to export RunReport")?;
    PipelineState::export_all(&cfg).context("failed to export PipelineState")?;
    ParsedTable::export_all(&cfg).context("failed to export ParsedTable")?;
    GlobalConfig::export_all(&cfg).context("failed to export GlobalConfig")?;

    println!("TypeScript bindings written to {}", out_dir.display());
    Ok(())
}
