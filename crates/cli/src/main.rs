//! `showcase` command line entry point.
//!
//! Without a subcommand the interactive TUI opens. `play` runs a scenario
//! headless and prints the live log, which is also what the integration
//! tests drive.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use sk_core::config::loader::load_config;
use sk_core::config::models::AppConfig;
use sk_core::engine::pacing::Pacer;
use sk_core::init::{generate_showcase_kit_structure, InitOptions};
use sk_core::logging::{self, LogTarget};
use sk_core::presenter::charts::ScriptedCharts;
use sk_core::state::session::AgentSession;
use sk_protocol::ipc::Event;
use sk_protocol::scenario_models::{LogTag, ScenarioScript};
use sk_tui::AppOptions;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "showcase",
    version,
    about = "Scripted AI agent demos for the terminal"
)]
struct Cli {
    /// Project root containing the optional `.showcase-kit/` directory.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive TUI (default).
    Tui {
        /// Scenario id to open.
        #[arg(short, long)]
        scenario: Option<String>,
        /// CSV file to load on start.
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Multiplier for every scripted delay.
        #[arg(long)]
        time_scale: Option<f64>,
    },
    /// Run a scenario without the TUI and print its live log.
    Play {
        /// Scenario id to play.
        #[arg(short, long)]
        scenario: Option<String>,
        /// CSV file handed to intake.
        #[arg(short, long)]
        file: PathBuf,
        /// Multiplier for every scripted delay; 0 plays instantly.
        #[arg(long)]
        time_scale: Option<f64>,
        /// Print every event as one JSON object per line.
        #[arg(long)]
        json: bool,
    },
    /// List the available scenarios.
    List,
    /// Create a `.showcase-kit/` directory with editable scenarios.
    Init {
        /// Overwrite an existing `.showcase-kit/` directory.
        #[arg(short, long)]
        force: bool,
        /// Only write the default scenario.
        #[arg(long)]
        minimal: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    match cli.command {
        None => run_tui(cli.root, None, None, None).await,
        Some(Command::Tui {
            scenario,
            file,
            time_scale,
        }) => run_tui(cli.root, scenario, file, time_scale).await,
        Some(Command::Play {
            scenario,
            file,
            time_scale,
            json,
        }) => cmd_play(cli.root, scenario, file, time_scale, json).await,
        Some(Command::List) => cmd_list(cli.root).await,
        Some(Command::Init { force, minimal }) => cmd_init(cli.root, force, minimal).await,
    }
}

async fn run_tui(
    root: PathBuf,
    scenario: Option<String>,
    file: Option<PathBuf>,
    time_scale: Option<f64>,
) -> Result<()> {
    sk_tui::run_app(AppOptions {
        root,
        scenario,
        file,
        time_scale,
    })
    .await
    .map_err(|e| eyre!(e))
}

async fn cmd_play(
    root: PathBuf,
    scenario: Option<String>,
    file: PathBuf,
    time_scale: Option<f64>,
    json: bool,
) -> Result<()> {
    // Diagnostics only; stdout carries the log.
    let _ = logging::init(LogTarget::Stderr);

    let config = load_config(&root).await?;
    let script = Arc::new(config.select_scenario(scenario.as_deref())?.clone());
    let pacer = Pacer::new(time_scale.unwrap_or(config.global.time_scale));

    let (event_tx, event_rx) = mpsc::channel(256);
    let charts = ScriptedCharts::new(script.charts.clone(), event_tx.clone());
    let session =
        AgentSession::new(Arc::clone(&script), pacer, event_tx).with_chart_hook(Arc::new(charts));

    let printer = tokio::spawn(print_events(event_rx, Arc::clone(&script), json));

    session
        .select_file(&file)
        .await
        .wrap_err_with(|| format!("cannot load {}", file.display()))?;
    let run = session
        .start_processing()
        .await
        .ok_or_else(|| eyre!("the session did not start a run"))?;
    let report = run.await?;
    tracing::debug!(
        "run {} finished with {} log entries",
        report.run_id,
        report.entries.len()
    );

    // Closing the last sender ends the printer.
    drop(session);
    printer.await?;

    Ok(())
}

async fn print_events(mut event_rx: mpsc::Receiver<Event>, script: Arc<ScenarioScript>, json: bool) {
    let labels: HashMap<String, String> = script
        .metrics
        .iter()
        .map(|metric| (metric.target_id.clone(), metric.label()))
        .collect();

    while let Some(event) = event_rx.recv().await {
        if json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("cannot serialize event: {e}"),
            }
            continue;
        }

        match event {
            Event::FileLoaded {
                file_name,
                row_count,
                ..
            } => println!("{} {file_name} ({row_count} rows)", "Loaded".bold()),
            Event::RunStarted { scenario_name, .. } => {
                println!("{}", scenario_name.as_str().bold().underline())
            }
            Event::StageActivated { step_index, .. } => {
                if let Some(step) = script.steps.get(step_index) {
                    println!("{} {}", "▶".yellow(), step.as_str().bold());
                }
            }
            Event::LogAppended { entry, .. } => println!(
                "  {} {} {}",
                format!("[{}]", entry.timestamp).as_str().dimmed(),
                colored_tag(entry.tag),
                entry.text
            ),
            Event::RunCompleted { .. } => println!("{}", "Analysis complete".green().bold()),
            Event::ResultsRevealed { .. } => println!("\n{}", "Key Metrics".bold()),
            Event::MetricUpdated {
                target_id,
                display,
                counting: false,
                ..
            } => {
                let label = labels.get(&target_id).unwrap_or(&target_id);
                println!("  {label}: {}", display.as_str().green());
            }
            Event::InsightRevealed { index, .. } => {
                if let Some(insight) = script.insights.get(index) {
                    println!("  {} {insight}", "•".cyan());
                }
            }
            Event::ChartRendered { chart } => {
                println!("  {} {}", "chart".magenta(), chart.title)
            }
            Event::StageCompleted { .. }
            | Event::ConnectorCompleted { .. }
            | Event::MetricUpdated { .. } => {}
        }
    }
}

fn colored_tag(tag: LogTag) -> colored::ColoredString {
    let text = format!("{:<8}", tag.as_str());
    match tag {
        LogTag::Data => text.as_str().blue(),
        LogTag::Model => text.as_str().magenta(),
        LogTag::Analysis => text.as_str().yellow(),
        LogTag::Insight => text.as_str().cyan(),
        LogTag::Success => text.as_str().green(),
    }
}

async fn cmd_list(root: PathBuf) -> Result<()> {
    let config = load_config(&root).await?;
    print_scenarios(&config);
    Ok(())
}

fn print_scenarios(config: &AppConfig) {
    let default_id = config
        .select_scenario(None)
        .map(|script| script.id.clone())
        .ok();

    for script in &config.scenarios {
        let marker = if default_id.as_deref() == Some(script.id.as_str()) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{marker} {:<28} {} ({} stages)",
            script.id.as_str().bold(),
            script.name,
            script.steps.len()
        );
    }
}

async fn cmd_init(root: PathBuf, force: bool, minimal: bool) -> Result<()> {
    generate_showcase_kit_structure(InitOptions {
        target_dir: root.clone(),
        force,
        minimal,
    })
    .await?;

    println!(
        "{} {}",
        "Created".green().bold(),
        root.join(".showcase-kit").display()
    );
    Ok(())
}
