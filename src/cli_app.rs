//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use serde::Serialize;
use thiserror::Error;

use debug_toolbar::core::config::Config;
use debug_toolbar::core::errors::ToolbarError;
use debug_toolbar::diagnostics::DiagnosticsModel;
use debug_toolbar::panel::recording::{DriverCall, RecordingDriver, RecordingHost};
use debug_toolbar::panel::{PanelController, PanelOptions, PanelState};
use debug_toolbar::section::SectionId;

/// Debug toolbar: render and exercise a diagnostics panel from a payload file.
#[derive(Debug, Parser)]
#[command(
    name = "dbgbar",
    author,
    version,
    about = "Debug toolbar renderer",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Render the toolbar, optionally after replaying trigger activations.
    Render(RenderArgs),
    /// Check a payload and report its section counts.
    Validate(ValidateArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct RenderArgs {
    /// Payload JSON file.
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,
    /// Trigger to activate, by short id (`querylist`) or element id; repeatable.
    #[arg(long = "activate", value_name = "TRIGGER")]
    activations: Vec<String>,
    /// Complete each animation right after the activation that started it.
    #[arg(long)]
    settle: bool,
}

#[derive(Debug, Clone, Args)]
struct ValidateArgs {
    /// Payload JSON file.
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// CLI error with an exit code contract.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (bad payload, unknown trigger).
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Json(_) | Self::Io(_) => 2,
        }
    }
}

impl From<ToolbarError> for CliError {
    fn from(value: ToolbarError) -> Self {
        if value.is_input_error() {
            Self::User(value.to_string())
        } else {
            Self::Runtime(value.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct RenderReport {
    open_section: Option<SectionId>,
    state: PanelState,
    height_notifications: u64,
    pending_animations: usize,
    driver_calls: Vec<DriverCall>,
    html: String,
}

#[derive(Debug, Serialize)]
struct ValidateReport {
    valid: bool,
    sections: Vec<SectionCount>,
}

#[derive(Debug, Serialize)]
struct SectionCount {
    section: SectionId,
    count: Option<usize>,
}

/// Dispatch the parsed command line.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Render(args) => run_render(cli, args),
        Command::Validate(args) => run_validate(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    Ok(Config::load(cli.config.as_deref())?)
}

fn load_payload(path: &Path) -> Result<DiagnosticsModel, CliError> {
    Ok(DiagnosticsModel::from_path(path)?)
}

fn run_render(cli: &Cli, args: &RenderArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let model = load_payload(&args.payload)?;
    let mut panel = PanelController::mount(
        model,
        RecordingHost::default(),
        RecordingDriver::default(),
        PanelOptions::from_config(&config),
    );

    for trigger in &args.activations {
        panel.activate_trigger(trigger)?;
        if args.settle {
            for token in panel.driver_mut().take_pending() {
                panel.animation_settled(token);
            }
        }
    }

    let report = RenderReport {
        open_section: panel.open_section(),
        state: panel.state(),
        height_notifications: panel.notifications(),
        pending_animations: panel.pending_animations().len(),
        driver_calls: panel.driver().calls.clone(),
        html: panel.root().to_html(),
    };

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", report.html)?;
        if !args.activations.is_empty() {
            let open = report
                .open_section
                .map_or_else(|| "none".to_string(), |id| id.to_string());
            eprintln!(
                "dbgbar: open={open} notifications={} pending={}",
                report.height_notifications, report.pending_animations
            );
        }
    }
    Ok(())
}

fn run_validate(cli: &Cli, args: &ValidateArgs) -> Result<(), CliError> {
    let model = load_payload(&args.payload)?;
    let report = ValidateReport {
        valid: true,
        sections: SectionId::ALL
            .into_iter()
            .map(|section| SectionCount {
                section,
                count: model.section_count(section),
            })
            .collect(),
    };

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "payload ok: {}", args.payload.display())?;
        for entry in &report.sections {
            match entry.count {
                Some(n) => writeln!(out, "  {:<10} {n}", entry.section.dom_id())?,
                None => writeln!(out, "  {:<10} -", entry.section.dom_id())?,
            }
        }
    }
    Ok(())
}
