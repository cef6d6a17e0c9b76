use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use round_economy::{replay, EconomyConfig, PlayerState, ReplayOutcome, ReplayScript};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Inspect and replay round economy scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an economy config and list its weapons.
    Check(CheckArgs),
    /// Replay a scripted event list against a fresh player and emit a JSON report.
    Replay(ReplayArgs),
    /// Pretty-print an existing report.
    Report(ReportArgs),
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long, default_value = "economy.toml")]
    config: PathBuf,
}

#[derive(Args)]
struct ReplayArgs {
    #[arg(long, default_value = "economy.toml")]
    config: PathBuf,
    #[arg(long)]
    script: PathBuf,
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReplayReport {
    id: String,
    timestamp: String,
    config: PathBuf,
    script: PathBuf,
    outcome: ReplayOutcome,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => handle_check(args),
        Commands::Replay(args) => handle_replay(args),
        Commands::Report(args) => handle_report(args),
    }
}

fn load_config(path: &Path) -> Result<EconomyConfig> {
    EconomyConfig::from_path(path)
        .with_context(|| format!("invalid economy config {}", path.display()))
}

fn handle_check(args: CheckArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let (settings, catalog) = config.build()?;

    println!(
        "max money {}, win {}, loss {}, starting weapon {}",
        settings.max_money(),
        settings.won_money(),
        settings.lost_money(),
        settings.starting_weapon().name()
    );
    for weapon in catalog.iter() {
        println!(
            "  {:<16} {:<8} price {:>6} reward {:>6}",
            weapon.name(),
            weapon.category(),
            weapon.price(),
            weapon.kill_reward()
        );
    }
    Ok(())
}

fn handle_replay(args: ReplayArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let (settings, catalog) = config.build()?;
    let script = ReplayScript::from_path(&args.script)
        .with_context(|| format!("invalid replay script {}", args.script.display()))?;

    let mut player = PlayerState::new(settings);
    player.reset();
    let outcome = replay(&mut player, &catalog, &script.events);
    info!(
        steps = outcome.steps.len(),
        rejected = outcome.rejected_count(),
        "replay complete"
    );

    let id = args
        .id
        .unwrap_or_else(|| format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S")));
    let report = ReplayReport {
        id,
        timestamp: Utc::now().to_rfc3339(),
        config: args.config,
        script: args.script,
        outcome,
    };
    let rendered = serde_json::to_string_pretty(&report)?;
    println!("{rendered}");

    if let Some(out) = args.out.as_ref() {
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(out, &rendered)
            .with_context(|| format!("failed to write report to {}", out.display()))?;
        println!("Report written to {}", out.display());
    }

    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let data = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let report: ReplayReport = serde_json::from_str(&data)?;
    let snapshot = &report.outcome.snapshot;
    println!(
        "Report {} -> {} steps, {} rejected | health {} money {} kills {} deaths {}",
        report.id,
        report.outcome.steps.len(),
        report.outcome.rejected_count(),
        snapshot.health,
        snapshot.money,
        snapshot.kills,
        snapshot.deaths
    );
    Ok(())
}
