//! tally daemon: replays governance operation scripts against an in-memory ledger.

mod config;
mod ledger;
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tally_governance::GovernanceEngine;
use tally_types::Timestamp;
use tally_utils::LogFormat;

use crate::config::DaemonConfig;
use crate::ledger::{AdminList, MemoryLedger};

#[derive(Parser)]
#[command(name = "tally", about = "Balance-weighted governance ledger")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TALLY_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TALLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON operation script and print one line per step.
    Replay {
        /// Path to the script.
        script: PathBuf,

        /// Time (Unix seconds) at which to report final proposal states.
        /// Defaults to the last step's time.
        #[arg(long)]
        report_at: Option<u64>,
    },
    /// Print the effective configuration as TOML.
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::from_toml_str("")?,
    };
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(anyhow::Error::msg)?;
    tally_utils::init_logging(format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Replay {
            script: script_path,
            report_at,
        } => {
            let text = std::fs::read_to_string(&script_path)
                .with_context(|| format!("reading script {}", script_path.display()))?;
            let steps = script::parse_script(&text)?;

            let ledger = Arc::new(MemoryLedger::from_config(&config)?);
            let gate = AdminList::from_config(&config)?;
            let mut engine = GovernanceEngine::with_config(&config.governance, ledger, gate)?;
            let params = engine.governance_params();
            tracing::info!(
                steps = steps.len(),
                voting = %tally_utils::format_duration(params.voting_duration_secs),
                threshold = %params.proposal_threshold,
                quorum = params.quorum_percent,
                "replaying script"
            );

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let summary = script::replay(&mut engine, &steps, &mut out)?;

            let at = report_at
                .or_else(|| steps.last().map(|s| s.at))
                .unwrap_or(0);
            let proposals = script::report(&engine, Timestamp::new(at))?;
            let last = script::FinalReport {
                summary,
                governance: engine.governance_params(),
                proposals,
            };
            script::write_line(&mut out, &last)?;

            tracing::info!(
                applied = summary.applied,
                rejected = summary.rejected,
                "replay finished"
            );
        }
    }

    Ok(())
}
