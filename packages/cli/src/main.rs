#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the civic stats toolchain.
//!
//! Cleans the raw civic exports, resolves zip codes for located records,
//! and writes per-zip or per-day metrics as CSV or a JSON chart payload.
//!
//! Uses `indicatif-log-bridge` (via [`civic_stats_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod commands;
mod config;
mod error;
mod output;
mod zips;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use civic_stats_analytics_models::RaceVsArrestParams;
use civic_stats_dataset_models::RaceCategory;

use crate::commands::{CleanTarget, Context};
use crate::config::{Config, OutputFormat};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "civic_stats", about = "Civic dataset cleaning and metrics")]
struct Cli {
    /// Config file (defaults to `civic_stats.toml` when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format (overrides `[output] format`)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    /// Write output to this file instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    /// Number of resolver threads (overrides `[resolver] threads`)
    #[arg(long, global = true)]
    threads: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the zip code nearest to a coordinate
    Resolve {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Write a cleaned dataset
    Clean {
        #[arg(value_enum)]
        dataset: CleanTarget,
        /// Resolve the nearest zip for each row (arrests and crimes only)
        #[arg(long)]
        with_zips: bool,
    },
    /// Arrest rate for a charge group against a race share, per zip
    RaceVsArrest {
        /// Charge group description (e.g., "Robbery"), matched case-insensitively
        #[arg(long)]
        charge_group: String,
        /// Race category (e.g., "BLACK", "hispanic")
        #[arg(long)]
        race: RaceCategory,
    },
    /// Crime rate per 1k residents against median income, per zip
    IncomeVsCrime,
    /// Average crimes per day inside and outside daylight saving time
    DstVsCrime,
    /// Average crimes per day on full-moon days against other days
    FullMoonVsCrime,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = civic_stats_cli_utils::init_logger();

    let config = Config::load(cli.config.as_deref())?;

    if let Some(threads) = cli.threads.or(config.resolver.threads) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(CliError::from)?;
        log::debug!("Using {threads} resolver threads");
    }

    let ctx = Context {
        format: cli.format.unwrap_or(config.output.format),
        output: cli.output,
        config,
        multi: &multi,
    };

    let start = Instant::now();

    run(cli.command, &ctx)?;

    log::info!("Finished in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn run(command: Commands, ctx: &Context<'_>) -> Result<(), CliError> {
    match command {
        Commands::Resolve { lat, lon } => commands::resolve_point(ctx, lat, lon),
        Commands::Clean { dataset, with_zips } => commands::clean(ctx, dataset, with_zips),
        Commands::RaceVsArrest { charge_group, race } => {
            commands::race_vs_arrest_cmd(ctx, &RaceVsArrestParams { charge_group, race })
        }
        Commands::IncomeVsCrime => commands::income_vs_crime_cmd(ctx),
        Commands::DstVsCrime => commands::dst_vs_crime_cmd(ctx),
        Commands::FullMoonVsCrime => commands::full_moon_vs_crime_cmd(ctx),
    }
}
