//! patrolgen - split a Scout troop roster into balanced patrols.
//!
//! Reads a roster (PDF, text export or JSON), applies the troop's name tables,
//! and randomly assigns scouts to patrols while respecting sibling, age,
//! rank-balance, incompatibility and patrol-leader constraints. Every run
//! produces a new set of patrols; pass `--seed` to reproduce one.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use patrolgen_core::report::{render_report, summarize, write_report};
use patrolgen_core::{Config, Outcome, PatrolBuilder, Roster};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ============================================================================
// Constants
// ============================================================================

/// Exit status when every attempt stalled out
const EXIT_EXHAUSTED: u8 = 2;

/// Exit status for configuration, roster or I/O errors
const EXIT_ERROR: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "patrolgen",
    version,
    about = "Randomly assign a troop roster into balanced patrols",
    after_help = "EXAMPLES:\n    # Use the roster and settings from the config file\n    patrolgen\n\n    # Three patrols from a roster export, reproducible\n    patrolgen roster.txt --patrols 3 --seed 42\n\n    # Print JSON without touching patrols.txt\n    patrolgen roster.json --json --no-write\n\n    # Remember the roster and patrol count for later runs\n    patrolgen roster.pdf --patrols 3 --save-config"
)]
struct Cli {
    /// Roster file (.pdf, .json or text export). Defaults to `roster_path` from the config.
    roster: Option<PathBuf>,

    /// Config file. Defaults to ~/.config/patrolgen/config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of patrols to create
    #[arg(short, long)]
    patrols: Option<usize>,

    /// Allow brothers (same last name) in the same patrol
    #[arg(long, conflicts_with = "no_allow_related")]
    allow_related: bool,

    /// Keep brothers (same last name) in separate patrols
    #[arg(long)]
    no_allow_related: bool,

    /// Each scout needs another scout within this many years
    #[arg(long)]
    age_difference: Option<u32>,

    /// Target average rank per patrol (Unranked = 0, Scout = 1, ...)
    #[arg(long)]
    target_rank: Option<f64>,

    /// Allowed distance of a patrol's average rank from the target
    #[arg(long)]
    rank_threshold: Option<f64>,

    /// Seed the random draws for a reproducible assignment
    #[arg(long)]
    seed: Option<u64>,

    /// Report file. Overwritten on every successful run.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not write the report file
    #[arg(long)]
    no_write: bool,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Print the number of scouts per rank before assigning
    #[arg(long)]
    counts: bool,

    /// Write the resolved settings back to the config file
    #[arg(long)]
    save_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Fold command-line overrides into the loaded config
    fn apply_overrides(&self, config: &mut Config) {
        let settings = &mut config.settings;
        if let Some(patrols) = self.patrols {
            settings.patrol_count = patrols;
        }
        if self.allow_related {
            settings.relation_allowed = true;
        } else if self.no_allow_related {
            settings.relation_allowed = false;
        }
        if let Some(age) = self.age_difference {
            settings.max_age_difference = age;
        }
        if let Some(target) = self.target_rank {
            settings.target_rank = target;
        }
        if let Some(threshold) = self.rank_threshold {
            settings.rank_threshold = threshold;
        }
        if let Some(ref roster) = self.roster {
            config.roster_path = Some(roster.clone());
        }
        if let Some(ref output) = self.output {
            config.output_path = Some(output.clone());
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: bool) {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!(
                "Could not generate patrols with the current configuration. \
                 Run again, or loosen the age difference or rank threshold."
            );
            ExitCode::from(EXIT_EXHAUSTED)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Returns `Ok(false)` when the constraints could not be satisfied
fn run(cli: &Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);
    config.settings.validate()?;
    debug!(settings = ?config.settings, "Settings resolved");

    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        info!("Config saved");
    }

    let roster_path = config
        .roster_path
        .clone()
        .context("No roster file given and none configured")?;
    let roster = Roster::load(&roster_path, &config.tables)
        .with_context(|| format!("Failed to load roster: {}", roster_path.display()))?;
    info!(roster = %roster, "Roster loaded");

    if cli.counts {
        print_counts(&roster, cli.json)?;
    }

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let outcome = PatrolBuilder::new(&config.settings, &config.tables)
        .build(roster.scouts(), &mut rng)?;

    let placement = match outcome {
        Outcome::Placed(placement) => placement,
        Outcome::Exhausted { .. } => return Ok(false),
    };

    let report = render_report(&placement, &config.tables);
    if cli.json {
        let summary = summarize(&placement, &config.tables);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report);
    }

    if !cli.no_write {
        let output = config.output_path();
        write_report(&output, &report)
            .with_context(|| format!("Failed to write report: {}", output.display()))?;
        info!(path = %output.display(), "Report written");
    }

    Ok(true)
}

fn print_counts(roster: &Roster, json: bool) -> Result<()> {
    let counts = roster.rank_counts();
    if json {
        eprintln!("{}", serde_json::to_string(&counts)?);
    } else {
        for entry in &counts {
            eprintln!("{:<14} {}", entry.rank.display_name(), entry.count);
        }
        eprintln!("{:<14} {}", "Total", roster.len());
    }
    Ok(())
}
