//! Skill Queue - Binary Entry Point
//!
//! Drives the scheduler with a simulated clock and logs every engine event.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use skill_queue::{EngineConfig, Scheduler, TickOutcome};

#[derive(Parser)]
#[command(
    name = "skill-queue",
    about = "Skill-based matchmaking queue simulator",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine for a fixed number of simulated ticks
    Run {
        /// Number of ticks to run
        #[arg(short, long, default_value_t = 10_000)]
        ticks: u64,
        /// Simulated milliseconds between ticks
        #[arg(long, default_value_t = 10)]
        tick_ms: u64,
        /// TOML config file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// RNG seed, overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,skill_queue=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ticks,
            tick_ms,
            config,
            seed,
        } => run(ticks, tick_ms, config, seed),
    }
}

fn run(ticks: u64, tick_ms: u64, path: Option<PathBuf>, seed: Option<u64>) -> anyhow::Result<()> {
    let mut config = match &path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    info!(
        capacity = config.capacity,
        team_size = config.team_size,
        seed = ?config.seed,
        ticks,
        tick_ms,
        "starting skill-queue"
    );

    let mut scheduler = Scheduler::with_tracing(config)?;

    let mut now = 0u64;
    for _ in 0..ticks {
        scheduler.tick(now);
        now = now.saturating_add(tick_ms);
    }

    // Let a stepped contest finish before reporting
    scheduler.stop();
    while scheduler.tick(now) != TickOutcome::Stopped {
        now = now.saturating_add(tick_ms);
    }

    let stats = scheduler.stats();
    info!(
        ticks = stats.ticks,
        admissions = stats.admissions,
        failed_attempts = stats.failed_attempts,
        matches_formed = stats.matches_formed,
        contests_completed = stats.contests_completed,
        "run finished"
    );

    let registry = &scheduler.context().registry;
    let mut entities: Vec<_> = registry.iter().map(|(_, entity)| entity).collect();
    entities.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    for entity in entities {
        info!(
            id = entity.id,
            rating = %format!("{:.2}", entity.rating()),
            status = ?entity.status(),
            joined_at = entity.joined_at,
            "entity"
        );
    }

    info!(digest = %registry.state_digest_hex(), "registry state");
    Ok(())
}
