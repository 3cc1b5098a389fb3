//! Monrad CLI - tournament host application
//!
//! Commands:
//! - init / add-team / remove-team: roster management
//! - pair / report / standings: the Swiss phase
//! - start-cup / advance: the A/B cup phase
//! - simulate: seeded end-to-end dry run
//!
//! The engine in monrad-core is pure; this binary owns everything it
//! leaves to the host: the JSON snapshot file, match ids, bye crediting,
//! and phase transitions.

mod cup_cmd;
mod roster;
mod rounds;
mod simulate;
mod store;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "monrad")]
#[command(about = "Swiss-system tournament runner with A/B cup finals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tournament file
    Init(roster::InitArgs),
    /// Register a team (setup phase only)
    AddTeam(roster::AddTeamArgs),
    /// Remove a team (before the first round only)
    RemoveTeam(roster::RemoveTeamArgs),
    /// Pair the next Swiss round
    Pair(rounds::PairArgs),
    /// Report a match result
    Report(rounds::ReportArgs),
    /// Show the current standings
    Standings(rounds::StandingsArgs),
    /// End the Swiss phase and build the A/B cup brackets
    StartCup(cup_cmd::StartCupArgs),
    /// Advance a cup bracket to its next round
    Advance(cup_cmd::AdvanceArgs),
    /// Run a seeded tournament end to end
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => roster::run_init(args),
        Commands::AddTeam(args) => roster::run_add_team(args),
        Commands::RemoveTeam(args) => roster::run_remove_team(args),
        Commands::Pair(args) => rounds::run_pair(args),
        Commands::Report(args) => rounds::run_report(args),
        Commands::Standings(args) => rounds::run_standings(args),
        Commands::StartCup(args) => cup_cmd::run_start_cup(args),
        Commands::Advance(args) => cup_cmd::run_advance(args),
        Commands::Simulate(args) => simulate::run(args),
    }
}
