//! Roster commands: init, add-team, remove-team

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use monrad_core::{Phase, Team, TeamId, Tournament, TournamentSettings};

use crate::store;

#[derive(Args)]
pub struct InitArgs {
    /// Tournament file to create
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Tournament name
    #[arg(long)]
    pub name: String,

    /// Number of Swiss rounds before the cup phase
    #[arg(long, default_value = "3")]
    pub swiss_rounds: u32,
}

#[derive(Args)]
pub struct AddTeamArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Team name
    #[arg(long)]
    pub name: String,

    /// Team id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args)]
pub struct RemoveTeamArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Team id to remove
    #[arg(long)]
    pub id: String,
}

pub fn run_init(args: InitArgs) -> Result<()> {
    if args.file.exists() {
        bail!("refusing to overwrite {}", args.file.display());
    }
    let id = args
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tournament".to_string());
    let tournament = Tournament::new(
        id,
        args.name,
        TournamentSettings {
            swiss_rounds: args.swiss_rounds,
        },
    );
    tracing::info!(
        "created {} with {} Swiss rounds",
        tournament.name,
        tournament.settings.swiss_rounds
    );
    store::save(&args.file, &tournament)
}

pub fn run_add_team(args: AddTeamArgs) -> Result<()> {
    let mut tournament = store::load(&args.file)?;
    if tournament.current_phase != Phase::Setup {
        bail!("teams can only be registered during setup");
    }
    let id = match args.id {
        Some(id) => TeamId::from(id),
        None => store::next_team_id(&tournament),
    };
    tournament
        .add_team(Team::new(id.clone(), args.name.clone()))
        .with_context(|| format!("failed to add team {}", args.name))?;
    tracing::info!("registered {} as {}", args.name, id);
    store::save(&args.file, &tournament)
}

pub fn run_remove_team(args: RemoveTeamArgs) -> Result<()> {
    let mut tournament = store::load(&args.file)?;
    let removed = tournament
        .remove_team(&TeamId::from(args.id))
        .context("failed to remove team")?;
    tracing::info!("removed {}", removed.name);
    store::save(&args.file, &tournament)
}
