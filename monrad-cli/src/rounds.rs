//! Swiss round commands: pair, report, standings

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use monrad_core::{
    apply_result, credit_bye, pair_round, rank, Bracket, MatchId, Phase, TeamId, Tournament,
};

use crate::cup_cmd::bracket_done;
use crate::store;

#[derive(Args)]
pub struct PairArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Match id
    #[arg(long = "match", value_name = "ID")]
    pub match_id: String,

    /// Winning team id
    #[arg(long, value_name = "TEAM")]
    pub winner: String,

    /// Score of team 1
    #[arg(long)]
    pub score1: u32,

    /// Score of team 2
    #[arg(long)]
    pub score2: u32,
}

#[derive(Args)]
pub struct StandingsArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

/// Pair the next Swiss round and persist it
pub fn run_pair(args: PairArgs) -> Result<()> {
    let tournament = store::load(&args.file)?;
    let updated = pair_next(&tournament)?;

    for m in updated.matches.iter().filter(|m| m.round == updated.current_round) {
        println!("  {}: {} vs {}", m.id, m.team1_id, m.team2_id);
    }
    store::save(&args.file, &updated)
}

/// Report a match result and persist the updated snapshot
pub fn run_report(args: ReportArgs) -> Result<()> {
    let tournament = store::load(&args.file)?;
    let updated = report_result(
        &tournament,
        &MatchId::from(args.match_id),
        &TeamId::from(args.winner),
        args.score1,
        args.score2,
    )?;
    store::save(&args.file, &updated)
}

/// Print the current standings
pub fn run_standings(args: StandingsArgs) -> Result<()> {
    let tournament = store::load(&args.file)?;
    print_standings(&tournament);
    Ok(())
}

/// Pair the next Swiss round: rank, pair, credit any bye, bump the round.
///
/// The first paired round moves the tournament out of the setup phase.
pub fn pair_next(tournament: &Tournament) -> Result<Tournament> {
    match tournament.current_phase {
        Phase::Setup | Phase::Swiss => {}
        phase => bail!("cannot pair a Swiss round in the {phase:?} phase"),
    }
    if tournament.current_round >= tournament.settings.swiss_rounds {
        bail!(
            "all {} Swiss rounds are paired; start the cup phase",
            tournament.settings.swiss_rounds
        );
    }
    if let Some(open) = tournament
        .matches
        .iter()
        .find(|m| !m.is_completed)
    {
        bail!("match {} is still open; report it before pairing on", open.id);
    }

    let mut ids = store::match_ids(tournament);
    let round = pair_round(tournament, &mut ids);
    if round.matches.is_empty() {
        bail!("not enough teams to pair a round");
    }

    tracing::info!(
        "paired round {}: {} matches",
        round.round,
        round.matches.len()
    );

    let mut updated = tournament.clone();
    updated.matches.extend(round.matches);
    updated.current_round = round.round;
    updated.current_phase = Phase::Swiss;

    if let Some(bye) = &round.bye {
        tracing::info!("round {}: bye credited to {}", round.round, bye);
        updated = credit_bye(&updated, bye).context("failed to credit the bye")?;
    }

    Ok(updated)
}

/// Apply a result; once both cup finals are played, finish the tournament
pub fn report_result(
    tournament: &Tournament,
    match_id: &MatchId,
    winner: &TeamId,
    score1: u32,
    score2: u32,
) -> Result<Tournament> {
    let mut updated = apply_result(tournament, match_id, winner, score1, score2)
        .with_context(|| format!("failed to apply result for match {match_id}"))?;
    tracing::info!("match {}: {} wins {}-{}", match_id, winner, score1, score2);

    if updated.current_phase == Phase::Cup
        && bracket_done(&updated, Bracket::A)
        && bracket_done(&updated, Bracket::B)
    {
        updated.current_phase = Phase::Finished;
        tracing::info!("both cup finals played; tournament finished");
    }

    Ok(updated)
}

/// Print a standings table in rank order
pub fn print_standings(tournament: &Tournament) {
    let standings = rank(&tournament.teams);

    println!("\n=== {} ===", tournament.name);
    println!(
        "{:<5} {:<24} {:>5} {:>7} {:>9}",
        "Rank", "Team", "W-L", "Points", "Buchholz"
    );
    for (i, team) in standings.iter().enumerate() {
        println!(
            "{:<5} {:<24} {:>2}-{:<2} {:>7} {:>9}",
            i + 1,
            team.name,
            team.wins,
            team.losses,
            team.points,
            team.buchholz
        );
    }
}
