//! Cup phase commands: start-cup and advance
//!
//! The host decides the swiss → cup transition: the ranked field is halved,
//! the top half seeding bracket A and the bottom half bracket B, and both
//! first rounds are built. Advancing merges round-1 byes back in, then
//! follows the winners until each bracket has a champion.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use monrad_core::{
    build_first_round, champion, is_cup_complete, next_round, pair_entrants, rank, Bracket,
    CupEntry, Match, Phase, TeamId, Tournament,
};

use crate::store;

#[derive(Args)]
pub struct StartCupArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct AdvanceArgs {
    /// Tournament file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Bracket to advance (A or B)
    #[arg(long, value_name = "A|B")]
    pub bracket: String,
}

pub fn run_start_cup(args: StartCupArgs) -> Result<()> {
    let tournament = store::load(&args.file)?;
    let updated = start_cup(&tournament)?;
    store::save(&args.file, &updated)
}

pub fn run_advance(args: AdvanceArgs) -> Result<()> {
    let tournament = store::load(&args.file)?;
    let bracket = parse_bracket(&args.bracket)?;
    let updated = advance_bracket(&tournament, bracket)?;
    store::save(&args.file, &updated)
}

pub fn parse_bracket(s: &str) -> Result<Bracket> {
    match s {
        "A" | "a" => Ok(Bracket::A),
        "B" | "b" => Ok(Bracket::B),
        other => bail!("unknown bracket {other:?}, expected A or B"),
    }
}

/// End the Swiss phase and build both cup brackets' first rounds
pub fn start_cup(tournament: &Tournament) -> Result<Tournament> {
    if tournament.current_phase != Phase::Swiss {
        bail!(
            "cannot start the cup from the {:?} phase",
            tournament.current_phase
        );
    }
    if tournament.current_round < tournament.settings.swiss_rounds {
        bail!(
            "only {} of {} Swiss rounds played",
            tournament.current_round,
            tournament.settings.swiss_rounds
        );
    }
    if let Some(open) = tournament.matches.iter().find(|m| !m.is_completed) {
        bail!("match {} is still open; report it before the cup", open.id);
    }
    if tournament.teams.len() < 4 {
        bail!("the A/B cup needs at least 4 teams");
    }

    let standings = rank(&tournament.teams);
    let half = (standings.len() + 1) / 2;
    let (a_half, b_half) = standings.split_at(half);

    let mut updated = tournament.clone();
    updated.cup_entry = Some(CupEntry {
        a: a_half.iter().map(|t| t.id.clone()).collect(),
        b: b_half.iter().map(|t| t.id.clone()).collect(),
    });

    let mut ids = store::match_ids(tournament);
    for (bracket, seeds) in [(Bracket::A, a_half), (Bracket::B, b_half)] {
        let round = build_first_round(seeds, bracket, updated.current_round, &mut ids);
        tracing::info!(
            "bracket {}: round {} with {} matches, {} byes",
            bracket,
            round.round,
            round.matches.len(),
            round.byes.len()
        );
        for bye in &round.byes {
            tracing::info!("bracket {}: {} advances directly to round 2", bracket, bye);
        }
        updated.matches.extend(round.matches);
        updated.current_round = round.round;
    }
    updated.current_phase = Phase::Cup;

    Ok(updated)
}

/// Generate the next round for one bracket from its completed latest round
pub fn advance_bracket(tournament: &Tournament, bracket: Bracket) -> Result<Tournament> {
    if tournament.current_phase != Phase::Cup {
        bail!(
            "cannot advance a bracket in the {:?} phase",
            tournament.current_phase
        );
    }
    if bracket_done(tournament, bracket) {
        let winner = champion(&tournament.matches, bracket)
            .context("completed bracket has no champion")?;
        bail!("bracket {bracket} is complete; champion: {winner}");
    }

    let tagged = tournament.matches_for(Some(bracket));
    let Some(latest) = tagged.iter().map(|m| m.round).max() else {
        bail!("bracket {bracket} has no matches");
    };
    let first = tagged.iter().map(|m| m.round).min().unwrap_or(latest);
    let previous: Vec<_> = tagged
        .iter()
        .filter(|m| m.round == latest)
        .map(|m| (*m).clone())
        .collect();

    let mut ids = store::match_ids(tournament);
    let next = if latest == first {
        // Round 1: the bye seeds re-enter ahead of the round-1 winners.
        let byes = first_round_byes(tournament, bracket, &previous);
        let mut entrants = byes;
        for m in &previous {
            if !m.is_completed {
                bail!("cannot advance bracket {bracket}: match {} is not completed", m.id);
            }
            entrants.push(
                m.winner_id
                    .clone()
                    .with_context(|| format!("completed match {} has no winner", m.id))?,
            );
        }
        pair_entrants(&entrants, bracket, tournament.current_round + 1, &mut ids)
    } else {
        next_round(&previous, bracket, tournament.current_round, &mut ids)
            .with_context(|| format!("cannot advance bracket {bracket}"))?
    };

    if next.is_empty() {
        bail!("bracket {bracket} has nothing left to pair");
    }

    tracing::info!("bracket {}: paired {} matches", bracket, next.len());

    let mut updated = tournament.clone();
    updated.current_round += 1;
    updated.matches.extend(next);
    Ok(updated)
}

/// Whether a bracket has truly produced its champion.
///
/// `is_cup_complete` alone is fooled by a one-match first round whose bye
/// seeds are still waiting to enter; such a bracket is not done.
pub fn bracket_done(tournament: &Tournament, bracket: Bracket) -> bool {
    let tagged = tournament.matches_for(Some(bracket));
    let Some(latest) = tagged.iter().map(|m| m.round).max() else {
        return false;
    };
    let first = tagged.iter().map(|m| m.round).min().unwrap_or(latest);
    if latest == first {
        let round_one: Vec<Match> = tagged
            .iter()
            .filter(|m| m.round == latest)
            .map(|m| (*m).clone())
            .collect();
        if !first_round_byes(tournament, bracket, &round_one).is_empty() {
            return false;
        }
    }
    is_cup_complete(&tournament.matches, bracket)
}

/// Seeds of a bracket that sat out round 1, in stored seed order
fn first_round_byes(
    tournament: &Tournament,
    bracket: Bracket,
    round_one: &[Match],
) -> Vec<TeamId> {
    let Some(entry) = &tournament.cup_entry else {
        return Vec::new();
    };
    entry
        .seeds(bracket)
        .iter()
        .filter(|&id| !round_one.iter().any(|m| m.involves(id)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::{pair_next, report_result};
    use monrad_core::{Team, TournamentSettings};

    /// One-round Swiss tournament over `n` teams, all results reported
    fn after_swiss(n: usize) -> Tournament {
        let mut t = Tournament::new("trn1", "Test", TournamentSettings { swiss_rounds: 1 });
        for i in 1..=n {
            t.add_team(Team::new(format!("t{i:03}"), format!("Lag {i:02}")))
                .unwrap();
        }
        let mut t = pair_next(&t).unwrap();
        let open: Vec<_> = t
            .matches
            .iter()
            .map(|m| (m.id.clone(), m.team1_id.clone()))
            .collect();
        for (id, winner) in open {
            t = report_result(&t, &id, &winner, 13, 5).unwrap();
        }
        t
    }

    #[test]
    fn test_start_cup_splits_field_in_half() {
        let t = start_cup(&after_swiss(8)).unwrap();
        assert_eq!(t.current_phase, Phase::Cup);
        let entry = t.cup_entry.as_ref().unwrap();
        assert_eq!(entry.a.len(), 4);
        assert_eq!(entry.b.len(), 4);
        // Both brackets are full powers of two: two matches each, no byes.
        assert_eq!(t.matches_for(Some(Bracket::A)).len(), 2);
        assert_eq!(t.matches_for(Some(Bracket::B)).len(), 2);
    }

    #[test]
    fn test_start_cup_odd_field_gives_top_half_the_extra_seed() {
        let t = start_cup(&after_swiss(5)).unwrap();
        let entry = t.cup_entry.as_ref().unwrap();
        assert_eq!(entry.a.len(), 3);
        assert_eq!(entry.b.len(), 2);
        // A: size-4 bracket, one bye, one match. B: straight final.
        assert_eq!(t.matches_for(Some(Bracket::A)).len(), 1);
        assert_eq!(t.matches_for(Some(Bracket::B)).len(), 1);
    }

    #[test]
    fn test_start_cup_requires_swiss_to_be_done() {
        let mut t = after_swiss(4);
        t.settings.swiss_rounds = 3;
        assert!(start_cup(&t).is_err());
    }

    #[test]
    fn test_advance_merges_bye_seeds() {
        let mut t = start_cup(&after_swiss(5)).unwrap();
        let (id, winner) = {
            let m = &t.matches_for(Some(Bracket::A))[0];
            (m.id.clone(), m.team1_id.clone())
        };
        t = report_result(&t, &id, &winner, 13, 2).unwrap();

        let advanced = advance_bracket(&t, Bracket::A).unwrap();
        let a_matches = advanced.matches_for(Some(Bracket::A));
        assert_eq!(a_matches.len(), 2);
        let final_match = a_matches.last().unwrap();
        // Best bye seed vs the round-1 winner.
        let entry = advanced.cup_entry.as_ref().unwrap();
        assert_eq!(final_match.team1_id, entry.a[0]);
        assert_eq!(final_match.team2_id, winner);
    }

    #[test]
    fn test_advance_refuses_open_round() {
        let t = start_cup(&after_swiss(8)).unwrap();
        assert!(advance_bracket(&t, Bracket::A).is_err());
    }

    #[test]
    fn test_advance_refuses_completed_bracket() {
        let mut t = start_cup(&after_swiss(4)).unwrap();
        // B has two seeds, so a single final; complete it.
        let (id, winner) = {
            let m = &t.matches_for(Some(Bracket::B))[0];
            (m.id.clone(), m.team1_id.clone())
        };
        t = report_result(&t, &id, &winner, 13, 10).unwrap();
        assert!(is_cup_complete(&t.matches, Bracket::B));
        let err = advance_bracket(&t, Bracket::B).unwrap_err();
        assert!(err.to_string().contains("champion"));
    }
}
