//! Result processing
//!
//! Applies a reported outcome to a snapshot and returns the updated copy.
//! All preconditions are checked against the input before anything is
//! written, so a failed call leaves the caller's snapshot untouched.

use crate::error::{Error, Result};
use crate::ids::{MatchId, TeamId};
use crate::ranking::recompute_buchholz;
use crate::tournament::Tournament;

/// Apply a completed match result.
///
/// The winner gets `wins += 1, points += 2`; the loser `losses += 1,
/// points += 1` (the consolation point for showing up). Both teams append
/// the other to their opponent history, and the Buchholz tiebreak is
/// recomputed across the whole field.
pub fn apply_result(
    tournament: &Tournament,
    match_id: &MatchId,
    winner_id: &TeamId,
    score1: u32,
    score2: u32,
) -> Result<Tournament> {
    if score1 == score2 {
        return Err(Error::DrawnScore(score1, score2));
    }

    let pos = tournament
        .matches
        .iter()
        .position(|m| &m.id == match_id)
        .ok_or_else(|| Error::UnknownMatch(match_id.clone()))?;

    let matchup = &tournament.matches[pos];
    if matchup.is_completed {
        return Err(Error::MatchAlreadyCompleted(match_id.clone()));
    }
    let loser_id = matchup
        .opponent_of(winner_id)
        .cloned()
        .ok_or_else(|| Error::InvalidWinner {
            match_id: match_id.clone(),
            winner: winner_id.clone(),
        })?;
    let winner_pos = tournament
        .teams
        .iter()
        .position(|t| &t.id == winner_id)
        .ok_or_else(|| Error::UnknownTeam(winner_id.clone()))?;
    let loser_pos = tournament
        .teams
        .iter()
        .position(|t| t.id == loser_id)
        .ok_or_else(|| Error::UnknownTeam(loser_id.clone()))?;

    let mut updated = tournament.clone();

    let m = &mut updated.matches[pos];
    m.team1_score = Some(score1);
    m.team2_score = Some(score2);
    m.winner_id = Some(winner_id.clone());
    m.is_completed = true;

    let winner = &mut updated.teams[winner_pos];
    winner.wins += 1;
    winner.points += 2;
    winner.opponents.push(loser_id.clone());

    let loser = &mut updated.teams[loser_pos];
    loser.losses += 1;
    loser.points += 1;
    loser.opponents.push(winner_id.clone());

    recompute_buchholz(&mut updated.teams);

    Ok(updated)
}

/// Credit a Swiss bye as an automatic win.
///
/// Policy: `wins += 1, points += 2`, but no opponent is appended — there
/// was no opponent, and a phantom entry would distort Buchholz. The
/// tiebreak is still recomputed since the team's points moved.
pub fn credit_bye(tournament: &Tournament, team_id: &TeamId) -> Result<Tournament> {
    let pos = tournament
        .teams
        .iter()
        .position(|t| &t.id == team_id)
        .ok_or_else(|| Error::UnknownTeam(team_id.clone()))?;

    let mut updated = tournament.clone();
    let team = &mut updated.teams[pos];
    team.wins += 1;
    team.points += 2;

    recompute_buchholz(&mut updated.teams);

    Ok(updated)
}
