//! Engine error taxonomy
//!
//! Every variant is an input contract violation: the operation that raised
//! it performed no mutation, so the caller's snapshot is still valid and a
//! corrected retry is safe. Degenerate-but-legal inputs (fewer than two
//! teams to pair, a finished bracket) yield empty results instead.

use crate::ids::{MatchId, TeamId};
use crate::matchup::Bracket;

/// Engine result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Input contract violations reported by the engine
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("duplicate team id: {0}")]
    DuplicateTeam(TeamId),

    #[error("unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("unknown match: {0}")]
    UnknownMatch(MatchId),

    #[error("match {0} is already completed")]
    MatchAlreadyCompleted(MatchId),

    #[error("winner {winner} is not a participant of match {match_id}")]
    InvalidWinner { match_id: MatchId, winner: TeamId },

    #[error("drawn score {0}-{1} is not a reportable outcome")]
    DrawnScore(u32, u32),

    #[error("cannot advance bracket {bracket}: match {match_id} is not completed")]
    IncompleteRound { bracket: Bracket, match_id: MatchId },

    #[error("match {0} is marked completed but has no winner")]
    MissingWinner(MatchId),

    #[error("match {0} pairs team {1} against itself")]
    SelfPairing(MatchId, TeamId),

    #[error("team {team} appears in more than one match in round {round}")]
    ConflictingPairing { team: TeamId, round: u32 },

    #[error("teams can only be removed before the first round is paired")]
    RemovalAfterStart,
}
