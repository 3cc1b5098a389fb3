//! Monrad Core - Swiss-system pairing and ranking engine
//!
//! This crate provides the tournament logic for Monrad:
//! - Team and match data model with JSON-friendly snapshots
//! - Ranking with Buchholz tiebreak
//! - Swiss (Monrad) round pairing with rematch avoidance
//! - A/B single-elimination cup brackets with power-of-two byes
//! - Result processing (win/loss records and tiebreak recomputation)
//!
//! The engine is synchronous and stateless: every operation is a pure
//! function from a tournament snapshot to new matches or an updated
//! snapshot. Persistence, transport, and id generation belong to the host.

pub mod cup;
pub mod error;
pub mod ids;
pub mod matchup;
pub mod ranking;
pub mod results;
pub mod swiss;
pub mod team;
pub mod tournament;

// Re-exports for convenient access
pub use cup::{build_first_round, champion, is_cup_complete, next_round, pair_entrants, BracketRound};
pub use error::{Error, Result};
pub use ids::{IdGen, MatchId, TeamId};
pub use matchup::{Bracket, Match};
pub use ranking::{rank, recompute_buchholz};
pub use results::{apply_result, credit_bye};
pub use swiss::{pair_round, PairedRound};
pub use team::Team;
pub use tournament::{CupEntry, Phase, Tournament, TournamentSettings};
