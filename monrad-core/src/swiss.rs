//! Swiss (Monrad) round pairing
//!
//! Teams are ranked, then walked top to bottom: each unpaired team takes
//! the nearest unpaired team it has not yet faced. When every remaining
//! candidate is a rematch, the nearest one is taken anyway — keeping the
//! pairing close in standing outranks rematch avoidance once avoidance is
//! infeasible.

use crate::ids::{IdGen, TeamId};
use crate::matchup::Match;
use crate::ranking::rank;
use crate::tournament::Tournament;

/// One Swiss round proposal
#[derive(Clone, Debug)]
pub struct PairedRound {
    /// Round number the matches are stamped with (`current_round + 1`)
    pub round: u32,
    /// Proposed matches, unplayed, no bracket tag
    pub matches: Vec<Match>,
    /// The odd team out, if the roster size is odd.
    ///
    /// The engine only surfaces the bye; crediting it (an automatic win)
    /// is the caller's move via `results::credit_bye`.
    pub bye: Option<TeamId>,
}

/// Pair the next Swiss round from the current standings.
///
/// Fewer than two teams yields an empty round with no bye: there is
/// nothing to pair and the caller decides what the phase does next.
pub fn pair_round(tournament: &Tournament, ids: &mut impl IdGen) -> PairedRound {
    let round = tournament.current_round + 1;

    if tournament.teams.len() < 2 {
        return PairedRound {
            round,
            matches: Vec::new(),
            bye: None,
        };
    }

    let ranked = rank(&tournament.teams);
    let mut paired = vec![false; ranked.len()];
    let mut matches = Vec::new();

    for i in 0..ranked.len() {
        if paired[i] {
            continue;
        }

        // Nearest unpaired team not yet faced.
        let mut opponent = (i + 1..ranked.len())
            .find(|&j| !paired[j] && !ranked[i].has_faced(&ranked[j].id));

        // All remaining candidates are rematches: take the nearest anyway.
        if opponent.is_none() {
            opponent = (i + 1..ranked.len()).find(|&j| !paired[j]);
            if let Some(j) = opponent {
                tracing::warn!(
                    "round {}: forced rematch {} vs {}",
                    round,
                    ranked[i].id,
                    ranked[j].id
                );
            }
        }

        if let Some(j) = opponent {
            matches.push(Match::new(
                ids.next_match_id(),
                round,
                ranked[i].id.clone(),
                ranked[j].id.clone(),
            ));
            paired[i] = true;
            paired[j] = true;
        }
    }

    let bye = (0..ranked.len())
        .find(|&i| !paired[i])
        .map(|i| ranked[i].id.clone());

    PairedRound { round, matches, bye }
}
