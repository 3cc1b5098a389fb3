//! Ranking and Buchholz tiebreak
//!
//! The comparator is a deterministic total order: points descending,
//! Buchholz descending, then name ascending so equal records always come
//! out in the same order.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;

use crate::ids::TeamId;
use crate::team::Team;

/// Compare two teams for standings order
pub fn compare(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.buchholz.cmp(&a.buchholz))
        .then_with(|| a.name.cmp(&b.name))
}

/// Rank teams into standings order.
///
/// Pure: the input is untouched and ranking a ranked list yields the same
/// order.
pub fn rank(teams: &[Team]) -> Vec<Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(compare);
    ranked
}

/// Recompute every team's Buchholz score.
///
/// Buchholz is the sum of the *current* points of every opponent faced —
/// deliberately dynamic, matching the reference behavior: a later result
/// anywhere in the field shifts the tiebreak of everyone who faced that
/// team. Opponents that no longer exist contribute zero. Must be re-run
/// after every applied result.
pub fn recompute_buchholz(teams: &mut [Team]) {
    let points: FxHashMap<TeamId, u32> = teams
        .iter()
        .map(|t| (t.id.clone(), t.points))
        .collect();

    for team in teams.iter_mut() {
        team.buchholz = team
            .opponents
            .iter()
            .filter_map(|id| points.get(id))
            .sum();
    }
}
