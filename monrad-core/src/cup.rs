//! Single-elimination cup brackets
//!
//! After the Swiss phase the field splits into two parallel brackets (A
//! and B). Each bracket is sized up to the next power of two; the top
//! seeds take the byes and enter in round 2.

use crate::error::{Error, Result};
use crate::ids::{IdGen, TeamId};
use crate::matchup::{Bracket, Match};
use crate::team::Team;

/// First cup round for one bracket
#[derive(Clone, Debug)]
pub struct BracketRound {
    /// Round number the matches are stamped with (`current_round + 1`)
    pub round: u32,
    /// Round-1 matches between the non-bye seeds
    pub matches: Vec<Match>,
    /// Top seeds advancing without a round-1 match, best rank first.
    ///
    /// The caller must treat these as already qualified for round 2; they
    /// are not credited with a win.
    pub byes: Vec<TeamId>,
}

/// Pair an ordered entrant list consecutively: (0,1), (2,3), ...
///
/// A trailing odd entrant is left out; sizing upstream guarantees that
/// does not happen in a well-formed bracket.
pub fn pair_entrants(
    entrants: &[TeamId],
    bracket: Bracket,
    round: u32,
    ids: &mut impl IdGen,
) -> Vec<Match> {
    entrants
        .chunks_exact(2)
        .map(|pair| {
            Match::new_cup(
                ids.next_match_id(),
                round,
                pair[0].clone(),
                pair[1].clone(),
                bracket,
            )
        })
        .collect()
}

/// Build the first round of a bracket from a ranked team list.
///
/// Bracket size is the smallest power of two that fits the field; the
/// `size - len` best-ranked seeds get byes and the remaining seeds are
/// paired consecutively in rank order.
pub fn build_first_round(
    ranked: &[Team],
    bracket: Bracket,
    current_round: u32,
    ids: &mut impl IdGen,
) -> BracketRound {
    let round = current_round + 1;
    let n = ranked.len();
    if n == 0 {
        return BracketRound {
            round,
            matches: Vec::new(),
            byes: Vec::new(),
        };
    }

    let bracket_size = n.next_power_of_two();
    let bye_count = bracket_size - n;

    let byes: Vec<TeamId> = ranked[..bye_count].iter().map(|t| t.id.clone()).collect();
    let entrants: Vec<TeamId> = ranked[bye_count..].iter().map(|t| t.id.clone()).collect();
    let matches = pair_entrants(&entrants, bracket, round, ids);

    BracketRound { round, matches, byes }
}

/// Pair the next bracket round from a completed round's winners.
///
/// `previous` must be the full set of matches for this bracket at the most
/// recently completed round. Winners are paired consecutively in the order
/// the matches were given, preserving seed order. An incomplete match is a
/// contract violation; fewer than two winners means the bracket is done
/// and yields an empty round.
pub fn next_round(
    previous: &[Match],
    bracket: Bracket,
    current_round: u32,
    ids: &mut impl IdGen,
) -> Result<Vec<Match>> {
    let mut winners = Vec::with_capacity(previous.len());
    for m in previous {
        if !m.is_completed {
            return Err(Error::IncompleteRound {
                bracket,
                match_id: m.id.clone(),
            });
        }
        let winner = m.winner_id.clone().ok_or_else(|| Error::IncompleteRound {
            bracket,
            match_id: m.id.clone(),
        })?;
        winners.push(winner);
    }

    if winners.len() < 2 {
        return Ok(Vec::new());
    }

    Ok(pair_entrants(&winners, bracket, current_round + 1, ids))
}

/// Latest-round matches for a bracket tag
fn final_round<'a>(matches: &'a [Match], bracket: Bracket) -> Vec<&'a Match> {
    let latest = matches
        .iter()
        .filter(|m| m.bracket == Some(bracket))
        .map(|m| m.round)
        .max();
    match latest {
        Some(round) => matches
            .iter()
            .filter(|m| m.bracket == Some(bracket) && m.round == round)
            .collect(),
        None => Vec::new(),
    }
}

/// True iff the bracket's most recent round is a single completed match
pub fn is_cup_complete(matches: &[Match], bracket: Bracket) -> bool {
    let last = final_round(matches, bracket);
    last.len() == 1 && last[0].is_completed
}

/// The bracket champion, once the final is played
pub fn champion(matches: &[Match], bracket: Bracket) -> Option<TeamId> {
    let last = final_round(matches, bracket);
    if last.len() == 1 && last[0].is_completed {
        last[0].winner_id.clone()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MatchId;

    fn seq_ids() -> impl IdGen {
        let mut n = 0u32;
        move || {
            n += 1;
            MatchId::from(format!("c{n}"))
        }
    }

    fn ranked_teams(n: usize) -> Vec<Team> {
        (1..=n)
            .map(|i| Team::new(format!("t{i}"), format!("Seed {i}")))
            .collect()
    }

    fn completed(id: &str, round: u32, t1: &str, t2: &str, winner: &str) -> Match {
        Match {
            team1_score: Some(13),
            team2_score: Some(7),
            is_completed: true,
            winner_id: Some(TeamId::from(winner)),
            ..Match::new_cup(
                MatchId::from(id),
                round,
                TeamId::from(t1),
                TeamId::from(t2),
                Bracket::A,
            )
        }
    }

    #[test]
    fn test_five_teams_three_byes_one_match() {
        let round = build_first_round(&ranked_teams(5), Bracket::A, 3, &mut seq_ids());
        // Bracket size 8, byes for seeds 1-3, one match: seed 4 vs seed 5.
        assert_eq!(round.round, 4);
        assert_eq!(
            round.byes,
            vec![TeamId::from("t1"), TeamId::from("t2"), TeamId::from("t3")]
        );
        assert_eq!(round.matches.len(), 1);
        assert_eq!(round.matches[0].team1_id, TeamId::from("t4"));
        assert_eq!(round.matches[0].team2_id, TeamId::from("t5"));
        assert_eq!(round.matches[0].bracket, Some(Bracket::A));
    }

    #[test]
    fn test_power_of_two_field_has_no_byes() {
        let round = build_first_round(&ranked_teams(8), Bracket::B, 0, &mut seq_ids());
        assert!(round.byes.is_empty());
        assert_eq!(round.matches.len(), 4);
        assert!(round.matches.iter().all(|m| m.bracket == Some(Bracket::B)));
    }

    #[test]
    fn test_empty_field_yields_nothing() {
        let round = build_first_round(&[], Bracket::A, 0, &mut seq_ids());
        assert!(round.matches.is_empty());
        assert!(round.byes.is_empty());
    }

    #[test]
    fn test_next_round_pairs_winners_in_match_order() {
        let previous = vec![
            completed("m1", 4, "t1", "t8", "t1"),
            completed("m2", 4, "t4", "t5", "t5"),
            completed("m3", 4, "t2", "t7", "t2"),
            completed("m4", 4, "t3", "t6", "t6"),
        ];
        let next = next_round(&previous, Bracket::A, 4, &mut seq_ids()).unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].team1_id, TeamId::from("t1"));
        assert_eq!(next[0].team2_id, TeamId::from("t5"));
        assert_eq!(next[1].team1_id, TeamId::from("t2"));
        assert_eq!(next[1].team2_id, TeamId::from("t6"));
        assert!(next.iter().all(|m| m.round == 5));
    }

    #[test]
    fn test_next_round_rejects_incomplete_match() {
        let previous = vec![
            completed("m1", 4, "t1", "t4", "t1"),
            Match::new_cup(
                MatchId::from("m2"),
                4,
                TeamId::from("t2"),
                TeamId::from("t3"),
                Bracket::A,
            ),
        ];
        let err = next_round(&previous, Bracket::A, 4, &mut seq_ids()).unwrap_err();
        assert_eq!(
            err,
            Error::IncompleteRound {
                bracket: Bracket::A,
                match_id: MatchId::from("m2"),
            }
        );
    }

    #[test]
    fn test_single_winner_ends_the_bracket() {
        let previous = vec![completed("m1", 5, "t1", "t2", "t1")];
        let next = next_round(&previous, Bracket::A, 5, &mut seq_ids()).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn test_cup_completion_and_champion() {
        let mut matches = vec![
            completed("m1", 4, "t1", "t4", "t1"),
            completed("m2", 4, "t2", "t3", "t3"),
        ];
        // Two matches in the latest round: not complete yet.
        assert!(!is_cup_complete(&matches, Bracket::A));
        assert_eq!(champion(&matches, Bracket::A), None);

        matches.push(completed("m3", 5, "t1", "t3", "t3"));
        assert!(is_cup_complete(&matches, Bracket::A));
        assert_eq!(champion(&matches, Bracket::A), Some(TeamId::from("t3")));

        // The other bracket is untouched by A's matches.
        assert!(!is_cup_complete(&matches, Bracket::B));
    }
}
