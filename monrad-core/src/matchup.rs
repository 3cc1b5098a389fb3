//! Match entity and cup bracket discriminator

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{MatchId, TeamId};

/// Cup bracket discriminator.
///
/// Swiss-phase matches carry no tag; cup-phase matches belong to the A
/// bracket (top half of the Swiss standings) or the B bracket (bottom half).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bracket {
    A,
    B,
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bracket::A => f.write_str("A"),
            Bracket::B => f.write_str("B"),
        }
    }
}

/// A scheduled or completed match between two teams.
///
/// Once `is_completed` is set the match is immutable; scores and winner are
/// present iff completed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub round: u32,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<u32>,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<TeamId>,
    /// Cup bracket tag; absent for Swiss-phase matches
    #[serde(rename = "cupType", default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<Bracket>,
    /// Display-only court assignment, ignored by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_number: Option<String>,
}

impl Match {
    /// Create an unplayed match
    pub fn new(id: MatchId, round: u32, team1_id: TeamId, team2_id: TeamId) -> Self {
        Match {
            id,
            round,
            team1_id,
            team2_id,
            team1_score: None,
            team2_score: None,
            is_completed: false,
            winner_id: None,
            bracket: None,
            court_number: None,
        }
    }

    /// Create an unplayed cup match carrying a bracket tag
    pub fn new_cup(
        id: MatchId,
        round: u32,
        team1_id: TeamId,
        team2_id: TeamId,
        bracket: Bracket,
    ) -> Self {
        Match {
            bracket: Some(bracket),
            ..Match::new(id, round, team1_id, team2_id)
        }
    }

    /// Whether `team` is one of the two participants
    pub fn involves(&self, team: &TeamId) -> bool {
        &self.team1_id == team || &self.team2_id == team
    }

    /// The participant that is not `team`, if `team` participates at all
    pub fn opponent_of(&self, team: &TeamId) -> Option<&TeamId> {
        if &self.team1_id == team {
            Some(&self.team2_id)
        } else if &self.team2_id == team {
            Some(&self.team1_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unplayed() -> Match {
        Match::new(
            MatchId::from("m1"),
            1,
            TeamId::from("t1"),
            TeamId::from("t2"),
        )
    }

    #[test]
    fn test_new_match_is_unplayed() {
        let m = unplayed();
        assert!(!m.is_completed);
        assert!(m.team1_score.is_none());
        assert!(m.team2_score.is_none());
        assert!(m.winner_id.is_none());
        assert!(m.bracket.is_none());
    }

    #[test]
    fn test_opponent_of() {
        let m = unplayed();
        assert_eq!(m.opponent_of(&TeamId::from("t1")), Some(&TeamId::from("t2")));
        assert_eq!(m.opponent_of(&TeamId::from("t2")), Some(&TeamId::from("t1")));
        assert_eq!(m.opponent_of(&TeamId::from("t9")), None);
    }

    #[test]
    fn test_absent_optionals_stay_absent_on_the_wire() {
        let json = serde_json::to_string(&unplayed()).unwrap();
        assert!(!json.contains("cupType"));
        assert!(!json.contains("winnerId"));
        assert!(!json.contains("team1Score"));
        assert!(!json.contains("courtNumber"));
        assert!(!json.contains("null"));

        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unplayed());
    }

    #[test]
    fn test_cup_match_tag_on_the_wire() {
        let m = Match::new_cup(
            MatchId::from("m2"),
            4,
            TeamId::from("t1"),
            TeamId::from("t2"),
            Bracket::B,
        );
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"cupType\":\"B\""));
        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bracket, Some(Bracket::B));
    }
}
