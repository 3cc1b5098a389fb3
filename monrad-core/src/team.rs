//! Team record keeping

use serde::{Deserialize, Serialize};

use crate::ids::TeamId;

/// A competitor and its running record.
///
/// Invariants (maintained by the result processor, never by hand):
/// - `wins + losses` equals the number of completed matches played
/// - `points == 2 * wins + losses` (win = 2 points, loss = 1 consolation point)
/// - `buchholz` is derived from `opponents` and never assigned directly
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    /// Buchholz tiebreak: sum of the current points of every opponent faced
    pub buchholz: u32,
    /// Ids of opponents faced, in match order, one entry per completed match
    pub opponents: Vec<TeamId>,
}

impl Team {
    /// Create a team with a zeroed record
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Team {
            id: id.into(),
            name: name.into(),
            wins: 0,
            losses: 0,
            points: 0,
            buchholz: 0,
            opponents: Vec::new(),
        }
    }

    /// Completed matches this team has played
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Whether this team has already faced `opponent`
    pub fn has_faced(&self, opponent: &TeamId) -> bool {
        self.opponents.contains(opponent)
    }
}
