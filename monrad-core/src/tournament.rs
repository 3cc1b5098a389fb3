//! Tournament snapshot and validation
//!
//! The engine owns no storage: every operation takes a full snapshot and
//! returns new matches or a fresh snapshot. The host is responsible for
//! reading and writing snapshots atomically per tournament.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::TeamId;
use crate::matchup::{Bracket, Match};
use crate::team::Team;

/// Tournament lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Swiss,
    Cup,
    Finished,
}

/// Host-facing settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    /// Swiss rounds to play before the cup phase starts
    pub swiss_rounds: u32,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        TournamentSettings { swiss_rounds: 3 }
    }
}

/// Ranked bracket halves frozen when the cup phase starts.
///
/// Standings keep moving as cup results are applied, so bracket membership
/// (and with it the round-1 bye set) cannot be re-derived later; it has to
/// be part of the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CupEntry {
    /// Bracket A seeds, best rank first
    pub a: Vec<TeamId>,
    /// Bracket B seeds, best rank first
    pub b: Vec<TeamId>,
}

impl CupEntry {
    /// Seeds for one bracket, best rank first
    pub fn seeds(&self, bracket: Bracket) -> &[TeamId] {
        match bracket {
            Bracket::A => &self.a,
            Bracket::B => &self.b,
        }
    }
}

/// Full tournament snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub settings: TournamentSettings,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub current_phase: Phase,
    pub current_round: u32,
    /// Present from the start of the cup phase onward
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cup_entry: Option<CupEntry>,
}

impl Tournament {
    /// Create an empty tournament in the setup phase
    pub fn new(id: impl Into<String>, name: impl Into<String>, settings: TournamentSettings) -> Self {
        Tournament {
            id: id.into(),
            name: name.into(),
            settings,
            teams: Vec::new(),
            matches: Vec::new(),
            current_phase: Phase::Setup,
            current_round: 0,
            cup_entry: None,
        }
    }

    /// Look up a team by id
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    /// Register a team; rejects duplicate ids
    pub fn add_team(&mut self, team: Team) -> Result<()> {
        if self.team(&team.id).is_some() {
            return Err(Error::DuplicateTeam(team.id));
        }
        self.teams.push(team);
        Ok(())
    }

    /// Remove a team from the roster.
    ///
    /// Only legal before the first round has been paired; after that, teams
    /// are never deleted mid-tournament.
    pub fn remove_team(&mut self, id: &TeamId) -> Result<Team> {
        if !self.matches.is_empty() || self.current_round > 0 {
            return Err(Error::RemovalAfterStart);
        }
        let pos = self
            .teams
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| Error::UnknownTeam(id.clone()))?;
        Ok(self.teams.remove(pos))
    }

    /// Matches belonging to one bracket tag (`None` = Swiss phase)
    pub fn matches_for(&self, bracket: Option<Bracket>) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.bracket == bracket).collect()
    }

    /// Highest round number played or scheduled for a bracket tag
    pub fn latest_round_for(&self, bracket: Option<Bracket>) -> Option<u32> {
        self.matches
            .iter()
            .filter(|m| m.bracket == bracket)
            .map(|m| m.round)
            .max()
    }

    /// Check snapshot consistency.
    ///
    /// This is the upstream validation the pairing functions rely on:
    /// duplicate team ids, matches referencing unknown teams, self-pairings,
    /// completed matches with a non-participant winner, and a team booked
    /// twice within one round and bracket.
    pub fn validate(&self) -> Result<()> {
        let mut seen_teams: FxHashSet<&TeamId> = FxHashSet::default();
        for team in &self.teams {
            if !seen_teams.insert(&team.id) {
                return Err(Error::DuplicateTeam(team.id.clone()));
            }
        }

        let mut booked: FxHashSet<(u32, Option<Bracket>, &TeamId)> = FxHashSet::default();
        for m in &self.matches {
            if m.team1_id == m.team2_id {
                return Err(Error::SelfPairing(m.id.clone(), m.team1_id.clone()));
            }
            for team_id in [&m.team1_id, &m.team2_id] {
                if !seen_teams.contains(team_id) {
                    return Err(Error::UnknownTeam(team_id.clone()));
                }
                if !booked.insert((m.round, m.bracket, team_id)) {
                    return Err(Error::ConflictingPairing {
                        team: team_id.clone(),
                        round: m.round,
                    });
                }
            }
            if m.is_completed {
                match &m.winner_id {
                    Some(winner) if m.involves(winner) => {}
                    Some(winner) => {
                        return Err(Error::InvalidWinner {
                            match_id: m.id.clone(),
                            winner: winner.clone(),
                        })
                    }
                    None => return Err(Error::MissingWinner(m.id.clone())),
                }
            }
        }

        Ok(())
    }
}
