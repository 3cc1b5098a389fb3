//! Entity identifiers and the match-id seam

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque team identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

/// Opaque match identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        TeamId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        MatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        TeamId(id.to_string())
    }
}

impl From<String> for TeamId {
    fn from(id: String) -> Self {
        TeamId(id)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        MatchId(id.to_string())
    }
}

impl From<String> for MatchId {
    fn from(id: String) -> Self {
        MatchId(id)
    }
}

/// Source of unique ids for newly proposed matches.
///
/// The engine never invents identifiers; the host supplies them. Any
/// `FnMut() -> MatchId` closure works as a generator.
pub trait IdGen {
    fn next_match_id(&mut self) -> MatchId;
}

impl<F: FnMut() -> MatchId> IdGen for F {
    fn next_match_id(&mut self) -> MatchId {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_transparent_serde() {
        let id = TeamId::from("t1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t1\"");
        let back: TeamId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_closure_id_gen() {
        let mut n = 0u32;
        let mut gen = move || {
            n += 1;
            MatchId::from(format!("m{n}"))
        };
        assert_eq!(gen.next_match_id().as_str(), "m1");
        assert_eq!(gen.next_match_id().as_str(), "m2");
    }
}
