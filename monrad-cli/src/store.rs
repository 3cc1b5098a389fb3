//! Snapshot persistence and id generation
//!
//! The tournament lives in a single JSON file, read and rewritten whole on
//! every command. That file is the one-writer-per-tournament discipline the
//! engine requires; the engine itself never touches the disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use monrad_core::{IdGen, MatchId, TeamId, Tournament};

/// Load and validate a tournament snapshot
pub fn load(path: &Path) -> Result<Tournament> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read tournament file: {}", path.display()))?;
    let tournament: Tournament = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse tournament file: {}", path.display()))?;
    tournament
        .validate()
        .context("tournament snapshot failed validation")?;
    Ok(tournament)
}

/// Write a tournament snapshot as pretty JSON
pub fn save(path: &Path, tournament: &Tournament) -> Result<()> {
    let json = serde_json::to_string_pretty(tournament).context("failed to serialize tournament")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write tournament file: {}", path.display()))?;
    Ok(())
}

/// Match-id generator seeded from the ids already in the snapshot.
///
/// Ids are `mNNN`; the counter starts past the highest existing number so
/// ids stay unique within the tournament even across deleted rounds.
pub fn match_ids(tournament: &Tournament) -> impl IdGen {
    let mut next = highest_suffix(tournament.matches.iter().map(|m| m.id.as_str()), 'm');
    move || {
        next += 1;
        MatchId::from(format!("m{next:03}"))
    }
}

/// Team-id generator, same scheme with a `t` prefix
pub fn next_team_id(tournament: &Tournament) -> TeamId {
    let next = highest_suffix(tournament.teams.iter().map(|t| t.id.as_str()), 't');
    TeamId::from(format!("t{:03}", next + 1))
}

fn highest_suffix<'a>(ids: impl Iterator<Item = &'a str>, prefix: char) -> u32 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|rest| rest.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use monrad_core::{Match, Team, TournamentSettings};

    fn tournament() -> Tournament {
        let mut t = Tournament::new("trn1", "Test", TournamentSettings::default());
        t.add_team(Team::new("t001", "Alfa")).unwrap();
        t.add_team(Team::new("t007", "Beta")).unwrap();
        t
    }

    #[test]
    fn test_match_ids_continue_past_existing() {
        let mut t = tournament();
        t.matches.push(Match::new(
            MatchId::from("m004"),
            1,
            TeamId::from("t001"),
            TeamId::from("t007"),
        ));
        let mut ids = match_ids(&t);
        assert_eq!(ids.next_match_id().as_str(), "m005");
        assert_eq!(ids.next_match_id().as_str(), "m006");
    }

    #[test]
    fn test_team_ids_skip_holes() {
        let t = tournament();
        assert_eq!(next_team_id(&t).as_str(), "t008");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trn.json");
        let t = tournament();
        save(&path, &t).unwrap();
        let back = load(&path).unwrap();
        assert_eq!(back, t);
    }
}
