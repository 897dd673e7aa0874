// Roster loading from CSV.
//
// Expected header: id,name,skill_rating with optional forward, midfield,
// defender, wins, matches_played and avatar columns. Extra columns are
// ignored. Rows that cannot be used are skipped with a warning.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use teamsplit_core::{Player, Position, PositionSkills};
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: String,
    #[serde(default)]
    name: String,
    skill_rating: i32,
    #[serde(default)]
    forward: Option<i32>,
    #[serde(default)]
    midfield: Option<i32>,
    #[serde(default)]
    defender: Option<i32>,
    #[serde(default)]
    wins: Option<u32>,
    #[serde(default)]
    matches_played: Option<u32>,
    #[serde(default)]
    avatar: Option<String>,
}

impl RawPlayer {
    fn into_player(self) -> Player {
        let mut skills = PositionSkills::new();
        for (pos, rating) in [
            (Position::Forward, self.forward),
            (Position::Midfield, self.midfield),
            (Position::Defender, self.defender),
        ] {
            if let Some(r) = rating {
                skills.set(pos, r);
            }
        }

        let mut player = Player::new(self.id.trim(), self.name.trim(), self.skill_rating);
        if !skills.is_empty() {
            player.position_skills = Some(skills);
        }
        player.avatar = self.avatar.filter(|a| !a.trim().is_empty());
        player.wins = self.wins.unwrap_or(0);
        player.matches_played = self.matches_played.unwrap_or(0);
        player
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load players from any CSV reader. `label` names the source in errors.
pub fn load_players_from_reader<R: Read>(reader: R, label: &str) -> Result<Vec<Player>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| RosterError::Csv {
        path: label.to_string(),
        source: e,
    })?;
    for required in ["id", "skill_rating"] {
        if !headers.iter().any(|h| h == required) {
            return Err(RosterError::Validation(format!(
                "{label}: missing required column `{required}`"
            )));
        }
    }

    let mut players = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for result in rdr.deserialize::<RawPlayer>() {
        match result {
            Ok(raw) => {
                if raw.id.trim().is_empty() {
                    warn!("skipping player '{}': empty id", raw.name.trim());
                    continue;
                }
                let player = raw.into_player();
                if !seen.insert(player.id.clone()) {
                    warn!("duplicate player id '{}', keeping the first row", player.id);
                    continue;
                }
                players.push(player);
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }

    Ok(players)
}

/// Load players from a CSV file on disk.
pub fn load_players(path: &Path) -> Result<Vec<Player>, RosterError> {
    let label = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: label.clone(),
        source: e,
    })?;
    let players = load_players_from_reader(file, &label)?;
    if players.is_empty() {
        return Err(RosterError::Validation(format!("{label}: no usable players")));
    }
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
