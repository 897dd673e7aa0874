// Player model and composite skill scoring.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The three canonical on-field attributes that feed the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Forward,
    Midfield,
    Defender,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Forward, Position::Midfield, Position::Defender];

    /// Parse an attribute name into a Position.
    ///
    /// Accepts the full names and the short forms used on player cards
    /// ("F", "M", "D"), case-insensitively.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "forward" | "f" | "fwd" => Some(Position::Forward),
            "midfield" | "m" | "mid" => Some(Position::Midfield),
            "defender" | "d" | "def" => Some(Position::Defender),
            _ => None,
        }
    }

    /// The attribute key used in `positionSkills` maps.
    pub fn key(&self) -> &'static str {
        match self {
            Position::Forward => "forward",
            Position::Midfield => "midfield",
            Position::Defender => "defender",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-attribute ratings keyed by attribute name.
///
/// Arbitrary keys are kept so that records from the player store survive a
/// round trip untouched; only the three canonical keys are ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionSkills(BTreeMap<String, i32>);

impl PositionSkills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common case of all three canonical ratings.
    pub fn from_ratings(forward: i32, midfield: i32, defender: i32) -> Self {
        let mut skills = Self::new();
        skills.set(Position::Forward, forward);
        skills.set(Position::Midfield, midfield);
        skills.set(Position::Defender, defender);
        skills
    }

    pub fn get(&self, pos: Position) -> Option<i32> {
        self.0.get(pos.key()).copied()
    }

    pub fn set(&mut self, pos: Position, rating: i32) {
        self.0.insert(pos.key().to_string(), rating);
    }

    /// Ratings for forward, midfield and defender, only if all three are present.
    pub fn canonical(&self) -> Option<[i32; 3]> {
        Some([
            self.get(Position::Forward)?,
            self.get(Position::Midfield)?,
            self.get(Position::Defender)?,
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A rated player as supplied by the player store.
///
/// Only `id`, `skill_rating` and `position_skills` influence team
/// composition. The remaining fields are display and bookkeeping payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Base rating, conventionally 1-10.
    pub skill_rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_skills: Option<PositionSkills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub matches_played: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, skill_rating: i32) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            skill_rating,
            position_skills: None,
            avatar: None,
            wins: 0,
            matches_played: 0,
        }
    }

    pub fn with_position_skills(mut self, skills: PositionSkills) -> Self {
        self.position_skills = Some(skills);
        self
    }

    /// The score used for sorting and averaging. See [`composite_score`].
    pub fn composite_score(&self) -> f64 {
        composite_score(self)
    }

    /// Fraction of played matches that were won; 0.0 before the first match.
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.matches_played)
    }
}

/// Effective skill of a player.
///
/// When forward, midfield and defender ratings are all present the result is
/// the mean of those three and the base rating. Otherwise it is the base
/// rating alone.
pub fn composite_score(player: &Player) -> f64 {
    match player
        .position_skills
        .as_ref()
        .and_then(PositionSkills::canonical)
    {
        Some([forward, midfield, defender]) => {
            (f64::from(forward)
                + f64::from(midfield)
                + f64::from(defender)
                + f64::from(player.skill_rating))
                / 4.0
        }
        None => f64::from(player.skill_rating),
    }
}

/// Pick the selected players out of the full roster, keeping roster order.
///
/// Ids that are not in the roster are ignored.
pub fn select_players<S: AsRef<str>>(pool: &[Player], ids: &[S]) -> Vec<Player> {
    let wanted: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
    pool.iter()
        .filter(|p| wanted.contains(p.id.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
