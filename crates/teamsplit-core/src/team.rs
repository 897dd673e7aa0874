// Team model: membership, derived average skill and display colour.

use serde::{Deserialize, Serialize};

use crate::player::{composite_score, Player};

/// Fixed colour palette, assigned to teams round-robin by index.
pub const TEAM_COLORS: [&str; 6] = [
    "#8B5CF6", // purple
    "#3B82F6", // blue
    "#06B6D4", // cyan
    "#8B5A2B", // brown
    "#F59E0B", // amber
    "#10B981", // emerald
];

/// Palette colour for the team at `index` (0-based).
pub fn color_for_index(index: usize) -> &'static str {
    TEAM_COLORS[index % TEAM_COLORS.len()]
}

/// Round to one decimal place, halves toward positive infinity
/// (`-2.25` becomes `-2.2`, `2.25` becomes `2.3`).
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Mean composite score of `players`, rounded to one decimal. 0.0 when empty.
pub fn average_skill(players: &[Player]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let total: f64 = players.iter().map(composite_score).sum();
    round1(total / players.len() as f64)
}

/// A team in a generated team set.
///
/// `players` and `average_skill` are private: every change to membership
/// goes through a method that recomputes the average before returning, so a
/// stale average is never observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TeamRecord")]
pub struct Team {
    pub id: String,
    pub name: String,
    players: Vec<Player>,
    average_skill: f64,
    color: String,
}

/// Wire shape of a team. Any stored average is discarded and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamRecord {
    id: String,
    name: String,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default)]
    color: String,
}

impl From<TeamRecord> for Team {
    fn from(record: TeamRecord) -> Self {
        let mut team = Team {
            id: record.id,
            name: record.name,
            players: record.players,
            average_skill: 0.0,
            color: record.color,
        };
        team.recompute_average();
        team
    }
}

impl Team {
    /// An empty team for generation slot `index` (0-based): id `team-<index+1>`,
    /// name `Team <index+1>`, palette colour by index.
    pub fn empty(index: usize) -> Self {
        Team {
            id: format!("team-{}", index + 1),
            name: format!("Team {}", index + 1),
            players: Vec::new(),
            average_skill: 0.0,
            color: color_for_index(index).to_string(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Mean composite score of the members, one decimal; 0.0 for an empty team.
    pub fn average_skill(&self) -> f64 {
        self.average_skill
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.position_of(player_id).is_some()
    }

    /// Index of the player within this team's order.
    pub fn position_of(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    // -- crate-internal mutation; each keeps `average_skill` in sync --

    pub(crate) fn push_player(&mut self, player: Player) {
        self.players.push(player);
        self.recompute_average();
    }

    pub(crate) fn remove_player_at(&mut self, index: usize) -> Player {
        let player = self.players.remove(index);
        self.recompute_average();
        player
    }

    pub(crate) fn replace_player_at(&mut self, index: usize, player: Player) -> Player {
        let old = std::mem::replace(&mut self.players[index], player);
        self.recompute_average();
        old
    }

    /// Order-only change; membership and average are unaffected.
    pub(crate) fn move_within(&mut self, from: usize, to: usize) {
        let player = self.players.remove(from);
        self.players.insert(to, player);
    }

    /// Order-only change; membership and average are unaffected.
    pub(crate) fn swap_within(&mut self, a: usize, b: usize) {
        self.players.swap(a, b);
    }

    fn recompute_average(&mut self) {
        self.average_skill = average_skill(&self.players);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
