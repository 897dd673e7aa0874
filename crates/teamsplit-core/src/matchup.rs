// Match record handed to the persistence layer once teams are final.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balancer::team_balance;
use crate::error::MatchError;
use crate::player::Player;
use crate::team::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Football,
    Volleyball,
    Basketball,
    Tennis,
    Badminton,
    Other,
}

impl MatchType {
    pub fn from_str_type(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "football" | "soccer" => Some(MatchType::Football),
            "volleyball" => Some(MatchType::Volleyball),
            "basketball" => Some(MatchType::Basketball),
            "tennis" => Some(MatchType::Tennis),
            "badminton" => Some(MatchType::Badminton),
            "other" => Some(MatchType::Other),
            _ => None,
        }
    }
}

/// A match built from a final team set.
///
/// The engine assigns no storage id; the store does that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDraft {
    pub name: String,
    teams: Vec<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner_id: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
}

impl MatchDraft {
    /// Build a match from committed teams. A blank name becomes
    /// `Match - <date>`.
    pub fn new(name: &str, teams: Vec<Team>, date: DateTime<Utc>) -> Self {
        let name = match name.trim() {
            "" => format!("Match - {}", date.format("%Y-%m-%d")),
            trimmed => trimmed.to_string(),
        };
        MatchDraft {
            name,
            teams,
            winner_id: None,
            date,
            is_public: false,
            match_type: None,
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn winner_id(&self) -> Option<&str> {
        self.winner_id.as_deref()
    }

    pub fn winner(&self) -> Option<&Team> {
        let id = self.winner_id.as_deref()?;
        self.teams.iter().find(|t| t.id == id)
    }

    /// Record the winning team, or clear it with `None` (draw / not played yet).
    pub fn set_winner(&mut self, team_id: Option<&str>) -> Result<(), MatchError> {
        match team_id {
            None => self.winner_id = None,
            Some(id) => {
                if !self.teams.iter().any(|t| t.id == id) {
                    return Err(MatchError::UnknownTeam {
                        team_id: id.to_string(),
                    });
                }
                self.winner_id = Some(id.to_string());
            }
        }
        Ok(())
    }

    pub fn balance(&self) -> f64 {
        team_balance(&self.teams)
    }

    /// Update win/played counters on the roster for a decided match.
    ///
    /// Every roster player who appears in a team gets one more match played;
    /// members of the winning team also get a win. Nothing changes when
    /// no winner is set. Returns how many roster entries were updated.
    pub fn apply_result(&self, roster: &mut [Player]) -> usize {
        let Some(winner) = self.winner() else {
            return 0;
        };

        let mut updated = 0;
        for player in roster.iter_mut() {
            if !self.teams.iter().any(|t| t.contains(&player.id)) {
                continue;
            }
            player.matches_played += 1;
            if winner.contains(&player.id) {
                player.wins += 1;
            }
            updated += 1;
        }

        debug!(
            "Applied result of '{}' (winner {}) to {} players",
            self.name, winner.id, updated
        );
        updated
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::generate_teams;
    use chrono::TimeZone;

    fn roster() -> Vec<Player> {
        vec![
            Player::new("a", "A", 9),
            Player::new("b", "B", 3),
            Player::new("c", "C", 5),
            Player::new("bench", "Bench", 7),
        ]
    }

    fn draft() -> MatchDraft {
        let played: Vec<Player> = roster().into_iter().take(3).collect();
        let teams = generate_teams(&played, 2).unwrap();
        let date = Utc.with_ymd_and_hms(2024, 5, 17, 18, 30, 0).unwrap();
        MatchDraft::new("", teams, date)
    }

    #[test]
    fn blank_name_gets_dated_default() {
        assert_eq!(draft().name, "Match - 2024-05-17");
    }

    #[test]
    fn explicit_name_is_trimmed() {
        let d = draft();
        let m = MatchDraft::new("  Friday 5s ", d.teams().to_vec(), d.date);
        assert_eq!(m.name, "Friday 5s");
    }

    #[test]
    fn set_winner_validates_team() {
        let mut m = draft();
        assert_eq!(
            m.set_winner(Some("team-7")).unwrap_err(),
            MatchError::UnknownTeam { team_id: "team-7".into() }
        );
        assert!(m.winner_id().is_none());
        m.set_winner(Some("team-2")).unwrap();
        assert_eq!(m.winner().unwrap().id, "team-2");
        m.set_winner(None).unwrap();
        assert!(m.winner().is_none());
    }

    #[test]
    fn apply_result_updates_participants() {
        // team-1 = [a (9)], team-2 = [c (5), b (3)]
        let mut m = draft();
        m.set_winner(Some("team-2")).unwrap();
        let mut players = roster();
        assert_eq!(m.apply_result(&mut players), 3);
        let stats: Vec<(u32, u32)> = players.iter().map(|p| (p.wins, p.matches_played)).collect();
        assert_eq!(stats, vec![(0, 1), (1, 1), (1, 1), (0, 0)]);
    }

    #[test]
    fn apply_result_without_winner_is_noop() {
        let m = draft();
        let mut players = roster();
        assert_eq!(m.apply_result(&mut players), 0);
        assert!(players.iter().all(|p| p.matches_played == 0));
    }

    #[test]
    fn serializes_for_the_store() {
        let mut m = draft().with_match_type(MatchType::Football).public(true);
        m.set_winner(Some("team-1")).unwrap();
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["winnerId"], "team-1");
        assert_eq!(value["isPublic"], true);
        assert_eq!(value["matchType"], "football");
        assert_eq!(value["teams"][0]["averageSkill"], 9.0);
        assert_eq!(value["teams"][1]["averageSkill"], 4.0);

        let back: MatchDraft = serde_json::from_value(value).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn match_type_parsing() {
        assert_eq!(MatchType::from_str_type("Soccer"), Some(MatchType::Football));
        assert_eq!(MatchType::from_str_type("tennis"), Some(MatchType::Tennis));
        assert_eq!(MatchType::from_str_type("chess"), None);
    }
}
