// Composition editor: an editable working copy of a generated team set.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::balancer::team_balance;
use crate::error::EditError;
use crate::team::Team;

/// An edit session over a team set.
///
/// The session owns two independent copies of the teams: the snapshot taken
/// at [`EditSession::open`] and the working copy that operations mutate.
/// Every operation validates all ids and indices before touching anything,
/// so a returned error means the working copy is exactly as it was.
///
/// The team list itself is fixed for the life of the session; only team
/// membership, player order and names change.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Vec<Team>,
    working: Vec<Team>,
}

impl EditSession {
    /// Start a session from a deep copy of `teams`. Later edits are never
    /// visible through the caller's slice.
    ///
    /// Team ids must be unique and each player may belong to one team only;
    /// a set that breaks either rule is rejected.
    pub fn open(teams: &[Team]) -> Result<Self, EditError> {
        let mut team_ids: HashSet<&str> = HashSet::with_capacity(teams.len());
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for team in teams {
            if !team_ids.insert(team.id.as_str()) {
                return Err(EditError::DuplicateTeam {
                    team_id: team.id.clone(),
                });
            }
            for player in team.players() {
                if let Some(first) = owners.insert(player.id.as_str(), team.id.as_str()) {
                    return Err(EditError::PlayerInTwoTeams {
                        player_id: player.id.clone(),
                        first_team: first.to_string(),
                        second_team: team.id.clone(),
                    });
                }
            }
        }

        Ok(EditSession {
            original: teams.to_vec(),
            working: teams.to_vec(),
        })
    }

    /// Current working teams, in their original order.
    pub fn teams(&self) -> &[Team] {
        &self.working
    }

    /// The snapshot taken when the session was opened.
    pub fn original(&self) -> &[Team] {
        &self.original
    }

    /// Look up a working team by ID.
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.working.iter().find(|t| t.id == team_id)
    }

    /// Balance metric of the working copy.
    pub fn balance(&self) -> f64 {
        team_balance(&self.working)
    }

    /// Whether the working copy differs from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    /// Discard every edit and go back to the snapshot.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
        debug!("Edit session reset to original {} teams", self.working.len());
    }

    /// End the session and hand back the working teams.
    pub fn commit(self) -> Vec<Team> {
        debug!("Edit session committed ({} teams)", self.working.len());
        self.working
    }

    /// Take a player out of `from_team_id` and append it to `to_team_id`.
    ///
    /// Moving within the same team is a valid no-op.
    pub fn move_player(
        &mut self,
        player_id: &str,
        from_team_id: &str,
        to_team_id: &str,
    ) -> Result<(), EditError> {
        let from = self.team_index(from_team_id)?;
        let to = self.team_index(to_team_id)?;
        let slot = self.player_slot(from, player_id)?;

        if from == to {
            return Ok(());
        }

        let player = self.working[from].remove_player_at(slot);
        self.working[to].push_player(player);

        debug!(
            "Moved player '{}' from {} (avg {:.1}) to {} (avg {:.1})",
            player_id,
            from_team_id,
            self.working[from].average_skill(),
            to_team_id,
            self.working[to].average_skill()
        );
        Ok(())
    }

    /// Exchange two players; each takes the other's slot.
    ///
    /// Two players of the same team trade places within that team. Naming
    /// the same player twice in the same team is a no-op.
    pub fn swap_players(
        &mut self,
        player_a_id: &str,
        team_a_id: &str,
        player_b_id: &str,
        team_b_id: &str,
    ) -> Result<(), EditError> {
        let team_a = self.team_index(team_a_id)?;
        let team_b = self.team_index(team_b_id)?;
        let slot_a = self.player_slot(team_a, player_a_id)?;
        let slot_b = self.player_slot(team_b, player_b_id)?;

        if team_a == team_b {
            if slot_a != slot_b {
                self.working[team_a].swap_within(slot_a, slot_b);
            }
            return Ok(());
        }

        let player_a = self.working[team_a].players()[slot_a].clone();
        let player_b = self.working[team_b].replace_player_at(slot_b, player_a);
        self.working[team_a].replace_player_at(slot_a, player_b);

        debug!(
            "Swapped '{}' ({}) with '{}' ({}); averages now {:.1} / {:.1}",
            player_a_id,
            team_a_id,
            player_b_id,
            team_b_id,
            self.working[team_a].average_skill(),
            self.working[team_b].average_skill()
        );
        Ok(())
    }

    /// Move the player at `from_index` to `to_index` inside one team.
    ///
    /// Both indices refer to the team's order before the move. Averages are
    /// unaffected.
    pub fn reorder_within_team(
        &mut self,
        team_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<(), EditError> {
        let idx = self.team_index(team_id)?;
        let len = self.working[idx].len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(EditError::IndexOutOfRange {
                    team_id: team_id.to_string(),
                    index,
                    len,
                });
            }
        }

        if from_index != to_index {
            self.working[idx].move_within(from_index, to_index);
            debug!("Reordered {}: {} -> {}", team_id, from_index, to_index);
        }
        Ok(())
    }

    /// Set a team's display name. Duplicate names are allowed.
    pub fn rename_team(&mut self, team_id: &str, new_name: &str) -> Result<(), EditError> {
        let idx = self.team_index(team_id)?;
        self.working[idx].name = new_name.to_string();
        debug!("Renamed {} to '{}'", team_id, new_name);
        Ok(())
    }

    // -- lookups --

    fn team_index(&self, team_id: &str) -> Result<usize, EditError> {
        self.working
            .iter()
            .position(|t| t.id == team_id)
            .ok_or_else(|| EditError::TeamNotFound {
                team_id: team_id.to_string(),
            })
    }

    fn player_slot(&self, team_idx: usize, player_id: &str) -> Result<usize, EditError> {
        let team = &self.working[team_idx];
        team.position_of(player_id)
            .ok_or_else(|| EditError::PlayerNotFound {
                player_id: player_id.to_string(),
                team_id: team.id.clone(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::generate_teams;
    use crate::player::Player;
    use crate::team::average_skill;

    fn pool(skills: &[i32]) -> Vec<Player> {
        skills
            .iter()
            .enumerate()
            .map(|(i, &s)| Player::new(format!("p{}", i + 1), format!("Player {}", i + 1), s))
            .collect()
    }

    /// team-1 = [p1 (10), p4 (4), p5 (2)], team-2 = [p2 (8), p3 (6), p6 (1)]
    fn session() -> EditSession {
        let teams = generate_teams(&pool(&[10, 8, 6, 4, 2, 1]), 2).unwrap();
        EditSession::open(&teams).unwrap()
    }

    fn ids(team: &Team) -> Vec<&str> {
        team.players().iter().map(|p| p.id.as_str()).collect()
    }

    fn assert_averages_consistent(s: &EditSession) {
        for t in s.teams() {
            assert_eq!(t.average_skill(), average_skill(t.players()), "team {}", t.id);
        }
    }

    #[test]
    fn reset_right_after_open_matches_input() {
        let teams = generate_teams(&pool(&[10, 8, 6, 4, 2, 1]), 2).unwrap();
        let mut s = EditSession::open(&teams).unwrap();
        s.reset();
        assert_eq!(s.teams(), teams.as_slice());
        assert!(!s.is_dirty());
    }

    #[test]
    fn move_appends_and_recomputes() {
        let mut s = session();
        s.move_player("p1", "team-1", "team-2").unwrap();
        assert_eq!(ids(s.team("team-1").unwrap()), vec!["p4", "p5"]);
        assert_eq!(ids(s.team("team-2").unwrap()), vec!["p2", "p3", "p6", "p1"]);
        assert_eq!(s.team("team-1").unwrap().average_skill(), 3.0);
        assert_eq!(s.team("team-2").unwrap().average_skill(), 6.3);
        assert_averages_consistent(&s);
        assert!(s.is_dirty());
    }

    #[test]
    fn move_can_empty_a_team() {
        let teams = generate_teams(&pool(&[9, 3]), 2).unwrap();
        let mut s = EditSession::open(&teams).unwrap();
        s.move_player("p2", "team-2", "team-1").unwrap();
        assert!(s.team("team-2").unwrap().is_empty());
        assert_eq!(s.team("team-2").unwrap().average_skill(), 0.0);
        assert_eq!(s.team("team-1").unwrap().average_skill(), 6.0);
        assert_eq!(s.teams().len(), 2);
    }

    #[test]
    fn move_to_same_team_is_noop() {
        let mut s = session();
        s.move_player("p4", "team-1", "team-1").unwrap();
        assert!(!s.is_dirty());
    }

    #[test]
    fn move_from_wrong_team_fails_without_change() {
        let mut s = session();
        let err = s.move_player("p2", "team-1", "team-2").unwrap_err();
        assert_eq!(
            err,
            EditError::PlayerNotFound {
                player_id: "p2".into(),
                team_id: "team-1".into()
            }
        );
        assert!(!s.is_dirty());
    }

    #[test]
    fn move_to_unknown_team_fails_without_change() {
        let mut s = session();
        let err = s.move_player("p1", "team-1", "team-9").unwrap_err();
        assert_eq!(err, EditError::TeamNotFound { team_id: "team-9".into() });
        assert!(!s.is_dirty());
    }

    #[test]
    fn swap_across_teams_keeps_slots() {
        let mut s = session();
        s.swap_players("p4", "team-1", "p3", "team-2").unwrap();
        assert_eq!(ids(s.team("team-1").unwrap()), vec!["p1", "p3", "p5"]);
        assert_eq!(ids(s.team("team-2").unwrap()), vec!["p2", "p4", "p6"]);
        assert_eq!(s.team("team-1").unwrap().average_skill(), 6.0);
        assert_eq!(s.team("team-2").unwrap().average_skill(), 4.3);
        assert_averages_consistent(&s);
    }

    #[test]
    fn swap_single_player_teams() {
        let teams = generate_teams(&pool(&[9, 3]), 2).unwrap();
        let mut s = EditSession::open(&teams).unwrap();
        s.swap_players("p1", "team-1", "p2", "team-2").unwrap();
        assert_eq!(ids(s.team("team-1").unwrap()), vec!["p2"]);
        assert_eq!(ids(s.team("team-2").unwrap()), vec!["p1"]);
        assert_eq!(s.team("team-1").unwrap().average_skill(), 3.0);
        assert_eq!(s.team("team-2").unwrap().average_skill(), 9.0);
    }

    #[test]
    fn swap_same_player_is_noop() {
        let mut s = session();
        s.swap_players("p1", "team-1", "p1", "team-1").unwrap();
        assert!(!s.is_dirty());
    }

    #[test]
    fn swap_within_one_team_trades_places() {
        let mut s = session();
        s.swap_players("p1", "team-1", "p5", "team-1").unwrap();
        assert_eq!(ids(s.team("team-1").unwrap()), vec!["p5", "p4", "p1"]);
        assert_eq!(s.team("team-1").unwrap().average_skill(), 5.3);
    }

    #[test]
    fn swap_with_missing_second_player_fails_without_change() {
        let mut s = session();
        let err = s.swap_players("p1", "team-1", "p4", "team-2").unwrap_err();
        assert_eq!(
            err,
            EditError::PlayerNotFound {
                player_id: "p4".into(),
                team_id: "team-2".into()
            }
        );
        assert!(!s.is_dirty());
    }

    #[test]
    fn reorder_moves_only_order() {
        let mut s = session();
        let avg = s.team("team-2").unwrap().average_skill();
        s.reorder_within_team("team-2", 2, 0).unwrap();
        assert_eq!(ids(s.team("team-2").unwrap()), vec!["p6", "p2", "p3"]);
        assert_eq!(s.team("team-2").unwrap().average_skill(), avg);
        assert_eq!(ids(s.team("team-1").unwrap()), vec!["p1", "p4", "p5"]);
    }

    #[test]
    fn reorder_out_of_range_fails_without_change() {
        let mut s = session();
        let err = s.reorder_within_team("team-1", 0, 3).unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                team_id: "team-1".into(),
                index: 3,
                len: 3
            }
        );
        assert!(!s.is_dirty());
    }

    #[test]
    fn rename_allows_duplicates() {
        let mut s = session();
        s.rename_team("team-1", "Lions").unwrap();
        s.rename_team("team-2", "Lions").unwrap();
        assert!(s.teams().iter().all(|t| t.name == "Lions"));
        assert_eq!(
            s.rename_team("team-3", "Tigers").unwrap_err(),
            EditError::TeamNotFound { team_id: "team-3".into() }
        );
    }

    #[test]
    fn edits_do_not_leak_into_callers_teams() {
        let teams = generate_teams(&pool(&[10, 8, 6, 4, 2, 1]), 2).unwrap();
        let before = teams.clone();
        let mut s = EditSession::open(&teams).unwrap();
        s.move_player("p1", "team-1", "team-2").unwrap();
        s.rename_team("team-2", "Renamed").unwrap();
        assert_eq!(teams, before);
    }

    #[test]
    fn reset_discards_edits() {
        let mut s = session();
        s.move_player("p1", "team-1", "team-2").unwrap();
        s.rename_team("team-1", "X").unwrap();
        s.reset();
        assert!(!s.is_dirty());
        assert_eq!(s.teams(), s.original());
    }

    #[test]
    fn commit_returns_working_copy() {
        let mut s = session();
        s.move_player("p6", "team-2", "team-1").unwrap();
        let balance = s.balance();
        let teams = s.commit();
        assert_eq!(ids(&teams[0]), vec!["p1", "p4", "p5", "p6"]);
        assert!((team_balance(&teams) - balance).abs() < f64::EPSILON);
    }

    #[test]
    fn open_rejects_duplicate_team_ids() {
        let mut teams = generate_teams(&pool(&[10, 8, 6, 4]), 2).unwrap();
        teams[1].id = "team-1".into();
        let err = EditSession::open(&teams).unwrap_err();
        assert_eq!(err, EditError::DuplicateTeam { team_id: "team-1".into() });
    }

    #[test]
    fn open_rejects_player_in_two_teams() {
        let mut teams = generate_teams(&pool(&[10, 8, 6, 4]), 2).unwrap();
        let shared = teams[0].players()[0].clone();
        teams[1].push_player(shared);
        let err = EditSession::open(&teams).unwrap_err();
        assert_eq!(
            err,
            EditError::PlayerInTwoTeams {
                player_id: "p1".into(),
                first_team: "team-1".into(),
                second_team: "team-2".into(),
            }
        );
    }

    #[test]
    fn open_rejects_stored_teams_sharing_a_player() {
        let json = r#"[
            {"id": "team-1", "name": "A", "players": [{"id": "x", "skillRating": 5}]},
            {"id": "team-2", "name": "B", "players": [{"id": "y", "skillRating": 4}, {"id": "x", "skillRating": 5}]}
        ]"#;
        let teams: Vec<Team> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            EditSession::open(&teams),
            Err(EditError::PlayerInTwoTeams { ref player_id, .. }) if player_id == "x"
        ));
    }
}
