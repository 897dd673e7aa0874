// Output formatting: terminal listing and JSON.

use serde::Serialize;
use teamsplit_core::{team_balance, BalanceRating, BalanceThresholds, MatchDraft, Team};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTeams<'a> {
    teams: &'a [Team],
    balance: f64,
    rating: BalanceRating,
}

/// One-line balance summary, e.g. `Balance: 0.3 skill points (Excellent)`.
pub fn balance_line(teams: &[Team], thresholds: &BalanceThresholds) -> String {
    let balance = team_balance(teams);
    let rating = BalanceRating::classify(balance, thresholds);
    format!("Balance: {balance:.1} skill points ({rating})")
}

/// Render teams as an indented listing.
pub fn render_teams(teams: &[Team], thresholds: &BalanceThresholds) -> String {
    let mut out = String::new();
    for team in teams {
        out.push_str(&format!(
            "{} [{}] {} | avg {:.1}/10 | {} players\n",
            team.name,
            team.id,
            team.color(),
            team.average_skill(),
            team.len()
        ));
        for player in team.players() {
            let label = if player.name.is_empty() {
                player.id.as_str()
            } else {
                player.name.as_str()
            };
            match player.position_skills.as_ref().and_then(|s| s.canonical()) {
                Some([f, m, d]) => out.push_str(&format!(
                    "  - {label} ({}) F:{f} M:{m} D:{d} (avg {:.1})\n",
                    player.skill_rating,
                    player.composite_score()
                )),
                None => out.push_str(&format!("  - {label} ({})\n", player.skill_rating)),
            }
        }
        out.push('\n');
    }
    out.push_str(&balance_line(teams, thresholds));
    out.push('\n');
    out
}

pub fn render_match(game: &MatchDraft, thresholds: &BalanceThresholds) -> String {
    let mut out = format!("{} ({})\n", game.name, game.date.format("%Y-%m-%d"));
    if let Some(winner) = game.winner() {
        out.push_str(&format!("Winner: {}\n", winner.name));
    }
    out.push('\n');
    out.push_str(&render_teams(game.teams(), thresholds));
    out
}

pub fn teams_json(teams: &[Team], thresholds: &BalanceThresholds) -> serde_json::Result<String> {
    let balance = team_balance(teams);
    serde_json::to_string_pretty(&JsonTeams {
        teams,
        balance,
        rating: BalanceRating::classify(balance, thresholds),
    })
}

pub fn match_json(game: &MatchDraft) -> serde_json::Result<String> {
    serde_json::to_string_pretty(game)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use teamsplit_core::{generate_teams, Player};

    fn teams() -> Vec<Team> {
        let players: Vec<Player> = [10, 8, 6, 4, 2, 1]
            .iter()
            .enumerate()
            .map(|(i, &s)| Player::new(format!("p{}", i + 1), format!("Player {}", i + 1), s))
            .collect();
        generate_teams(&players, 2).unwrap()
    }

    #[test]
    fn balance_line_for_worked_example() {
        assert_eq!(
            balance_line(&teams(), &BalanceThresholds::default()),
            "Balance: 0.3 skill points (Excellent)"
        );
    }

    #[test]
    fn listing_shows_teams_and_players() {
        let text = render_teams(&teams(), &BalanceThresholds::default());
        assert!(text.starts_with("Team 1 [team-1] #8B5CF6 | avg 5.3/10 | 3 players\n  - Player 1 (10)\n"));
        assert!(text.contains("Team 2 [team-2] #3B82F6 | avg 5.0/10 | 3 players"));
        assert!(text.ends_with("Balance: 0.3 skill points (Excellent)\n"));
    }

    #[test]
    fn json_carries_balance_and_rating() {
        let json = teams_json(&teams(), &BalanceThresholds::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rating"], "excellent");
        assert_eq!(value["teams"].as_array().unwrap().len(), 2);
        assert!((value["balance"].as_f64().unwrap() - 0.3).abs() < 1e-9);
    }
}
