// Balanced team generation (snake draft) and the balance metric.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BalanceError;
use crate::player::{composite_score, Player};
use crate::team::{round1, Team};

// ---------------------------------------------------------------------------
// Snake draft order
// ---------------------------------------------------------------------------

/// Infinite iterator over team indices in snake-draft order.
///
/// Moves forward from 0; on stepping past the last index it stays there and
/// reverses, and on stepping below 0 it stays at 0 and moves forward again.
/// For 2 teams: 0, 1, 1, 0, 0, 1, 1, 0, ...
/// For 3 teams: 0, 1, 2, 2, 1, 0, 0, 1, 2, ...
#[derive(Debug, Clone)]
pub struct SnakeOrder {
    num_teams: usize,
    current: usize,
    forward: bool,
}

impl SnakeOrder {
    pub fn new(num_teams: usize) -> Self {
        SnakeOrder {
            num_teams,
            current: 0,
            forward: true,
        }
    }
}

impl Iterator for SnakeOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.num_teams == 0 {
            return None;
        }
        let idx = self.current;
        if self.forward {
            if idx + 1 >= self.num_teams {
                self.forward = false;
            } else {
                self.current += 1;
            }
        } else if idx == 0 {
            self.forward = true;
        } else {
            self.current -= 1;
        }
        Some(idx)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Partition `players` into `num_teams` skill-balanced teams.
///
/// Players are stably sorted by composite score (highest first, ties keep
/// input order) and dealt out in snake-draft order. Teams come back in index
/// order with ids `team-1..team-N`, default names and palette colours.
///
/// Deterministic: the same pool and count always give the same teams.
pub fn generate_teams(players: &[Player], num_teams: usize) -> Result<Vec<Team>, BalanceError> {
    if num_teams == 0 {
        return Err(BalanceError::NoTeams);
    }
    if players.len() < num_teams {
        return Err(BalanceError::InsufficientPlayers {
            players: players.len(),
            teams: num_teams,
        });
    }
    let mut seen = HashSet::with_capacity(players.len());
    for p in players {
        if !seen.insert(p.id.as_str()) {
            return Err(BalanceError::DuplicatePlayer(p.id.clone()));
        }
    }

    let mut ranked: Vec<(f64, &Player)> = players.iter().map(|p| (composite_score(p), p)).collect();
    // `sort_by` is stable, so equal scores keep their input order.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut teams: Vec<Team> = (0..num_teams).map(Team::empty).collect();
    for ((_, player), idx) in ranked.into_iter().zip(SnakeOrder::new(num_teams)) {
        teams[idx].push_player(player.clone());
    }

    debug!(
        "Generated {} teams from {} players (balance {:.1})",
        teams.len(),
        players.len(),
        team_balance(&teams)
    );

    Ok(teams)
}

/// Spread between the highest and lowest team average. 0.0 for fewer than two teams.
pub fn team_balance(teams: &[Team]) -> f64 {
    if teams.len() < 2 {
        return 0.0;
    }
    let (min, max) = teams
        .iter()
        .map(Team::average_skill)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), avg| {
            (lo.min(avg), hi.max(avg))
        });
    max - min
}

// ---------------------------------------------------------------------------
// Balance rating
// ---------------------------------------------------------------------------

/// Upper bounds for the qualitative balance buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceThresholds {
    pub excellent_max: f64,
    pub good_max: f64,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        BalanceThresholds {
            excellent_max: 1.0,
            good_max: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceRating {
    Excellent,
    Good,
    Fair,
}

impl BalanceRating {
    /// Bucket a balance value.
    ///
    /// Team averages carry one decimal, so the value is rounded to one decimal
    /// first; `max - min` of two such averages can otherwise land a hair
    /// either side of a threshold.
    pub fn classify(balance: f64, thresholds: &BalanceThresholds) -> Self {
        let balance = round1(balance);
        if balance <= thresholds.excellent_max {
            BalanceRating::Excellent
        } else if balance <= thresholds.good_max {
            BalanceRating::Good
        } else {
            BalanceRating::Fair
        }
    }

    /// Rate a team set with the default thresholds.
    pub fn of(teams: &[Team]) -> Self {
        Self::classify(team_balance(teams), &BalanceThresholds::default())
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceRating::Excellent => "Excellent",
            BalanceRating::Good => "Good",
            BalanceRating::Fair => "Fair",
        }
    }
}

impl fmt::Display for BalanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
