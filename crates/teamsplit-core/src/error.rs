// Error types returned by the balancer, the editor and match records.

use thiserror::Error;

/// Team generation failures. Nothing is produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("not enough players to create teams: {players} players for {teams} teams")]
    InsufficientPlayers { players: usize, teams: usize },

    #[error("team count must be at least 1")]
    NoTeams,

    #[error("player `{0}` appears more than once in the pool")]
    DuplicatePlayer(String),
}

/// Editor operation failures. The working copy is untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("player `{player_id}` is not in team `{team_id}`")]
    PlayerNotFound { player_id: String, team_id: String },

    #[error("no team with id `{team_id}`")]
    TeamNotFound { team_id: String },

    #[error("index {index} is out of range for team `{team_id}` with {len} players")]
    IndexOutOfRange {
        team_id: String,
        index: usize,
        len: usize,
    },

    #[error("team id `{team_id}` is used by more than one team")]
    DuplicateTeam { team_id: String },

    #[error("player `{player_id}` is listed in both `{first_team}` and `{second_team}`")]
    PlayerInTwoTeams {
        player_id: String,
        first_team: String,
        second_team: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("team `{team_id}` is not part of this match")]
    UnknownTeam { team_id: String },
}
