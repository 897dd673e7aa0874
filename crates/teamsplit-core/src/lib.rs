// Team-composition engine: balanced team generation and an edit session for
// refining the result. No I/O; callers load players and store the outcome.

pub mod balancer;
pub mod editor;
pub mod error;
pub mod matchup;
pub mod player;
pub mod team;

pub use balancer::{generate_teams, team_balance, BalanceRating, BalanceThresholds, SnakeOrder};
pub use editor::EditSession;
pub use error::{BalanceError, EditError, MatchError};
pub use matchup::{MatchDraft, MatchType};
pub use player::{composite_score, select_players, Player, Position, PositionSkills};
pub use team::{Team, TEAM_COLORS};
