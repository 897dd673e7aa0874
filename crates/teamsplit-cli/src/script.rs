// Edit scripts: a line-oriented way to drive an edit session from a file.
//
//   move <player> <from-team> <to-team>
//   swap <player-a> <team-a> <player-b> <team-b>
//   reorder <team> <from-index> <to-index>
//   rename <team> <new name ...>
//   reset
//
// Blank lines and lines starting with `#` are ignored.

use teamsplit_core::{EditError, EditSession};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Move {
        player: String,
        from: String,
        to: String,
    },
    Swap {
        player_a: String,
        team_a: String,
        player_b: String,
        team_b: String,
    },
    Reorder {
        team: String,
        from: usize,
        to: usize,
    },
    Rename {
        team: String,
        name: String,
    },
    Reset,
}

/// A parsed command together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: EditCommand,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Edit { line: usize, source: EditError },
}

impl EditCommand {
    /// Parse one non-empty, non-comment line.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut words = text.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_string())?;
        let args: Vec<&str> = words.collect();

        let expect = |n: usize| -> Result<(), String> {
            if args.len() == n {
                Ok(())
            } else {
                Err(format!("`{verb}` takes {n} arguments, got {}", args.len()))
            }
        };

        match verb.to_lowercase().as_str() {
            "move" => {
                expect(3)?;
                Ok(EditCommand::Move {
                    player: args[0].to_string(),
                    from: args[1].to_string(),
                    to: args[2].to_string(),
                })
            }
            "swap" => {
                expect(4)?;
                Ok(EditCommand::Swap {
                    player_a: args[0].to_string(),
                    team_a: args[1].to_string(),
                    player_b: args[2].to_string(),
                    team_b: args[3].to_string(),
                })
            }
            "reorder" => {
                expect(3)?;
                let index = |s: &str| {
                    s.parse::<usize>()
                        .map_err(|_| format!("`{s}` is not a valid index"))
                };
                Ok(EditCommand::Reorder {
                    team: args[0].to_string(),
                    from: index(args[1])?,
                    to: index(args[2])?,
                })
            }
            "rename" => {
                if args.len() < 2 {
                    return Err("`rename` takes a team id and a name".to_string());
                }
                Ok(EditCommand::Rename {
                    team: args[0].to_string(),
                    name: args[1..].join(" "),
                })
            }
            "reset" => {
                expect(0)?;
                Ok(EditCommand::Reset)
            }
            other => Err(format!("unknown command `{other}`")),
        }
    }

    /// Run this command against a session.
    pub fn apply(&self, session: &mut EditSession) -> Result<(), EditError> {
        match self {
            EditCommand::Move { player, from, to } => session.move_player(player, from, to),
            EditCommand::Swap {
                player_a,
                team_a,
                player_b,
                team_b,
            } => session.swap_players(player_a, team_a, player_b, team_b),
            EditCommand::Reorder { team, from, to } => session.reorder_within_team(team, *from, *to),
            EditCommand::Rename { team, name } => session.rename_team(team, name),
            EditCommand::Reset => {
                session.reset();
                Ok(())
            }
        }
    }
}

/// Parse a whole script. Stops at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = EditCommand::parse(trimmed).map_err(|message| ScriptError::Parse {
            line: i + 1,
            message,
        })?;
        lines.push(ScriptLine { line: i + 1, command });
    }
    Ok(lines)
}

/// Apply parsed lines in order. Stops at the first failing command; earlier
/// commands stay applied, the failing one changes nothing.
pub fn apply_script(session: &mut EditSession, script: &[ScriptLine]) -> Result<(), ScriptError> {
    for entry in script {
        entry
            .command
            .apply(session)
            .map_err(|source| ScriptError::Edit {
                line: entry.line,
                source,
            })?;
    }
    info!(
        "Applied {} edit commands (balance now {:.1})",
        script.len(),
        session.balance()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
