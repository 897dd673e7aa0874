// Command implementations. Each returns the text to print so the binary
// stays a thin shell over these functions.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use teamsplit_core::{generate_teams, select_players, EditSession, MatchDraft, Player, Team};
use tracing::info;

use crate::config::Config;
use crate::output;
use crate::roster;
use crate::script;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub roster: PathBuf,
    /// Overrides the configured default team count.
    pub teams: Option<usize>,
    /// Player ids to include; empty means the whole roster.
    pub select: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub generate: GenerateOptions,
    pub script: PathBuf,
    pub name: String,
    pub winner: Option<String>,
}

/// Load the roster, apply the selection and run the balancer.
pub fn build_teams(opts: &GenerateOptions, config: &Config) -> anyhow::Result<Vec<Team>> {
    let pool = roster::load_players(&opts.roster)
        .with_context(|| format!("failed to load roster {}", opts.roster.display()))?;
    info!("Loaded {} players from {}", pool.len(), opts.roster.display());

    let players: Vec<Player> = if opts.select.is_empty() {
        pool
    } else {
        let chosen = select_players(&pool, &opts.select);
        info!("Selected {} of {} players", chosen.len(), pool.len());
        chosen
    };

    let num_teams = opts.teams.unwrap_or(config.default_team_count);
    let teams = generate_teams(&players, num_teams).context("failed to generate teams")?;
    info!(
        "Generated {} teams (balance {:.1})",
        teams.len(),
        teamsplit_core::team_balance(&teams)
    );
    Ok(teams)
}

pub fn run_generate(opts: &GenerateOptions, config: &Config) -> anyhow::Result<String> {
    let teams = build_teams(opts, config)?;
    if opts.json {
        output::teams_json(&teams, &config.balance).context("failed to serialize teams")
    } else {
        Ok(output::render_teams(&teams, &config.balance))
    }
}

/// Generate, apply an edit script, commit and build the match record.
pub fn run_edit(opts: &EditOptions, config: &Config, now: DateTime<Utc>) -> anyhow::Result<String> {
    let teams = build_teams(&opts.generate, config)?;

    let text = std::fs::read_to_string(&opts.script)
        .with_context(|| format!("failed to read edit script {}", opts.script.display()))?;
    let commands = script::parse_script(&text).context("invalid edit script")?;

    let mut session = EditSession::open(&teams).context("generated teams cannot be edited")?;
    script::apply_script(&mut session, &commands).context("edit script failed")?;
    let final_teams = session.commit();

    let mut game = MatchDraft::new(&opts.name, final_teams, now).public(config.match_defaults.is_public);
    if let Some(match_type) = config.match_defaults.match_type {
        game = game.with_match_type(match_type);
    }
    game.set_winner(opts.winner.as_deref())
        .context("invalid winner")?;

    if opts.generate.json {
        output::match_json(&game).context("failed to serialize match")
    } else {
        Ok(output::render_match(&game, &config.balance))
    }
}
