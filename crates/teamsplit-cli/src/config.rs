// Configuration loading and validation (teamsplit.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use teamsplit_core::{BalanceThresholds, MatchType};
use thiserror::Error;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "teamsplit.toml";

pub const DEFAULT_LOG_FILTER: &str = "teamsplit=info,teamsplit_core=info,warn";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Team count used when the command line does not give one.
    pub default_team_count: usize,
    pub balance: BalanceThresholds,
    pub log_filter: String,
    pub match_defaults: MatchDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchDefaults {
    pub is_public: bool,
    pub match_type: Option<MatchType>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_team_count: 2,
            balance: BalanceThresholds::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            match_defaults: MatchDefaults::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// teamsplit.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    teams: TeamsSection,
    balance: BalanceThresholds,
    logging: LoggingSection,
    #[serde(rename = "match")]
    match_defaults: MatchDefaults,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TeamsSection {
    count: usize,
}

impl Default for TeamsSection {
    fn default() -> Self {
        TeamsSection { count: 2 }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `path`. The file must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

/// Load the config for a run.
///
/// An explicit path must exist. Without one, `teamsplit.toml` in the working
/// directory is used if present; otherwise built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_config_from(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = Config {
        default_team_count: file.teams.count,
        balance: file.balance,
        log_filter: file
            .logging
            .filter
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        match_defaults: file.match_defaults,
    };

    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.default_team_count == 0 {
        return Err(ConfigError::ValidationError {
            field: "teams.count".into(),
            message: "must be greater than 0".into(),
        });
    }

    let b = &config.balance;
    let threshold_fields: &[(&str, f64)] = &[
        ("balance.excellent_max", b.excellent_max),
        ("balance.good_max", b.good_max),
    ];
    for (name, val) in threshold_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a finite value >= 0, got {val}"),
            });
        }
    }

    if b.excellent_max > b.good_max {
        return Err(ConfigError::ValidationError {
            field: "balance.excellent_max".into(),
            message: format!(
                "must not exceed balance.good_max ({} > {})",
                b.excellent_max, b.good_max
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
