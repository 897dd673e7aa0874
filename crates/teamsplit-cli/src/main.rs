// teamsplit entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (teamsplit.toml or defaults); it supplies the log filter,
//    so a config error is reported by anyhow before any subscriber exists
// 3. Initialize tracing (stderr, so stdout carries only results)
// 4. Run the command and print its output

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use teamsplit::app::{self, EditOptions, GenerateOptions};
use teamsplit::config;
use tracing::info;

#[derive(Parser)]
#[command(name = "teamsplit", version, about = "Split a roster into skill-balanced teams")]
struct Cli {
    /// Config file (defaults to ./teamsplit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate balanced teams from a roster CSV
    Generate(GenerateArgs),
    /// Generate teams, apply an edit script and print the resulting match
    Edit(EditArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Roster CSV (id,name,skill_rating[,forward,midfield,defender,...])
    #[arg(long)]
    roster: PathBuf,

    /// Number of teams (overrides config)
    #[arg(long)]
    teams: Option<usize>,

    /// Comma-separated player ids to include
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Output JSON instead of a listing
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct EditArgs {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Edit script (move / swap / reorder / rename / reset, one per line)
    #[arg(long)]
    script: PathBuf,

    /// Match name (defaults to "Match - <date>")
    #[arg(long, default_value = "")]
    name: String,

    /// Winning team id
    #[arg(long)]
    winner: Option<String>,
}

impl From<GenerateArgs> for GenerateOptions {
    fn from(args: GenerateArgs) -> Self {
        GenerateOptions {
            roster: args.roster,
            teams: args.teams,
            select: args.select,
            json: args.json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.log_filter, cli.verbose)?;
    info!(
        "Config loaded: {} default teams, thresholds {}/{}",
        config.default_team_count, config.balance.excellent_max, config.balance.good_max
    );

    let output = match cli.command {
        Commands::Generate(args) => app::run_generate(&GenerateOptions::from(args), &config)?,
        Commands::Edit(args) => {
            let opts = EditOptions {
                generate: args.generate.into(),
                script: args.script,
                name: args.name,
                winner: args.winner,
            };
            app::run_edit(&opts, &config, chrono::Utc::now())?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// Initialize tracing on stderr. `RUST_LOG` wins over the config filter;
/// `--verbose` wins over both.
fn init_tracing(config_filter: &str, verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("teamsplit=debug,teamsplit_core=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_filter))
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
