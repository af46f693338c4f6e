use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use meetup_core::config::Config;
use meetup_core::content::{RulesValidator, Validator};
use meetup_core::logging::init_tracing;
use meetup_core::meeting::{MeetingsRepository, ReactionKind};
use meetup_core::realtime::MemoryDatabase;
use meetup_core::{script, MeetupError};

#[derive(Debug, Parser)]
#[command(name = "meetup", version, about = "Meetup drafting and reaction tools")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a JSON draft script, print the document and validate it
    Draft {
        /// Path to the script
        script: PathBuf,
    },
    /// Apply a reaction to a meeting in a seeded in-memory store
    React {
        /// JSON tree used to seed the store
        #[arg(long)]
        seed: PathBuf,
        #[arg(long)]
        meeting: String,
        #[arg(long)]
        user: String,
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Going,
    Maybe,
}

impl From<KindArg> for ReactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Going => ReactionKind::Going,
            KindArg::Maybe => ReactionKind::Maybe,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .map_err(MeetupError::from)
        .with_context(|| format!("loading configuration '{}'", config_path.display()))?;

    match cli.command {
        Command::Draft { script: path } => draft(&config, &path),
        Command::React {
            seed,
            meeting,
            user,
            kind,
        } => react(&config, &seed, &meeting, &user, kind.into()).await,
        Command::Config => {
            let rendered = toml::to_string_pretty(&config).context("rendering configuration")?;
            println!("# {}", config_path.display());
            print!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn draft(config: &Config, path: &Path) -> Result<ExitCode> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading draft script '{}'", path.display()))?;
    let builder = script::run(script::parse(&json)?)?;
    let document = builder.build();
    println!("{}", serde_json::to_string_pretty(&document)?);

    let validator = RulesValidator::new(config.validation.clone());
    match validator.check(&document) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(failed) => {
            eprintln!("{}", failed.primary().message);
            for error in failed.errors() {
                eprintln!("  [{}] {}", error.position, error.message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn react(
    config: &Config,
    seed: &Path,
    meeting_id: &str,
    user_id: &str,
    kind: ReactionKind,
) -> Result<ExitCode> {
    let json = std::fs::read_to_string(seed)
        .with_context(|| format!("reading seed '{}'", seed.display()))?;
    let root: serde_json::Value = serde_json::from_str(&json).context("parsing seed")?;

    let database = Arc::new(MemoryDatabase::from_value(root));
    let repository = MeetingsRepository::new(database, config.realtime.clone());
    let meeting = repository
        .set_reaction(meeting_id, user_id, kind)
        .await
        .map_err(MeetupError::from)
        .with_context(|| format!("reacting to meeting '{}'", meeting_id))?;

    println!("{}", serde_json::to_string_pretty(&meeting.reaction)?);
    Ok(ExitCode::SUCCESS)
}
