//! decklegal - Commander deck legality checker
//!
//! ## Usage
//!
//! ```text
//! decklegal check --cards <scryfall.json> --deck <deck.txt|deck.json> [--rules <rules.toml>] [--json]
//! decklegal identity --cards <scryfall.json> [--rules <rules.toml>] <NAME>...
//! decklegal rules [--rules <rules.toml>]
//! ```
//!
//! `check` exits 0 for a legal deck, 1 for an illegal one and 2 when the
//! input itself could not be read or resolved.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use decklegal::rules::is_eligible_commander;
use decklegal::{
    CardCorpus, CommanderRules, CorpusError, Deck, DeckEntry, DeckValidator, ImportError,
    InputError, RulesError, ValidationError, ValidationReport, card_color_identity,
    parse_decklist, screen_import,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "decklegal")]
#[command(about = "Check Commander decks for legality")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one deck
    Check {
        /// Card data file (Scryfall bulk JSON)
        #[arg(long)]
        cards: PathBuf,

        /// Deck file: a JSON deck, or a plain-text decklist
        #[arg(long)]
        deck: PathBuf,

        /// Rule tables to use instead of the built-in ones
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the color identity of cards by name
    Identity {
        /// Card data file (Scryfall bulk JSON)
        #[arg(long)]
        cards: PathBuf,

        /// Rule tables to use instead of the built-in ones
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Card names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the active rule tables as TOML
    Rules {
        /// Rule tables to load instead of the built-in ones
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid deck file: {0}")]
    DeckJson(#[from] serde_json::Error),
    #[error("unknown cards: {}", .0.join(", "))]
    UnknownCards(Vec<String>),
    #[error("failed to render rules: {0}")]
    RenderRules(#[from] toml::ser::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Check {
            cards,
            deck,
            rules,
            json,
        } => check(&cards, &deck, rules.as_deref(), json),
        Command::Identity {
            cards,
            rules,
            names,
        } => identity(&cards, rules.as_deref(), &names),
        Command::Rules { rules } => {
            let rules = load_rules(rules.as_deref())?;
            print!("{}", toml::to_string_pretty(&rules)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_rules(path: Option<&Path>) -> Result<CommanderRules, CliError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading rule tables");
            Ok(CommanderRules::from_toml_path(path)?)
        }
        None => Ok(CommanderRules::default()),
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a deck as JSON when the extension says so, otherwise as a decklist
/// whose names are looked up in the corpus.
fn load_deck_entries(path: &Path, corpus: &CardCorpus) -> Result<Vec<DeckEntry>, CliError> {
    let text = read_file(path)?;
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        let deck: Deck = serde_json::from_str(&text)?;
        debug!(name = %deck.name, entries = deck.entries.len(), "read JSON deck");
        return Ok(deck.entries);
    }

    let lines = screen_import(&text)?;
    let parsed = parse_decklist(&lines.join("\n"));
    for skipped in &parsed.skipped {
        warn!(line = %skipped.line, reason = ?skipped.reason, "skipped decklist line");
    }
    let (entries, missing) = parsed.resolve(corpus);
    if !missing.is_empty() {
        return Err(CliError::UnknownCards(missing));
    }
    Ok(entries)
}

fn check(
    cards: &Path,
    deck: &Path,
    rules: Option<&Path>,
    json: bool,
) -> Result<ExitCode, CliError> {
    let corpus = CardCorpus::from_scryfall_path(cards)?;
    let validator = DeckValidator::new(load_rules(rules)?)?;
    let entries = load_deck_entries(deck, &corpus)?;

    let result = match validator.validate_deck(&entries, &corpus) {
        Ok(()) => Ok(()),
        Err(ValidationError::Violation(violation)) => Err(violation),
        Err(ValidationError::Input(err)) => return Err(err.into()),
    };
    let report = ValidationReport::from(&result);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.reason {
            None => println!("Deck is legal"),
            Some(reason) => println!("{reason}"),
        }
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn identity(cards: &Path, rules: Option<&Path>, names: &[String]) -> Result<ExitCode, CliError> {
    let rules = load_rules(rules)?;
    let corpus = CardCorpus::from_scryfall_path(cards)?;
    let mut missing = Vec::new();
    for name in names {
        let Some(card) = corpus.find_by_name(name) else {
            missing.push(name.clone());
            continue;
        };
        let role = if is_eligible_commander(card, &rules) {
            "eligible commander"
        } else {
            "not a commander"
        };
        println!("{}: {} ({role})", card.name, card_color_identity(card));
    }
    if missing.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::UnknownCards(missing))
    }
}
