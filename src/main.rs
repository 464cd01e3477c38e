mod board;
mod config;
mod engine;
mod oracle;
mod vocab;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use board::{BoardAssignment, Role};
use config::Config;
use engine::legality::LegalityFilter;
use engine::lexicon::Dictionary;
use engine::operative::FieldOperative;
use engine::report::RoundReport;
use engine::round::{Assignment, RoundController};
use oracle::embedding::WordEmbeddings;
use vocab::Vocabulary;

#[derive(Parser)]
#[command(name = "cluesmith", version, about = "Word-association hint engine for codename games")]
struct Cli {
    #[arg(short, long, help = "Config file (TOML); defaults to the user config dir")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Embedding vectors file (GloVe/word2vec text format)")]
    vectors: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deal a board and print ranked hints for every overlap level
    Round {
        #[arg(short, long, help = "Seed for a reproducible random deal")]
        seed: Option<u64>,

        #[arg(short, long, help = "Board file with `role: word - word` lines instead of a random deal")]
        board: Option<PathBuf>,

        #[arg(short, long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Board vocabulary file (one word per line)")]
        words: Option<PathBuf>,

        #[arg(short, long, help = "Reference dictionary file (one word per line)")]
        dictionary: Option<PathBuf>,

        #[arg(short, long, help = "Highest overlap level to search")]
        levels: Option<usize>,
    },
    /// Re-score a saved round report from the guesser's side of the table
    Evaluate {
        #[arg(help = "Round report file produced by `round`")]
        report: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    let vectors = resolve_path(cli.vectors, &config.vectors_file)
        .context("no embedding vectors configured; pass --vectors or set vectors_file")?;
    let oracle = WordEmbeddings::load(&vectors, config.vocab_limit)?;

    match cli.command {
        Command::Round {
            seed,
            board,
            output,
            words,
            dictionary,
            levels,
        } => run_round(
            &oracle, config, seed, board, output, words, dictionary, levels,
        ),
        Command::Evaluate { report } => evaluate(&oracle, &report),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_round(
    oracle: &WordEmbeddings,
    mut config: Config,
    seed: Option<u64>,
    board: Option<PathBuf>,
    output: Option<PathBuf>,
    words: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    levels: Option<usize>,
) -> Result<()> {
    if let Some(levels) = levels {
        config.max_levels = levels.max(1);
    }

    let dictionary = match resolve_path(dictionary, &config.dictionary_file) {
        Some(path) => Dictionary::from_file(&path)?,
        None => Dictionary::embedded(),
    };
    let vocabulary = match resolve_path(words, &config.words_file) {
        Some(path) => Vocabulary::from_file(&path, oracle)?,
        None => Vocabulary::embedded(oracle),
    };

    let legality = LegalityFilter::new(dictionary);
    let controller = RoundController::new(oracle, &legality, &config, vocabulary.words());

    let assignment = match board {
        Some(path) => Assignment::Explicit(read_board(&path)?),
        None => Assignment::Random { seed },
    };
    let report = controller.run_round(assignment)?;
    let text = report.render();

    match output {
        Some(path) => {
            fs::write(&path, &text)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "round report written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn evaluate(oracle: &WordEmbeddings, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    let report = RoundReport::parse(&text)
        .with_context(|| format!("failed to parse report {}", path.display()))?;
    let operative = FieldOperative::new(oracle);
    print!("{}", operative.evaluate_report(&report));
    Ok(())
}

/// A board file carries one `role: word - word` line per role; roles may
/// appear in any order and missing roles stay empty.
fn read_board(path: &Path) -> Result<BoardAssignment> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board from {}", path.display()))?;
    let mut assignment = BoardAssignment::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, words)) = line.split_once(':') else {
            bail!("malformed board line (expected `role: words`): {line}");
        };
        let Some(role) = Role::from_str(name.trim()) else {
            bail!("unknown role in board file: {name}");
        };
        *assignment.words_mut(role) = words
            .split(" - ")
            .map(|w| w.trim().to_ascii_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
    }
    Ok(assignment)
}

fn resolve_path(flag: Option<PathBuf>, configured: &str) -> Option<PathBuf> {
    flag.or_else(|| (!configured.is_empty()).then(|| PathBuf::from(configured)))
}
