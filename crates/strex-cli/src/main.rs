//! Strex CLI - Command-line interface
//!
//! Usage:
//!   strex extract <articles.json> [-o results.json]
//!   strex select <articles.json>
//!   strex strip <articles.json>
//!
//! Input is a JSON array of parsed articles (`id`, `label`, `document`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use strex_core::{AppConfig, ArticleResult, LoggingConfig, ParsedArticle};
use strex_extractor::{
    ArticleProcessor, CaptionStripper, RuleInflector, SelectionAccumulator,
};

#[derive(Parser)]
#[command(name = "strex")]
#[command(about = "Streak and record statement extraction for sports articles")]
#[command(version)]
struct Cli {
    /// TOML configuration file (environment variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract statements from parsed articles
    Extract {
        /// Parsed articles (JSON array)
        input: PathBuf,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include the selected sentences next to the statements
        #[arg(long)]
        sentences: bool,
        /// Strip datelines from the reported selected sentences
        #[arg(long)]
        strip_captions: bool,
        /// Write run statistics as JSON to this file
        #[arg(long)]
        stats: Option<PathBuf>,
    },
    /// Show the sentences selected per article
    Select {
        /// Parsed articles (JSON array)
        input: PathBuf,
    },
    /// Print article text with datelines and wire tags removed
    Strip {
        /// Parsed articles (JSON array)
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct ExtractRecord {
    #[serde(flatten)]
    result: ArticleResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentences: Option<Vec<String>>,
}

#[derive(Serialize)]
struct SelectionReport {
    id: String,
    streaks: Vec<String>,
    records: Vec<String>,
}

#[derive(Serialize)]
struct StrippedText {
    id: String,
    text: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    init_tracing(&config.logging);

    match cli.command {
        Commands::Extract {
            input,
            output,
            sentences,
            strip_captions,
            stats,
        } => {
            let articles = read_articles(&input)?;
            let mut extraction = config.extraction.clone();
            extraction.strip_captions |= strip_captions;

            let processor = ArticleProcessor::from_config(&extraction, RuleInflector::new())?;
            let (outcomes, totals) = processor.process_batch(&articles)?;

            let results: Vec<_> = outcomes
                .into_iter()
                .filter(|outcome| config.output.keep_empty || !outcome.result.is_empty())
                .map(|outcome| ExtractRecord {
                    result: outcome.result,
                    sentences: sentences.then_some(outcome.selected),
                })
                .collect();
            write_json(output.as_deref(), &results, config.output.pretty)?;

            tracing::info!(
                articles = totals.articles,
                streak_sentences = totals.streak_sentences,
                record_sentences = totals.record_sentences,
                cue_tokens = totals.cue_tokens,
                statements = totals.statements,
                skipped = totals.skipped(),
                "Extraction finished"
            );
            if let Some(path) = stats {
                write_json(Some(path.as_path()), &totals, true)?;
            }
        }
        Commands::Select { input } => {
            let articles = read_articles(&input)?;
            let processor = ArticleProcessor::from_config(&config.extraction, RuleInflector::new())?;

            let reports: Vec<_> = articles
                .iter()
                .map(|article| {
                    let doc = &article.document;
                    let mut starts = SelectionAccumulator::new();
                    let selected = processor.selector().select(doc, &mut starts);
                    SelectionReport {
                        id: article.id.clone(),
                        streaks: selected.streaks.iter().map(|&s| doc.sentence_text(s)).collect(),
                        records: selected.records.iter().map(|&s| doc.sentence_text(s)).collect(),
                    }
                })
                .collect();
            write_json(None, &reports, config.output.pretty)?;
        }
        Commands::Strip { input } => {
            let articles = read_articles(&input)?;
            let stripper = CaptionStripper::new();

            let texts: Vec<_> = articles
                .iter()
                .map(|article| StrippedText {
                    id: article.id.clone(),
                    text: stripper.strip_document(&article.document),
                })
                .collect();
            write_json(None, &texts, config.output.pretty)?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "strex={0},strex_core={0},strex_extractor={0}",
            logging.level
        )
        .into()
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_articles(path: &Path) -> anyhow::Result<Vec<ParsedArticle>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let articles: Vec<ParsedArticle> = serde_json::from_str(&content)
        .with_context(|| format!("parsing articles from {}", path.display()))?;
    tracing::info!(count = articles.len(), path = %path.display(), "Loaded articles");
    Ok(articles)
}

fn write_json<T: Serialize + ?Sized>(
    path: Option<&Path>,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');

    match path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?
        }
        None => std::io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}
