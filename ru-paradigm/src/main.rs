use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ru_paradigm_lib::backfill::{backfill_file, BackfillOptions};
use ru_paradigm_lib::{synthesize, Analyzer, Lexicon};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ru-paradigm", version, about = "Russian inflection paradigm synthesis")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print lemma, part of speech and forms as JSON, one line per word.
    Forms {
        /// Words to analyse (stress marks allowed). If omitted, reads from stdin.
        words: Vec<String>,

        /// OpenCorpora XML dictionary. Without it only the lookup form is emitted.
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Regenerate the `forms` of every entry in a JSONL vocabulary file.
    Backfill {
        /// Input JSONL file.
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL file.
        #[arg(short, long, required_unless_present = "in_place", conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Rewrite the input file.
        #[arg(long)]
        in_place: bool,

        /// OpenCorpora XML dictionary.
        #[arg(long)]
        lexicon: PathBuf,

        /// Only update entries with missing or single-form paradigms.
        #[arg(long)]
        only_missing: bool,

        /// Do not overwrite vocab_item.part_of_speech.
        #[arg(long)]
        keep_pos: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Forms {
            words,
            lexicon,
            pretty,
        } => {
            let lexicon = lexicon.as_deref().map(load_lexicon).transpose()?;
            let analyzer = lexicon.as_ref().map(|l| l as &dyn Analyzer);

            if words.is_empty() {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    let line = line.context("failed to read stdin")?;
                    if !line.trim().is_empty() {
                        print_forms(&line, analyzer, pretty)?;
                    }
                }
            } else {
                for word in &words {
                    print_forms(word, analyzer, pretty)?;
                }
            }
        }
        Cmd::Backfill {
            input,
            output,
            in_place,
            lexicon,
            only_missing,
            keep_pos,
        } => {
            let out_path = output_path(&input, output, in_place);
            let lexicon = load_lexicon(&lexicon)?;
            let opts = BackfillOptions {
                only_missing,
                keep_pos,
            };
            let stats = backfill_file(&input, &out_path, &lexicon, &opts)
                .with_context(|| format!("backfill of {} failed", input.display()))?;
            println!(
                "[DONE] total={} updated={} skipped={} out={}",
                stats.total,
                stats.updated,
                stats.skipped,
                out_path.display()
            );
        }
    }

    Ok(())
}

/// `--in-place` writes back to the input file; otherwise `--output` is used.
fn output_path(input: &Path, output: Option<PathBuf>, in_place: bool) -> PathBuf {
    match output {
        Some(p) if !in_place => p,
        _ => input.to_path_buf(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn load_lexicon(path: &Path) -> Result<Lexicon> {
    Lexicon::open(path).with_context(|| format!("cannot load lexicon {}", path.display()))
}

fn print_forms(word: &str, analyzer: Option<&dyn Analyzer>, pretty: bool) -> Result<()> {
    let synthesis = synthesize(word, analyzer)?;
    let json = if pretty {
        serde_json::to_string_pretty(&synthesis)
    } else {
        serde_json::to_string(&synthesis)
    };
    println!("{}", json.context("JSON serialization failed")?);
    Ok(())
}
