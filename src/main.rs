//! blockwise: structural selection and reordering from the command line.
#![allow(clippy::multiple_crate_versions)]

use blockwise::commands::{self, Command};
use blockwise::{config, formats, FileTree, TextRange, TriviaPolicy};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockwise")]
#[command(about = "Structural selection and reordering over syntax trees", long_about = None)]
struct Args {
    /// File to operate on
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Structural command to run
    #[arg(value_enum)]
    command: Command,

    /// Selection as a byte range, may be repeated
    #[arg(long = "range", short = 'r', value_name = "START..END", value_parser = parse_range)]
    ranges: Vec<TextRange>,

    /// Cursor byte offset, may be repeated
    #[arg(long = "offset", short = 'o', value_name = "N")]
    offsets: Vec<usize>,

    /// Language name or extension, instead of the file's own extension
    #[arg(long, short = 'l')]
    lang: Option<String>,

    /// Trivia policy for swaps, overriding blockwise.toml
    #[arg(long, value_enum)]
    policy: Option<TriviaPolicy>,

    /// Apply swap edits to the file instead of only printing them
    #[arg(long)]
    write: bool,
}

fn parse_range(s: &str) -> Result<TextRange, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {s:?}"))?;
    let start = start.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let end = end.trim().parse().map_err(|e| format!("bad end: {e}"))?;
    if start > end {
        return Err(format!("range {s:?} ends before it starts"));
    }
    Ok(TextRange::new(start, end))
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BLOCKWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    run(args).map_err(io::Error::other)
}

fn run(args: Args) -> blockwise::Result<()> {
    let mut cfg = config::Config::load()?;
    if let Some(policy) = args.policy {
        cfg.trivia_policy = policy;
    }

    let language = match args.lang {
        Some(lang) => lang,
        None => args
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string(),
    };
    let format = formats::lookup(&language)?;

    let source = std::fs::read_to_string(&args.path)?;
    let tree = FileTree::parse(source, format.as_ref(), &cfg)?;

    let ranges: Vec<TextRange> = args
        .ranges
        .into_iter()
        .chain(args.offsets.into_iter().map(TextRange::empty))
        .collect();

    let outcome = commands::execute(&tree, args.command, &ranges, &cfg)?;

    if args.write {
        if let Some(edit) = &outcome.edit {
            edit.apply_to_file(&args.path)?;
        }
    }

    let json = serde_json::to_string_pretty(&outcome).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
