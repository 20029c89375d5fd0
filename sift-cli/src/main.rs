//! Sift command line: run a CSS selector against a JSON element tree.
//!
//! The tree is read from a file, standard input, or `--inline`. Matches are
//! printed one opening tag per line, or as JSON with `--json`.
//!
//! Logging goes to stderr. Use `-v`/`-vv` or `RUST_LOG=sift_select=trace`.

mod render;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sift_dom::DomTree;
use tracing_subscriber::EnvFilter;

/// Sift: select elements from a JSON tree with CSS selectors
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Every active list item
    sift 'ul > li.active' page.json

    # Read the tree from standard input
    cat page.json | sift 'h1 + p'

    # Inline tree, JSON output
    sift --json 'a[href^="https"]' --inline '{"tag": "a", "attrs": {"href": "https://x"}}'

    # Count matches of several selectors
    sift --count 'dt, dd:first-of-type' page.json
"#)]
struct Cli {
    /// Selector list to evaluate
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// JSON tree to search (`-` or absent reads standard input)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Take the JSON tree from this argument instead of a file
    #[arg(long, value_name = "JSON", conflicts_with = "file")]
    inline: Option<String>,

    /// Print matches as a JSON array of {tag, attrs, path}
    #[arg(long, conflicts_with = "count")]
    json: bool,

    /// Print only the number of matches
    #[arg(long)]
    count: bool,

    /// Print the loaded tree before the matches
    #[arg(long)]
    tree: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tree = load_tree(&cli)?;
    tracing::debug!(nodes = tree.len(), "loaded tree");

    if cli.tree {
        print!("{}", render::outline(&tree, tree.root()));
    }

    let matches = match sift_select::select(&tree, tree.root(), &cli.selector) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::info!(selector = %cli.selector, found = matches.len(), "selection finished");

    if cli.count {
        println!("{}", matches.len());
    } else if cli.json {
        let records: Vec<_> = matches
            .iter()
            .filter_map(|&id| render::MatchRecord::new(&tree, id))
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        let color = io::stdout().is_terminal();
        for &id in &matches {
            if let Some(element) = tree.as_element(id) {
                println!("{}", render::opening_tag(element, color));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_tree(cli: &Cli) -> Result<DomTree> {
    if let Some(json) = &cli.inline {
        return DomTree::from_json(json).context("failed to parse --inline tree");
    }

    match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            DomTree::from_json_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse {}", path.display()))
        }
        _ => DomTree::from_json_reader(io::stdin().lock())
            .context("failed to parse tree from standard input"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from(["sift", "-vv", "--count", "ul > li", "page.json"]);
        assert_eq!(cli.selector, "ul > li");
        assert_eq!(cli.file.as_deref(), Some(Path::new("page.json")));
        assert!(cli.count);
        assert_eq!(cli.verbose, 2);

        assert!(Cli::try_parse_from(["sift", "--json", "--count", "p"]).is_err());
        assert!(Cli::try_parse_from(["sift", "p", "f.json", "--inline", "{}"]).is_err());
    }

    #[test]
    fn test_load_inline_tree() {
        let cli = Cli::parse_from(["sift", "p", "--inline", r#"[{"tag": "p"}, "text"]"#]);
        let tree = load_tree(&cli).unwrap();
        assert_eq!(sift_select::select(&tree, tree.root(), "p").unwrap().len(), 1);

        let cli = Cli::parse_from(["sift", "p", "--inline", "{"]);
        let err = load_tree(&cli).unwrap_err();
        assert!(err.to_string().contains("--inline"));
    }
}
