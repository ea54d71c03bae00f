//! The GDScript reader CLI.
//!
//! Provides the `gdscriptc` command with the following subcommands:
//!
//! - `gdscriptc check <file>` - Parse a `.gd` file and report any invalid tokens
//! - `gdscriptc dump <file>` - Parse a `.gd` file and print its syntax tree
//!
//! Options:
//! - `--tab-width` - Visual width assigned to a tab for indentation comparisons
//! - `--max-depth` - Cap on nested-reader depth before aborting with an error

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use gdscript_parser::settings::ParseSettings;

#[derive(Parser)]
#[command(name = "gdscriptc", version, about = "The GDScript reader CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report invalid tokens, if any
    Check {
        /// Path to the .gd file to read
        path: PathBuf,

        /// Visual width assigned to a tab for indentation comparisons
        #[arg(long = "tab-width", default_value = "4")]
        tab_width: u32,

        /// Cap on nested-reader depth before aborting with an error
        #[arg(long = "max-depth")]
        max_depth: Option<u32>,
    },
    /// Parse a file and print its syntax tree
    Dump {
        /// Path to the .gd file to read
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            path,
            tab_width,
            max_depth,
        } => check(&path, tab_width, max_depth),
        Commands::Dump { path } => dump(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Parse the file and report every invalid token's line:column. Exits
/// non-zero if the tree contains any, or if parsing hit a resource limit.
fn check(path: &Path, tab_width: u32, max_depth: Option<u32>) -> Result<(), String> {
    let source = read_source(path)?;
    let settings = ParseSettings {
        tab_visual_width: tab_width,
        max_reading_stack: max_depth.or(ParseSettings::default().max_reading_stack),
        ..ParseSettings::default()
    };

    let parse = gdscript_parser::parse_file(&source, settings, ())
        .map_err(|e| format!("'{}' could not be read: {}", path.display(), e))?;

    let invalid = parse.invalid_tokens();
    if invalid.is_empty() {
        eprintln!("  ok: {}", path.display());
        return Ok(());
    }

    for tok in &invalid {
        let (line, col) = line_col(&source, tok.text_range().start().into());
        eprintln!("  {}:{}:{}: invalid token {:?}", path.display(), line, col, tok.text());
    }
    Err(format!("{} invalid token(s) in '{}'", invalid.len(), path.display()))
}

/// Parse the file and print its syntax tree in rowan's debug form.
fn dump(path: &Path) -> Result<(), String> {
    let source = read_source(path)?;
    let parse = gdscript_parser::parse_file(&source, ParseSettings::default(), ())
        .map_err(|e| format!("'{}' could not be read: {}", path.display(), e))?;
    println!("{:#?}", parse.syntax_node());
    Ok(())
}

/// 1-based line and column of a byte offset into `source`.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for ch in source[..offset.min(source.len())].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn check_reports_no_invalid_tokens_for_clean_source() {
        let f = write_temp("extends Node\n\nfunc _ready() -> void:\n\tpass\n");
        assert!(check(f.path(), 4, None).is_ok());
    }

    #[test]
    fn check_fails_on_malformed_source() {
        let f = write_temp("var x = \u{a0}\n");
        assert!(check(f.path(), 4, None).is_err());
    }

    #[test]
    fn line_col_counts_newlines() {
        assert_eq!(line_col("abc\ndef", 5), (2, 2));
    }
}
