//! A lossless, round-trip-preserving parser for GDScript.
//!
//! Every entry point takes the raw source text, a [`ParseSettings`], and a
//! cooperative [`CancelSignal`], and returns a [`Parse`] wrapping a rowan
//! green tree: concatenating every token in the tree reproduces the input
//! exactly (a bare `\r` is the one exception — the lexer drops it rather
//! than emitting a leaf for it, since the round-trip contract normalizes
//! line endings to `\n`). Malformed input never fails the call — it shows
//! up as `INVALID` leaves in the tree, discoverable via
//! [`Parse::invalid_tokens`]. Only resource-bound violations
//! (`ParseSettings`) and cancellation surface as an `Err`.

pub mod ast;
pub mod cst;
pub mod error;
pub(crate) mod parser;
pub mod settings;
pub mod syntax_kind;

use cst::SyntaxNode;
pub use error::ParseFailure;
pub use settings::{CancelSignal, ParseSettings};
use syntax_kind::SyntaxKind;

/// The result of a successful parse: a syntax tree plus every `INVALID`
/// leaf found along the way, pre-collected so callers don't have to walk
/// the tree themselves just to check whether anything was malformed.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
}

impl Parse {
    fn new(green: rowan::GreenNode) -> Self {
        Self { green }
    }

    pub fn syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Every leaf token that no reader could make sense of, in document
    /// order. An empty vec means the input was entirely well-formed.
    pub fn invalid_tokens(&self) -> Vec<cst::SyntaxToken> {
        self.syntax_node()
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::INVALID || t.parent().map(|p| p.kind()) == Some(SyntaxKind::INVALID))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.invalid_tokens().is_empty()
    }
}

fn run<F>(
    source: &str,
    settings: ParseSettings,
    cancel: impl CancelSignal + 'static,
    grammar: F,
) -> Result<Parse, ParseFailure>
where
    F: FnOnce(&mut parser::Parser) -> Result<(), ParseFailure>,
{
    let mut p = parser::Parser::new_with_cancel(source, settings, cancel);
    grammar(&mut p)?;
    if let Some(f) = p.fatal() {
        return Err(f);
    }
    Ok(Parse::new(p.build_tree()))
}

/// Drain whatever tokens remain after a single-construct entry point
/// finishes, wrapping each as an `INVALID` leaf so every byte of the input
/// still lands somewhere in the tree — the trailing content past the
/// statement/expression/type this entry point returns.
fn drain_trailing(p: &mut parser::Parser) {
    while !p.at_eof() {
        p.advance_as_invalid();
    }
}

/// Parse a whole file: attributes, `class_name`/`extends`, and the member
/// list.
pub fn parse_file(
    source: &str,
    settings: ParseSettings,
    cancel: impl CancelSignal + 'static,
) -> Result<Parse, ParseFailure> {
    run(source, settings, cancel, parser::items::parse_file)
}

/// Parse a single statement (as would appear in a function body), wrapped
/// in a `SOURCE_FILE` root so the tree shape matches every other entry
/// point. Trailing content beyond the statement is attached as invalid
/// trivia on the returned node.
pub fn parse_statement(
    source: &str,
    settings: ParseSettings,
    cancel: impl CancelSignal + 'static,
) -> Result<Parse, ParseFailure> {
    run(source, settings, cancel, |p| {
        let m = p.open()?;
        if !p.at_eof() {
            parser::statements::parse_stmt(p)?;
        }
        drain_trailing(p);
        p.close(m, SyntaxKind::SOURCE_FILE);
        Ok(())
    })
}

/// Parse a run of statements with no enclosing header or indentation
/// requirement — e.g. pasting a block body in isolation.
pub fn parse_statements(
    source: &str,
    settings: ParseSettings,
    cancel: impl CancelSignal + 'static,
) -> Result<Parse, ParseFailure> {
    run(source, settings, cancel, |p| {
        let m = p.open()?;
        while !p.at_eof() {
            p.check_cancellation()?;
            let pos_before = p.pos();
            parser::statements::parse_stmt(p)?;
            p.note_loop_iteration(pos_before)?;
            if p.fatal().is_some() {
                break;
            }
        }
        drain_trailing(p);
        p.close(m, SyntaxKind::SOURCE_FILE);
        Ok(())
    })
}

/// Parse a single expression. Trailing content beyond the expression is
/// attached as invalid trivia on the returned node.
pub fn parse_expression(
    source: &str,
    settings: ParseSettings,
    cancel: impl CancelSignal + 'static,
) -> Result<Parse, ParseFailure> {
    run(source, settings, cancel, |p| {
        let m = p.open()?;
        if !p.at_eof() {
            parser::expressions::parse_expr(p)?;
        }
        drain_trailing(p);
        p.close(m, SyntaxKind::SOURCE_FILE);
        Ok(())
    })
}

/// Parse a type reference, e.g. `Array[Dictionary]`. Trailing content
/// beyond the type is attached as invalid trivia on the returned node.
pub fn parse_type(
    source: &str,
    settings: ParseSettings,
    cancel: impl CancelSignal + 'static,
) -> Result<Parse, ParseFailure> {
    run(source, settings, cancel, |p| {
        let m = p.open()?;
        if !p.at_eof() {
            parser::items::parse_type_ref(p)?;
        }
        drain_trailing(p);
        p.close(m, SyntaxKind::SOURCE_FILE);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_file_round_trips_source() {
        let src = "extends Node\n\nfunc _ready() -> void:\n\tprint(\"hi\")\n";
        let parse = parse_file(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
        assert!(!parse.has_errors());
    }

    #[test]
    fn malformed_input_never_fails_the_call() {
        let src = "var = = =\n";
        let parse = parse_file(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
    }

    #[test]
    fn parse_expression_round_trips() {
        let src = "1 + 2 * (3 - x.y)";
        let parse = parse_expression(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
    }

    #[test]
    fn parse_type_round_trips_generic() {
        let src = "Array[Dictionary]";
        let parse = parse_type(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
    }

    #[test]
    fn reading_stack_overflow_surfaces_as_err_with_no_tree() {
        let src = "((((((((((((1))))))))))))";
        let tight = ParseSettings {
            max_reading_stack: Some(3),
            ..ParseSettings::default()
        };
        let result = parse_expression(src, tight, ());
        assert!(matches!(
            result,
            Err(ParseFailure::ReadingStackOverflow { .. })
        ));
    }

    #[test]
    fn parse_expression_attaches_trailing_content_as_invalid() {
        let src = "1 + 2 foo";
        let parse = parse_expression(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
        assert!(parse.has_errors());
    }

    #[test]
    fn parse_statement_attaches_trailing_content_as_invalid() {
        let src = "pass\nvar x = 1\n";
        let parse = parse_statement(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
        assert!(parse.has_errors());
    }

    #[test]
    fn parse_type_attaches_trailing_content_as_invalid() {
        let src = "int ???";
        let parse = parse_type(src, ParseSettings::default(), ()).unwrap();
        assert_eq!(parse.syntax_node().text().to_string(), src);
        assert!(parse.has_errors());
    }

    #[test]
    fn cancelled_signal_surfaces_as_err_with_no_tree() {
        let src = "var x = 1\n".repeat(200);
        let tight = ParseSettings {
            cancellation_check_interval: 8,
            ..ParseSettings::default()
        };
        let result = parse_file(&src, tight, || true);
        assert!(matches!(result, Err(ParseFailure::Cancelled)));
    }

    #[test]
    fn cancellation_interval_zero_disables_polling() {
        let src = "var x = 1\n".repeat(50);
        let never_polls = ParseSettings {
            cancellation_check_interval: 0,
            ..ParseSettings::default()
        };
        let result = parse_file(&src, never_polls, || true);
        assert!(result.is_ok());
    }
}
