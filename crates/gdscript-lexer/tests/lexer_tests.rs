use insta::assert_yaml_snapshot;
use serde::Serialize;

use gdscript_lexer::Lexer;

/// A human-readable representation of a token for snapshot testing.
#[derive(Serialize)]
struct TokenSnapshot {
    kind: String,
    text: String,
    span: (u32, u32),
}

fn tokenize_snapshot(source: &str) -> Vec<TokenSnapshot> {
    Lexer::tokenize(source)
        .into_iter()
        .map(|tok| TokenSnapshot {
            kind: format!("{:?}", tok.kind),
            text: source[tok.span.start as usize..tok.span.end as usize].to_string(),
            span: (tok.span.start, tok.span.end),
        })
        .collect()
}

#[test]
fn keywords_and_identifiers() {
    assert_yaml_snapshot!(tokenize_snapshot("var const if elif else for while match func\nfoo_bar\n"));
}

#[test]
fn number_literals_with_separators() {
    assert_yaml_snapshot!(tokenize_snapshot("0x1F 0b1010 1_000_000 3.14\n"));
}

#[test]
fn string_literal_bounding_styles() {
    assert_yaml_snapshot!(tokenize_snapshot("\"double\" 'single' \"\"\"triple\"\"\"\n"));
}

#[test]
fn indentation_and_line_continuation() {
    assert_yaml_snapshot!(tokenize_snapshot("if a:\n\tb = 1 + \\\n\t\t2\n"));
}

#[test]
fn nbsp_is_error_token() {
    let toks = tokenize_snapshot("var x\u{a0}= 1\n");
    assert!(toks.iter().any(|t| t.kind == "Error"));
}
