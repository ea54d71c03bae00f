//! Whole-grammar integration tests using insta snapshots.
//!
//! Each test parses one of the canonical scenarios and snapshots the debug
//! tree output, to catch accidental structural regressions that a bare
//! round-trip-text check wouldn't notice.

use gdscript_parser::settings::ParseSettings;
use gdscript_parser::{parse_expression, parse_file, ParseFailure};
use insta::assert_snapshot;

fn debug_tree(source: &str) -> String {
    let parse = parse_file(source, ParseSettings::default(), ()).expect("parse should not fail");
    assert_eq!(parse.syntax_node().text().to_string(), source, "round-trip mismatch");
    format!("{:#?}", parse.syntax_node())
}

#[test]
fn var_decl_with_initializer() {
    assert_snapshot!(debug_tree("var x = 1\n"));
}

#[test]
fn for_loop_over_array_literal() {
    assert_snapshot!(debug_tree("for x in [5,7,11]:\n    print(x)\n"));
}

#[test]
fn dict_with_mixed_entry_separators() {
    assert_snapshot!(debug_tree("var d = {\"a\"=1, \"b\":2}\n"));
}

#[test]
fn not_in_dual_operator() {
    let parse = parse_expression("a not in arr", ParseSettings::default(), ()).unwrap();
    assert_eq!(parse.syntax_node().text().to_string(), "a not in arr");
    assert_snapshot!(format!("{:#?}", parse.syntax_node()));
}

#[test]
fn deeply_nested_parens_trip_the_reading_stack_guard() {
    let depth = 68;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let result = parse_expression(&source, ParseSettings::default(), ());
    match result {
        Err(ParseFailure::ReadingStackOverflow { max_depth, current_depth }) => {
            assert_eq!(max_depth, 64);
            assert!(current_depth >= 64);
        }
        other => panic!("expected a reading-stack overflow, got {:?}", other),
    }
}

#[test]
fn brackets_inside_string_literal_are_not_interpreted() {
    let inner: String = ['(', '(', '(', '[', '[', '{'].iter().collect();
    let source = format!("var s = \"{}\"\n", inner);
    assert_snapshot!(debug_tree(&source));
}

#[test]
fn zero_indent_comment_inside_func_body_is_preserved_as_trivia() {
    assert_snapshot!(debug_tree(
        "func test():\n\tvar x = 1\n# zero-indent comment\n\tvar y = 2\n"
    ));
}
