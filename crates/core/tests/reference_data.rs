//! Reference-data suite.
//!
//! `fixtures/reference.txt` holds lines in the SCAN split-file format. Every
//! line is loaded, parsed, and evaluated, and the produced actions must
//! match the line's expected output.

use std::io::Write;
use std::path::{Path, PathBuf};

use scan_core::{
    evaluate_tokens, load_examples, normalize, parse, parse_symbols, verify, ParsedExample,
    ScanError, Symbol,
};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reference.txt")
}

fn reference() -> Vec<ParsedExample> {
    load_examples(&fixture_path())
        .unwrap_or_else(|e| panic!("failed to load reference fixture: {}", e))
}

#[test]
fn every_reference_line_evaluates_to_its_output() {
    let examples = reference();
    assert_eq!(examples.len(), 15);
    for ex in &examples {
        let produced = evaluate_tokens(&ex.input, &ex.head).unwrap();
        assert_eq!(produced, ex.output, "output mismatch for {:?}", ex.input);
        assert!(verify(ex).unwrap());
    }
}

#[test]
fn reference_trees_have_one_root_and_conserve_arity() {
    for ex in reference() {
        let roots = ex.head.as_slice().iter().filter(|h| h.is_none()).count();
        assert_eq!(roots, 1, "{:?}", ex.input);
        for (position, kids) in ex.head.children().iter().enumerate() {
            assert_eq!(kids.len(), ex.input[position].arity(), "{:?}", ex.input);
        }
    }
}

#[test]
fn nested_command_head_array() {
    // look right around twice after turn left opposite
    let examples = reference();
    let ex = examples
        .iter()
        .find(|ex| ex.len() == 8 && ex.input[0] == Symbol::Look)
        .expect("look around right twice after turn opposite left");
    assert_eq!(ex.head.to_signed(), vec![1, 2, 3, 4, -1, 6, 7, 4]);
}

#[test]
fn scenario_opposite_left() {
    let tokens = normalize(&parse_symbols(["opposite", "left"]).unwrap());
    assert_eq!(tokens, vec![Symbol::Left, Symbol::Opposite]);
    let tree = parse(&tokens).unwrap();
    assert_eq!(tree.head(0), Some(1));
    assert_eq!(tree.head(1), None);
    assert_eq!(tree.root(), Some(1));
}

#[test]
fn examples_serialize_with_signed_heads() {
    let ex = scan_core::parse_line(
        "IN: turn around left OUT: I_TURN_LEFT I_TURN_LEFT I_TURN_LEFT I_TURN_LEFT",
    )
    .unwrap();
    let json = serde_json::to_value(&ex).unwrap();
    assert_eq!(json["input"], serde_json::json!(["turn", "left", "around"]));
    assert_eq!(json["head"], serde_json::json!([1, 2, -1]));
    let back: ParsedExample = serde_json::from_value(json).unwrap();
    assert_eq!(back, ex);
}

#[test]
fn load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "IN: run left thrice OUT: I_TURN_LEFT I_RUN I_TURN_LEFT I_RUN I_TURN_LEFT I_RUN"
    )
    .unwrap();
    writeln!(file, "IN: walk after OUT: I_WALK").unwrap();
    let err = load_examples(file.path()).unwrap_err();
    match err {
        ScanError::Line { line, source } => {
            assert_eq!(line, 2);
            assert!(matches!(*source, ScanError::MalformedSequence { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = load_examples(Path::new("does/not/exist.txt")).unwrap_err();
    assert!(matches!(err, ScanError::Io { .. }));
}
