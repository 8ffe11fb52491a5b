use std::path::Path;
use std::process;

use scan_core::{load_examples, ParsedExample};

use crate::{print_json, report_scan_error, OutputFormat};

pub(crate) fn load_or_exit(file: &Path, output: OutputFormat, quiet: bool) -> Vec<ParsedExample> {
    match load_examples(file) {
        Ok(examples) => examples,
        Err(e) => {
            report_scan_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn cmd_load(file: &Path, summary: bool, output: OutputFormat, quiet: bool) {
    let examples = load_or_exit(file, output, quiet);
    print_examples(&examples, summary, output);
}

/// Print parsed examples: one JSON object per line for text output, a single
/// JSON document for `--output json`.
pub(crate) fn print_examples(examples: &[ParsedExample], summary: bool, output: OutputFormat) {
    match (output, summary) {
        (OutputFormat::Json, true) => print_json(&serde_json::json!({
            "examples": examples.len(),
        })),
        (OutputFormat::Json, false) => print_json(&serde_json::json!({
            "examples": examples,
        })),
        (OutputFormat::Text, true) => println!("{} examples", examples.len()),
        (OutputFormat::Text, false) => {
            for ex in examples {
                match serde_json::to_string(ex) {
                    Ok(line) => println!("{}", line),
                    Err(e) => println!("serialization error: {}", e),
                }
            }
        }
    }
}
