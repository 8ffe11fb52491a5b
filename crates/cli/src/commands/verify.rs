use std::path::Path;
use std::process;

use scan_core::evaluate_tokens;

use crate::commands::load::load_or_exit;
use crate::{print_json, report_error, report_scan_error, OutputFormat};

pub(crate) fn cmd_verify(file: &Path, output: OutputFormat, quiet: bool) {
    let examples = load_or_exit(file, output, quiet);

    let mut mismatches: Vec<serde_json::Value> = Vec::new();
    for (i, ex) in examples.iter().enumerate() {
        let produced = match evaluate_tokens(&ex.input, &ex.head) {
            Ok(p) => p,
            Err(e) => {
                report_scan_error(&e, output, quiet);
                process::exit(1);
            }
        };
        if produced != ex.output {
            let command: Vec<&str> = ex.input.iter().map(|s| s.name()).collect();
            mismatches.push(serde_json::json!({
                "index": i,
                "input": command.join(" "),
                "expected": ex.output,
                "produced": produced,
            }));
        }
    }

    let passed = examples.len() - mismatches.len();
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "total": examples.len(),
            "passed": passed,
            "failed": mismatches.len(),
            "mismatches": mismatches,
        })),
        OutputFormat::Text => {
            if !quiet {
                for m in &mismatches {
                    println!(
                        "mismatch #{}: {}\n  expected: {}\n  produced: {}",
                        m["index"], m["input"], m["expected"], m["produced"]
                    );
                }
            }
            println!("{}/{} examples verified", passed, examples.len());
        }
    }

    if !mismatches.is_empty() {
        report_error(
            &format!(
                "{} of {} examples do not match their expected output",
                mismatches.len(),
                examples.len()
            ),
            output,
            quiet,
        );
        process::exit(1);
    }
}
