use std::process;

use scan_core::{normalize, parse};

use crate::commands::symbols_or_exit;
use crate::{print_json, report_scan_error, OutputFormat};

pub(crate) fn cmd_parse(words: &[String], output: OutputFormat, quiet: bool) {
    let tokens = normalize(&symbols_or_exit(words, output, quiet));
    let tree = match parse(&tokens) {
        Ok(t) => t,
        Err(e) => {
            report_scan_error(&e, output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "input": tokens,
            "head": tree,
        })),
        OutputFormat::Text => {
            let names: Vec<&str> = tokens.iter().map(|s| s.name()).collect();
            println!("{}", names.join(" "));
            let heads: Vec<String> = tree.to_signed().iter().map(|h| h.to_string()).collect();
            println!("{}", heads.join(" "));
        }
    }
}
