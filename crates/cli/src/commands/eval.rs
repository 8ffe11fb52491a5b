use std::process;

use scan_core::{action_tokens, interpret};

use crate::commands::symbols_or_exit;
use crate::{print_json, report_scan_error, OutputFormat};

pub(crate) fn cmd_eval(words: &[String], output: OutputFormat, quiet: bool) {
    let command = symbols_or_exit(words, output, quiet);
    let actions = match interpret(&command) {
        Ok(a) => a,
        Err(e) => {
            report_scan_error(&e, output, quiet);
            process::exit(1);
        }
    };

    let tokens = action_tokens(&actions);
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "command": words,
            "output": tokens,
        })),
        OutputFormat::Text => println!("{}", tokens.join(" ")),
    }
}
