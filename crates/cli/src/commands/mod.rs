pub(crate) mod eval;
pub(crate) mod load;
pub(crate) mod parse;
pub(crate) mod split;
pub(crate) mod verify;

use std::process;

use scan_core::{parse_symbols, Symbol};

use crate::{report_scan_error, OutputFormat};

/// Look up command words, exiting with status 1 on an unknown word.
pub(crate) fn symbols_or_exit(words: &[String], output: OutputFormat, quiet: bool) -> Vec<Symbol> {
    match parse_symbols(words) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_scan_error(&e, output, quiet);
            process::exit(1);
        }
    }
}
