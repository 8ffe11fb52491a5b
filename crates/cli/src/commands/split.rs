use std::path::Path;
use std::process;

use scan_core::{split_path, ScanConfig, ScanDataset, Split};

use crate::{print_json, report_scan_error, OutputFormat};

pub(crate) fn cmd_split(config_path: &Path, split: Split, output: OutputFormat, quiet: bool) {
    let config = match ScanConfig::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            report_scan_error(&e, output, quiet);
            process::exit(1);
        }
    };
    let dataset = match ScanDataset::load(&config.dataset, split) {
        Ok(d) => d,
        Err(e) => {
            report_scan_error(&e, output, quiet);
            process::exit(1);
        }
    };

    let path = split_path(&config.dataset.data_dir, config.dataset.subset, split);
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "file": path.display().to_string(),
            "subset": config.dataset.subset,
            "split": split,
            "loaded": dataset.examples().len(),
            "visible": dataset.len(),
        })),
        OutputFormat::Text => {
            if !quiet {
                println!("file: {}", path.display());
            }
            println!(
                "{} examples ({} loaded)",
                dataset.len(),
                dataset.examples().len()
            );
        }
    }
}
