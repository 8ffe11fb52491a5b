mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use scan_core::{ScanError, Split};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Dataset split selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SplitArg {
    Train,
    Val,
    Test,
}

impl From<SplitArg> for Split {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Train => Split::Train,
            SplitArg::Val => Split::Val,
            SplitArg::Test => Split::Test,
        }
    }
}

/// SCAN command parser and interpreter.
#[derive(Parser)]
#[command(name = "scan", version, about = "SCAN command parser and interpreter")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize and parse a command, printing its dependency heads
    Parse {
        /// Command words, e.g. `jump opposite left twice`
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Interpret a command, printing its action sequence
    Eval {
        /// Command words, e.g. `walk around right after run`
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Load a SCAN data file and print its parsed examples
    Load {
        /// Path to a file in the `IN: ... OUT: ...` line format
        file: PathBuf,
        /// Print only the example count
        #[arg(long)]
        summary: bool,
    },

    /// Check every example's tree against its expected output
    Verify {
        /// Path to a file in the `IN: ... OUT: ...` line format
        file: PathBuf,
    },

    /// Load a benchmark split as described by a configuration file
    Split {
        /// Path to the TOML configuration file
        #[arg(long)]
        config: PathBuf,
        /// Which split to load
        #[arg(long, default_value = "train", value_enum)]
        split: SplitArg,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { words } => {
            commands::parse::cmd_parse(&words, cli.output, cli.quiet);
        }
        Commands::Eval { words } => {
            commands::eval::cmd_eval(&words, cli.output, cli.quiet);
        }
        Commands::Load { file, summary } => {
            commands::load::cmd_load(&file, summary, cli.output, cli.quiet);
        }
        Commands::Verify { file } => {
            commands::verify::cmd_verify(&file, cli.output, cli.quiet);
        }
        Commands::Split { config, split } => {
            commands::split::cmd_split(&config, split.into(), cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}

/// Report a core error on stderr. JSON output always prints the structured
/// error, matching `--output json` consumers that parse stderr.
pub(crate) fn report_scan_error(e: &ScanError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

pub(crate) fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("serialization error: {}", e))
    );
}
