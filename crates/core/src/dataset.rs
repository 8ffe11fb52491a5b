//! Dataset assembly: the SCAN line format, split files, and the loaded
//! example container.
//!
//! Each line has three colon-separated fields:
//!
//! ```text
//! IN: jump opposite left OUT: I_TURN_LEFT I_TURN_LEFT I_JUMP
//! ```
//!
//! The first field is ignored. The second holds the command followed by the
//! `OUT` marker, which is dropped. The third holds the expected output tokens.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DatasetConfig;
use crate::error::ScanError;
use crate::grammar::{parse_symbols, Symbol};
use crate::normalize::{is_normalized, normalize};
use crate::parser::parse;
use crate::source::{FileSystemProvider, SourceProvider};
use crate::tree::DependencyTree;

// ──────────────────────────────────────────────
// Parsed examples
// ──────────────────────────────────────────────

/// One parsed data line: normalized command, its tree, expected output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExample {
    pub input: Vec<Symbol>,
    pub head: DependencyTree,
    pub output: Vec<String>,
}

impl ParsedExample {
    /// Length of the command.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

fn split_fields(number: usize, line: &str) -> Result<(Vec<&str>, Vec<&str>), ScanError> {
    let fields: Vec<&str> = line.split(':').collect();
    let &[_, command, output] = fields.as_slice() else {
        return Err(ScanError::MalformedLine {
            line: number,
            message: format!("expected 3 ':'-separated fields, found {}", fields.len()),
        });
    };
    let mut command: Vec<&str> = command.split_whitespace().collect();
    // trailing OUT marker
    command.pop();
    Ok((command, output.split_whitespace().collect()))
}

fn parse_numbered_line(number: usize, line: &str) -> Result<ParsedExample, ScanError> {
    let (command, output) = split_fields(number, line)?;
    let input = normalize(&parse_symbols(command)?);
    debug_assert!(is_normalized(&input));
    let head = parse(&input)?;
    Ok(ParsedExample {
        input,
        head,
        output: output.into_iter().map(str::to_owned).collect(),
    })
}

/// Parse a single data line.
pub fn parse_line(line: &str) -> Result<ParsedExample, ScanError> {
    parse_numbered_line(1, line).map_err(|e| e.at_line(1))
}

/// Parse every non-blank line of `text`.
///
/// Lines are processed in parallel; the result keeps file order and the
/// error, if any, is the one for the earliest failing line.
pub fn load_examples_from_str(text: &str) -> Result<Vec<ParsedExample>, ScanError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();
    let parsed: Vec<Result<ParsedExample, ScanError>> = lines
        .par_iter()
        .map(|&(number, line)| parse_numbered_line(number, line).map_err(|e| e.at_line(number)))
        .collect();
    parsed.into_iter().collect()
}

/// Read and parse a data file from disk.
pub fn load_examples(path: &Path) -> Result<Vec<ParsedExample>, ScanError> {
    load_examples_with_provider(path, &FileSystemProvider)
}

/// Read and parse a data file through `provider`.
pub fn load_examples_with_provider(
    path: &Path,
    provider: &dyn SourceProvider,
) -> Result<Vec<ParsedExample>, ScanError> {
    debug!(path = %path.display(), "reading SCAN data file");
    let text = provider.read_source(path).map_err(|source| ScanError::Io {
        path: path.to_owned(),
        source,
    })?;
    let examples = load_examples_from_str(&text)?;
    info!(path = %path.display(), examples = examples.len(), "loaded SCAN data file");
    Ok(examples)
}

// ──────────────────────────────────────────────
// Splits
// ──────────────────────────────────────────────

/// Which SCAN benchmark split family to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    Simple,
    #[default]
    Length,
    AddprimJump,
    AddprimTurnLeft,
    TemplateAroundRight,
}

impl Subset {
    pub const ALL: [Subset; 5] = [
        Subset::Simple,
        Subset::Length,
        Subset::AddprimJump,
        Subset::AddprimTurnLeft,
        Subset::TemplateAroundRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subset::Simple => "simple",
            Subset::Length => "length",
            Subset::AddprimJump => "addprim_jump",
            Subset::AddprimTurnLeft => "addprim_turn_left",
            Subset::TemplateAroundRight => "template_around_right",
        }
    }

    /// Directory under the data root that holds this subset's files.
    pub fn directory(self) -> &'static str {
        match self {
            Subset::Simple => "simple_split",
            Subset::Length => "length_split",
            Subset::AddprimJump | Subset::AddprimTurnLeft => "add_prim_split",
            Subset::TemplateAroundRight => "template_split",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subset {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subset::ALL
            .iter()
            .copied()
            .find(|subset| subset.name() == s)
            .ok_or_else(|| ScanError::UnknownSubset { name: s.to_owned() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// Name of the file on disk. SCAN ships no validation split, so `Val`
    /// reads the test file.
    pub fn file_name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val | Split::Test => "test",
        }
    }
}

impl FromStr for Split {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "val" => Ok(Split::Val),
            "test" => Ok(Split::Test),
            other => Err(ScanError::Config {
                message: format!("unknown split '{}', expected train, val or test", other),
            }),
        }
    }
}

/// `{data_dir}/{subset dir}/tasks_{split}_{subset}.txt`
pub fn split_path(data_dir: &Path, subset: Subset, split: Split) -> PathBuf {
    data_dir.join(subset.directory()).join(format!(
        "tasks_{}_{}.txt",
        split.file_name(),
        subset.name()
    ))
}

// ──────────────────────────────────────────────
// Dataset container
// ──────────────────────────────────────────────

/// Loaded examples plus the ids currently visible through [`ScanDataset::get`].
#[derive(Debug, Clone)]
pub struct ScanDataset {
    examples: Vec<ParsedExample>,
    valid_ids: Vec<usize>,
}

impl ScanDataset {
    pub fn from_examples(examples: Vec<ParsedExample>) -> Self {
        let valid_ids = (0..examples.len()).collect();
        ScanDataset {
            examples,
            valid_ids,
        }
    }

    /// Load the split named by `config`, then apply its sampling and
    /// length limits.
    pub fn load(config: &DatasetConfig, split: Split) -> Result<Self, ScanError> {
        Self::load_with_provider(config, split, &FileSystemProvider)
    }

    pub fn load_with_provider(
        config: &DatasetConfig,
        split: Split,
        provider: &dyn SourceProvider,
    ) -> Result<Self, ScanError> {
        config.validate()?;
        let path = split_path(&config.data_dir, config.subset, split);
        let mut dataset = Self::from_examples(load_examples_with_provider(&path, provider)?);
        if let Some(n_sample) = config.n_sample {
            dataset.sample(n_sample, config.seed);
        }
        if config.min_len.is_some() || config.max_len.is_some() {
            dataset.filter_by_len(config.min_len, config.max_len);
        }
        Ok(dataset)
    }

    /// Shuffle with a seeded RNG and keep `n_sample` examples. Values up to
    /// 1.0 are a fraction of the dataset; larger values are a count.
    /// Zero keeps everything.
    pub fn sample(&mut self, n_sample: f64, seed: u64) {
        if n_sample <= 0.0 {
            return;
        }
        let keep = if n_sample <= 1.0 {
            (self.examples.len() as f64 * n_sample) as usize
        } else {
            (n_sample as usize).min(self.examples.len())
        };
        let mut rng = StdRng::seed_from_u64(seed);
        self.examples.shuffle(&mut rng);
        self.examples.truncate(keep);
        self.valid_ids = (0..self.examples.len()).collect();
        info!(keep, seed, "randomly selected SCAN examples");
    }

    /// Restrict visible examples to command lengths in `min..=max`.
    /// Always filters the full example list, not the current view.
    pub fn filter_by_len(&mut self, min_len: Option<usize>, max_len: Option<usize>) {
        let min = min_len.unwrap_or(0);
        let max = max_len.unwrap_or(usize::MAX);
        self.valid_ids = self
            .examples
            .iter()
            .enumerate()
            .filter(|(_, ex)| (min..=max).contains(&ex.len()))
            .map(|(i, _)| i)
            .collect();
        debug!(
            min,
            max,
            visible = self.valid_ids.len(),
            total = self.examples.len(),
            "filtered SCAN examples by length"
        );
    }

    /// Number of visible examples.
    pub fn len(&self) -> usize {
        self.valid_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParsedExample> {
        self.valid_ids
            .get(index)
            .and_then(|&id| self.examples.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedExample> + '_ {
        self.valid_ids.iter().filter_map(|&id| self.examples.get(id))
    }

    /// Every loaded example, ignoring the length filter.
    pub fn examples(&self) -> &[ParsedExample] {
        &self.examples
    }
}
