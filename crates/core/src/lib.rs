//! scan-core: dependency parser and program interpreter for the SCAN
//! command language.
//!
//! A command such as `jump opposite left twice and walk` goes through
//! three pure steps:
//!
//! 1. [`normalize()`] moves turn-repeat words behind their argument so
//!    every operator follows its operands;
//! 2. [`parse()`] runs an operator-precedence shift-reduce pass and returns
//!    a [`DependencyTree`] (one head per token position);
//! 3. [`evaluate()`] folds the tree bottom-up through each symbol's
//!    semantic function, yielding the [`Action`] sequence.
//!
//! [`load_examples()`] and [`ScanDataset`] read the line-oriented SCAN
//! split files into [`ParsedExample`]s.

pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod grammar;
pub mod normalize;
pub mod parser;
pub mod source;
pub mod tree;

// ── Convenience re-exports: key types ────────────────────────────────

pub use config::{DatasetConfig, ScanConfig};
pub use dataset::{ParsedExample, ScanDataset, Split, Subset};
pub use error::ScanError;
pub use grammar::{Action, Symbol, SymbolClass, OUTPUT_VOCAB};
pub use tree::{DependencyTree, ROOT};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use dataset::{load_examples, load_examples_from_str, parse_line, split_path};
pub use eval::{evaluate, evaluate_tokens, interpret, verify};
pub use grammar::{action_tokens, parse_symbols};
pub use normalize::normalize;
pub use parser::{parse, parse_words};
