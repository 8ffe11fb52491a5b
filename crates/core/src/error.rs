use std::path::PathBuf;

/// All errors produced by the grammar, parser, evaluator and dataset loader.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A token outside the fixed command vocabulary.
    #[error("unknown symbol: '{symbol}'")]
    UnknownSymbol { symbol: String },

    /// An output token outside the action vocabulary.
    #[error("unknown output token: '{token}'")]
    UnknownAction { token: String },

    /// The parser's value stack underflowed, or the scan did not leave
    /// exactly one root value.
    #[error("malformed sequence: {message}")]
    MalformedSequence { message: String },

    /// The head array handed to the evaluator is not a single spanning tree.
    #[error("cycle or orphan at position {position}: {message}")]
    CycleOrOrphan { position: usize, message: String },

    /// A tree node has a number of children different from its symbol's arity.
    #[error("arity mismatch at position {position}: expected {expected} children, found {found}")]
    ArityMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },

    /// A data line that does not have the `id : command : output` shape.
    #[error("malformed line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    /// A failure while processing one data line.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ScanError>,
    },

    #[error("unknown SCAN subset: '{name}'")]
    UnknownSubset { name: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ScanError::MalformedSequence {
            message: message.into(),
        }
    }

    pub fn orphan(position: usize, message: impl Into<String>) -> Self {
        ScanError::CycleOrOrphan {
            position,
            message: message.into(),
        }
    }

    /// Attach a 1-based line number to a per-line failure.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            // Already carries its own line number.
            e @ ScanError::MalformedLine { .. } => e,
            e => ScanError::Line {
                line,
                source: Box::new(e),
            },
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::UnknownSymbol { .. } => "unknown_symbol",
            ScanError::UnknownAction { .. } => "unknown_action",
            ScanError::MalformedSequence { .. } => "malformed_sequence",
            ScanError::CycleOrOrphan { .. } => "cycle_or_orphan",
            ScanError::ArityMismatch { .. } => "arity_mismatch",
            ScanError::MalformedLine { .. } => "malformed_line",
            ScanError::Line { source, .. } => source.kind(),
            ScanError::UnknownSubset { .. } => "unknown_subset",
            ScanError::Config { .. } => "config",
            ScanError::Io { .. } => "io",
        }
    }

    /// Serialize to the JSON shape printed by `--output json`.
    /// The format always includes all fields (null for missing).
    pub fn to_json_value(&self) -> serde_json::Value {
        let line = match self {
            ScanError::MalformedLine { line, .. } | ScanError::Line { line, .. } => Some(*line),
            _ => None,
        };
        serde_json::json!({
            "kind":    self.kind(),
            "line":    line,
            "message": self.to_string(),
        })
    }
}
