#[derive(thiserror::Error, Debug)]
pub enum MarkupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid preset config: {0}")]
    Config(String),
}

/// A recoverable problem found while parsing markup.
///
/// Parsing never fails; each of these is recorded next to the segments and
/// the offending piece of markup is skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("ignored unparsable value {value:?} for attribute '{key}'")]
    MalformedAttribute { key: String, value: String },
    #[error("ignored unrecognized attribute token {0:?}")]
    UnknownAttribute(String),
    #[error("ignored pause tag with unparsable duration {0:?}")]
    MalformedPause(String),
    #[error("ignored close tag with no open scope")]
    UnbalancedClose,
    #[error("{depth} scope(s) left open at end of input")]
    UnclosedScope { depth: usize },
}
