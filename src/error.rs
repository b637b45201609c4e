// File: src/error.rs
use std::path::PathBuf;

/// Every failure the library can report.
///
/// Tag errors carry the offending DIM tag so callers can name it in a
/// diagnostic together with the word's external id.
#[derive(Debug, thiserror::Error)]
pub enum BeygjaError {
    #[error("empty inflection tag: {tag:?}")]
    EmptyTag { tag: String },
    #[error("unknown tag element {element:?} in {tag:?}")]
    UnknownElement { tag: String, element: String },
    #[error("conflicting categories in {tag:?}: {first:?} and {second:?}")]
    SlotConflict { tag: String, first: char, second: char },
    #[error("category {symbol:?} is not allowed for class {class:?} in {tag:?}")]
    IllegalCategory { tag: String, class: char, symbol: char },
    #[error("class {class:?} requires a {category} symbol in {tag:?}")]
    MissingCategory {
        tag: String,
        class: char,
        category: &'static str,
    },
    #[error("clipped imperative only allowed as Maz, got {code:?} from {tag:?}")]
    ClippedNotAllowed { tag: String, code: String },
    #[error("prefix {prefix:?} not valid for {code:?} from {tag:?}")]
    PrefixMismatch {
        tag: String,
        code: String,
        prefix: char,
    },

    #[error("{input:?} contains characters outside the Icelandic alphabet")]
    Alphabet { input: String },
    #[error("past form {past:?} of {infinitive:?} is not a weak past (must end in 'i')")]
    NotWeakPast { infinitive: String, past: String },
    #[error("no principal parts derivable for {headword:?}")]
    NoPrincipalParts { headword: String },

    #[error("unknown word id {0}")]
    UnknownWord(usize),
    #[error("duplicate inflection {code:?} #{order} for {headword:?}")]
    DuplicateInflection {
        headword: String,
        code: String,
        order: u32,
    },
    #[error("malformed record at line {line}: {message}")]
    Record { line: u64, message: String },
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Snapshot(#[from] bincode::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl BeygjaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BeygjaError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BeygjaError>;
