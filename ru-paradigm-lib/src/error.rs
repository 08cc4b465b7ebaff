// Error types.

use std::path::PathBuf;

/// Errors returned by the paradigm engine.
#[derive(Debug, thiserror::Error)]
pub enum ParadigmError {
    /// The lexical form was empty or whitespace-only (after stress removal).
    #[error("malformed input: lexical form {0:?} is empty")]
    MalformedInput(String),
}

/// Errors raised while loading a [`Lexicon`](crate::lexicon::Lexicon).
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("cannot read lexicon {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// A `<l>` or `<f>` element without its `t` attribute.
    #[error("<{element}> without a \"t\" attribute in lemma {lemma_id}")]
    MissingText { element: &'static str, lemma_id: String },
}

/// Errors that abort a backfill run. Per-line problems are counted, not raised.
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ParadigmError> = std::result::Result<T, E>;
