pub mod tags;
pub mod types;
pub mod stress;
pub mod classify;
pub mod analyzer;
pub mod lexicon;
pub mod paradigm;
pub mod backfill;
pub mod error;

pub use analyzer::Analyzer;
pub use error::{BackfillError, LexiconError, ParadigmError};
pub use lexicon::Lexicon;
pub use paradigm::synthesize;
pub use types::{CanonicalPos, CategorySet, FormRecord, Parse, Synthesis};
