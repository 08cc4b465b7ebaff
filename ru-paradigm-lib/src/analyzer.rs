// Morphological analyzer capability consumed by the paradigm engine.

use crate::types::{CategorySet, Parse};

/// A read-only morphological analyzer.
///
/// Implementations hold their dictionary data immutably, so one instance can
/// serve any number of callers (including across threads, when the
/// implementation is `Sync`).
pub trait Analyzer {
    /// All interpretations of `surface`, best first. An unknown word yields
    /// an empty vector.
    fn analyze(&self, surface: &str) -> Vec<Parse>;

    /// The form of `lemma` carrying every category in `categories`, or `None`
    /// when the combination is not realizable for that lemma.
    fn inflect(&self, lemma: &str, categories: &CategorySet) -> Option<String>;
}
