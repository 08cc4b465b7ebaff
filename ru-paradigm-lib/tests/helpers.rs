// Shared test analyzers.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use ru_paradigm_lib::{Analyzer, CategorySet, Lexicon, Parse};

type Responder = Box<dyn Fn(&str, &CategorySet) -> Option<String> + Send + Sync>;

/// Analyzer with a fixed parse list and a closure answering `inflect`.
/// Every inflection request is recorded.
pub struct MockAnalyzer {
    parses: Vec<Parse>,
    responder: Responder,
    calls: Mutex<Vec<CategorySet>>,
}

impl MockAnalyzer {
    pub fn new(
        parses: Vec<Parse>,
        responder: impl Fn(&str, &CategorySet) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            parses,
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with a distinct surface form.
    pub fn fully_responsive(parse: Parse) -> Self {
        Self::new(vec![parse], |lemma, set| Some(format!("{lemma}[{set}]")))
    }

    /// Knows no words at all.
    pub fn empty() -> Self {
        Self::new(vec![], |_, _| None)
    }

    pub fn calls(&self) -> Vec<CategorySet> {
        self.calls.lock().unwrap().clone()
    }
}

impl Analyzer for MockAnalyzer {
    fn analyze(&self, _surface: &str) -> Vec<Parse> {
        self.parses.clone()
    }

    fn inflect(&self, lemma: &str, categories: &CategorySet) -> Option<String> {
        self.calls.lock().unwrap().push(categories.clone());
        (self.responder)(lemma, categories)
    }
}

pub fn sample_lexicon_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.opcorpora.xml")
}

pub fn sample_lexicon() -> Lexicon {
    Lexicon::open(sample_lexicon_path()).expect("sample lexicon should load")
}
