// Dictionary-backed analyzer loaded from OpenCorpora XML.
//
// Expected shape (other elements are ignored):
//
//   <lemma id="1">
//     <l t="стол"><g v="NOUN"/><g v="inan"/><g v="masc"/></l>
//     <f t="стол"><g v="sing"/><g v="nomn"/></f>
//     <f t="стола"><g v="sing"/><g v="gent"/></f>
//   </lemma>
//
// A form may carry its own POS tag (INFN, ADJS, PRTF, ...), so one lexeme can
// hold a verb's infinitive and finite forms, or an adjective's long and short
// forms, the way merged paradigms do.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::info;

use crate::analyzer::Analyzer;
use crate::error::LexiconError;
use crate::stress::strip_stress;
use crate::tags::{Grammeme, PosTag};
use crate::types::{CategorySet, Parse};

#[derive(Debug, Clone)]
struct WordForm {
    text: String,
    /// Form-level POS; falls back to the lexeme's.
    pos: Option<PosTag>,
    grammemes: Vec<Grammeme>,
}

#[derive(Debug, Clone, Default)]
struct Lexeme {
    lemma: String,
    pos: Option<PosTag>,
    grammemes: Vec<Grammeme>,
    forms: Vec<WordForm>,
}

impl Lexeme {
    fn form_pos(&self, form: &WordForm) -> Option<PosTag> {
        form.pos.or(self.pos)
    }

    fn parse_for(&self, form: &WordForm) -> Parse {
        let mut grammemes = self.grammemes.clone();
        grammemes.extend(form.grammemes.iter().copied());
        Parse::new(self.lemma.clone(), self.form_pos(form), grammemes)
    }
}

/// Which element the following `<g>` tags describe.
#[derive(Clone, Copy)]
enum TagTarget {
    Lexeme,
    Form,
}

/// In-memory morphological dictionary. Immutable once loaded.
#[derive(Debug, Default)]
pub struct Lexicon {
    lexemes: Vec<Lexeme>,
    /// Lookup key → (lexeme index, form index), in dictionary order.
    by_surface: HashMap<String, Vec<(usize, usize)>>,
    /// Lookup key of the lemma → lexeme indices, in dictionary order.
    by_lemma: HashMap<String, Vec<usize>>,
}

impl Lexicon {
    /// Load a lexicon from an OpenCorpora XML file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            lexemes = lexicon.len(),
            forms = lexicon.by_surface.values().map(Vec::len).sum::<usize>(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    pub fn from_xml_str(xml: &str) -> Result<Self, LexiconError> {
        Self::from_reader(xml.as_bytes())
    }

    pub fn from_reader<R: BufRead>(input: R) -> Result<Self, LexiconError> {
        let mut reader = Reader::from_reader(input);
        let mut buf = Vec::new();
        let mut lexicon = Lexicon::default();

        let mut current: Option<Lexeme> = None;
        let mut lemma_id = String::new();
        let mut target = TagTarget::Lexeme;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                    b"lemma" => {
                        lemma_id = attr(&e, b"id").unwrap_or_default();
                        current = Some(Lexeme::default());
                    }
                    b"l" => {
                        if let Some(lx) = current.as_mut() {
                            lx.lemma = required_text(&e, "l", &lemma_id)?;
                            target = TagTarget::Lexeme;
                        }
                    }
                    b"f" => {
                        if let Some(lx) = current.as_mut() {
                            lx.forms.push(WordForm {
                                text: required_text(&e, "f", &lemma_id)?,
                                pos: None,
                                grammemes: vec![],
                            });
                            target = TagTarget::Form;
                        }
                    }
                    b"g" => {
                        if let (Some(lx), Some(code)) = (current.as_mut(), attr(&e, b"v")) {
                            add_tag(lx, target, &code);
                        }
                    }
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"lemma" => {
                    if let Some(lx) = current.take() {
                        lexicon.insert(lx);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(lexicon)
    }

    /// Number of lexemes.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    fn insert(&mut self, lexeme: Lexeme) {
        let idx = self.lexemes.len();
        self.by_lemma
            .entry(lookup_key(&lexeme.lemma))
            .or_default()
            .push(idx);
        for (form_idx, form) in lexeme.forms.iter().enumerate() {
            self.by_surface
                .entry(lookup_key(&form.text))
                .or_default()
                .push((idx, form_idx));
        }
        self.lexemes.push(lexeme);
    }
}

impl Analyzer for Lexicon {
    fn analyze(&self, surface: &str) -> Vec<Parse> {
        self.by_surface
            .get(&lookup_key(surface))
            .map(|hits| {
                hits.iter()
                    .map(|&(lx, f)| {
                        let lexeme = &self.lexemes[lx];
                        lexeme.parse_for(&lexeme.forms[f])
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn inflect(&self, lemma: &str, categories: &CategorySet) -> Option<String> {
        let lexeme = &self.lexemes[*self.by_lemma.get(&lookup_key(lemma))?.first()?];
        let wanted_pos = categories.pos().or(lexeme.pos);
        lexeme
            .forms
            .iter()
            .find(|form| {
                lexeme.form_pos(form) == wanted_pos
                    && categories.grammemes().iter().all(|g| {
                        form.grammemes.contains(g) || lexeme.grammemes.contains(g)
                    })
            })
            .map(|form| form.text.clone())
    }
}

/// Stress-insensitive, lowercase lookup key. `ё` stays distinct from `е`.
fn lookup_key(text: &str) -> String {
    strip_stress(text).to_lowercase()
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn required_text(
    e: &BytesStart<'_>,
    element: &'static str,
    lemma_id: &str,
) -> Result<String, LexiconError> {
    attr(e, b"t").ok_or_else(|| LexiconError::MissingText {
        element,
        lemma_id: lemma_id.to_string(),
    })
}

/// Attach one `<g v=..>` code. Codes outside the closed tag sets are dropped.
fn add_tag(lexeme: &mut Lexeme, target: TagTarget, code: &str) {
    if let Ok(pos) = code.parse::<PosTag>() {
        match target {
            TagTarget::Lexeme => lexeme.pos = Some(pos),
            TagTarget::Form => {
                if let Some(form) = lexeme.forms.last_mut() {
                    form.pos = Some(pos);
                }
            }
        }
    } else if let Ok(g) = code.parse::<Grammeme>() {
        match target {
            TagTarget::Lexeme => lexeme.grammemes.push(g),
            TagTarget::Form => {
                if let Some(form) = lexeme.forms.last_mut() {
                    form.grammemes.push(g);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOL: &str = r#"
<dictionary version="0.92">
  <lemmata>
    <lemma id="1" rev="1">
      <l t="стол"><g v="NOUN"/><g v="inan"/><g v="masc"/></l>
      <f t="стол"><g v="sing"/><g v="nomn"/></f>
      <f t="стола"><g v="sing"/><g v="gent"/></f>
      <f t="стол"><g v="sing"/><g v="accs"/></f>
      <f t="столы"><g v="plur"/><g v="nomn"/></f>
    </lemma>
  </lemmata>
</dictionary>"#;

    #[test]
    fn test_loads_lexemes() {
        let lex = Lexicon::from_xml_str(STOL).unwrap();
        assert_eq!(lex.len(), 1);
        assert!(!lex.is_empty());
    }

    #[test]
    fn test_analyze_returns_every_matching_form() {
        let lex = Lexicon::from_xml_str(STOL).unwrap();
        let parses = lex.analyze("стол");
        assert_eq!(parses.len(), 2);
        assert_eq!(parses[0].lemma, "стол");
        assert_eq!(parses[0].pos, Some(PosTag::Noun));
        // Lexeme grammemes come first, then the form's; "inan" is dropped.
        assert_eq!(
            parses[0].grammemes,
            vec![Grammeme::Masc, Grammeme::Sing, Grammeme::Nomn]
        );
        assert!(parses[1].grammemes.contains(&Grammeme::Accs));
    }

    #[test]
    fn test_attribute_entities_are_decoded() {
        let xml = r#"<lemma id="7"><l t="&#1089;тол"><g v="NOUN"/></l><f t="&#x441;тол&amp;"><g v="sing"/><g v="nomn"/></f></lemma>"#;
        let lex = Lexicon::from_xml_str(xml).unwrap();
        let parses = lex.analyze("стол&");
        assert_eq!(parses.len(), 1);
        assert_eq!(parses[0].lemma, "стол");
        assert_eq!(
            lex.inflect("стол", &CategorySet::of(&[Grammeme::Sing, Grammeme::Nomn])),
            Some("стол&".to_string())
        );
    }

    #[test]
    fn test_analyze_ignores_stress_and_case() {
        let lex = Lexicon::from_xml_str(STOL).unwrap();
        assert_eq!(lex.analyze("сто\u{301}лы").len(), 1);
        assert_eq!(lex.analyze("Стола").len(), 1);
        assert!(lex.analyze("стул").is_empty());
    }

    #[test]
    fn test_inflect() {
        let lex = Lexicon::from_xml_str(STOL).unwrap();
        let req = CategorySet::of(&[Grammeme::Plur, Grammeme::Nomn]);
        assert_eq!(lex.inflect("стол", &req), Some("столы".to_string()));
        let missing = CategorySet::of(&[Grammeme::Plur, Grammeme::Datv]);
        assert_eq!(lex.inflect("стол", &missing), None);
        assert_eq!(lex.inflect("стул", &req), None);
    }

    #[test]
    fn test_form_level_pos_is_matched() {
        let xml = r#"
<lemma id="7">
  <l t="новый"><g v="ADJF"/><g v="Qual"/></l>
  <f t="новый"><g v="masc"/><g v="sing"/><g v="nomn"/></f>
  <f t="нов"><g v="ADJS"/><g v="masc"/><g v="sing"/></f>
</lemma>"#;
        let lex = Lexicon::from_xml_str(xml).unwrap();
        let long = CategorySet::of(&[Grammeme::Sing, Grammeme::Masc]);
        assert_eq!(lex.inflect("новый", &long), Some("новый".to_string()));
        let short = long.with_pos(PosTag::Adjs);
        assert_eq!(lex.inflect("новый", &short), Some("нов".to_string()));
        assert_eq!(lex.analyze("нов")[0].pos, Some(PosTag::Adjs));
    }

    #[test]
    fn test_missing_text_attribute() {
        let xml = r#"<lemma id="3"><l><g v="NOUN"/></l></lemma>"#;
        match Lexicon::from_xml_str(xml) {
            Err(LexiconError::MissingText { element, lemma_id }) => {
                assert_eq!(element, "l");
                assert_eq!(lemma_id, "3");
            }
            other => panic!("expected MissingText, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_xml() {
        let xml = r#"<lemma id="1"><l t="стол"></f></lemma>"#;
        assert!(matches!(
            Lexicon::from_xml_str(xml),
            Err(LexiconError::Xml(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Lexicon::open("/nonexistent/dict.xml").unwrap_err();
        assert!(matches!(err, LexiconError::Open { .. }));
    }

    #[test]
    fn test_lexicon_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lexicon>();
    }
}
