// Paradigm synthesis for a single cited (stressed) form.
//
// The top-ranked parse decides the lemma and part of speech. For nouns,
// verbs and adjectives a fixed list of category requests ("slots") is
// resolved against the analyzer; every other part of speech gets a single
// record holding the lookup form.
//
// Verb present-tense slots carry a future-tense fallback: perfective verbs
// have no present, and the analyzer reports their present-shaped forms as
// future.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::analyzer::Analyzer;
use crate::classify::classify;
use crate::error::{ParadigmError, Result};
use crate::stress::strip_stress;
use crate::tags::{Grammeme, PosTag};
use crate::types::*;

// ---------------------------------------------------------------------------
// Category tables
// ---------------------------------------------------------------------------

const NUMBERS: [Grammeme; 2] = [Grammeme::Sing, Grammeme::Plur];

const PERSONS: [Grammeme; 3] = [Grammeme::Per1, Grammeme::Per2, Grammeme::Per3];

const GENDERS: [Grammeme; 3] = [Grammeme::Masc, Grammeme::Femn, Grammeme::Neut];

const NOUN_CASES: [Grammeme; 10] = [
    Grammeme::Nomn,
    Grammeme::Gent,
    Grammeme::Datv,
    Grammeme::Accs,
    Grammeme::Ablt,
    Grammeme::Loct,
    Grammeme::Voct,
    Grammeme::Gen2,
    Grammeme::Loc2,
    Grammeme::Acc2,
];

// Adjectives only decline through the six primary cases.
const ADJECTIVE_CASES: [Grammeme; 6] = [
    Grammeme::Nomn,
    Grammeme::Gent,
    Grammeme::Datv,
    Grammeme::Accs,
    Grammeme::Ablt,
    Grammeme::Loct,
];

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One category request of a paradigm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub request: CategorySet,
    /// Tried only when `request` is not realizable.
    pub fallback: Option<CategorySet>,
    pub extras: SlotExtras,
}

impl Slot {
    fn new(request: CategorySet, extras: SlotExtras) -> Self {
        Self {
            request,
            fallback: None,
            extras,
        }
    }
}

/// List the category requests for a part of speech, in output order.
///
/// Parts of speech without an explicit paradigm yield no slots.
pub fn enumerate_slots(pos: CanonicalPos, aspect: Option<Aspect>) -> Vec<Slot> {
    match pos {
        CanonicalPos::Verb => verb_slots(aspect),
        CanonicalPos::Noun => noun_slots(),
        CanonicalPos::Adjective => adjective_slots(),
        CanonicalPos::Adverb
        | CanonicalPos::Pronoun
        | CanonicalPos::Numeral
        | CanonicalPos::Particle
        | CanonicalPos::Preposition
        | CanonicalPos::Conjunction
        | CanonicalPos::Interjection
        | CanonicalPos::Other => vec![],
    }
}

fn verb_slots(aspect: Option<Aspect>) -> Vec<Slot> {
    let indicative = SlotExtras {
        mood: Some(Mood::Ind),
        aspect,
        degree: None,
    };
    let mut slots = Vec::with_capacity(14);

    // Present, or simple future for verbs without a present.
    for number in NUMBERS {
        for person in PERSONS {
            let target = CategorySet::of(&[number, person]);
            slots.push(Slot {
                request: target.clone().with(Grammeme::Pres),
                fallback: Some(target.with(Grammeme::Futr)),
                extras: indicative,
            });
        }
    }

    // Past: gendered in the singular only.
    for gender in GENDERS {
        slots.push(Slot::new(
            CategorySet::of(&[Grammeme::Past, Grammeme::Sing, gender]),
            indicative,
        ));
    }
    slots.push(Slot::new(
        CategorySet::of(&[Grammeme::Past, Grammeme::Plur]),
        indicative,
    ));

    // Imperative.
    let imperative = SlotExtras {
        aspect,
        ..SlotExtras::default()
    };
    for number in NUMBERS {
        slots.push(Slot::new(
            CategorySet::of(&[Grammeme::Impr, number]),
            imperative,
        ));
    }

    slots
}

fn noun_slots() -> Vec<Slot> {
    let mut slots = Vec::with_capacity(NUMBERS.len() * NOUN_CASES.len());
    for number in NUMBERS {
        for case in NOUN_CASES {
            slots.push(Slot::new(
                CategorySet::of(&[number, case]),
                SlotExtras::default(),
            ));
        }
    }
    slots
}

fn adjective_slots() -> Vec<Slot> {
    let positive = SlotExtras {
        degree: Some(Degree::Pos),
        ..SlotExtras::default()
    };
    let mut slots = Vec::with_capacity(28);

    // Long forms.
    for case in ADJECTIVE_CASES {
        for gender in GENDERS {
            slots.push(Slot::new(
                CategorySet::of(&[Grammeme::Sing, gender, case]),
                positive,
            ));
        }
        slots.push(Slot::new(CategorySet::of(&[Grammeme::Plur, case]), positive));
    }

    // Short forms.
    for gender in GENDERS {
        slots.push(Slot::new(
            CategorySet::of(&[Grammeme::Sing, gender]).with_pos(PosTag::Adjs),
            positive,
        ));
    }
    slots.push(Slot::new(
        CategorySet::of(&[Grammeme::Plur]).with_pos(PosTag::Adjs),
        positive,
    ));

    slots
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Synthesize the lemma, part of speech and paradigm of a cited form.
///
/// Only an empty (or whitespace-only) form is an error. A missing analyzer
/// or an unknown word degrades to a single record holding the lookup form
/// with part of speech `Other`.
pub fn synthesize(form: &str, analyzer: Option<&dyn Analyzer>) -> Result<Synthesis> {
    let lookup = strip_stress(form.trim());
    if lookup.trim().is_empty() {
        return Err(ParadigmError::MalformedInput(form.to_string()));
    }

    let analyzer = match analyzer {
        Some(a) => a,
        None => {
            debug!(form = %lookup, "no analyzer configured, emitting lookup form only");
            return Ok(unanalyzed(lookup));
        }
    };

    let parses = analyzer.analyze(&lookup);
    let top = match parses.first() {
        Some(p) => p,
        None => {
            debug!(form = %lookup, "no parse found");
            return Ok(unanalyzed(lookup));
        }
    };

    let lemma = match strip_stress(&top.lemma) {
        l if l.trim().is_empty() => lookup.clone(),
        l => l,
    };
    let pos = classify(top.pos);
    let aspect = match pos {
        CanonicalPos::Verb => top.aspect(),
        _ => None,
    };

    let slots = enumerate_slots(pos, aspect);
    let mut forms = Vec::with_capacity(slots.len() + 1);

    if pos == CanonicalPos::Verb {
        // Infinitive.
        let mut infinitive = FormRecord::minimal(lemma.clone());
        infinitive.aspect = aspect;
        forms.push(infinitive);
    } else if slots.is_empty() {
        forms.push(FormRecord::minimal(lookup.clone()));
    }

    for slot in &slots {
        match resolve_slot(analyzer, &lemma, slot) {
            Some(record) => forms.push(record),
            None => trace!(lemma = %lemma, request = %slot.request, "slot not realizable"),
        }
    }

    dedup_forms(&mut forms);
    debug!(lemma = %lemma, pos = %pos, forms = forms.len(), "paradigm synthesized");

    Ok(Synthesis { lemma, pos, forms })
}

/// Resolve one slot: the direct request first, then its fallback.
///
/// The record's categories come from whichever request succeeded, so a
/// future-tense fallback is recorded as future, never as present.
pub fn resolve_slot(analyzer: &dyn Analyzer, lemma: &str, slot: &Slot) -> Option<FormRecord> {
    let (request, surface) = match analyzer.inflect(lemma, &slot.request) {
        Some(surface) => (&slot.request, surface),
        None => {
            let fallback = slot.fallback.as_ref()?;
            (fallback, analyzer.inflect(lemma, fallback)?)
        }
    };
    if surface.trim().is_empty() {
        return None;
    }
    Some(FormRecord::from_request(surface, request, slot.extras))
}

/// Remove records whose identity key (surface form plus every grammatical
/// field) was already seen. Keeps the first occurrence and the overall order.
pub fn dedup_forms(forms: &mut Vec<FormRecord>) {
    let mut seen = HashSet::new();
    forms.retain(|f| {
        let key = (
            f.surface_form.clone(),
            f.tense,
            f.mood,
            f.person,
            f.number,
            f.gender,
            f.case,
            f.aspect,
            f.degree,
        );
        seen.insert(key)
    });
}

fn unanalyzed(lookup: String) -> Synthesis {
    Synthesis {
        forms: vec![FormRecord::minimal(lookup.clone())],
        lemma: lookup,
        pos: CanonicalPos::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Analyzer answering from fixed tables keyed by the request's display
    /// string (e.g. "sing,1per,pres").
    struct TableAnalyzer {
        parses: Vec<Parse>,
        forms: HashMap<String, String>,
    }

    impl Analyzer for TableAnalyzer {
        fn analyze(&self, _surface: &str) -> Vec<Parse> {
            self.parses.clone()
        }

        fn inflect(&self, _lemma: &str, categories: &CategorySet) -> Option<String> {
            self.forms.get(&categories.to_string()).cloned()
        }
    }

    fn table(parse: Parse, forms: &[(&str, &str)]) -> TableAnalyzer {
        TableAnalyzer {
            parses: vec![parse],
            forms: forms
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(enumerate_slots(CanonicalPos::Noun, None).len(), 20);
        // 6 present/future + 4 past + 2 imperative.
        assert_eq!(enumerate_slots(CanonicalPos::Verb, None).len(), 12);
        // 18 singular + 6 plural long forms, 3 + 1 short forms.
        assert_eq!(enumerate_slots(CanonicalPos::Adjective, None).len(), 28);
        assert!(enumerate_slots(CanonicalPos::Adverb, None).is_empty());
        assert!(enumerate_slots(CanonicalPos::Other, None).is_empty());
    }

    #[test]
    fn test_only_present_slots_have_fallback() {
        let slots = enumerate_slots(CanonicalPos::Verb, Some(Aspect::Pf));
        let with_fallback: Vec<_> = slots.iter().filter(|s| s.fallback.is_some()).collect();
        assert_eq!(with_fallback.len(), 6);
        for slot in with_fallback {
            assert!(slot.request.contains(Grammeme::Pres));
            assert!(slot.fallback.as_ref().unwrap().contains(Grammeme::Futr));
        }
    }

    #[test]
    fn test_short_adjective_slots_request_adjs() {
        let slots = enumerate_slots(CanonicalPos::Adjective, None);
        let short: Vec<_> = slots
            .iter()
            .filter(|s| s.request.pos() == Some(PosTag::Adjs))
            .collect();
        assert_eq!(short.len(), 4);
        assert!(slots.iter().all(|s| s.extras.degree == Some(Degree::Pos)));
    }

    #[test]
    fn test_future_fallback() {
        let a = table(
            Parse::new("сделать", Some(PosTag::Infn), vec![Grammeme::Perf]),
            &[("sing,1per,futr", "сделаю")],
        );
        let result = synthesize("сде\u{301}лать", Some(&a)).unwrap();
        assert_eq!(result.pos, CanonicalPos::Verb);
        let first = result
            .forms
            .iter()
            .find(|f| f.surface_form == "сделаю")
            .expect("future form");
        assert_eq!(first.tense, Some(Tense::Fut));
        assert_eq!(first.mood, Some(Mood::Ind));
        assert_eq!(first.person, Some(Person::First));
        assert_eq!(first.aspect, Some(Aspect::Pf));
        assert!(result.forms.iter().all(|f| f.tense != Some(Tense::Pres)));
    }

    #[test]
    fn test_present_preferred_over_future() {
        let a = table(
            Parse::new("читать", Some(PosTag::Infn), vec![Grammeme::Impf]),
            &[("sing,3per,pres", "читает"), ("sing,3per,futr", "будет читать")],
        );
        let result = synthesize("читать", Some(&a)).unwrap();
        let third: Vec<_> = result
            .forms
            .iter()
            .filter(|f| f.person == Some(Person::Third))
            .collect();
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].surface_form, "читает");
        assert_eq!(third[0].tense, Some(Tense::Pres));
    }

    #[test]
    fn test_verb_starts_with_infinitive() {
        let a = table(
            Parse::new("читать", Some(PosTag::Verb), vec![Grammeme::Impf]),
            &[("past,sing,femn", "читала"), ("impr,sing", "читай")],
        );
        let result = synthesize("чита\u{301}ла", Some(&a)).unwrap();
        assert_eq!(result.lemma, "читать");
        let inf = &result.forms[0];
        assert_eq!(inf.surface_form, "читать");
        assert_eq!(inf.aspect, Some(Aspect::Impf));
        assert_eq!((inf.tense, inf.mood), (None, None));

        let past = &result.forms[1];
        assert_eq!(past.tense, Some(Tense::Past));
        assert_eq!(past.gender, Some(Gender::F));
        assert_eq!(past.number, Some(Number::Sg));

        let imp = &result.forms[2];
        assert_eq!(imp.mood, Some(Mood::Imp));
        assert_eq!(imp.tense, None);
        assert_eq!(result.forms.len(), 3);
    }

    #[test]
    fn test_adverb_gets_minimal_record() {
        let a = table(Parse::new("быстро", Some(PosTag::Advb), vec![]), &[]);
        let result = synthesize("бы\u{301}стро", Some(&a)).unwrap();
        assert_eq!(result.pos, CanonicalPos::Adverb);
        assert_eq!(result.forms, vec![FormRecord::minimal("быстро")]);
    }

    #[test]
    fn test_non_verb_ignores_aspect_grammemes() {
        let a = table(
            Parse::new("сделанный", Some(PosTag::Prtf), vec![Grammeme::Perf]),
            &[],
        );
        let result = synthesize("сделанный", Some(&a)).unwrap();
        assert_eq!(result.pos, CanonicalPos::Other);
        assert_eq!(result.forms[0].aspect, None);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            synthesize("", None),
            Err(ParadigmError::MalformedInput(_))
        ));
        assert!(matches!(
            synthesize("  \t", None),
            Err(ParadigmError::MalformedInput(_))
        ));
        // A lone stress mark is empty once stripped.
        assert!(synthesize("\u{301}", None).is_err());
    }

    #[test]
    fn test_no_analyzer() {
        let result = synthesize("за\u{301}мок", None).unwrap();
        assert_eq!(result.lemma, "замок");
        assert_eq!(result.pos, CanonicalPos::Other);
        assert_eq!(result.forms, vec![FormRecord::minimal("замок")]);
    }

    #[test]
    fn test_empty_surface_is_skipped() {
        let a = table(
            Parse::new("стол", Some(PosTag::Noun), vec![]),
            &[("sing,nomn", "стол"), ("sing,gent", ""), ("plur,nomn", " ")],
        );
        let result = synthesize("стол", Some(&a)).unwrap();
        assert_eq!(result.forms.len(), 1);
        assert!(result.forms.iter().all(|f| !f.surface_form.is_empty()));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut a = FormRecord::minimal("окно");
        a.case = Some(Case::Nom);
        let mut b = FormRecord::minimal("окно");
        b.case = Some(Case::Acc);
        let mut forms = vec![a.clone(), b.clone(), a.clone(), FormRecord::minimal("окно")];
        dedup_forms(&mut forms);
        assert_eq!(forms, vec![a, b, FormRecord::minimal("окно")]);
    }
}
