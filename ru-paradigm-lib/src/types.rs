use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tags::{Grammeme, PosTag};

/// Learner-facing part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalPos {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Numeral,
    Particle,
    Preposition,
    Conjunction,
    Interjection,
    Other,
}

impl CanonicalPos {
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalPos::Noun => "noun",
            CanonicalPos::Verb => "verb",
            CanonicalPos::Adjective => "adjective",
            CanonicalPos::Adverb => "adverb",
            CanonicalPos::Pronoun => "pronoun",
            CanonicalPos::Numeral => "numeral",
            CanonicalPos::Particle => "particle",
            CanonicalPos::Preposition => "preposition",
            CanonicalPos::Conjunction => "conjunction",
            CanonicalPos::Interjection => "interjection",
            CanonicalPos::Other => "other",
        }
    }
}

impl fmt::Display for CanonicalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Pres,
    Fut,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Ind,
    Imp,
}

/// Grammatical person, serialized as the integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Person {
    First,
    Second,
    Third,
}

impl From<Person> for u8 {
    fn from(p: Person) -> u8 {
        match p {
            Person::First => 1,
            Person::Second => 2,
            Person::Third => 3,
        }
    }
}

impl TryFrom<u8> for Person {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Person::First),
            2 => Ok(Person::Second),
            3 => Ok(Person::Third),
            _ => Err(format!("person must be 1, 2 or 3, got {n}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Sg,
    Pl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    M,
    F,
    N,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nom,
    Gen,
    Dat,
    Acc,
    Ins,
    Loc,
    Voc,
    Gen2,
    Loc2,
    Acc2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Pf,
    Impf,
}

/// Degree of comparison. Only the positive degree is ever generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    Pos,
}

// ---------------------------------------------------------------------------
// Grammeme → canonical field tables
//
// Every table lists all grammemes explicitly. A new `Grammeme` variant will
// not compile until each table decides where it belongs.
// ---------------------------------------------------------------------------

impl Tense {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Pres => Some(Tense::Pres),
            Futr => Some(Tense::Fut),
            Past => Some(Tense::Past),
            Sing | Plur | Per1 | Per2 | Per3 | Indc | Impr | Masc | Femn | Neut | Nomn | Gent
            | Datv | Accs | Ablt | Loct | Voct | Gen2 | Loc2 | Acc2 | Perf | Impf => None,
        }
    }
}

impl Mood {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Indc => Some(Mood::Ind),
            Impr => Some(Mood::Imp),
            Sing | Plur | Per1 | Per2 | Per3 | Pres | Futr | Past | Masc | Femn | Neut | Nomn
            | Gent | Datv | Accs | Ablt | Loct | Voct | Gen2 | Loc2 | Acc2 | Perf | Impf => None,
        }
    }
}

impl Person {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Per1 => Some(Person::First),
            Per2 => Some(Person::Second),
            Per3 => Some(Person::Third),
            Sing | Plur | Pres | Futr | Past | Indc | Impr | Masc | Femn | Neut | Nomn | Gent
            | Datv | Accs | Ablt | Loct | Voct | Gen2 | Loc2 | Acc2 | Perf | Impf => None,
        }
    }
}

impl Number {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Sing => Some(Number::Sg),
            Plur => Some(Number::Pl),
            Per1 | Per2 | Per3 | Pres | Futr | Past | Indc | Impr | Masc | Femn | Neut | Nomn
            | Gent | Datv | Accs | Ablt | Loct | Voct | Gen2 | Loc2 | Acc2 | Perf | Impf => None,
        }
    }
}

impl Gender {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Masc => Some(Gender::M),
            Femn => Some(Gender::F),
            Neut => Some(Gender::N),
            Sing | Plur | Per1 | Per2 | Per3 | Pres | Futr | Past | Indc | Impr | Nomn | Gent
            | Datv | Accs | Ablt | Loct | Voct | Gen2 | Loc2 | Acc2 | Perf | Impf => None,
        }
    }
}

impl Case {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Nomn => Some(Case::Nom),
            Gent => Some(Case::Gen),
            Datv => Some(Case::Dat),
            Accs => Some(Case::Acc),
            Ablt => Some(Case::Ins),
            Loct => Some(Case::Loc),
            Voct => Some(Case::Voc),
            Gen2 => Some(Case::Gen2),
            Loc2 => Some(Case::Loc2),
            Acc2 => Some(Case::Acc2),
            Sing | Plur | Per1 | Per2 | Per3 | Pres | Futr | Past | Indc | Impr | Masc | Femn
            | Neut | Perf | Impf => None,
        }
    }
}

impl Aspect {
    pub fn from_grammeme(g: Grammeme) -> Option<Self> {
        use Grammeme::*;
        match g {
            Perf => Some(Aspect::Pf),
            Impf => Some(Aspect::Impf),
            Sing | Plur | Per1 | Per2 | Per3 | Pres | Futr | Past | Indc | Impr | Masc | Femn
            | Neut | Nomn | Gent | Datv | Accs | Ablt | Loct | Voct | Gen2 | Loc2 | Acc2 => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Analyzer-facing types
// ---------------------------------------------------------------------------

/// One analyzer interpretation of a lookup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    /// Normal form reported by the analyzer (may still carry stress marks).
    pub lemma: String,
    /// `None` when the analyzer's POS tag has no [`PosTag`] counterpart.
    pub pos: Option<PosTag>,
    pub grammemes: Vec<Grammeme>,
}

impl Parse {
    pub fn new(lemma: impl Into<String>, pos: Option<PosTag>, grammemes: Vec<Grammeme>) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            grammemes,
        }
    }

    pub fn aspect(&self) -> Option<Aspect> {
        self.grammemes.iter().copied().find_map(Aspect::from_grammeme)
    }
}

/// The grammatical categories sent to the analyzer for one inflection request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CategorySet {
    pos: Option<PosTag>,
    grammemes: Vec<Grammeme>,
}

impl CategorySet {
    pub fn of(grammemes: &[Grammeme]) -> Self {
        Self {
            pos: None,
            grammemes: grammemes.to_vec(),
        }
    }

    /// Request a specific form class (e.g. the short adjective).
    pub fn with_pos(mut self, pos: PosTag) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn with(mut self, g: Grammeme) -> Self {
        self.grammemes.push(g);
        self
    }

    pub fn pos(&self) -> Option<PosTag> {
        self.pos
    }

    pub fn grammemes(&self) -> &[Grammeme] {
        &self.grammemes
    }

    pub fn contains(&self, g: Grammeme) -> bool {
        self.grammemes.contains(&g)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::with_capacity(self.grammemes.len() + 1);
        if let Some(pos) = self.pos {
            parts.push(pos.as_str());
        }
        parts.extend(self.grammemes.iter().map(|g| g.as_str()));
        f.write_str(&parts.join(","))
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Fields a slot adds on top of what its request grammemes imply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotExtras {
    pub mood: Option<Mood>,
    pub aspect: Option<Aspect>,
    pub degree: Option<Degree>,
}

/// One inflected surface form with its grammatical categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormRecord {
    pub surface_form: String,
    pub tense: Option<Tense>,
    pub mood: Option<Mood>,
    pub person: Option<Person>,
    pub number: Option<Number>,
    pub gender: Option<Gender>,
    pub case: Option<Case>,
    pub aspect: Option<Aspect>,
    pub degree: Option<Degree>,
    /// Irregularity detection is not implemented; always false.
    #[serde(default)]
    pub is_irregular: bool,
}

impl FormRecord {
    /// A record carrying only the surface form.
    pub fn minimal(surface: impl Into<String>) -> Self {
        Self {
            surface_form: surface.into(),
            tense: None,
            mood: None,
            person: None,
            number: None,
            gender: None,
            case: None,
            aspect: None,
            degree: None,
            is_irregular: false,
        }
    }

    /// Build the record for a successful inflection of `request`.
    ///
    /// Each canonical field takes the first request grammeme that maps into
    /// it. `extras.mood` applies only when the request itself names no mood.
    pub fn from_request(surface: impl Into<String>, request: &CategorySet, extras: SlotExtras) -> Self {
        let gs = request.grammemes();
        let mut record = Self::minimal(surface);
        record.tense = gs.iter().copied().find_map(Tense::from_grammeme);
        record.mood = gs.iter().copied().find_map(Mood::from_grammeme).or(extras.mood);
        record.person = gs.iter().copied().find_map(Person::from_grammeme);
        record.number = gs.iter().copied().find_map(Number::from_grammeme);
        record.gender = gs.iter().copied().find_map(Gender::from_grammeme);
        record.case = gs.iter().copied().find_map(Case::from_grammeme);
        record.aspect = extras.aspect;
        record.degree = extras.degree;
        record
    }
}

/// Result of synthesizing one lexical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesis {
    pub lemma: String,
    pub pos: CanonicalPos,
    pub forms: Vec<FormRecord>,
}
