// Raw analyzer tags (OpenCorpora codes) as closed enums.
//
// Analyzers translate their own tag strings into these variants; anything
// that does not parse is dropped at the analyzer boundary, so the engine only
// ever sees values it has an explicit mapping for.

use std::fmt;
use std::str::FromStr;

/// Part-of-speech tag as reported by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PosTag {
    Noun,
    Adjf,
    Adjs,
    Comp,
    Verb,
    Infn,
    Prtf,
    Prts,
    Grnd,
    Numr,
    Advb,
    Npro,
    Pred,
    Prep,
    Conj,
    Prcl,
    Intj,
}

impl PosTag {
    pub const ALL: [PosTag; 17] = [
        PosTag::Noun,
        PosTag::Adjf,
        PosTag::Adjs,
        PosTag::Comp,
        PosTag::Verb,
        PosTag::Infn,
        PosTag::Prtf,
        PosTag::Prts,
        PosTag::Grnd,
        PosTag::Numr,
        PosTag::Advb,
        PosTag::Npro,
        PosTag::Pred,
        PosTag::Prep,
        PosTag::Conj,
        PosTag::Prcl,
        PosTag::Intj,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Adjf => "ADJF",
            PosTag::Adjs => "ADJS",
            PosTag::Comp => "COMP",
            PosTag::Verb => "VERB",
            PosTag::Infn => "INFN",
            PosTag::Prtf => "PRTF",
            PosTag::Prts => "PRTS",
            PosTag::Grnd => "GRND",
            PosTag::Numr => "NUMR",
            PosTag::Advb => "ADVB",
            PosTag::Npro => "NPRO",
            PosTag::Pred => "PRED",
            PosTag::Prep => "PREP",
            PosTag::Conj => "CONJ",
            PosTag::Prcl => "PRCL",
            PosTag::Intj => "INTJ",
        }
    }
}

impl FromStr for PosTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosTag::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical category value as reported by the analyzer.
///
/// Only the classes the paradigm engine requests or reads are represented:
/// number, person, tense, mood, gender, case and aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grammeme {
    Sing,
    Plur,
    Per1,
    Per2,
    Per3,
    Pres,
    Futr,
    Past,
    Indc,
    Impr,
    Masc,
    Femn,
    Neut,
    Nomn,
    Gent,
    Datv,
    Accs,
    Ablt,
    Loct,
    Voct,
    Gen2,
    Loc2,
    Acc2,
    Perf,
    Impf,
}

impl Grammeme {
    pub const ALL: [Grammeme; 25] = [
        Grammeme::Sing,
        Grammeme::Plur,
        Grammeme::Per1,
        Grammeme::Per2,
        Grammeme::Per3,
        Grammeme::Pres,
        Grammeme::Futr,
        Grammeme::Past,
        Grammeme::Indc,
        Grammeme::Impr,
        Grammeme::Masc,
        Grammeme::Femn,
        Grammeme::Neut,
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
        Grammeme::Perf,
        Grammeme::Impf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Grammeme::Sing => "sing",
            Grammeme::Plur => "plur",
            Grammeme::Per1 => "1per",
            Grammeme::Per2 => "2per",
            Grammeme::Per3 => "3per",
            Grammeme::Pres => "pres",
            Grammeme::Futr => "futr",
            Grammeme::Past => "past",
            Grammeme::Indc => "indc",
            Grammeme::Impr => "impr",
            Grammeme::Masc => "masc",
            Grammeme::Femn => "femn",
            Grammeme::Neut => "neut",
            Grammeme::Nomn => "nomn",
            Grammeme::Gent => "gent",
            Grammeme::Datv => "datv",
            Grammeme::Accs => "accs",
            Grammeme::Ablt => "ablt",
            Grammeme::Loct => "loct",
            Grammeme::Voct => "voct",
            Grammeme::Gen2 => "gen2",
            Grammeme::Loc2 => "loc2",
            Grammeme::Acc2 => "acc2",
            Grammeme::Perf => "perf",
            Grammeme::Impf => "impf",
        }
    }
}

impl FromStr for Grammeme {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammeme::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl fmt::Display for Grammeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag string with no counterpart in [`PosTag`] or [`Grammeme`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag: {0}")]
pub struct UnknownTag(pub String);
