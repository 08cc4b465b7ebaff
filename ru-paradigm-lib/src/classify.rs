// Raw POS tag → learner-facing part of speech.

use crate::tags::PosTag;
use crate::types::CanonicalPos;

/// Classify an analyzer POS tag. Total: a missing tag is `Other`.
pub fn classify(tag: Option<PosTag>) -> CanonicalPos {
    let tag = match tag {
        Some(t) => t,
        None => return CanonicalPos::Other,
    };
    match tag {
        PosTag::Noun => CanonicalPos::Noun,
        PosTag::Verb | PosTag::Infn => CanonicalPos::Verb,
        PosTag::Adjf | PosTag::Adjs => CanonicalPos::Adjective,
        PosTag::Advb => CanonicalPos::Adverb,
        PosTag::Npro => CanonicalPos::Pronoun,
        PosTag::Numr => CanonicalPos::Numeral,
        PosTag::Prcl => CanonicalPos::Particle,
        PosTag::Prep => CanonicalPos::Preposition,
        PosTag::Conj => CanonicalPos::Conjunction,
        PosTag::Intj => CanonicalPos::Interjection,
        // Comparatives, participles, gerunds and predicatives have no
        // learner-facing class of their own.
        PosTag::Comp | PosTag::Prtf | PosTag::Prts | PosTag::Grnd | PosTag::Pred => {
            CanonicalPos::Other
        }
    }
}
