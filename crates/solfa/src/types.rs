//! Solfa notation result types.

use std::fmt;

use score_model::TimeSignature;
use serde::{Deserialize, Serialize};

/// The fixed solfa syllable set under movable-do.
///
/// Seven diatonic syllables, five raised and five lowered chromatic
/// variants, and the rest token. The converter never produces anything
/// outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolfaSyllable {
    Do,
    Re,
    Mi,
    Fa,
    Sol,
    La,
    Ti,
    /// Raised do
    Di,
    /// Raised re
    Ri,
    /// Raised fa
    Fi,
    /// Raised sol
    Si,
    /// Raised la
    Li,
    /// Lowered re
    Ra,
    /// Lowered mi
    Me,
    /// Lowered sol
    Se,
    /// Lowered la
    Le,
    /// Lowered ti
    Te,
    #[serde(rename = "0")]
    Rest,
}

impl SolfaSyllable {
    /// Full syllable token ("do", "sol", "te"); rests are "0"
    pub fn as_str(&self) -> &'static str {
        match self {
            SolfaSyllable::Do => "do",
            SolfaSyllable::Re => "re",
            SolfaSyllable::Mi => "mi",
            SolfaSyllable::Fa => "fa",
            SolfaSyllable::Sol => "sol",
            SolfaSyllable::La => "la",
            SolfaSyllable::Ti => "ti",
            SolfaSyllable::Di => "di",
            SolfaSyllable::Ri => "ri",
            SolfaSyllable::Fi => "fi",
            SolfaSyllable::Si => "si",
            SolfaSyllable::Li => "li",
            SolfaSyllable::Ra => "ra",
            SolfaSyllable::Me => "me",
            SolfaSyllable::Se => "se",
            SolfaSyllable::Le => "le",
            SolfaSyllable::Te => "te",
            SolfaSyllable::Rest => "0",
        }
    }

    /// Single-letter form for diatonic syllables ("d", "r", "m"...);
    /// chromatic tokens keep their two-letter spelling
    pub fn abbreviated(&self) -> &'static str {
        match self {
            SolfaSyllable::Do => "d",
            SolfaSyllable::Re => "r",
            SolfaSyllable::Mi => "m",
            SolfaSyllable::Fa => "f",
            SolfaSyllable::Sol => "s",
            SolfaSyllable::La => "l",
            SolfaSyllable::Ti => "t",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for SolfaSyllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single converted note or rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolfaNote {
    pub syllable: SolfaSyllable,
    /// Apostrophes above the reference octave, commas below, never mixed
    pub octave_modifier: String,
    pub duration_beats: f64,
    pub is_tied: bool,
    pub is_rest: bool,
}

impl SolfaNote {
    pub fn rest(duration_beats: f64) -> Self {
        SolfaNote {
            syllable: SolfaSyllable::Rest,
            octave_modifier: String::new(),
            duration_beats,
            is_tied: false,
            is_rest: true,
        }
    }
}

/// One measure of converted notes in beat order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolfaMeasure {
    #[serde(rename = "number")]
    pub measure_number: u32,
    pub notes: Vec<SolfaNote>,
    pub time_signature: TimeSignature,
}

/// Complete conversion result.
///
/// `key` and `time_signature` are the display labels downstream renderers
/// print; measures that ended up with zero notes are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SolfaResult {
    pub title: String,
    pub key: String,
    pub time_signature: String,
    pub measures: Vec<SolfaMeasure>,
}
