//! Parsed score container consumed by the conversion engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{MusicElement, NoteEvent};
use crate::key::Key;

/// Time signature as beats per measure over beat unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl TimeSignature {
    pub fn new(numerator: u8, denominator: u8) -> Self {
        TimeSignature {
            numerator,
            denominator,
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: 4,
            denominator: 4,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A parsed musical score: measures of beat-ordered elements plus the
/// metadata the parser extracted alongside them.
///
/// Key and time signature are optional; the converter substitutes
/// C major and 4/4 when they are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParsedScore {
    pub title: String,
    /// Measure number (1-indexed) to beat-ordered elements
    pub measures: BTreeMap<u32, Vec<MusicElement>>,
    pub key: Option<Key>,
    pub time_signature: Option<TimeSignature>,
}

impl ParsedScore {
    /// Build a score from a flat element list, grouping by measure and
    /// sorting each measure by beat position.
    pub fn from_elements(
        title: impl Into<String>,
        elements: Vec<MusicElement>,
        key: Option<Key>,
        time_signature: Option<TimeSignature>,
    ) -> Self {
        let mut measures: BTreeMap<u32, Vec<MusicElement>> = BTreeMap::new();
        for element in elements {
            measures
                .entry(element.measure_number())
                .or_default()
                .push(element);
        }
        for elements in measures.values_mut() {
            elements.sort_by(|a, b| a.beat_position().total_cmp(&b.beat_position()));
        }

        ParsedScore {
            title: title.into(),
            measures,
            key,
            time_signature,
        }
    }

    /// Note events in chronological order, rests skipped.
    pub fn note_events(&self) -> impl Iterator<Item = &NoteEvent> {
        self.measures
            .values()
            .flatten()
            .filter_map(|element| match element {
                MusicElement::Note(note) => Some(note),
                MusicElement::Rest(_) => None,
            })
    }

    pub fn element_count(&self) -> usize {
        self.measures.values().map(Vec::len).sum()
    }
}
