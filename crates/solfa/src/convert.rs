//! Measure-by-measure score conversion.

use score_model::{Key, MusicElement, NoteEvent, ParsedScore, RestEvent};

use crate::octave::octave_modifier;
use crate::syllable::syllable_for_degree;
use crate::theory::{resolve_degree, KeyContext};
use crate::types::{SolfaMeasure, SolfaNote, SolfaResult};
use crate::SolfaConfig;

/// Movable-do converter.
///
/// Carries only configuration; every conversion call builds its own
/// [`KeyContext`], so one converter can serve any number of scores,
/// concurrently or not.
#[derive(Debug, Clone, Default)]
pub struct SolfaConverter {
    config: SolfaConfig,
}

impl SolfaConverter {
    pub fn new(config: SolfaConfig) -> Self {
        SolfaConverter { config }
    }

    /// Convert a parsed score with a fresh key context seeded from the
    /// score's own key (C major when none was detected).
    pub fn convert(&self, score: &ParsedScore) -> SolfaResult {
        let mut context = KeyContext::new();
        context.set_base_key(score.key.unwrap_or_default());
        self.convert_with_context(score, &mut context)
    }

    /// Convert using a caller-supplied key context, typically one
    /// populated by a [`crate::KeyChangeDetector`] pre-pass.
    ///
    /// The result's key label is the context's base key; modulated keys
    /// steer degree resolution per measure but are not surfaced
    /// separately.
    pub fn convert_with_context(
        &self,
        score: &ParsedScore,
        context: &mut KeyContext,
    ) -> SolfaResult {
        let base_key = context.base_key().unwrap_or_default();
        let time_signature = score.time_signature.unwrap_or_default();

        let mut measures = Vec::new();
        for (&measure_number, elements) in &score.measures {
            let current_key = context.key_at(measure_number);

            let mut notes = Vec::new();
            for element in elements {
                if matches!(element, MusicElement::Rest(_)) && !self.config.show_rests {
                    continue;
                }
                notes.push(self.convert_element(element, current_key));
            }

            // Measures emptied by rest filtering are dropped entirely
            if !notes.is_empty() {
                measures.push(SolfaMeasure {
                    measure_number,
                    notes,
                    time_signature,
                });
            }
        }

        SolfaResult {
            title: score.title.clone(),
            key: base_key.to_string(),
            time_signature: time_signature.to_string(),
            measures,
        }
    }

    /// Convert a single element, branching on its variant.
    pub fn convert_element(&self, element: &MusicElement, key: Key) -> SolfaNote {
        match element {
            MusicElement::Note(note) => self.convert_note(note, key),
            MusicElement::Rest(rest) => self.convert_rest(rest),
        }
    }

    /// Convert one note: degree resolution, syllable mapping, octave
    /// marking. Duration and tie carry through unchanged.
    pub fn convert_note(&self, note: &NoteEvent, key: Key) -> SolfaNote {
        let scale_degree = resolve_degree(note.pitch, note.accidental, key);
        let syllable = syllable_for_degree(scale_degree, self.config.la_based_minor);

        SolfaNote {
            syllable,
            octave_modifier: octave_modifier(note.octave, self.config.reference_octave),
            duration_beats: note.duration,
            is_tied: note.tied,
            is_rest: false,
        }
    }

    pub fn convert_rest(&self, rest: &RestEvent) -> SolfaNote {
        SolfaNote::rest(rest.duration)
    }
}
