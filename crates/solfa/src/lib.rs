//! Movable-do tonic solfa conversion.
//!
//! Converts parsed note/rest events into tonic solfa notation: scale
//! degree resolution against the active key, chromatic syllable mapping
//! (di/ri/fi/si/li raised, ra/me/se/le/te lowered), octave marks
//! relative to a reference octave, and measure-by-measure assembly.
//! Major and minor keys are supported, minor either la-based or
//! do-based, with mid-piece modulations tracked in a [`KeyContext`].
//!
//! The engine is total: malformed or missing input degrades to silent
//! defaults (C major, 4/4, rests) rather than errors.
//!
//! # Example
//!
//! ```
//! use score_model::{Key, MusicElement, NoteEvent, NoteName, ParsedScore, TimeSignature};
//! use solfa::{SolfaConfig, SolfaConverter};
//!
//! let elements = vec![
//!     MusicElement::Note(NoteEvent::new(NoteName::G, 4, 1.0, 1, 1.0)),
//!     MusicElement::Note(NoteEvent::new(NoteName::A, 4, 1.0, 1, 2.0)),
//!     MusicElement::Note(NoteEvent::new(NoteName::B, 4, 2.0, 1, 3.0)),
//! ];
//! let score = ParsedScore::from_elements(
//!     "Example",
//!     elements,
//!     Some(Key::major(NoteName::G)),
//!     Some(TimeSignature::default()),
//! );
//!
//! let converter = SolfaConverter::new(SolfaConfig::default());
//! let result = converter.convert(&score);
//!
//! let tokens: Vec<&str> = result.measures[0]
//!     .notes
//!     .iter()
//!     .map(|n| n.syllable.as_str())
//!     .collect();
//! assert_eq!(tokens, vec!["do", "re", "mi"]);
//! ```

pub mod convert;
pub mod detect;
pub mod octave;
pub mod syllable;
pub mod text;
pub mod theory;
pub mod types;

pub use convert::SolfaConverter;
pub use detect::{KeyChangeDetector, KeyEstimator, DEFAULT_STRIDE, DEFAULT_WINDOW_SIZE};
pub use octave::{octave_modifier, REFERENCE_OCTAVE};
pub use syllable::syllable_for_degree;
pub use text::{format_measure, to_text};
pub use theory::{resolve_degree, KeyContext, ScaleDegree};
pub use types::{SolfaMeasure, SolfaNote, SolfaResult, SolfaSyllable};

/// Conversion options.
#[derive(Debug, Clone)]
pub struct SolfaConfig {
    /// Sing minor-key tonics as la (relative-major degrees) rather than do
    pub la_based_minor: bool,
    /// Octave that carries no high/low marks
    pub reference_octave: i8,
    /// Emit rests into the output
    pub show_rests: bool,
    /// Render single-letter diatonic syllables in text output
    pub use_abbreviated: bool,
}

impl Default for SolfaConfig {
    fn default() -> Self {
        SolfaConfig {
            la_based_minor: true,
            reference_octave: REFERENCE_OCTAVE,
            show_rests: true,
            use_abbreviated: true,
        }
    }
}
