//! Note and rest events produced by the upstream score parser.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key::{Accidental, NoteName};

/// A single sounded note with its position in the score.
///
/// Durations are in quarter-note units (1.0 = quarter note), measure
/// numbers are 1-indexed, and beat positions start at 1.0 for the first
/// beat of a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: NoteName,
    /// Octave number (4 = middle C octave)
    pub octave: i8,
    pub duration: f64,
    pub measure_number: u32,
    pub beat_position: f64,
    pub accidental: Option<Accidental>,
    /// Tied to the following note
    pub tied: bool,
    /// Voice number for polyphonic sources (1 = melody)
    pub voice: u8,
}

impl NoteEvent {
    /// Create an untied, unaltered note in voice 1.
    pub fn new(
        pitch: NoteName,
        octave: i8,
        duration: f64,
        measure_number: u32,
        beat_position: f64,
    ) -> Self {
        NoteEvent {
            pitch,
            octave,
            duration,
            measure_number,
            beat_position,
            accidental: None,
            tied: false,
            voice: 1,
        }
    }

    pub fn with_accidental(mut self, accidental: Accidental) -> Self {
        self.accidental = Some(accidental);
        self
    }

    pub fn tied(mut self) -> Self {
        self.tied = true;
        self
    }

    /// MIDI pitch number (C4 = 60), accidental included, clamped to 0-127
    pub fn midi_pitch(&self) -> u8 {
        let base = self.pitch.to_semitone() as i16;
        let acc = self.accidental.map(|a| a.to_semitone_offset()).unwrap_or(0) as i16;
        let octave = (self.octave as i16 + 1) * 12;

        (base + acc + octave).clamp(0, 127) as u8
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = self.accidental.map(|a| a.glyph()).unwrap_or("");
        write!(f, "{}{}{}", self.pitch, glyph, self.octave)
    }
}

/// A silent duration within a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestEvent {
    pub duration: f64,
    pub measure_number: u32,
    pub beat_position: f64,
    pub voice: u8,
}

impl RestEvent {
    pub fn new(duration: f64, measure_number: u32, beat_position: f64) -> Self {
        RestEvent {
            duration,
            measure_number,
            beat_position,
            voice: 1,
        }
    }
}

impl fmt::Display for RestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rest({})", self.duration)
    }
}

/// A music element: either a sounded note or a rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicElement {
    Note(NoteEvent),
    Rest(RestEvent),
}

impl MusicElement {
    pub fn measure_number(&self) -> u32 {
        match self {
            MusicElement::Note(n) => n.measure_number,
            MusicElement::Rest(r) => r.measure_number,
        }
    }

    pub fn beat_position(&self) -> f64 {
        match self {
            MusicElement::Note(n) => n.beat_position,
            MusicElement::Rest(r) => r.beat_position,
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            MusicElement::Note(n) => n.duration,
            MusicElement::Rest(r) => r.duration,
        }
    }

    pub fn voice(&self) -> u8 {
        match self {
            MusicElement::Note(n) => n.voice,
            MusicElement::Rest(r) => r.voice,
        }
    }
}
