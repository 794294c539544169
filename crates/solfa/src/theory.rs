//! Key context and scale-degree resolution.

use std::collections::BTreeMap;

use score_model::{Accidental, Key, Mode, NoteName};
use tracing::info;

/// Major scale intervals (semitones from the tonic).
const MAJOR_SCALE_INTERVALS: [i8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Natural minor scale intervals.
const MINOR_SCALE_INTERVALS: [i8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// A scale degree with optional chromatic alteration. Transient: produced
/// per note during conversion, never part of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDegree {
    /// Degree number 1-7
    pub degree: u8,
    /// +1 = raised, -1 = lowered, 0 = diatonic
    pub alteration: i8,
    pub mode: Mode,
}

impl ScaleDegree {
    pub fn is_diatonic(&self) -> bool {
        self.alteration == 0
    }
}

/// Key state for one conversion: a base key plus measure-indexed
/// modulations.
///
/// Each conversion request owns its own context; contexts are never
/// shared between conversions of different scores.
#[derive(Debug, Clone, Default)]
pub struct KeyContext {
    base_key: Option<Key>,
    modulations: BTreeMap<u32, Key>,
}

impl KeyContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_key(key: Key) -> Self {
        let mut context = Self::new();
        context.set_base_key(key);
        context
    }

    /// Establish the default key for measures without a registered
    /// modulation.
    pub fn set_base_key(&mut self, key: Key) {
        info!(key = %key, "set key context");
        self.base_key = Some(key);
    }

    pub fn base_key(&self) -> Option<Key> {
        self.base_key
    }

    /// Register a key change effective from `measure` onward.
    /// Re-registering the same measure overwrites the earlier entry.
    pub fn register_modulation(&mut self, measure: u32, key: Key) {
        info!(measure, key = %key, "registered key change");
        self.modulations.insert(measure, key);
    }

    pub fn has_modulation_at(&self, measure: u32) -> bool {
        self.modulations.contains_key(&measure)
    }

    pub fn modulation_count(&self) -> usize {
        self.modulations.len()
    }

    /// The key in effect at `measure`: the modulation with the greatest
    /// registered measure <= `measure`, else the base key, else C major.
    pub fn key_at(&self, measure: u32) -> Key {
        self.modulations
            .range(..=measure)
            .next_back()
            .map(|(_, key)| *key)
            .or(self.base_key)
            .unwrap_or_default()
    }
}

/// Semitone value (0-11) of a pitch letter plus accidental.
fn pitch_semitone(pitch: NoteName, accidental: Option<Accidental>) -> i8 {
    let offset = accidental.map(|a| a.to_semitone_offset()).unwrap_or(0);
    (pitch.to_semitone() + offset).rem_euclid(12)
}

/// Semitone values of the seven scale degrees of `key`.
fn scale_semitones(key: Key) -> [i8; 7] {
    let tonic = key.tonic_semitone();
    let intervals = match key.mode {
        Mode::Major => &MAJOR_SCALE_INTERVALS,
        Mode::Minor => &MINOR_SCALE_INTERVALS,
    };

    let mut semitones = [0i8; 7];
    for (slot, interval) in semitones.iter_mut().zip(intervals) {
        *slot = (tonic + interval).rem_euclid(12);
    }
    semitones
}

/// Resolve a pitch to its scale degree in `key`.
///
/// Degrees are scanned in ascending order; an exact semitone match wins
/// immediately. Otherwise a pitch one semitone above a degree is a
/// raised candidate and one semitone below a lowered candidate, and a
/// candidate at a distance no greater than the best so far replaces it,
/// so the last degree scanned wins ties. A pitch matching no candidate
/// resolves to degree 1 unaltered.
pub fn resolve_degree(pitch: NoteName, accidental: Option<Accidental>, key: Key) -> ScaleDegree {
    let mode = key.mode;
    let note_semitone = pitch_semitone(pitch, accidental);

    let mut best_degree = 1u8;
    let mut best_alteration = 0i8;
    let mut min_distance = 12i8;

    for (index, &degree_semitone) in scale_semitones(key).iter().enumerate() {
        let degree = index as u8 + 1;
        let distance = (note_semitone - degree_semitone).rem_euclid(12);

        if distance == 0 {
            return ScaleDegree {
                degree,
                alteration: 0,
                mode,
            };
        }

        if distance == 1 && distance <= min_distance {
            best_degree = degree;
            best_alteration = 1;
            min_distance = distance;
        }

        if distance == 11 {
            let below = 12 - distance;
            if below <= min_distance {
                best_degree = degree;
                best_alteration = -1;
                min_distance = below;
            }
        }
    }

    ScaleDegree {
        degree: best_degree,
        alteration: best_alteration,
        mode,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use score_model::NoteName::*;

    use super::*;

    #[test]
    fn c_major_naturals_resolve_diatonically() {
        let key = Key::default();
        let expected = [(C, 1), (D, 2), (E, 3), (F, 4), (G, 5), (A, 6), (B, 7)];

        for (pitch, degree) in expected {
            let resolved = resolve_degree(pitch, None, key);
            assert_eq!(resolved.degree, degree, "pitch {:?}", pitch);
            assert_eq!(resolved.alteration, 0, "pitch {:?}", pitch);
            assert!(resolved.is_diatonic());
        }
    }

    #[test]
    fn g_major_f_sharp_is_leading_tone() {
        // F# is diatonic degree 7 in G major, not a raised 4
        let key = Key::major(G);
        let resolved = resolve_degree(F, Some(Accidental::Sharp), key);

        assert_eq!(resolved.degree, 7);
        assert_eq!(resolved.alteration, 0);
    }

    #[test]
    fn a_minor_uses_natural_minor_intervals() {
        let key = Key::minor(A);
        assert_eq!(resolve_degree(A, None, key).degree, 1);
        assert_eq!(resolve_degree(C, None, key).degree, 3);
        assert_eq!(resolve_degree(G, None, key).degree, 7);
        assert_eq!(resolve_degree(G, None, key).alteration, 0);
    }

    #[test]
    fn chromatic_tie_goes_to_latest_scanned_degree() {
        // C#/Db in C major sits between degrees 1 and 2: raised-1 and
        // lowered-2 are equally distant, and degree 2 is scanned later.
        let key = Key::default();
        let resolved = resolve_degree(C, Some(Accidental::Sharp), key);

        assert_eq!(resolved.degree, 2);
        assert_eq!(resolved.alteration, -1);
    }

    #[test]
    fn adjacent_degree_pairs_resolve_lowered() {
        // F# in C major: one above degree 4 (F), one below degree 5 (G).
        // Degree 5 is scanned later, so the lowered reading wins the tie.
        let key = Key::default();
        let resolved = resolve_degree(F, Some(Accidental::Sharp), key);
        assert_eq!((resolved.degree, resolved.alteration), (5, -1));
    }

    #[test]
    fn minor_leading_tone_resolves_raised() {
        // G# in A minor: lowered-1 (A) is scanned first, raised-7 (G)
        // last, so the raised seventh wins the tie.
        let key = Key::minor(A);
        let resolved = resolve_degree(G, Some(Accidental::Sharp), key);
        assert_eq!((resolved.degree, resolved.alteration), (7, 1));
    }

    #[test]
    fn double_accidentals_wrap_to_enharmonic_degrees() {
        // F## = G, an exact match for degree 5 in C major
        let key = Key::default();
        let resolved = resolve_degree(F, Some(Accidental::DoubleSharp), key);
        assert_eq!((resolved.degree, resolved.alteration), (5, 0));

        // Dbb = C, degree 1
        let resolved = resolve_degree(D, Some(Accidental::DoubleFlat), key);
        assert_eq!((resolved.degree, resolved.alteration), (1, 0));
    }

    #[test]
    fn key_context_defaults_to_c_major() {
        let context = KeyContext::new();
        assert_eq!(context.key_at(1), Key::default());
        assert_eq!(context.base_key(), None);
    }

    #[test]
    fn key_context_lookup_ignores_insertion_order() {
        let mut context = KeyContext::with_base_key(Key::major(C));
        context.register_modulation(17, Key::minor(E));
        context.register_modulation(5, Key::major(G));
        context.register_modulation(9, Key::major(D));

        assert_eq!(context.key_at(1), Key::major(C));
        assert_eq!(context.key_at(5), Key::major(G));
        assert_eq!(context.key_at(8), Key::major(G));
        assert_eq!(context.key_at(12), Key::major(D));
        assert_eq!(context.key_at(40), Key::minor(E));
    }

    #[test]
    fn key_context_same_measure_overwrites() {
        let mut context = KeyContext::with_base_key(Key::major(C));
        context.register_modulation(4, Key::major(F));
        context.register_modulation(4, Key::minor(D));

        assert_eq!(context.key_at(4), Key::minor(D));
        assert_eq!(context.modulation_count(), 1);
        assert!(context.has_modulation_at(4));
        assert!(!context.has_modulation_at(5));
    }
}
