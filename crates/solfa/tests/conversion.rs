//! End-to-end conversion tests: whole melodies through the converter,
//! with and without a key-change detection pre-pass.

use pretty_assertions::assert_eq;
use score_model::NoteName::{self, *};
use score_model::{Accidental, Key, MusicElement, NoteEvent, ParsedScore, TimeSignature};
use solfa::{KeyChangeDetector, KeyContext, SolfaConfig, SolfaConverter};

/// Quarter notes, four to a measure, from (pitch, accidental, octave).
fn melody(notes: &[(NoteName, Option<Accidental>, i8)], key: Key) -> ParsedScore {
    let elements = notes
        .iter()
        .enumerate()
        .map(|(i, &(pitch, accidental, octave))| {
            let measure = i as u32 / 4 + 1;
            let beat = (i % 4) as f64 + 1.0;
            let mut note = NoteEvent::new(pitch, octave, 1.0, measure, beat);
            note.accidental = accidental;
            MusicElement::Note(note)
        })
        .collect();

    ParsedScore::from_elements("", elements, Some(key), Some(TimeSignature::default()))
}

fn tokens_and_marks(score: &ParsedScore) -> Vec<(String, String)> {
    let result = SolfaConverter::default().convert(score);
    result
        .measures
        .iter()
        .flat_map(|m| &m.notes)
        .map(|n| (n.syllable.as_str().to_string(), n.octave_modifier.clone()))
        .collect()
}

#[test]
fn c_major_scale_run() {
    let score = melody(
        &[
            (C, None, 4),
            (D, None, 4),
            (E, None, 4),
            (F, None, 4),
            (G, None, 4),
            (A, None, 4),
            (B, None, 4),
            (C, None, 5),
        ],
        Key::major(C),
    );

    let converted = tokens_and_marks(&score);
    let expected: Vec<(String, String)> = [
        ("do", ""),
        ("re", ""),
        ("mi", ""),
        ("fa", ""),
        ("sol", ""),
        ("la", ""),
        ("ti", ""),
        ("do", "'"),
    ]
    .into_iter()
    .map(|(s, m)| (s.to_string(), m.to_string()))
    .collect();

    assert_eq!(converted, expected);
}

#[test]
fn transposition_preserves_syllables_and_marks() {
    // The same melody in C and transposed a whole tone into D must sing
    // identically under movable-do.
    let sharp = Some(Accidental::Sharp);
    let in_c = melody(
        &[
            (A, None, 3),
            (C, None, 4),
            (D, None, 4),
            (E, None, 4),
            (F, None, 4),
            (F, sharp, 4),
            (G, None, 4),
            (E, None, 4),
        ],
        Key::major(C),
    );
    let in_d = melody(
        &[
            (B, None, 3),
            (D, None, 4),
            (E, None, 4),
            (F, sharp, 4),
            (G, None, 4),
            (G, sharp, 4),
            (A, None, 4),
            (F, sharp, 4),
        ],
        Key::major(D),
    );

    let from_c = tokens_and_marks(&in_c);
    let from_d = tokens_and_marks(&in_d);

    assert_eq!(from_c, from_d);
    assert_eq!(from_c[0], ("la".to_string(), ",".to_string()));
    assert_eq!(from_c[5].0, "se");
}

#[test]
fn detected_modulation_steers_later_measures() {
    let sharp = Some(Accidental::Sharp);
    let score = melody(
        &[
            // Measures 1-2 in C major
            (C, None, 4),
            (D, None, 4),
            (E, None, 4),
            (F, None, 4),
            (G, None, 4),
            (A, None, 4),
            (B, None, 4),
            (C, None, 5),
            // Measures 3-5 in G major
            (G, None, 4),
            (F, sharp, 4),
            (G, None, 4),
            (A, None, 4),
            (B, None, 4),
            (A, None, 4),
            (G, None, 4),
            (F, sharp, 4),
            (G, None, 4),
            (G, None, 4),
            (G, None, 4),
            (G, None, 4),
        ],
        Key::major(C),
    );

    let estimator = |window: &[NoteEvent]| {
        Some(if window[0].measure_number >= 3 {
            Key::major(G)
        } else {
            Key::major(C)
        })
    };

    let mut context = KeyContext::with_base_key(Key::major(C));
    let notes: Vec<NoteEvent> = score.note_events().cloned().collect();
    KeyChangeDetector::default().detect(&notes, &estimator, &mut context);

    assert!(context.has_modulation_at(3));

    let result = SolfaConverter::default().convert_with_context(&score, &mut context);

    // Measure 3 onward resolves in G: G sings do, F# sings ti
    let measure3: Vec<&str> = result.measures[2]
        .notes
        .iter()
        .map(|n| n.syllable.as_str())
        .collect();
    assert_eq!(measure3, vec!["do", "ti", "do", "re"]);

    // The label still reports the base key
    assert_eq!(result.key, "C major");
}

#[test]
fn conversion_without_detector_uses_base_key_throughout() {
    let sharp = Some(Accidental::Sharp);
    let score = melody(
        &[(G, None, 4), (F, sharp, 4), (G, None, 4), (A, None, 4)],
        Key::major(C),
    );

    let converted = tokens_and_marks(&score);
    // In C major, F# resolves as a chromatic alteration, not ti
    assert_eq!(converted[1].0, "se");
}

#[test]
fn serialized_result_shape() {
    let elements = vec![
        MusicElement::Note(NoteEvent::new(C, 4, 1.0, 1, 1.0)),
        MusicElement::Rest(score_model::RestEvent::new(0.5, 1, 2.0)),
    ];
    let score = ParsedScore::from_elements(
        "Shape",
        elements,
        Some(Key::major(C)),
        Some(TimeSignature::default()),
    );

    let result = SolfaConverter::new(SolfaConfig::default()).convert(&score);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["title"], "Shape");
    assert_eq!(json["key"], "C major");
    assert_eq!(json["time_signature"], "4/4");
    assert_eq!(json["measures"][0]["number"], 1);

    let first = &json["measures"][0]["notes"][0];
    assert_eq!(first["syllable"], "do");
    assert_eq!(first["octave_modifier"], "");
    assert_eq!(first["duration_beats"], 1.0);
    assert_eq!(first["is_rest"], false);

    let second = &json["measures"][0]["notes"][1];
    assert_eq!(second["syllable"], "0");
    assert_eq!(second["is_rest"], true);
    assert_eq!(second["duration_beats"], 0.5);
}
