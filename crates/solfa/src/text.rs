//! Plain-text rendering of solfa results.
//!
//! Sustained notes (two beats or more) gain one dash per whole beat
//! beyond the first; half-beat notes are parenthesized. These thresholds
//! are shared with the downstream page renderers.

use crate::types::{SolfaMeasure, SolfaNote, SolfaResult};
use crate::SolfaConfig;

/// Measures per output line.
const MEASURES_PER_LINE: usize = 4;

fn format_note(note: &SolfaNote, use_abbreviated: bool) -> String {
    let token = if use_abbreviated {
        note.syllable.abbreviated()
    } else {
        note.syllable.as_str()
    };
    let mut text = format!("{}{}", token, note.octave_modifier);

    if note.duration_beats >= 2.0 {
        for _ in 1..note.duration_beats as usize {
            text.push_str(" -");
        }
    } else if note.duration_beats == 0.5 {
        text = format!("({})", text);
    }

    text
}

/// Format one measure as a space-separated syllable sequence.
pub fn format_measure(measure: &SolfaMeasure, use_abbreviated: bool) -> String {
    measure
        .notes
        .iter()
        .map(|note| format_note(note, use_abbreviated))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a result as plain text: title header, key and time lines, then
/// measures grouped four to a line between bar pipes.
pub fn to_text(result: &SolfaResult, config: &SolfaConfig) -> String {
    let mut lines = Vec::new();

    if !result.title.is_empty() {
        lines.push(format!("# {}", result.title));
        lines.push(String::new());
    }
    lines.push(format!("Key: {}", result.key));
    lines.push(format!("Time: {}", result.time_signature));
    lines.push(String::new());

    let mut current_line = Vec::new();
    for (i, measure) in result.measures.iter().enumerate() {
        current_line.push(format_measure(measure, config.use_abbreviated));
        if (i + 1) % MEASURES_PER_LINE == 0 {
            lines.push(format!("| {} |", current_line.join(" | ")));
            current_line.clear();
        }
    }
    if !current_line.is_empty() {
        lines.push(format!("| {} |", current_line.join(" | ")));
    }

    lines.join("\n")
}
