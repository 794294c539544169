//! Octave marks relative to a reference octave.

/// Octave containing middle C.
pub const REFERENCE_OCTAVE: i8 = 4;

/// Marks for a note's octave relative to the reference: apostrophes for
/// each octave above, commas for each octave below, empty at the
/// reference itself.
pub fn octave_modifier(octave: i8, reference_octave: i8) -> String {
    let diff = octave as i32 - reference_octave as i32;
    if diff > 0 {
        "'".repeat(diff as usize)
    } else if diff < 0 {
        ",".repeat(diff.unsigned_abs() as usize)
    } else {
        String::new()
    }
}
