//! Scale degree to solfa syllable mapping.

use score_model::Mode;

use crate::theory::ScaleDegree;
use crate::types::SolfaSyllable;

const DIATONIC: [SolfaSyllable; 7] = [
    SolfaSyllable::Do,
    SolfaSyllable::Re,
    SolfaSyllable::Mi,
    SolfaSyllable::Fa,
    SolfaSyllable::Sol,
    SolfaSyllable::La,
    SolfaSyllable::Ti,
];

/// La-based minor remap: the minor tonic is sung la, so minor degrees
/// shift to their relative-major positions.
fn minor_to_major_degree(degree: u8) -> u8 {
    match degree {
        1 => 6,
        2 => 7,
        3 => 1,
        4 => 2,
        5 => 3,
        6 => 4,
        7 => 5,
        other => other,
    }
}

fn raised(degree: u8) -> Option<SolfaSyllable> {
    match degree {
        1 => Some(SolfaSyllable::Di),
        2 => Some(SolfaSyllable::Ri),
        4 => Some(SolfaSyllable::Fi),
        5 => Some(SolfaSyllable::Si),
        6 => Some(SolfaSyllable::Li),
        _ => None,
    }
}

fn lowered(degree: u8) -> Option<SolfaSyllable> {
    match degree {
        2 => Some(SolfaSyllable::Ra),
        3 => Some(SolfaSyllable::Me),
        5 => Some(SolfaSyllable::Se),
        6 => Some(SolfaSyllable::Le),
        7 => Some(SolfaSyllable::Te),
        _ => None,
    }
}

fn diatonic(degree: u8) -> SolfaSyllable {
    degree
        .checked_sub(1)
        .and_then(|index| DIATONIC.get(index as usize))
        .copied()
        .unwrap_or(SolfaSyllable::Do)
}

/// Map a scale degree to its solfa syllable.
///
/// Minor-mode degrees are first remapped to their relative-major
/// positions when la-based minor is enabled; chromatic alterations then
/// pick from the raised/lowered tables, falling back to the diatonic
/// syllable when no altered form exists.
pub fn syllable_for_degree(scale_degree: ScaleDegree, la_based_minor: bool) -> SolfaSyllable {
    let degree = if scale_degree.mode == Mode::Minor && la_based_minor {
        minor_to_major_degree(scale_degree.degree)
    } else {
        scale_degree.degree
    };

    match scale_degree.alteration {
        a if a > 0 => raised(degree).unwrap_or_else(|| diatonic(degree)),
        a if a < 0 => lowered(degree).unwrap_or_else(|| diatonic(degree)),
        _ => diatonic(degree),
    }
}
