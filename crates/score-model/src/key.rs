//! Key signatures: note names, accidentals, and modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The seven natural note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Convert to semitone offset from C (0-11)
    pub fn to_semitone(&self) -> i8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    /// Create from semitone offset (0-11), preferring sharps for chromatic notes
    pub fn from_semitone(semitone: i8) -> (NoteName, Option<Accidental>) {
        match semitone.rem_euclid(12) {
            0 => (NoteName::C, None),
            1 => (NoteName::C, Some(Accidental::Sharp)),
            2 => (NoteName::D, None),
            3 => (NoteName::D, Some(Accidental::Sharp)),
            4 => (NoteName::E, None),
            5 => (NoteName::F, None),
            6 => (NoteName::F, Some(Accidental::Sharp)),
            7 => (NoteName::G, None),
            8 => (NoteName::G, Some(Accidental::Sharp)),
            9 => (NoteName::A, None),
            10 => (NoteName::A, Some(Accidental::Sharp)),
            11 => (NoteName::B, None),
            _ => unreachable!(),
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<NoteName> {
        match s.to_uppercase().as_str() {
            "C" => Some(NoteName::C),
            "D" => Some(NoteName::D),
            "E" => Some(NoteName::E),
            "F" => Some(NoteName::F),
            "G" => Some(NoteName::G),
            "A" => Some(NoteName::A),
            "B" => Some(NoteName::B),
            _ => None,
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            NoteName::C => "C",
            NoteName::D => "D",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::G => "G",
            NoteName::A => "A",
            NoteName::B => "B",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    DoubleSharp,
    Sharp,
    Natural,
    Flat,
    DoubleFlat,
}

impl Accidental {
    /// Convert to semitone offset
    pub fn to_semitone_offset(&self) -> i8 {
        match self {
            Accidental::DoubleSharp => 2,
            Accidental::Sharp => 1,
            Accidental::Natural => 0,
            Accidental::Flat => -1,
            Accidental::DoubleFlat => -2,
        }
    }

    /// Display glyph: "#", "b", "##", "bb", "=" for natural
    pub fn glyph(&self) -> &'static str {
        match self {
            Accidental::DoubleSharp => "##",
            Accidental::Sharp => "#",
            Accidental::Natural => "=",
            Accidental::Flat => "b",
            Accidental::DoubleFlat => "bb",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Accidental> {
        match s {
            "#" => Some(Accidental::Sharp),
            "b" => Some(Accidental::Flat),
            "##" => Some(Accidental::DoubleSharp),
            "bb" => Some(Accidental::DoubleFlat),
            "=" => Some(Accidental::Natural),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    /// Parse mode from string (case-insensitive, allows abbreviations)
    pub fn parse(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "" | "maj" | "major" => Some(Mode::Major),
            "m" | "min" | "minor" => Some(Mode::Minor),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => write!(f, "major"),
            Mode::Minor => write!(f, "minor"),
        }
    }
}

/// Error parsing a key label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key label")]
    Empty,
    #[error("invalid key root '{0}'")]
    InvalidRoot(char),
    #[error("unknown mode '{0}'")]
    UnknownMode(String),
}

/// Key signature: tonic letter, optional accidental, and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub tonic: NoteName,
    pub accidental: Option<Accidental>,
    pub mode: Mode,
}

impl Default for Key {
    fn default() -> Self {
        Key {
            tonic: NoteName::C,
            accidental: None,
            mode: Mode::Major,
        }
    }
}

impl Key {
    pub fn new(tonic: NoteName, accidental: Option<Accidental>, mode: Mode) -> Self {
        Key {
            tonic,
            accidental,
            mode,
        }
    }

    pub fn major(tonic: NoteName) -> Self {
        Key::new(tonic, None, Mode::Major)
    }

    pub fn minor(tonic: NoteName) -> Self {
        Key::new(tonic, None, Mode::Minor)
    }

    /// Semitone value of the tonic (0-11), accidental included
    pub fn tonic_semitone(&self) -> i8 {
        let offset = self.accidental.map(|a| a.to_semitone_offset()).unwrap_or(0);
        (self.tonic.to_semitone() + offset).rem_euclid(12)
    }

    /// Parse a key label (e.g., "G", "Am", "F#m", "Bb", "c")
    pub fn parse(label: &str) -> Result<Key, KeyParseError> {
        let trimmed = label.trim();
        let mut chars = trimmed.chars().peekable();

        let tonic = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => match c.to_ascii_uppercase() {
                'C' => NoteName::C,
                'D' => NoteName::D,
                'E' => NoteName::E,
                'F' => NoteName::F,
                'G' => NoteName::G,
                'A' => NoteName::A,
                'B' => NoteName::B,
                _ => return Err(KeyParseError::InvalidRoot(c)),
            },
            Some(c) => return Err(KeyParseError::InvalidRoot(c)),
            None => return Err(KeyParseError::Empty),
        };

        let accidental = if chars.peek() == Some(&'#') {
            chars.next();
            Some(Accidental::Sharp)
        } else if chars.peek() == Some(&'b') {
            // 'b' is flat only when not followed by a letter
            // (which would be a mode suffix like "bm" -> B minor)
            let mut lookahead = chars.clone();
            lookahead.next();
            if !matches!(lookahead.next(), Some('a'..='z' | 'A'..='Z')) {
                chars.next();
                Some(Accidental::Flat)
            } else {
                None
            }
        } else {
            None
        };

        let remaining: String = chars.collect();
        let mode_str = remaining.trim().split_whitespace().next().unwrap_or("");
        let mode = Mode::parse(mode_str)
            .ok_or_else(|| KeyParseError::UnknownMode(mode_str.to_string()))?;

        Ok(Key {
            tonic,
            accidental,
            mode,
        })
    }

    /// The relative major/minor: three semitones below a major tonic,
    /// three above a minor one. Chromatic tonics respell sharp-preferring.
    pub fn relative(&self) -> Key {
        let (semitone, mode) = match self.mode {
            Mode::Major => (self.tonic_semitone() - 3, Mode::Minor),
            Mode::Minor => (self.tonic_semitone() + 3, Mode::Major),
        };
        let (tonic, accidental) = NoteName::from_semitone(semitone);
        Key {
            tonic,
            accidental,
            mode,
        }
    }

    /// The parallel major/minor: same tonic, flipped mode.
    pub fn parallel(&self) -> Key {
        Key {
            mode: match self.mode {
                Mode::Major => Mode::Minor,
                Mode::Minor => Mode::Major,
            },
            ..*self
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = self.accidental.map(|a| a.glyph()).unwrap_or("");
        write!(f, "{}{} {}", self.tonic, glyph, self.mode)
    }
}
