use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{Error, Result};

// Bumped whenever the extractor or the bit layout changes in a way that
// invalidates previously serialized reference tables.
pub const SCHEME_VERSION: u16 = 1;

/// Supported handwriting modes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Language {
    #[default]
    Latin,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Latin, Language::Chinese];

    /// The bit layout used for this language's signatures
    pub fn scheme(self) -> EncodingScheme {
        match self {
            Language::Latin => EncodingScheme {
                language: self,
                version: SCHEME_VERSION,
                alphabet_size: LATIN_ALPHABET_SIZE,
                max_strokes: 4,
                slots_per_stroke: 6,
            },
            Language::Chinese => EncodingScheme {
                language: self,
                version: SCHEME_VERSION,
                alphabet_size: CHINESE_ALPHABET_SIZE,
                max_strokes: 12,
                slots_per_stroke: 4,
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Latin => write!(f, "Latin"),
            Language::Chinese => write!(f, "Chinese"),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Language> {
        match s.to_ascii_lowercase().as_str() {
            "latin" | "english" | "en" => Ok(Language::Latin),
            "chinese" | "zh" | "cn" => Ok(Language::Chinese),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

// 8 compass directions plus a dot
pub const LATIN_ALPHABET_SIZE: usize = 9;
// Heng, Ti, Shu, Pie, Na, Gou, Dian
pub const CHINESE_ALPHABET_SIZE: usize = 7;

/// Bit layout of a language's signatures.
///
/// Each stroke owns `slots_per_stroke * alphabet_size` consecutive bits, and
/// each segment sets exactly one bit inside its stroke's range. Strokes past
/// `max_strokes` share the last stroke range; segments past
/// `slots_per_stroke` share the last slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingScheme {
    pub language: Language,
    pub version: u16,
    pub alphabet_size: usize,
    pub max_strokes: usize,
    pub slots_per_stroke: usize,
}

impl EncodingScheme {
    pub fn bit_width(&self) -> usize {
        self.max_strokes * self.slots_per_stroke * self.alphabet_size
    }

    pub fn bit_index(&self, stroke_ix: usize, segment_ix: usize, code: u8) -> usize {
        let stroke_ix = stroke_ix.min(self.max_strokes - 1);
        let segment_ix = segment_ix.min(self.slots_per_stroke - 1);
        let code = (code as usize).min(self.alphabet_size - 1);
        (stroke_ix * self.slots_per_stroke + segment_ix) * self.alphabet_size + code
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/v{}/{}x{}x{}",
            self.language, self.version, self.max_strokes, self.slots_per_stroke, self.alphabet_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(Language::Latin.scheme().bit_width(), 216);
        assert_eq!(Language::Chinese.scheme().bit_width(), 336);
    }

    #[test]
    fn test_bit_index_clamps() {
        let scheme = Language::Latin.scheme();
        assert_eq!(scheme.bit_index(0, 0, 0), 0);
        assert_eq!(scheme.bit_index(1, 0, 0), 54);
        // Overflow strokes and segments fold into the last range and slot
        assert_eq!(scheme.bit_index(9, 9, 8), scheme.bit_width() - 1);
    }

    #[test]
    fn test_parse() {
        assert_eq!("English".parse::<Language>().unwrap(), Language::Latin);
        assert_eq!("chinese".parse::<Language>().unwrap(), Language::Chinese);
        assert!("Klingon".parse::<Language>().is_err());
    }
}
