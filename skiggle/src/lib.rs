//! Stroke-by-stroke handwriting recognition.
//!
//! Each finished stroke is normalized, split into classified segments and
//! folded into a fixed-width bit signature; the signature is then ranked
//! against a per-language table of known characters. Drive it through a
//! [`RecognitionSession`], or call [`recognize`] for a whole character at once.

mod config;
mod entities;
mod error;
mod language;
mod match_collector;
mod matcher;
mod normalizer;
mod pen_character;
mod reference_table;
mod segment_extractor;
mod session;
mod signature;

use serde_derive::{Deserialize, Serialize};

pub use config::RecognizerConfig;
pub use entities::{Direction, LatinCode, Segment, StrokeShape};
pub use error::{Error, Result};
pub use language::{EncodingScheme, Language, SCHEME_VERSION};
pub use matcher::rank;
pub use normalizer::{normalize, NormalizedStroke, Stroke, StrokeMetrics};
pub use pen_character::{PenCharacter, SegmentedStroke};
pub use reference_table::{
    GlyphTemplate, ReferenceEntry, ReferenceLibrary, ReferenceTable, TemplateSet,
};
pub use segment_extractor::extract;
pub use session::{RecognitionSession, StrokeOutcome};
pub use signature::{encode, encode_stroke, Signature};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn dist(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Candidate {
    pub glyph: char,
    pub score: f32,
    pub is_best: bool,
}

/// Recognizes a complete character: all strokes go through one throwaway
/// session and the ranked list after the last stroke is returned, at most
/// `limit` long.
pub fn recognize(
    strokes: &[Vec<Point>],
    language: Language,
    limit: usize,
) -> Result<Vec<Candidate>> {
    let config = RecognizerConfig {
        max_candidates: limit,
        ..RecognizerConfig::default()
    };
    let mut session = RecognitionSession::new(language, config)?;
    let mut res: Vec<Candidate> = Vec::new();
    for stroke in strokes {
        match session.add_stroke(stroke)? {
            StrokeOutcome::Ignored => {}
            StrokeOutcome::Cleared => res.clear(),
            StrokeOutcome::Candidates(candidates) => res = candidates,
        }
    }
    Ok(res)
}
