use serde_derive::{Deserialize, Serialize};
use std::fmt;

use super::entities::Segment;
use super::language::EncodingScheme;

const WORD_BITS: usize = 64;

/// Fixed-width bit vector summarizing the segments of a character
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    width: usize,
    words: Vec<u64>,
}

impl Signature {
    pub fn empty(width: usize) -> Signature {
        Signature {
            width,
            words: vec![0; width.div_ceil(WORD_BITS)],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Sets a bit. Panics if `ix` is outside the signature; every index
    /// comes from an `EncodingScheme` of the same width.
    pub fn set(&mut self, ix: usize) {
        assert!(ix < self.width, "bit {} outside signature of width {}", ix, self.width);
        self.words[ix / WORD_BITS] |= 1u64 << (ix % WORD_BITS);
    }

    pub fn get(&self, ix: usize) -> bool {
        ix < self.width && self.words[ix / WORD_BITS] & (1u64 << (ix % WORD_BITS)) != 0
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn union_with(&mut self, other: &Signature) {
        debug_assert_eq!(self.width, other.width);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    pub fn intersection_count(&self, other: &Signature) -> u32 {
        self.words.iter().zip(&other.words).map(|(a, b)| (a & b).count_ones()).sum()
    }

    pub fn union_count(&self, other: &Signature) -> u32 {
        self.words.iter().zip(&other.words).map(|(a, b)| (a | b).count_ones()).sum()
    }

    /// popcount(AND) / popcount(OR); two empty signatures score 0
    pub fn jaccard(&self, other: &Signature) -> f32 {
        let union = self.union_count(other);
        if union == 0 {
            return 0.0;
        }
        self.intersection_count(other) as f32 / union as f32
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).filter(move |&ix| self.get(ix))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("width", &self.width)
            .field("ones", &self.ones().collect::<Vec<usize>>())
            .finish()
    }
}

/// Encodes one stroke's segments into the stroke's own bit range.
pub fn encode_stroke(
    scheme: &EncodingScheme,
    stroke_ix: usize,
    segments: &[Segment],
) -> Signature {
    let mut sig = Signature::empty(scheme.bit_width());
    for (segment_ix, seg) in segments.iter().enumerate() {
        sig.set(scheme.bit_index(stroke_ix, segment_ix, seg.code));
    }
    sig
}

/// Encodes a whole character, one segment list per stroke in drawing order.
pub fn encode<S: AsRef<[Segment]>>(scheme: &EncodingScheme, strokes: &[S]) -> Signature {
    let mut sig = Signature::empty(scheme.bit_width());
    for (stroke_ix, segments) in strokes.iter().enumerate() {
        sig.union_with(&encode_stroke(scheme, stroke_ix, segments.as_ref()));
    }
    sig
}
