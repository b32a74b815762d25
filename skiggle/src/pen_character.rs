use super::entities::Segment;
use super::language::EncodingScheme;
use super::normalizer::Stroke;
use super::signature::{encode_stroke, Signature};

// One committed stroke with the segments extracted from it
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedStroke {
    stroke: Stroke,
    segments: Vec<Segment>,
}

impl SegmentedStroke {
    /// The stroke as normalized, with its metrics
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// The glyph being written: its strokes so far and their signature.
///
/// Each stroke's bits live in that stroke's own range, so folding a new
/// stroke into the signature gives the same bits as encoding every stroke
/// from scratch.
#[derive(Debug, Clone)]
pub struct PenCharacter {
    scheme: EncodingScheme,
    strokes: Vec<SegmentedStroke>,
    signature: Signature,
}

impl PenCharacter {
    pub fn new(scheme: EncodingScheme) -> PenCharacter {
        PenCharacter {
            scheme,
            strokes: Vec::new(),
            signature: Signature::empty(scheme.bit_width()),
        }
    }

    pub fn add_stroke(&mut self, stroke: Stroke, segments: Vec<Segment>) {
        let stroke_sig = encode_stroke(&self.scheme, self.strokes.len(), &segments);
        self.signature.union_with(&stroke_sig);
        self.strokes.push(SegmentedStroke { stroke, segments });
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[SegmentedStroke] {
        &self.strokes
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn scheme(&self) -> &EncodingScheme {
        &self.scheme
    }
}
