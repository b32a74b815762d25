//! Error types for skiggle
//!
//! Every fallible operation in the recognition pipeline returns
//! [`Result<T>`]. A recognition pass that finds nothing above the score
//! floor is not an error; it yields an empty candidate list.

use thiserror::Error;

use crate::language::Language;

/// Skiggle error type
#[derive(Error, Debug)]
pub enum Error {
    /// Stroke with no points; the input event should be ignored
    #[error("stroke has no points")]
    EmptyStroke,

    /// No reference table registered for the requested language
    #[error("no reference table loaded for language {0}")]
    MissingReferenceTable(Language),

    /// Signature and reference table were built by different encoding schemes
    #[error("signature width {signature} does not match reference table width {table}")]
    SignatureWidthMismatch { signature: usize, table: usize },

    /// A previous invariant violation made the session unusable
    #[error("recognition session is poisoned; call set_language to recover")]
    SessionPoisoned,

    /// A table or character was produced by an incompatible encoder
    #[error("encoding scheme mismatch: expected {expected}, found {found}")]
    SchemeMismatch { expected: String, found: String },

    /// Candidate index outside the last ranked list
    #[error("candidate index out of range: {index} >= {len}")]
    CandidateOutOfRange { index: usize, len: usize },

    /// Language name not recognized
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// Configuration value out of its valid range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Glyph template could not be turned into a reference entry
    #[error("invalid template for {glyph:?}: {reason}")]
    InvalidTemplate { glyph: char, reason: String },

    /// JSON (config, templates, recorded ink) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary table encode/decode error
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for skiggle operations
pub type Result<T> = std::result::Result<T, Error>;
