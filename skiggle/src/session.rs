//! `RecognitionSession`: the object a host drives, one stroke at a time.
//!
//! The session owns everything that changes while a user writes: the active
//! language, its reference table, the in-progress `PenCharacter` and the last
//! ranked list. Nothing is shared between sessions.

use log::{debug, info, warn};

use super::config::RecognizerConfig;
use super::error::{Error, Result};
use super::language::Language;
use super::matcher::rank;
use super::normalizer::normalize;
use super::pen_character::PenCharacter;
use super::reference_table::{ReferenceLibrary, ReferenceTable};
use super::segment_extractor::extract;
use super::*;

/// What the host should do after a completed stroke
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeOutcome {
    /// No points; nothing changed
    Ignored,
    /// Clear gesture; the pad and the in-progress character were reset
    Cleared,
    /// Ranked candidates for the character so far; may be empty
    Candidates(Vec<Candidate>),
}

pub struct RecognitionSession {
    config: RecognizerConfig,
    library: ReferenceLibrary,
    language: Language,
    table: ReferenceTable,
    character: PenCharacter,
    candidates: Vec<Candidate>,
    poisoned: bool,
}

impl RecognitionSession {
    /// Session over the bundled tables of every supported language.
    pub fn new(language: Language, config: RecognizerConfig) -> Result<RecognitionSession> {
        config.validate()?;
        let library = ReferenceLibrary::bundled(&config)?;
        RecognitionSession::with_library(library, language, config)
    }

    /// Session over caller-supplied tables. Fails if `language` has none.
    pub fn with_library(
        library: ReferenceLibrary,
        language: Language,
        config: RecognizerConfig,
    ) -> Result<RecognitionSession> {
        config.validate()?;
        let table = library.table(language)?.clone();
        let character = PenCharacter::new(*table.scheme());
        info!(
            "recognition session started in {} mode ({} references)",
            language,
            table.len()
        );
        Ok(RecognitionSession {
            config,
            library,
            language,
            table,
            character,
            candidates: Vec::new(),
            poisoned: false,
        })
    }

    /// Switches the active language, replacing the reference table and
    /// dropping any in-progress character. Calling it again with the same
    /// language gives the same state. On error the session is unchanged.
    pub fn set_language(&mut self, language: Language) -> Result<()> {
        let table = self.library.table(language)?.clone();
        self.language = language;
        self.table = table;
        self.poisoned = false;
        self.reset();
        info!("language set to {} ({} references)", language, self.table.len());
        Ok(())
    }

    /// Feeds one finished stroke through normalization, segmentation and
    /// matching. Runs exactly one matching pass per accepted stroke.
    pub fn add_stroke(&mut self, points: &[Point]) -> Result<StrokeOutcome> {
        if self.poisoned {
            return Err(Error::SessionPoisoned);
        }
        let normalized = match normalize(points, &self.config) {
            Ok(ns) => ns,
            Err(Error::EmptyStroke) => {
                debug!("empty stroke ignored");
                return Ok(StrokeOutcome::Ignored);
            }
            Err(e) => return Err(e),
        };
        if normalized.is_clear_gesture {
            debug!("clear gesture after {} strokes", self.character.stroke_count());
            self.reset();
            return Ok(StrokeOutcome::Cleared);
        }

        let segments = extract(&normalized.stroke, self.language, &self.config);
        let ranked = match self.check_scheme() {
            Ok(()) => {
                self.character.add_stroke(normalized.stroke, segments);
                rank(
                    self.character.signature(),
                    self.character.stroke_count(),
                    &self.table,
                    &self.config,
                )
            }
            Err(e) => Err(e),
        };
        match ranked {
            Ok(candidates) => {
                self.candidates = candidates.clone();
                Ok(StrokeOutcome::Candidates(candidates))
            }
            Err(e) => {
                warn!("recognition session poisoned: {}", e);
                self.poisoned = true;
                self.candidates.clear();
                Err(e)
            }
        }
    }

    /// Commits the candidate at `index` of the last ranked list and starts
    /// a fresh character.
    pub fn select(&mut self, index: usize) -> Result<Candidate> {
        let len = self.candidates.len();
        let candidate = match self.candidates.get(index) {
            Some(c) => c.clone(),
            None => return Err(Error::CandidateOutOfRange { index, len }),
        };
        debug!("committed {:?}", candidate.glyph);
        self.reset();
        Ok(candidate)
    }

    /// Discards the in-progress character.
    pub fn clear(&mut self) {
        self.reset();
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn character(&self) -> &PenCharacter {
        &self.character
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    // The character's bits are only comparable with a table from the same encoder
    fn check_scheme(&self) -> Result<()> {
        let table_scheme = self.table.scheme();
        if self.character.scheme() != table_scheme {
            return Err(Error::SchemeMismatch {
                expected: table_scheme.to_string(),
                found: self.character.scheme().to_string(),
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.character = PenCharacter::new(*self.table.scheme());
        self.candidates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point { x, y }).collect()
    }

    fn latin_session() -> RecognitionSession {
        RecognitionSession::new(Language::Latin, RecognizerConfig::default()).unwrap()
    }

    fn latin_only() -> ReferenceLibrary {
        let mut library = ReferenceLibrary::new();
        let table = ReferenceTable::for_language(Language::Latin, &RecognizerConfig::default());
        library.insert(table.unwrap());
        library
    }

    #[test]
    fn test_scheme_mismatch_poisons_until_set_language() {
        let mut session = latin_session();
        let down = pts(&[(0.0, 0.0), (0.0, 120.0)]);
        // A character built under the other language's scheme
        session.character = PenCharacter::new(Language::Chinese.scheme());
        let res = session.add_stroke(&down);
        assert!(matches!(res, Err(Error::SchemeMismatch { .. })));
        assert!(session.is_poisoned());
        assert!(session.character().is_empty());
        assert!(matches!(session.add_stroke(&down), Err(Error::SessionPoisoned)));

        session.set_language(Language::Latin).unwrap();
        assert!(!session.is_poisoned());
        assert!(matches!(session.add_stroke(&down), Ok(StrokeOutcome::Candidates(_))));
    }

    #[test]
    fn test_same_width_other_version_is_rejected() {
        let mut session = latin_session();
        let mut scheme = Language::Latin.scheme();
        scheme.version += 1;
        assert_eq!(scheme.bit_width(), session.table().scheme().bit_width());
        session.character = PenCharacter::new(scheme);
        let res = session.add_stroke(&pts(&[(0.0, 0.0), (0.0, 120.0)]));
        assert!(matches!(res, Err(Error::SchemeMismatch { .. })));
        assert!(session.is_poisoned());
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn test_missing_table_fails_fast() {
        let config = RecognizerConfig::default();
        let res = RecognitionSession::with_library(latin_only(), Language::Chinese, config);
        assert!(matches!(res, Err(Error::MissingReferenceTable(Language::Chinese))));
    }

    #[test]
    fn test_failed_set_language_keeps_session() {
        let config = RecognizerConfig::default();
        let mut session =
            RecognitionSession::with_library(latin_only(), Language::Latin, config).unwrap();
        session.add_stroke(&pts(&[(0.0, 0.0), (0.0, 120.0)])).unwrap();
        let signature = session.character().signature().clone();
        let candidates = session.candidates().to_vec();
        assert!(!candidates.is_empty());

        let res = session.set_language(Language::Chinese);
        assert!(matches!(res, Err(Error::MissingReferenceTable(Language::Chinese))));
        assert_eq!(session.language(), Language::Latin);
        assert_eq!(session.table().language(), Language::Latin);
        assert_eq!(session.character().stroke_count(), 1);
        assert_eq!(session.character().signature(), &signature);
        assert_eq!(session.candidates(), &candidates[..]);
        assert!(!session.is_poisoned());

        // The character keeps growing under the old language
        session.add_stroke(&pts(&[(0.0, 120.0), (80.0, 120.0)])).unwrap();
        assert_eq!(session.character().stroke_count(), 2);
    }

    #[test]
    fn test_empty_stroke_ignored() {
        let mut session = latin_session();
        assert_eq!(session.add_stroke(&[]).unwrap(), StrokeOutcome::Ignored);
        assert!(session.character().is_empty());
    }

    #[test]
    fn test_select() {
        let mut session = latin_session();
        assert!(matches!(session.select(0), Err(Error::CandidateOutOfRange { index: 0, len: 0 })));
        session.add_stroke(&pts(&[(0.0, 0.0), (0.0, 120.0), (80.0, 120.0)])).unwrap();
        let picked = session.select(0).unwrap();
        assert_eq!(picked.glyph, 'L');
        assert!(session.character().is_empty());
        assert!(session.candidates().is_empty());
    }
}
