//! Per-language tables of known character signatures
//!
//! A table is built by running each glyph's canonical strokes through the
//! same normalizer, extractor and encoder that process live ink, so a table
//! and the signatures compared against it always share one encoding scheme.

use log::{info, warn};
use serde_derive::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::config::RecognizerConfig;
use super::entities::Segment;
use super::error::{Error, Result};
use super::language::{EncodingScheme, Language};
use super::normalizer::normalize;
use super::segment_extractor::extract;
use super::signature::{encode, Signature};
use super::*;

static LATIN_TEMPLATES: &str = include_str!("../data/latin.json");
static CHINESE_TEMPLATES: &str = include_str!("../data/chinese.json");

/// Canonical stroke sequence of one glyph
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct GlyphTemplate {
    pub glyph: char,
    // Strokes in writing order; each point is [x, y]
    pub strokes: Vec<Vec<[f32; 2]>>,
}

impl GlyphTemplate {
    pub fn stroke_points(&self) -> Vec<Vec<Point>> {
        self.strokes
            .iter()
            .map(|stroke| stroke.iter().map(|&[x, y]| Point { x, y }).collect())
            .collect()
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct TemplateSet {
    pub language: Language,
    pub glyphs: Vec<GlyphTemplate>,
}

impl TemplateSet {
    pub fn bundled(language: Language) -> Result<TemplateSet> {
        let json = match language {
            Language::Latin => LATIN_TEMPLATES,
            Language::Chinese => CHINESE_TEMPLATES,
        };
        TemplateSet::from_json_str(json)
    }

    pub fn from_json_str(json: &str) -> Result<TemplateSet> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<TemplateSet> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct ReferenceEntry {
    pub glyph: char,
    pub language: Language,
    pub stroke_count: u16,
    pub signature: Signature,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct ReferenceTable {
    scheme: EncodingScheme,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    /// Builds the table for `language` from its bundled templates.
    pub fn for_language(language: Language, config: &RecognizerConfig) -> Result<ReferenceTable> {
        ReferenceTable::build(&TemplateSet::bundled(language)?, config)
    }

    pub fn build(templates: &TemplateSet, config: &RecognizerConfig) -> Result<ReferenceTable> {
        let language = templates.language;
        let scheme = language.scheme();
        let mut entries: Vec<ReferenceEntry> = Vec::with_capacity(templates.glyphs.len());
        for template in &templates.glyphs {
            let signature = encode_template(template, language, config)?;
            entries.push(ReferenceEntry {
                glyph: template.glyph,
                language,
                stroke_count: template.strokes.len() as u16,
                signature,
            });
        }
        let table = ReferenceTable { scheme, entries };
        table.warn_duplicates();
        info!(
            "built {} reference table: {} entries, {} bits",
            language,
            table.entries.len(),
            scheme.bit_width()
        );
        Ok(table)
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<ReferenceTable> {
        let table: ReferenceTable = bincode::deserialize(bytes)?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_bincode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn language(&self) -> Language {
        self.scheme.language
    }

    pub fn scheme(&self) -> &EncodingScheme {
        &self.scheme
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // A table read from outside must have been produced by the current encoder
    fn validate(&self) -> Result<()> {
        let expected = self.scheme.language.scheme();
        if self.scheme != expected {
            return Err(Error::SchemeMismatch {
                expected: expected.to_string(),
                found: self.scheme.to_string(),
            });
        }
        for entry in &self.entries {
            if entry.language != expected.language
                || entry.signature.width() != expected.bit_width()
            {
                return Err(Error::SchemeMismatch {
                    expected: expected.to_string(),
                    found: format!(
                        "{} entry {:?} of width {}",
                        entry.language,
                        entry.glyph,
                        entry.signature.width()
                    ),
                });
            }
        }
        Ok(())
    }

    fn warn_duplicates(&self) {
        let mut seen: HashMap<&Signature, char> = HashMap::new();
        for entry in &self.entries {
            if let Some(other) = seen.insert(&entry.signature, entry.glyph) {
                warn!(
                    "{:?} and {:?} share a signature; ties rank by character order",
                    other, entry.glyph
                );
            }
        }
    }
}

fn encode_template(
    template: &GlyphTemplate,
    language: Language,
    config: &RecognizerConfig,
) -> Result<Signature> {
    if template.strokes.is_empty() {
        return Err(Error::InvalidTemplate {
            glyph: template.glyph,
            reason: "no strokes".to_string(),
        });
    }
    let mut segmented: Vec<Vec<Segment>> = Vec::with_capacity(template.strokes.len());
    for (ix, points) in template.stroke_points().iter().enumerate() {
        let normalized = normalize(points, config).map_err(|e| Error::InvalidTemplate {
            glyph: template.glyph,
            reason: format!("stroke {}: {}", ix, e),
        })?;
        if normalized.is_clear_gesture {
            return Err(Error::InvalidTemplate {
                glyph: template.glyph,
                reason: format!("stroke {} reads as a clear gesture", ix),
            });
        }
        segmented.push(extract(&normalized.stroke, language, config));
    }
    Ok(encode(&language.scheme(), &segmented))
}

/// Reference tables available to a session, at most one per language
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    tables: BTreeMap<Language, ReferenceTable>,
}

impl ReferenceLibrary {
    pub fn new() -> ReferenceLibrary {
        ReferenceLibrary::default()
    }

    /// Library holding the bundled table of every supported language
    pub fn bundled(config: &RecognizerConfig) -> Result<ReferenceLibrary> {
        let mut library = ReferenceLibrary::new();
        for language in Language::ALL {
            library.insert(ReferenceTable::for_language(language, config)?);
        }
        Ok(library)
    }

    /// Adds a table, replacing any previous table for the same language
    pub fn insert(&mut self, table: ReferenceTable) {
        self.tables.insert(table.language(), table);
    }

    pub fn table(&self, language: Language) -> Result<&ReferenceTable> {
        self.tables.get(&language).ok_or(Error::MissingReferenceTable(language))
    }
}
