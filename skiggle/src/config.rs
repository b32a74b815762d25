//! Recognizer tuning parameters
//!
//! All thresholds used by the normalizer, the extractor and the matcher live
//! here so a host can override them from a JSON file. Missing keys fall back
//! to the defaults.

use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::error::{Error, Result};

pub const DEFAULT_CLEAR_RATIO_THRESHOLD: f32 = 2.0;
pub const DEFAULT_MIN_SCORE: f32 = 0.1;
pub const DEFAULT_MAX_CANDIDATES: usize = 10;
pub const DEFAULT_TOUCH_TOLERANCE: f32 = 4.0;
pub const DEFAULT_DOT_MAX_LENGTH: f32 = 8.0;
pub const DEFAULT_MIN_SEGMENT_LENGTH: f32 = 12.5;
pub const DEFAULT_MIN_SEGMENT_FRACTION: f32 = 0.08;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    /// A stroke whose length / (width + height) exceeds this is a clear gesture
    pub clear_ratio_threshold: f32,
    /// Candidates scoring below this are not reported
    pub min_score: f32,
    /// Upper bound on the ranked list
    pub max_candidates: usize,
    /// Samples closer than this on both axes to the last kept sample are dropped
    pub touch_tolerance: f32,
    /// Strokes shorter than this are a single dot segment
    pub dot_max_length: f32,
    /// Pivots closer than this to their neighbor are unmarked
    pub min_segment_length: f32,
    /// Runs shorter than this share of the stroke's length are dropped
    pub min_segment_fraction: f32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            clear_ratio_threshold: DEFAULT_CLEAR_RATIO_THRESHOLD,
            min_score: DEFAULT_MIN_SCORE,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            touch_tolerance: DEFAULT_TOUCH_TOLERANCE,
            dot_max_length: DEFAULT_DOT_MAX_LENGTH,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            min_segment_fraction: DEFAULT_MIN_SEGMENT_FRACTION,
        }
    }
}

impl RecognizerConfig {
    pub fn from_json_str(json: &str) -> Result<RecognizerConfig> {
        let config: RecognizerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RecognizerConfig> {
        let reader = BufReader::new(File::open(path)?);
        let config: RecognizerConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.clear_ratio_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "clear_ratio_threshold must be positive, got {}",
                self.clear_ratio_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::InvalidConfig(format!(
                "min_score must be within 0..=1, got {}",
                self.min_score
            )));
        }
        if self.max_candidates == 0 {
            return Err(Error::InvalidConfig("max_candidates must be positive".to_string()));
        }
        if self.touch_tolerance < 0.0
            || self.dot_max_length < 0.0
            || self.min_segment_length < 0.0
        {
            return Err(Error::InvalidConfig("lengths must not be negative".to_string()));
        }
        if !(0.0..1.0).contains(&self.min_segment_fraction) {
            return Err(Error::InvalidConfig(format!(
                "min_segment_fraction must be within 0..1, got {}",
                self.min_segment_fraction
            )));
        }
        Ok(())
    }
}
