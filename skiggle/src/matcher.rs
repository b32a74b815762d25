use log::debug;

use super::config::RecognizerConfig;
use super::error::{Error, Result};
use super::match_collector::MatchCollector;
use super::reference_table::ReferenceTable;
use super::signature::Signature;
use super::*;

/// Scores a character's signature against every compatible reference entry.
///
/// Entries needing fewer strokes than already committed are skipped, since a
/// character only ever gains strokes. Scores are popcount(AND) / popcount(OR).
/// The result holds at most `max_candidates` characters scoring at least
/// `min_score`, best first, and is empty when nothing clears the floor.
pub fn rank(
    signature: &Signature,
    committed_strokes: usize,
    table: &ReferenceTable,
    config: &RecognizerConfig,
) -> Result<Vec<Candidate>> {
    let table_width = table.scheme().bit_width();
    if signature.width() != table_width {
        return Err(Error::SignatureWidthMismatch {
            signature: signature.width(),
            table: table_width,
        });
    }

    let mut res: Vec<Candidate> = Vec::with_capacity(config.max_candidates);
    let mut collector = MatchCollector::new(&mut res, config.max_candidates);
    for entry in table.entries() {
        if (entry.stroke_count as usize) < committed_strokes {
            continue;
        }
        let score = signature.jaccard(&entry.signature);
        if score <= 0.0 || score < config.min_score {
            continue;
        }
        collector.file_match(Candidate {
            glyph: entry.glyph,
            score,
            is_best: false,
        });
    }
    if let Some(best) = res.first_mut() {
        best.is_best = true;
    }
    debug!(
        "{} strokes: {} candidates, best {:?}",
        committed_strokes,
        res.len(),
        res.first().map(|c| (c.glyph, c.score))
    );
    Ok(res)
}
