use super::*;

// Keeps the best `max` candidates, one per character, ordered by descending
// score and then by character.
pub struct MatchCollector<'a> {
    max: usize,
    matches: &'a mut Vec<Candidate>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(matches: &'a mut Vec<Candidate>, max: usize) -> MatchCollector<'a> {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        assert!(matches.is_empty(), "The pre-existing matches vector must be empty.");
        MatchCollector { max, matches }
    }

    // True if `a` ranks ahead of `b`
    fn ranks_before(a: &Candidate, b: &Candidate) -> bool {
        a.score > b.score || (a.score == b.score && a.glyph < b.glyph)
    }

    fn remove_existing_lower(&mut self, mc: &Candidate) -> bool {
        let ix = match self.matches.iter().position(|x| x.glyph == mc.glyph) {
            Some(ix) => ix,
            // Not there yet: match doesn't need to be skipped
            None => return false,
        };
        // New score is not better: skip new match
        if mc.score <= self.matches[ix].score {
            return true;
        }
        self.matches.remove(ix);
        false
    }

    pub fn file_match(&mut self, mc: Candidate) {
        // Already at limit: don't bother if new match ranks behind the current last
        if let Some(last) = self.matches.last() {
            if self.matches.len() == self.max && !Self::ranks_before(&mc, last) {
                return;
            }
        }
        // Already there with a score at least as high
        if self.remove_existing_lower(&mc) {
            return;
        }
        match self.matches.iter().position(|x| Self::ranks_before(&mc, x)) {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }
}
