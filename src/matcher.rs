//! Watchlist matching over tier-exported patterns using Aho-Corasick.
//!
//! The automaton is built once from a [`TieredPatterns`] export and run over
//! candidate text folded into the same single alphabet. Match offsets are
//! reported in **characters**, not bytes.

use aho_corasick::{AhoCorasick, MatchKind};
use serde::Serialize;

use crate::patterns::{ac_fold, TieredPatterns};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenMatch {
    pub pattern: String,
    /// Recall tier the pattern came from (0 = exact .. 3 = broad).
    pub tier: u8,
    /// Char offsets into the folded text.
    pub start: usize,
    pub end: usize,
}

pub struct WatchlistMatcher {
    automaton: AhoCorasick,
    patterns: Vec<String>,
    tiers: Vec<u8>,
}

/// Translates ascending byte offsets within one string into char offsets.
struct OffsetCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> OffsetCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    /// Char offset for `byte_offset`. Calls must pass non-decreasing offsets
    /// landing on char boundaries.
    fn char_offset(&mut self, byte_offset: usize) -> usize {
        self.chars += self.text[self.byte..byte_offset].chars().count();
        self.byte = byte_offset;
        self.chars
    }
}

impl WatchlistMatcher {
    /// Build the automaton. Leftmost-longest so `ivanov ivan` beats `ivanov`
    /// at the same start.
    pub fn build(tiers: &TieredPatterns) -> Result<Self, aho_corasick::BuildError> {
        let mut patterns = Vec::with_capacity(tiers.len());
        let mut tier_ids = Vec::with_capacity(tiers.len());
        for (pattern, tier) in tiers.all() {
            patterns.push(pattern.to_string());
            tier_ids.push(tier);
        }
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)?;
        Ok(Self {
            automaton,
            patterns,
            tiers: tier_ids,
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Find all pattern hits in `text`, writing results into `out`.
    ///
    /// `out` is cleared first. The input is folded with [`ac_fold`] before
    /// matching, so callers pass raw text in either alphabet.
    pub fn find_into(&self, text: &str, out: &mut Vec<ScreenMatch>) {
        out.clear();
        let folded = ac_fold(text);

        // Match offsets arrive as bytes; a cursor walks the folded string
        // once to translate them (matches are non-overlapping and in order,
        // so the cursor never has to back up).
        let mut cursor = OffsetCursor::new(&folded);
        for mat in self.automaton.find_iter(&folded) {
            let start = cursor.char_offset(mat.start());
            let end = cursor.char_offset(mat.end());
            out.push(ScreenMatch {
                pattern: self.patterns[mat.pattern()].clone(),
                tier: self.tiers[mat.pattern()],
                start,
                end,
            });
        }
    }

    pub fn find(&self, text: &str) -> Vec<ScreenMatch> {
        let mut matches = Vec::new();
        self.find_into(text, &mut matches);
        matches
    }
}
