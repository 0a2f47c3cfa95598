//! Extraction statistics
//!
//! Counters for one article or a whole run.

use serde::{Deserialize, Serialize};

use crate::reconstruct::{Reconstruction, SkipReason};

// ============================================================================
// Extraction Stats
// ============================================================================

/// Counts collected while processing articles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Articles processed
    pub articles: usize,
    /// Sentences selected by a streak cue
    pub streak_sentences: usize,
    /// Sentences selected as opening or record sentences
    pub record_sentences: usize,
    /// Cue tokens located in selected sentences
    pub cue_tokens: usize,
    /// Cue tokens whose label has no reconstruction rule
    pub unsupported_roles: usize,
    /// Statements produced
    pub statements: usize,
    /// Prepositional cues not attached to a verb
    pub skipped_indirect: usize,
    /// Cues in clauses with no past-tense verb
    pub skipped_tense: usize,
    /// Cues that resolved to no text at all
    pub skipped_empty: usize,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one reconstruction outcome
    pub fn record(&mut self, outcome: &Reconstruction) {
        match outcome.skip_reason() {
            None => self.statements += 1,
            Some(SkipReason::IndirectAttachment) => self.skipped_indirect += 1,
            Some(SkipReason::TenseNotCovered) => self.skipped_tense += 1,
            Some(SkipReason::EmptyStatement) => self.skipped_empty += 1,
        }
    }

    /// Add another set of counters to this one
    pub fn merge(&mut self, other: &Self) {
        self.articles += other.articles;
        self.streak_sentences += other.streak_sentences;
        self.record_sentences += other.record_sentences;
        self.cue_tokens += other.cue_tokens;
        self.unsupported_roles += other.unsupported_roles;
        self.statements += other.statements;
        self.skipped_indirect += other.skipped_indirect;
        self.skipped_tense += other.skipped_tense;
        self.skipped_empty += other.skipped_empty;
    }

    /// Reconstructions that did not produce a statement
    pub fn skipped(&self) -> usize {
        self.skipped_indirect + self.skipped_tense + self.skipped_empty
    }

    /// Share of attempted reconstructions that produced a statement
    pub fn yield_rate(&self) -> f32 {
        let attempted = self.statements + self.skipped();
        if attempted == 0 {
            0.0
        } else {
            self.statements as f32 / attempted as f32
        }
    }
}

impl std::iter::Sum for ExtractionStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, stats| {
            acc.merge(&stats);
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut stats = ExtractionStats::new();
        stats.record(&Reconstruction::Statement("Jones extended streak ".to_string()));
        stats.record(&Reconstruction::Skipped(SkipReason::TenseNotCovered));
        stats.record(&Reconstruction::Skipped(SkipReason::IndirectAttachment));

        assert_eq!(stats.statements, 1);
        assert_eq!(stats.skipped_tense, 1);
        assert_eq!(stats.skipped_indirect, 1);
        assert_eq!(stats.skipped(), 2);
        assert!((stats.yield_rate() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_merge_and_sum() {
        let a = ExtractionStats {
            articles: 1,
            statements: 2,
            ..Default::default()
        };
        let b = ExtractionStats {
            articles: 1,
            cue_tokens: 4,
            ..Default::default()
        };
        let total: ExtractionStats = vec![a, b].into_iter().sum();
        assert_eq!(total.articles, 2);
        assert_eq!(total.statements, 2);
        assert_eq!(total.cue_tokens, 4);
    }

    #[test]
    fn test_empty_yield_rate() {
        assert_eq!(ExtractionStats::new().yield_rate(), 0.0);
    }
}
