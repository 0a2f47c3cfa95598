//! Candidate sentence selection
//!
//! Two categories are selected per article, streaks and records. Both
//! share one `SelectionAccumulator` so a sentence is never selected twice.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strex_core::{Document, ExtractionConfig, Sentence};

use crate::matcher::{Matcher, PatternElement, TokenPattern, TokenPredicate};

/// Default lowercased words that mark a streak sentence
pub const STREAK_CUES: [&str; 3] = ["straight", "streak", "consecutive"];

/// Pattern identifier for record cues
pub const RECORD_PATTERN: &str = "records";

const RECORD_SCOPES: [&str; 3] = ["career", "season", "franchise"];
const RECORD_KINDS: [&str; 5] = ["best", "high", "worst", "low", "record"];

/// Category of a selected sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueCategory {
    Streak,
    Record,
}

impl std::fmt::Display for CueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Streak => write!(f, "streak"),
            Self::Record => write!(f, "record"),
        }
    }
}

// ============================================================================
// Accumulator
// ============================================================================

/// Sentence starts already selected for one article
///
/// Owned by the caller processing the article; never shared across articles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionAccumulator {
    starts: BTreeSet<usize>,
}

impl SelectionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sentence start; false if it was already selected
    pub fn mark(&mut self, start: usize) -> bool {
        self.starts.insert(start)
    }

    pub fn contains(&self, start: usize) -> bool {
        self.starts.contains(&start)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Selected starts in ascending order
    pub fn starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.starts.iter().copied()
    }
}

// ============================================================================
// Selector
// ============================================================================

/// Sentences selected for one article, per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSentences {
    pub streaks: Vec<Sentence>,
    pub records: Vec<Sentence>,
}

impl SelectedSentences {
    /// Streak sentences followed by record sentences
    pub fn all(&self) -> Vec<Sentence> {
        self.streaks
            .iter()
            .chain(self.records.iter())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.streaks.len() + self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty() && self.records.is_empty()
    }
}

/// Selects streak and record candidate sentences
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    streak_cues: Vec<String>,
    records: Matcher,
}

impl SentenceSelector {
    /// Create a selector with the default streak cues
    pub fn new() -> Self {
        Self::with_streak_cues(STREAK_CUES.iter().map(|s| s.to_string()).collect())
    }

    /// Create a selector with custom streak cues, compared case-insensitively
    pub fn with_streak_cues(streak_cues: Vec<String>) -> Self {
        Self {
            streak_cues: streak_cues.into_iter().map(|cue| cue.to_lowercase()).collect(),
            records: record_matcher(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_streak_cues(config.streak_cues.clone())
    }

    /// Sentences holding a streak cue word, in token order
    pub fn select_streaks(
        &self,
        doc: &Document,
        acc: &mut SelectionAccumulator,
    ) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        for (i, token) in doc.tokens().iter().enumerate() {
            if !self.streak_cues.contains(&token.lower()) {
                continue;
            }
            let sentence = doc.sentence_of(i);
            if acc.mark(sentence.start) {
                sentences.push(sentence);
            }
        }

        tracing::info!("Streaks. Found {} streak(s)", sentences.len());
        sentences
    }

    /// The opening sentence plus sentences holding a record cue
    ///
    /// The opening sentence is skipped only when an earlier call already
    /// selected it.
    pub fn select_records(
        &self,
        doc: &Document,
        acc: &mut SelectionAccumulator,
    ) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let Some(&first) = doc.sentences().first() else {
            tracing::info!("Records. Found 0 record(s)");
            return sentences;
        };

        if acc.mark(first.start) {
            sentences.push(first);
        }
        for hit in self.records.matches(doc) {
            let sentence = doc.sentence_of(hit.start);
            if acc.mark(sentence.start) {
                sentences.push(sentence);
            }
        }

        tracing::info!("Records. Found {} record(s)", sentences.len());
        sentences
    }

    /// Streak selection, then record selection, sharing `acc`
    pub fn select(&self, doc: &Document, acc: &mut SelectionAccumulator) -> SelectedSentences {
        let streaks = self.select_streaks(doc, acc);
        let records = self.select_records(doc, acc);
        SelectedSentences { streaks, records }
    }
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// `{career|season|franchise} ("-")? {best|high|worst|low|record}`
pub fn record_matcher() -> Matcher {
    let mut matcher = Matcher::new();
    matcher.add(
        RECORD_PATTERN,
        vec![TokenPattern::new(vec![
            PatternElement::new(TokenPredicate::orth_in(&RECORD_SCOPES)),
            PatternElement::new(TokenPredicate::orth("-")).optional(),
            PatternElement::new(TokenPredicate::orth_in(&RECORD_KINDS)),
        ])],
    );
    matcher
}
