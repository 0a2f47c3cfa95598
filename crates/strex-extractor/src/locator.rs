//! Cue token location inside selected sentences

use strex_core::{Document, Sentence};

use crate::matcher::{Matcher, PatternElement, TokenPattern, TokenPredicate};
use crate::selector::STREAK_CUES;

/// Pattern identifier for streak cue tokens
pub const STREAK_TOKEN_PATTERN: &str = "streaks";

/// Finds the tokens that made a sentence a streak candidate
///
/// Matching is a case-insensitive substring search, so merged noun-phrase
/// tokens such as "a five-game winning streak" are found too.
#[derive(Debug, Clone)]
pub struct CueTokenLocator {
    matcher: Matcher,
}

impl CueTokenLocator {
    /// Create a locator for the default streak cues
    pub fn new() -> Self {
        let cues: Vec<String> = STREAK_CUES.iter().map(|s| s.to_string()).collect();
        Self::with_cues(&cues)
    }

    /// Create a locator for custom cue words, matched literally
    pub fn with_cues(cues: &[String]) -> Self {
        let needles = cues
            .iter()
            .map(|cue| cue.to_lowercase())
            .filter(|cue| !cue.is_empty())
            .collect();

        let mut matcher = Matcher::new();
        matcher.add(
            STREAK_TOKEN_PATTERN,
            vec![TokenPattern::new(vec![PatternElement::new(
                TokenPredicate::LowerContains(needles),
            )])],
        );
        Self { matcher }
    }

    /// Cue tokens of one sentence, in document order
    pub fn locate_in_sentence(&self, doc: &Document, sentence: Sentence) -> Vec<usize> {
        self.matcher
            .matches_in(doc, sentence.start, sentence.end)
            .into_iter()
            .map(|hit| hit.start)
            .collect()
    }

    /// Cue tokens of several sentences, sentence by sentence
    pub fn locate_in_sentences(&self, doc: &Document, sentences: &[Sentence]) -> Vec<usize> {
        sentences
            .iter()
            .flat_map(|&sentence| self.locate_in_sentence(doc, sentence))
            .collect()
    }
}

impl Default for CueTokenLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_core::DocumentBuilder;

    fn doc() -> Document {
        DocumentBuilder::new()
            .sentence(&[
                ("Boston", "PROPN", "NNP", "nsubj", 1),
                ("won", "VERB", "VBD", "ROOT", 1),
                ("its", "PRON", "PRP$", "poss", 4),
                ("fourth", "ADJ", "JJ", "amod", 4),
                ("STRAIGHT", "ADJ", "JJ", "amod", 5),
                ("game", "NOUN", "NN", "dobj", 1),
            ])
            .sentence(&[
                ("a five-game winning streak", "NOUN", "NN", "nsubj", 1),
                ("ended", "VERB", "VBD", "ROOT", 1),
                ("after", "ADP", "IN", "prep", 1),
                ("consecutive", "ADJ", "JJ", "amod", 4),
                ("losses", "NOUN", "NNS", "pobj", 2),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_locates_per_sentence() {
        let doc = doc();
        let locator = CueTokenLocator::new();
        assert_eq!(locator.locate_in_sentence(&doc, doc.sentences()[0]), vec![4]);
        assert_eq!(locator.locate_in_sentence(&doc, doc.sentences()[1]), vec![6, 9]);
    }

    #[test]
    fn test_locates_across_sentences_in_order() {
        let doc = doc();
        let locator = CueTokenLocator::new();
        assert_eq!(
            locator.locate_in_sentences(&doc, doc.sentences()),
            vec![4, 6, 9]
        );
        assert!(locator.locate_in_sentences(&doc, &[]).is_empty());
    }

    #[test]
    fn test_custom_cues_are_literal() {
        let locator = CueTokenLocator::with_cues(&["Run".to_string(), "w.l".to_string()]);
        let doc = DocumentBuilder::new()
            .sentence(&[("wal", "X", "X", "ROOT", 0), ("Runs", "X", "X", "dep", 0)])
            .build()
            .unwrap();
        assert_eq!(locator.locate_in_sentences(&doc, doc.sentences()), vec![1]);
    }

    #[test]
    fn test_empty_cue_matches_nothing() {
        let locator = CueTokenLocator::with_cues(&[String::new()]);
        let doc = doc();
        assert!(locator.locate_in_sentences(&doc, doc.sentences()).is_empty());
    }
}
