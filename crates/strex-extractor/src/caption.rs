//! Dateline and wire-tag removal
//!
//! Agency copy often opens with `LOS ANGELES --` or `TIP - INS`. The
//! stripper removes such a run from the start of each sentence and joins
//! the sentences back into one text.

use strex_core::document::TAG_PROPER_NOUN;
use strex_core::{Document, Sentence};

use crate::matcher::{Matcher, PatternElement, TokenPattern, TokenPredicate};

/// Pattern identifiers in priority order
pub const CAPTION_PATTERNS: [&str; 3] = ["dateline", "dateline_location", "wire_tag"];

const DASHES: [&str; 2] = ["—", "-"];

/// Removes leading caption runs from sentences
#[derive(Debug, Clone)]
pub struct CaptionStripper {
    matcher: Matcher,
}

impl CaptionStripper {
    pub fn new() -> Self {
        let caps_start = || {
            PatternElement::new(TokenPredicate::IsUpper).and(TokenPredicate::IsSentStart)
        };
        let caps_optional = || PatternElement::new(TokenPredicate::IsUpper).optional();
        let double_hyphen = || PatternElement::new(TokenPredicate::orth("--"));
        let dash_optional = || PatternElement::new(TokenPredicate::orth_in(&DASHES)).optional();

        let mut matcher = Matcher::new();
        // LOS ANGELES -- (—)
        matcher.add(
            CAPTION_PATTERNS[0],
            vec![TokenPattern::new(vec![
                caps_start(),
                caps_optional(),
                double_hyphen(),
                dash_optional(),
            ])],
        );
        // PORTLAND, Ore. -- (—)
        matcher.add(
            CAPTION_PATTERNS[1],
            vec![TokenPattern::new(vec![
                caps_start(),
                caps_optional(),
                PatternElement::new(TokenPredicate::orth(",")),
                PatternElement::new(TokenPredicate::tag(TAG_PROPER_NOUN)),
                double_hyphen(),
                dash_optional(),
            ])],
        );
        matcher.add(
            CAPTION_PATTERNS[2],
            vec![TokenPattern::new(vec![
                PatternElement::new(TokenPredicate::orth("TIP")),
                PatternElement::new(TokenPredicate::orth("-")),
                PatternElement::new(TokenPredicate::orth("INS")),
            ])],
        );
        Self { matcher }
    }

    /// Sentence text with a leading caption removed
    ///
    /// One caption per call: stacked datelines such as `BOSTON -- MIAMI --`
    /// lose only the first, and a second pass removes the next.
    pub fn strip_sentence(&self, doc: &Document, sentence: Sentence) -> String {
        match self
            .matcher
            .first_anchored(doc, sentence.start, sentence.end)
        {
            Some(hit) => {
                tracing::debug!(
                    pattern = %hit.pattern,
                    caption = %doc.span_text(hit.start, hit.end),
                    "Stripped caption"
                );
                doc.span_text(hit.end, sentence.end)
            }
            None => doc.sentence_text(sentence),
        }
    }

    /// Stripped texts of the given sentences, in order
    pub fn strip_sentences(&self, doc: &Document, sentences: &[Sentence]) -> Vec<String> {
        sentences
            .iter()
            .map(|&sentence| self.strip_sentence(doc, sentence))
            .collect()
    }

    /// All sentences stripped and joined with single spaces
    pub fn strip_document(&self, doc: &Document) -> String {
        self.strip_sentences(doc, doc.sentences()).join(" ")
    }
}

impl Default for CaptionStripper {
    fn default() -> Self {
        Self::new()
    }
}
