//! Token pattern matcher
//!
//! Patterns are plain data: a sequence of elements, each a conjunction of
//! token predicates with an optional quantifier. Matching backtracks over
//! the optional elements inside a token window.

use regex::Regex;
use strex_core::Document;

/// Condition on a single token
#[derive(Debug, Clone)]
pub enum TokenPredicate {
    /// Exact surface text
    Orth(String),
    /// Exact surface text, one of several
    OrthIn(Vec<String>),
    /// Lowercased text, one of several
    LowerIn(Vec<String>),
    /// Lowercased text contains one of several (lowercase) substrings
    LowerContains(Vec<String>),
    /// Regex search against the surface text
    TextRegex(Regex),
    /// Every cased character is uppercase
    IsUpper,
    /// First token of its sentence
    IsSentStart,
    /// Exact fine-grained tag
    Tag(String),
}

impl TokenPredicate {
    pub fn orth(text: &str) -> Self {
        Self::Orth(text.to_string())
    }

    pub fn orth_in(texts: &[&str]) -> Self {
        Self::OrthIn(texts.iter().map(|s| s.to_string()).collect())
    }

    pub fn tag(tag: &str) -> Self {
        Self::Tag(tag.to_string())
    }

    pub fn test(&self, doc: &Document, index: usize) -> bool {
        let token = &doc[index];
        match self {
            Self::Orth(text) => token.text == *text,
            Self::OrthIn(texts) => texts.iter().any(|t| *t == token.text),
            Self::LowerIn(texts) => {
                let lower = token.lower();
                texts.iter().any(|t| *t == lower)
            }
            Self::LowerContains(needles) => {
                let lower = token.lower();
                needles.iter().any(|n| lower.contains(n.as_str()))
            }
            Self::TextRegex(regex) => regex.is_match(&token.text),
            Self::IsUpper => token.is_upper(),
            Self::IsSentStart => doc.is_sent_start(index),
            Self::Tag(tag) => token.tag == *tag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    Optional,
}

/// One position of a pattern
#[derive(Debug, Clone)]
pub struct PatternElement {
    predicates: Vec<TokenPredicate>,
    quantifier: Quantifier,
}

impl PatternElement {
    pub fn new(predicate: TokenPredicate) -> Self {
        Self {
            predicates: vec![predicate],
            quantifier: Quantifier::One,
        }
    }

    /// Add another predicate the same token must satisfy
    pub fn and(mut self, predicate: TokenPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn optional(mut self) -> Self {
        self.quantifier = Quantifier::Optional;
        self
    }

    fn test(&self, doc: &Document, index: usize) -> bool {
        self.predicates.iter().all(|p| p.test(doc, index))
    }
}

/// Sequence of elements matched left to right
#[derive(Debug, Clone)]
pub struct TokenPattern {
    elements: Vec<PatternElement>,
}

impl TokenPattern {
    pub fn new(elements: Vec<PatternElement>) -> Self {
        Self { elements }
    }

    /// Every non-empty match end for a match starting at `start`,
    /// staying below `limit`. Sorted and deduplicated.
    pub fn ends_at(&self, doc: &Document, start: usize, limit: usize) -> Vec<usize> {
        let mut ends = Vec::new();
        match_from(&self.elements, doc, start, limit, &mut ends);
        ends.retain(|&end| end > start);
        ends.sort_unstable();
        ends.dedup();
        ends
    }
}

fn match_from(
    elements: &[PatternElement],
    doc: &Document,
    pos: usize,
    limit: usize,
    ends: &mut Vec<usize>,
) {
    let Some((first, rest)) = elements.split_first() else {
        ends.push(pos);
        return;
    };

    if pos < limit && first.test(doc, pos) {
        match_from(rest, doc, pos + 1, limit, ends);
    }
    if first.quantifier == Quantifier::Optional {
        match_from(rest, doc, pos, limit, ends);
    }
}

/// A pattern hit over `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub pattern: String,
    pub start: usize,
    pub end: usize,
}

/// Named groups of alternative patterns
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    patterns: Vec<(String, Vec<TokenPattern>)>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register alternatives under an identifier
    pub fn add(&mut self, id: impl Into<String>, patterns: Vec<TokenPattern>) {
        self.patterns.push((id.into(), patterns));
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All matches in the whole document
    pub fn matches(&self, doc: &Document) -> Vec<Match> {
        self.matches_in(doc, 0, doc.len())
    }

    /// All matches fully inside `[start, end)`, sorted by start then end
    pub fn matches_in(&self, doc: &Document, start: usize, end: usize) -> Vec<Match> {
        let mut found = Vec::new();
        for pos in start..end {
            for (id, alternatives) in &self.patterns {
                for pattern in alternatives {
                    for match_end in pattern.ends_at(doc, pos, end) {
                        found.push(Match {
                            pattern: id.clone(),
                            start: pos,
                            end: match_end,
                        });
                    }
                }
            }
        }
        found.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        found.dedup();
        found
    }

    /// First registered pattern matching at `start`, taking its longest
    /// alternative
    pub fn first_anchored(&self, doc: &Document, start: usize, end: usize) -> Option<Match> {
        self.patterns.iter().find_map(|(id, alternatives)| {
            alternatives
                .iter()
                .filter_map(|pattern| pattern.ends_at(doc, start, end).last().copied())
                .max()
                .map(|match_end| Match {
                    pattern: id.clone(),
                    start,
                    end: match_end,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_core::DocumentBuilder;

    fn words(texts: &[&str]) -> Document {
        let rows: Vec<_> = texts
            .iter()
            .map(|t| (*t, "NOUN", "NN", "dep", 0usize))
            .collect();
        DocumentBuilder::new().sentence(&rows).build().unwrap()
    }

    fn hyphenated_pattern() -> TokenPattern {
        TokenPattern::new(vec![
            PatternElement::new(TokenPredicate::orth_in(&["career", "season"])),
            PatternElement::new(TokenPredicate::orth("-")).optional(),
            PatternElement::new(TokenPredicate::orth_in(&["high", "best"])),
        ])
    }

    #[test]
    fn test_optional_element_both_ways() {
        let mut matcher = Matcher::new();
        matcher.add("records", vec![hyphenated_pattern()]);

        let doc = words(&["a", "career", "-", "high", "and", "season", "best"]);
        let found = matcher.matches(&doc);

        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start, found[0].end), (1, 4));
        assert_eq!((found[1].start, found[1].end), (5, 7));
        assert_eq!(found[0].pattern, "records");
    }

    #[test]
    fn test_window_limits_matches() {
        let mut matcher = Matcher::new();
        matcher.add("records", vec![hyphenated_pattern()]);

        let doc = words(&["career", "-", "high"]);
        assert!(matcher.matches_in(&doc, 0, 2).is_empty());
        assert_eq!(matcher.matches_in(&doc, 0, 3).len(), 1);
    }

    #[test]
    fn test_backtracks_over_optional() {
        // "X"? "X" must match a single X by skipping the optional
        let pattern = TokenPattern::new(vec![
            PatternElement::new(TokenPredicate::orth("X")).optional(),
            PatternElement::new(TokenPredicate::orth("X")),
        ]);
        let doc = words(&["X", "y"]);
        assert_eq!(pattern.ends_at(&doc, 0, doc.len()), vec![1]);

        let doc = words(&["X", "X"]);
        assert_eq!(pattern.ends_at(&doc, 0, doc.len()), vec![1, 2]);
    }

    #[test]
    fn test_first_anchored_respects_registration_order() {
        let mut matcher = Matcher::new();
        matcher.add(
            "long",
            vec![TokenPattern::new(vec![
                PatternElement::new(TokenPredicate::orth("a")),
                PatternElement::new(TokenPredicate::orth("b")),
                PatternElement::new(TokenPredicate::orth("c")),
            ])],
        );
        matcher.add(
            "short",
            vec![TokenPattern::new(vec![PatternElement::new(
                TokenPredicate::orth("a"),
            )])],
        );

        let doc = words(&["a", "b", "x"]);
        let hit = matcher.first_anchored(&doc, 0, doc.len()).unwrap();
        assert_eq!(hit.pattern, "short");

        let doc = words(&["a", "b", "c"]);
        let hit = matcher.first_anchored(&doc, 0, doc.len()).unwrap();
        assert_eq!((hit.pattern.as_str(), hit.end), ("long", 3));

        assert!(matcher.first_anchored(&doc, 1, doc.len()).is_none());
    }

    #[test]
    fn test_conjunction_of_predicates() {
        let element = PatternElement::new(TokenPredicate::IsUpper).and(TokenPredicate::IsSentStart);
        let doc = words(&["NBA", "NFL"]);
        assert!(element.test(&doc, 0));
        assert!(!element.test(&doc, 1));
    }

    #[test]
    fn test_regex_and_lower_predicates() {
        let doc = words(&["Winning-Streak", "STRAIGHT"]);
        let regex = TokenPredicate::TextRegex(Regex::new("(?i)streak").unwrap());
        assert!(regex.test(&doc, 0));
        assert!(!regex.test(&doc, 1));

        let lower = TokenPredicate::LowerIn(vec!["straight".to_string()]);
        assert!(lower.test(&doc, 1));

        let contains = TokenPredicate::LowerContains(vec!["streak".to_string()]);
        assert!(contains.test(&doc, 0));
        assert!(!contains.test(&doc, 1));
    }
}
