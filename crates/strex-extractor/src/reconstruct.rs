//! Statement reconstruction around a cue token
//!
//! A statement is assembled from the cue token's clause: the subject, the
//! governing verb in past tense, the cue itself and any prepositional
//! context. Each non-empty component is followed by one space, so a
//! statement ends with a trailing space.

use serde::{Deserialize, Serialize};
use strex_core::{DepLabel, Document, Inflector};

use crate::inflect::RuleInflector;
use crate::prepositions::PrepositionalPhraseCollector;
use crate::roles::CueRole;
use crate::subject::resolve_subject;

/// Why no statement was produced for a cue token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The preposition governing the cue does not hang off a verb
    IndirectAttachment,
    /// Neither the verb nor its head is past tense or past participle
    TenseNotCovered,
    /// Every component resolved to empty text
    EmptyStatement,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndirectAttachment => write!(f, "indirect attachment"),
            Self::TenseNotCovered => write!(f, "tense not covered"),
            Self::EmptyStatement => write!(f, "empty statement"),
        }
    }
}

/// Outcome of reconstructing one cue token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconstruction {
    Statement(String),
    Skipped(SkipReason),
}

impl Reconstruction {
    pub fn is_statement(&self) -> bool {
        matches!(self, Self::Statement(_))
    }

    /// Statement text, or an empty string when skipped
    pub fn as_text(&self) -> &str {
        match self {
            Self::Statement(text) => text,
            Self::Skipped(_) => "",
        }
    }

    pub fn into_statement(self) -> Option<String> {
        match self {
            Self::Statement(text) => Some(text),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Statement(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

/// Builds statement fragments for located cue tokens
#[derive(Debug, Clone)]
pub struct StatementReconstructor<I = RuleInflector> {
    inflector: I,
    prepositions: PrepositionalPhraseCollector,
}

impl StatementReconstructor<RuleInflector> {
    pub fn new() -> Self {
        Self::with_inflector(RuleInflector::new())
    }
}

impl Default for StatementReconstructor<RuleInflector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Inflector> StatementReconstructor<I> {
    pub fn with_inflector(inflector: I) -> Self {
        Self {
            inflector,
            prepositions: PrepositionalPhraseCollector::new(),
        }
    }

    pub fn with_prepositions(mut self, prepositions: PrepositionalPhraseCollector) -> Self {
        self.prepositions = prepositions;
        self
    }

    pub fn inflector(&self) -> &I {
        &self.inflector
    }

    /// Reconstruct the statement carried by the cue token at `token`
    pub fn reconstruct(&self, doc: &Document, token: usize, role: CueRole) -> Reconstruction {
        let is_prep_obj = role == CueRole::PrepositionalObject;

        let (verb, prep) = if is_prep_obj {
            let prep = doc.head(token);
            let verb = doc.head(prep);
            if !doc[verb].is_verb() {
                tracing::debug!(
                    token = %doc[token].text,
                    head = %doc[verb].text,
                    "Preposition is not attached to a verb"
                );
                return Reconstruction::Skipped(SkipReason::IndirectAttachment);
            }
            (verb, Some(prep))
        } else {
            (doc.head(token), None)
        };

        if !doc[verb].is_past() && !doc[doc.head(verb)].is_past() {
            tracing::debug!(
                token = %doc[token].text,
                verb = %doc[verb].text,
                "Sentence structure not covered"
            );
            return Reconstruction::Skipped(SkipReason::TenseNotCovered);
        }

        let subject = resolve_subject(doc, verb);
        let verb_text = if doc[verb].is_past_tense() {
            doc[verb].text.clone()
        } else {
            self.inflector.past_tense(&doc[verb])
        };
        let prep_info = self.prepositions.render(doc, token, verb);
        let cue = doc[token].text.as_str();

        let components: Vec<&str> = match prep {
            _ if doc[token].dep == DepLabel::NominalSubject => {
                vec![cue, verb_text.as_str(), prep_info.as_str()]
            }
            Some(prep) => {
                let object = doc
                    .rights(verb)
                    .iter()
                    .find(|&&child| doc[child].dep == DepLabel::DirectObject)
                    .map(|&child| doc[child].text.as_str())
                    .unwrap_or_default();
                vec![
                    subject.as_str(),
                    verb_text.as_str(),
                    object,
                    doc[prep].text.as_str(),
                    cue,
                    prep_info.as_str(),
                ]
            }
            None => vec![subject.as_str(), verb_text.as_str(), cue, prep_info.as_str()],
        };

        let statement = join_components(&components);
        if statement.is_empty() {
            Reconstruction::Skipped(SkipReason::EmptyStatement)
        } else {
            Reconstruction::Statement(statement)
        }
    }
}

/// Each non-empty component followed by a single space
fn join_components(components: &[&str]) -> String {
    let mut out = String::new();
    for component in components.iter().filter(|c| !c.is_empty()) {
        out.push_str(component);
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strex_core::{DocumentBuilder, Token};

    /// Jones extended his streak to 10 games.
    fn extended_streak() -> Document {
        DocumentBuilder::new()
            .sentence(&[
                ("Jones", "PROPN", "NNP", "nsubj", 1),
                ("extended", "VERB", "VBD", "ROOT", 1),
                ("his", "PRON", "PRP$", "poss", 3),
                ("streak", "NOUN", "NN", "dobj", 1),
                ("to", "ADP", "IN", "prep", 3),
                ("10", "NUM", "CD", "nummod", 6),
                ("games", "NOUN", "NNS", "pobj", 4),
                (".", "PUNCT", ".", "punct", 1),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_direct_object_statement() {
        let doc = extended_streak();
        let result = StatementReconstructor::new().reconstruct(&doc, 3, CueRole::DirectObjectLike);
        assert_eq!(
            result,
            Reconstruction::Statement("Jones extended streak to games ".to_string())
        );
    }

    #[test]
    fn test_preposition_attached_to_noun_is_skipped() {
        // They recalled the end of the streak.
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("They", "PRON", "PRP", "nsubj", 1),
                ("recalled", "VERB", "VBD", "ROOT", 1),
                ("the end", "NOUN", "NN", "dobj", 1),
                ("of", "ADP", "IN", "prep", 2),
                ("the streak", "NOUN", "NN", "pobj", 3),
                (".", "PUNCT", ".", "punct", 1),
            ])
            .build()
            .unwrap();
        let result =
            StatementReconstructor::new().reconstruct(&doc, 4, CueRole::PrepositionalObject);
        assert_eq!(result, Reconstruction::Skipped(SkipReason::IndirectAttachment));
        assert_eq!(result.as_text(), "");
    }

    #[test]
    fn test_prepositional_object_template() {
        // Boston beat Miami for its 10th straight win at home.
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("Boston", "PROPN", "NNP", "nsubj", 1),
                ("beat", "VERB", "VBD", "ROOT", 1),
                ("Miami", "PROPN", "NNP", "dobj", 1),
                ("for", "ADP", "IN", "prep", 1),
                ("its 10th straight win", "NOUN", "NN", "pobj", 3),
                ("at", "ADP", "IN", "prep", 1),
                ("home", "NOUN", "NN", "pobj", 5),
                (".", "PUNCT", ".", "punct", 1),
            ])
            .build()
            .unwrap();
        let result =
            StatementReconstructor::new().reconstruct(&doc, 4, CueRole::PrepositionalObject);
        assert_eq!(
            result.as_text(),
            "Boston beat Miami for its 10th straight win at home "
        );
    }

    #[test]
    fn test_subject_cue_template() {
        // The winning streak ended at Denver.
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("The winning streak", "NOUN", "NN", "nsubj", 1),
                ("ended", "VERB", "VBD", "ROOT", 1),
                ("at", "ADP", "IN", "prep", 1),
                ("Denver", "PROPN", "NNP", "pobj", 2),
                (".", "PUNCT", ".", "punct", 1),
            ])
            .build()
            .unwrap();
        let result = StatementReconstructor::new().reconstruct(&doc, 0, CueRole::DirectObjectLike);
        assert_eq!(result.as_text(), "The winning streak ended at Denver ");
    }

    #[test]
    fn test_participle_is_inflected() {
        // The Nets have extended the streak.
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("The Nets", "PROPN", "NNPS", "nsubj", 2),
                ("have", "AUX", "VBP", "aux", 2),
                ("extended", "VERB", "VBN", "ROOT", 2),
                ("the streak", "NOUN", "NN", "dobj", 2),
            ])
            .build()
            .unwrap();
        let result = StatementReconstructor::new().reconstruct(&doc, 3, CueRole::DirectObjectLike);
        assert_eq!(result.as_text(), "The Nets extended the streak ");
    }

    #[test]
    fn test_present_tense_is_not_covered() {
        // They extend the streak.
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("They", "PRON", "PRP", "nsubj", 1),
                ("extend", "VERB", "VBP", "ROOT", 1),
                ("the streak", "NOUN", "NN", "dobj", 1),
            ])
            .build()
            .unwrap();
        let result = StatementReconstructor::new().reconstruct(&doc, 2, CueRole::DirectObjectLike);
        assert_eq!(result, Reconstruction::Skipped(SkipReason::TenseNotCovered));
    }

    struct Shouting;

    impl Inflector for Shouting {
        fn past_tense(&self, verb: &Token) -> String {
            format!("{}ED", verb.text.to_uppercase())
        }
    }

    #[test]
    fn test_custom_inflector_used_for_non_past_verb() {
        // Smith helped extend the streak.
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("Smith", "PROPN", "NNP", "nsubj", 1),
                ("helped", "VERB", "VBD", "ROOT", 1),
                ("extend", "VERB", "VB", "xcomp", 1),
                ("the streak", "NOUN", "NN", "dobj", 2),
            ])
            .build()
            .unwrap();
        let result =
            StatementReconstructor::with_inflector(Shouting).reconstruct(&doc, 3, CueRole::DirectObjectLike);
        assert_eq!(result.as_text(), "Smith EXTENDED the streak ");
    }

    #[test]
    fn test_join_components() {
        assert_eq!(join_components(&["a", "", "b"]), "a b ");
        assert_eq!(join_components(&["", ""]), "");
    }

    fn tag() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["VBD", "VBN", "VB", "VBZ", "VBP", "NN"])
    }

    proptest! {
        #[test]
        fn prop_tense_guard(verb_tag in tag(), root_tag in tag()) {
            // Subject <- verb -> cue, verb hanging off a root verb
            let doc = DocumentBuilder::new()
                .sentence(&[
                    ("Fans", "NOUN", "NNS", "ROOT", 0),
                    ("Smith", "PROPN", "NNP", "nsubj", 2),
                    ("kept", "VERB", verb_tag, "relcl", 0),
                    ("the streak", "NOUN", "NN", "dobj", 2),
                ])
                .build()
                .unwrap();
            let doc = Document::new(
                doc.tokens()
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(i, t)| if i == 0 { t.with_tag(root_tag) } else { t })
                    .collect(),
                doc.sentences().to_vec(),
            )
            .unwrap();

            let result = StatementReconstructor::new().reconstruct(&doc, 3, CueRole::DirectObjectLike);
            let covered = ["VBD", "VBN"].contains(&verb_tag) || ["VBD", "VBN"].contains(&root_tag);
            prop_assert_eq!(result.is_statement(), covered);
            if !covered {
                prop_assert_eq!(result.as_text(), "");
            }
        }

        #[test]
        fn prop_statement_ends_with_single_space(
            words in prop::collection::vec("[a-z]{1,6}", 4),
        ) {
            let doc = DocumentBuilder::new()
                .sentence(&[
                    (words[0].as_str(), "PROPN", "NNP", "nsubj", 1),
                    (words[1].as_str(), "VERB", "VBD", "ROOT", 1),
                    (words[2].as_str(), "NOUN", "NN", "dobj", 1),
                    ("at", "ADP", "IN", "prep", 1),
                    (words[3].as_str(), "NOUN", "NN", "pobj", 3),
                ])
                .build()
                .unwrap();
            let result = StatementReconstructor::new().reconstruct(&doc, 2, CueRole::DirectObjectLike);
            let text = result.as_text();
            prop_assert!(text.ends_with(' '));
            prop_assert!(!text.ends_with("  "));
            prop_assert!(!text.contains("  "));
        }
    }
}
