//! Prepositional phrases around a cue token

use strex_core::{DepLabel, Document, ExtractionConfig};

/// Prepositions of the governing verb that add useful context
pub const PREPOSITION_ALLOW_LIST: [&str; 6] = ["since", "at", "to", "in", "of", "without"];

/// Collects "preposition object" pairs for a cue token and its verb
#[derive(Debug, Clone)]
pub struct PrepositionalPhraseCollector {
    allow_list: Vec<String>,
}

impl PrepositionalPhraseCollector {
    pub fn new() -> Self {
        Self::with_allow_list(
            PREPOSITION_ALLOW_LIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn with_allow_list(allow_list: Vec<String>) -> Self {
        Self { allow_list }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_allow_list(config.preposition_allow_list.clone())
    }

    /// Prepositions to render: the token's own, then the verb's allowed ones
    ///
    /// A verb preposition that is the token's own head is left out, it is
    /// already part of the statement.
    pub fn collect(&self, doc: &Document, token: usize, verb: usize) -> Vec<usize> {
        let own = doc
            .rights(token)
            .iter()
            .copied()
            .filter(|&child| doc[child].dep == DepLabel::Preposition);

        let token_head = doc.head(token);
        let from_verb = doc.rights(verb).iter().copied().filter(move |&child| {
            doc[child].dep == DepLabel::Preposition
                && self.allow_list.contains(&doc[child].text)
                && child != token_head
        });

        own.chain(from_verb).collect()
    }

    /// Render collected prepositions as `"prep object"` pairs joined by spaces
    pub fn render(&self, doc: &Document, token: usize, verb: usize) -> String {
        let mut pairs = Vec::new();
        for prep in self.collect(doc, token, verb) {
            match doc.rights(prep).first() {
                Some(&object) => pairs.push(format!("{} {}", doc[prep].text, doc[object].text)),
                None => tracing::debug!(
                    preposition = %doc[prep].text,
                    "Preposition has no object, skipped"
                ),
            }
        }
        pairs.join(" ")
    }
}

impl Default for PrepositionalPhraseCollector {
    fn default() -> Self {
        Self::new()
    }
}
