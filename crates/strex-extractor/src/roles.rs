//! Syntactic role of a cue token

use serde::{Deserialize, Serialize};
use strex_core::{DepLabel, Document, Token};

/// How a cue token attaches to its clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueRole {
    /// Direct object or nominal subject of a verb
    DirectObjectLike,
    /// Object of a preposition
    PrepositionalObject,
}

impl CueRole {
    /// Role for a token, `None` when no rule covers its label
    pub fn classify(token: &Token) -> Option<Self> {
        match token.dep {
            DepLabel::DirectObject | DepLabel::NominalSubject => Some(Self::DirectObjectLike),
            DepLabel::PrepositionalObject => Some(Self::PrepositionalObject),
            _ => None,
        }
    }
}

/// Cue tokens split by role, each group in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGroups {
    pub direct: Vec<usize>,
    pub prepositional: Vec<usize>,
}

/// Split cue tokens by role, dropping unsupported labels
pub fn partition(doc: &Document, cues: &[usize]) -> RoleGroups {
    let mut groups = RoleGroups::default();
    for &index in cues {
        match CueRole::classify(&doc[index]) {
            Some(CueRole::DirectObjectLike) => groups.direct.push(index),
            Some(CueRole::PrepositionalObject) => groups.prepositional.push(index),
            None => {}
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_core::DocumentBuilder;

    #[test]
    fn test_partition_by_label() {
        let doc = DocumentBuilder::new()
            .sentence(&[
                ("streak", "NOUN", "NN", "nsubj", 1),
                ("snapped", "VERB", "VBD", "ROOT", 1),
                ("streak", "NOUN", "NN", "dobj", 1),
                ("during", "ADP", "IN", "prep", 1),
                ("streak", "NOUN", "NN", "pobj", 3),
                ("straight", "ADJ", "JJ", "amod", 2),
            ])
            .build()
            .unwrap();

        let groups = partition(&doc, &[0, 2, 4, 5]);
        assert_eq!(groups.direct, vec![0, 2]);
        assert_eq!(groups.prepositional, vec![4]);
    }

    #[test]
    fn test_classify_passive_subject_is_dropped() {
        let token = Token::new("streak").with_dep("nsubjpass");
        assert_eq!(CueRole::classify(&token), None);
    }
}
