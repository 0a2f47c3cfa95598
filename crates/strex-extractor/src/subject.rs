//! Grammatical subject lookup for a verb

use strex_core::{DepLabel, Document};

/// Subject text for `verb`, or an empty string when there is none.
///
/// A verb not tagged past tense or past participle usually hangs off the
/// finite verb, so the lookup moves one level up first. A relative clause
/// has no local subject; its antecedent (the clause's head) stands in.
pub fn resolve_subject(doc: &Document, verb: usize) -> String {
    let verb = if doc[verb].is_past() {
        verb
    } else {
        doc.head(verb)
    };

    if doc[verb].dep == DepLabel::RelativeClause {
        return doc[doc.head(verb)].text.clone();
    }

    doc.lefts(verb)
        .iter()
        .find(|&&child| doc[child].dep.is_subject())
        .map(|&child| doc[child].text.clone())
        .unwrap_or_default()
}
