//! Noun chunk detection and merging
//!
//! A noun chunk is a noun, proper noun or pronoun in a nominal role plus
//! everything to its left in its own subtree ("a five-game winning streak").
//! Merging collapses each chunk into a single token so later rules see
//! compact subjects and objects.

use strex_core::{DepLabel, Document, Result, Sentence, Token};

/// Dependency labels that make a noun the head of a chunk
const NP_LABELS: [&str; 10] = [
    "oprd", "nsubj", "dobj", "nsubjpass", "pcomp", "pobj", "dative", "appos", "attr", "ROOT",
];

const NOMINAL_POS: [&str; 3] = ["NOUN", "PROPN", "PRON"];

fn is_np_label(dep: &DepLabel) -> bool {
    NP_LABELS.contains(&dep.as_str())
}

/// Non-overlapping chunk spans `[start, end)` in document order
pub fn noun_chunks(doc: &Document) -> Vec<(usize, usize)> {
    let mut chunks = Vec::new();
    let mut prev_end: Option<usize> = None;

    for i in 0..doc.len() {
        let token = &doc[i];
        if !NOMINAL_POS.contains(&token.pos.as_str()) {
            continue;
        }
        let left = doc.left_edge(i);
        if prev_end.is_some_and(|end| left <= end) {
            continue;
        }

        let is_chunk = if is_np_label(&token.dep) {
            true
        } else if token.dep == DepLabel::Conjunct {
            // Coordinated to a chunk head through a chain of leftward conjuncts
            let mut head = doc.head(i);
            while doc[head].dep == DepLabel::Conjunct && doc.head(head) < head {
                head = doc.head(head);
            }
            is_np_label(&doc[head].dep)
        } else {
            false
        };

        if is_chunk && within_subtree(doc, left, i) {
            prev_end = Some(i);
            chunks.push((left, i + 1));
        }
    }

    chunks
}

/// Every token of `[left, root]` descends from `root`
///
/// Fails for non-projective parses where the span takes in an ancestor or a
/// sibling branch; merging such a span would create a head cycle.
fn within_subtree(doc: &Document, left: usize, root: usize) -> bool {
    (left..root).all(|j| doc.ancestors(j).any(|head| head == root))
}

/// Result of merging: the new document plus old-to-new token indices
#[derive(Debug, Clone)]
pub struct MergedDocument {
    pub document: Document,
    pub index_map: Vec<usize>,
}

impl MergedDocument {
    /// Where a sentence of the source document ended up
    pub fn map_sentence(&self, sentence: Sentence) -> Sentence {
        Sentence::new(
            self.index_map[sentence.start],
            self.index_map[sentence.end - 1] + 1,
        )
    }
}

/// Collapse every noun chunk into one token.
///
/// The merged token keeps the chunk root's part of speech, tag, dependency
/// and head, the span text and the last token's trailing whitespace. A
/// document that was already merged comes back unchanged.
pub fn merge_noun_chunks(doc: &Document) -> Result<MergedDocument> {
    if doc.noun_chunks_merged() {
        return Ok(MergedDocument {
            document: doc.clone(),
            index_map: (0..doc.len()).collect(),
        });
    }

    let chunks = noun_chunks(doc);

    // (start, end, root) of every token in the merged document
    let mut groups: Vec<(usize, usize, usize)> = Vec::with_capacity(doc.len());
    let mut index_map = vec![0; doc.len()];
    let mut next_chunk = chunks.iter().peekable();
    let mut i = 0;
    while i < doc.len() {
        let (start, end) = match next_chunk.peek() {
            Some(&&(start, end)) if start == i => {
                next_chunk.next();
                (start, end)
            }
            _ => (i, i + 1),
        };
        for slot in &mut index_map[start..end] {
            *slot = groups.len();
        }
        groups.push((start, end, end - 1));
        i = end;
    }

    let tokens: Vec<Token> = groups
        .iter()
        .enumerate()
        .map(|(new_index, &(start, end, root))| {
            let mut token = doc[root].clone();
            if end - start > 1 {
                token.text = doc.span_text(start, end);
                token.lemma = merged_lemma(doc, start, end);
                token.ws = doc[end - 1].ws.clone();
            }
            token.head = doc[root]
                .head
                .map(|head| index_map[head])
                .filter(|&head| head != new_index);
            token
        })
        .collect();

    let sentences = doc
        .sentences()
        .iter()
        .map(|s| Sentence::new(index_map[s.start], index_map[s.end - 1] + 1))
        .collect();

    let document = Document::new(tokens, sentences)?.with_noun_chunks_merged();
    tracing::debug!(
        chunks = chunks.len(),
        tokens_before = doc.len(),
        tokens_after = document.len(),
        "Merged noun chunks"
    );

    Ok(MergedDocument {
        document,
        index_map,
    })
}

fn merged_lemma(doc: &Document, start: usize, end: usize) -> String {
    let mut lemma = String::new();
    for i in start..end {
        lemma.push_str(&doc[i].lemma);
        if i + 1 < end {
            lemma.push_str(&doc[i].ws);
        }
    }
    lemma
}
