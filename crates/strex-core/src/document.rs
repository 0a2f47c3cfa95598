//! Token arena and dependency tree
//!
//! A `Document` owns every token of one parsed text. Head and child
//! relations are stored as indices into the token vector, so the tree
//! cannot alias or dangle, and it is validated once at construction.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{Result, StrexError};

/// Fine tag for a past-tense verb
pub const TAG_PAST_TENSE: &str = "VBD";
/// Fine tag for a past participle
pub const TAG_PAST_PARTICIPLE: &str = "VBN";
/// Fine tag for a singular proper noun
pub const TAG_PROPER_NOUN: &str = "NNP";
/// Coarse part of speech for verbs
pub const POS_VERB: &str = "VERB";

// ============================================================================
// Dependency labels
// ============================================================================

/// Dependency relation of a token to its head
///
/// Only the labels the extraction rules look at get their own variant;
/// every other label is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepLabel {
    NominalSubject,
    PassiveSubject,
    DirectObject,
    PrepositionalObject,
    Preposition,
    RelativeClause,
    Conjunct,
    Root,
    Other(String),
}

impl DepLabel {
    /// Get the string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::NominalSubject => "nsubj",
            Self::PassiveSubject => "nsubjpass",
            Self::DirectObject => "dobj",
            Self::PrepositionalObject => "pobj",
            Self::Preposition => "prep",
            Self::RelativeClause => "relcl",
            Self::Conjunct => "conj",
            Self::Root => "ROOT",
            Self::Other(label) => label,
        }
    }

    /// Subject labels (active or passive)
    pub fn is_subject(&self) -> bool {
        matches!(self, Self::NominalSubject | Self::PassiveSubject)
    }
}

impl From<&str> for DepLabel {
    fn from(s: &str) -> Self {
        match s {
            "nsubj" => Self::NominalSubject,
            "nsubjpass" => Self::PassiveSubject,
            "dobj" => Self::DirectObject,
            "pobj" => Self::PrepositionalObject,
            "prep" => Self::Preposition,
            "relcl" => Self::RelativeClause,
            "conj" => Self::Conjunct,
            "ROOT" | "root" => Self::Root,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DepLabel {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<DepLabel> for String {
    fn from(label: DepLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for DepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Token
// ============================================================================

/// One token of a parsed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,

    /// Lemma (base form)
    #[serde(default)]
    pub lemma: String,

    /// Coarse part of speech (`VERB`, `NOUN`, `PROPN`, ...)
    #[serde(default)]
    pub pos: String,

    /// Fine-grained tag (`VBD`, `VBN`, `NNP`, ...)
    #[serde(default)]
    pub tag: String,

    /// Dependency label relative to the head
    pub dep: DepLabel,

    /// Index of the head token, `None` for a sentence root
    #[serde(default)]
    pub head: Option<usize>,

    /// Whitespace following the token in the source text
    #[serde(default)]
    pub ws: String,
}

impl Token {
    /// Create a root token with only its text set
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lemma: text.to_lowercase(),
            text,
            pos: String::new(),
            tag: String::new(),
            dep: DepLabel::Root,
            head: None,
            ws: String::new(),
        }
    }

    /// Set lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set coarse part of speech
    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = pos.into();
        self
    }

    /// Set fine-grained tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set dependency label
    pub fn with_dep(mut self, dep: impl Into<DepLabel>) -> Self {
        self.dep = dep.into();
        self
    }

    /// Set head index
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    /// Set trailing whitespace
    pub fn with_ws(mut self, ws: impl Into<String>) -> Self {
        self.ws = ws.into();
        self
    }

    /// Lowercased surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_verb(&self) -> bool {
        self.pos == POS_VERB
    }

    /// Tagged as past tense (`VBD`)
    pub fn is_past_tense(&self) -> bool {
        self.tag == TAG_PAST_TENSE
    }

    /// Tagged as past tense or past participle (`VBD`/`VBN`)
    pub fn is_past(&self) -> bool {
        self.tag == TAG_PAST_TENSE || self.tag == TAG_PAST_PARTICIPLE
    }

    /// At least one cased character, and every cased character uppercase
    pub fn is_upper(&self) -> bool {
        let mut cased = false;
        for c in self.text.chars() {
            if c.is_lowercase() {
                return false;
            }
            if c.is_uppercase() {
                cased = true;
            }
        }
        cased
    }
}

// ============================================================================
// Sentence
// ============================================================================

/// A contiguous token span `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

impl Sentence {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Token indices of the span
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

// ============================================================================
// Document
// ============================================================================

/// Serialized form of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDocument {
    tokens: Vec<Token>,
    #[serde(default)]
    sentences: Vec<Sentence>,
    #[serde(default)]
    noun_chunks_merged: bool,
}

/// Parsed text: token arena plus sentence boundaries
///
/// Immutable after construction. `lefts`/`rights` cache the ordered
/// children of every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct Document {
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    lefts: Vec<Vec<usize>>,
    rights: Vec<Vec<usize>>,
    noun_chunks_merged: bool,
}

impl Document {
    /// Build and validate a document.
    ///
    /// A token whose head is its own index is treated as a root. An empty
    /// sentence list means the whole token sequence is one sentence.
    pub fn new(mut tokens: Vec<Token>, mut sentences: Vec<Sentence>) -> Result<Self> {
        let len = tokens.len();

        for (i, token) in tokens.iter_mut().enumerate() {
            if token.head == Some(i) {
                token.head = None;
            }
            if let Some(head) = token.head {
                if head >= len {
                    return Err(StrexError::InvalidDocument(format!(
                        "token {i} has head {head} outside a document of {len} tokens"
                    )));
                }
            }
        }

        if sentences.is_empty() && len > 0 {
            sentences.push(Sentence::new(0, len));
        }
        validate_sentences(&sentences, len)?;

        for sentence in &sentences {
            for i in sentence.indices() {
                if let Some(head) = tokens[i].head {
                    if !sentence.contains(head) {
                        return Err(StrexError::InvalidDocument(format!(
                            "token {i} is attached to token {head} in another sentence"
                        )));
                    }
                }
            }
        }

        validate_acyclic(&tokens)?;

        let mut lefts = vec![Vec::new(); len];
        let mut rights = vec![Vec::new(); len];
        for (i, token) in tokens.iter().enumerate() {
            if let Some(head) = token.head {
                if i < head {
                    lefts[head].push(i);
                } else {
                    rights[head].push(i);
                }
            }
        }

        Ok(Self {
            tokens,
            sentences,
            lefts,
            rights,
            noun_chunks_merged: false,
        })
    }

    /// Mark the document as already having its noun phrases merged
    pub fn with_noun_chunks_merged(mut self) -> Self {
        self.noun_chunks_merged = true;
        self
    }

    pub fn noun_chunks_merged(&self) -> bool {
        self.noun_chunks_merged
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Sentence containing the given token
    pub fn sentence_of(&self, index: usize) -> Sentence {
        let pos = self
            .sentences
            .partition_point(|sentence| sentence.end <= index);
        self.sentences[pos]
    }

    /// Sentence starting at the given token, if any
    pub fn sentence_starting_at(&self, start: usize) -> Option<Sentence> {
        self.sentences
            .binary_search_by_key(&start, |sentence| sentence.start)
            .ok()
            .map(|pos| self.sentences[pos])
    }

    pub fn is_sent_start(&self, index: usize) -> bool {
        self.sentence_of(index).start == index
    }

    /// Head index; a root is its own head
    pub fn head(&self, index: usize) -> usize {
        self.tokens[index].head.unwrap_or(index)
    }

    /// Children preceding the token, in order
    pub fn lefts(&self, index: usize) -> &[usize] {
        &self.lefts[index]
    }

    /// Children following the token, in order
    pub fn rights(&self, index: usize) -> &[usize] {
        &self.rights[index]
    }

    /// All children in document order
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.lefts[index]
            .iter()
            .chain(self.rights[index].iter())
            .copied()
    }

    /// Leftmost token of the subtree rooted at `index`
    pub fn left_edge(&self, index: usize) -> usize {
        let mut edge = index;
        while let Some(&first) = self.lefts[edge].first() {
            edge = first;
        }
        edge
    }

    /// Heads from the token up to its root, excluding the token itself
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: index,
        }
    }

    /// Text of `[start, end)` without the last token's trailing whitespace
    pub fn span_text(&self, start: usize, end: usize) -> String {
        let mut text = String::new();
        for i in start..end {
            text.push_str(&self.tokens[i].text);
            if i + 1 < end {
                text.push_str(&self.tokens[i].ws);
            }
        }
        text
    }

    pub fn sentence_text(&self, sentence: Sentence) -> String {
        self.span_text(sentence.start, sentence.end)
    }

    /// Full document text
    pub fn text(&self) -> String {
        self.span_text(0, self.tokens.len())
    }
}

impl Index<usize> for Document {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl TryFrom<RawDocument> for Document {
    type Error = StrexError;

    fn try_from(raw: RawDocument) -> Result<Self> {
        let doc = Document::new(raw.tokens, raw.sentences)?;
        Ok(if raw.noun_chunks_merged {
            doc.with_noun_chunks_merged()
        } else {
            doc
        })
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        Self {
            tokens: doc.tokens,
            sentences: doc.sentences,
            noun_chunks_merged: doc.noun_chunks_merged,
        }
    }
}

/// Iterator over the heads above a token
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let head = self.doc.tokens[self.current].head?;
        self.current = head;
        Some(head)
    }
}

fn validate_sentences(sentences: &[Sentence], len: usize) -> Result<()> {
    let mut expected_start = 0;
    for sentence in sentences {
        if sentence.start != expected_start || sentence.is_empty() {
            return Err(StrexError::InvalidDocument(format!(
                "sentence {}..{} does not continue at token {expected_start}",
                sentence.start, sentence.end
            )));
        }
        expected_start = sentence.end;
    }
    if expected_start != len {
        return Err(StrexError::InvalidDocument(format!(
            "sentences cover {expected_start} of {len} tokens"
        )));
    }
    Ok(())
}

fn validate_acyclic(tokens: &[Token]) -> Result<()> {
    // 0 = unvisited, 1 = on the current path, 2 = reaches a root
    let mut state = vec![0u8; tokens.len()];
    for start in 0..tokens.len() {
        let mut path = Vec::new();
        let mut current = start;
        loop {
            match state[current] {
                2 => break,
                1 => {
                    return Err(StrexError::InvalidDocument(format!(
                        "token {current} is its own ancestor"
                    )))
                }
                _ => {}
            }
            state[current] = 1;
            path.push(current);
            match tokens[current].head {
                Some(head) => current = head,
                None => break,
            }
        }
        for i in path {
            state[i] = 2;
        }
    }
    Ok(())
}

// ============================================================================
// Builder
// ============================================================================

/// One CoNLL-style row: `(text, pos, tag, dep, head)`
///
/// `head` is relative to the sentence start; a row pointing at itself is
/// the sentence root.
pub type TokenRow<'a> = (&'a str, &'a str, &'a str, &'a str, usize);

/// Builds a document sentence by sentence from CoNLL-style rows
///
/// Trailing whitespace is inferred: a single space between tokens, none
/// before closing punctuation or clitics, none after the last token of the
/// document.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sentence
    pub fn sentence(mut self, rows: &[TokenRow<'_>]) -> Self {
        let start = self.tokens.len();
        if let Some(last) = self.tokens.last_mut() {
            last.ws = " ".to_string();
        }
        for (i, &(text, pos, tag, dep, head)) in rows.iter().enumerate() {
            let ws = match rows.get(i + 1) {
                Some(next) if attaches_left(next.0) => "",
                Some(_) => " ",
                None => "",
            };
            self.tokens.push(
                Token::new(text)
                    .with_pos(pos)
                    .with_tag(tag)
                    .with_dep(dep)
                    .with_head(start + head)
                    .with_ws(ws),
            );
        }
        self.sentences.push(Sentence::new(start, self.tokens.len()));
        self
    }

    pub fn build(self) -> Result<Document> {
        Document::new(self.tokens, self.sentences)
    }
}

fn attaches_left(text: &str) -> bool {
    matches!(text, "." | "," | "!" | "?" | ";" | ":" | "'s" | "n't" | ")")
}

// ============================================================================
// Tests
// ============================================================================
