//! Article input and output records

use serde::{Deserialize, Serialize};

use crate::Document;

/// Raw article as delivered by a scraper or corpus loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article identifier (usually its URL)
    pub id: String,

    /// Raw article text
    pub text: String,

    /// Source label (sport, feed, outlet)
    pub label: String,
}

impl Article {
    pub fn new(id: impl Into<String>, text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Article whose text has already been run through the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArticle {
    pub id: String,
    pub label: String,
    pub document: Document,
}

/// Extracted statements for one article
///
/// Statements keep the trailing space produced by fragment assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleResult {
    pub id: String,
    pub statements: Vec<String>,
    pub label: String,
}

impl ArticleResult {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            statements: Vec::new(),
            label: label.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
