//! Strex Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the Strex system:
//! - Token arena and dependency tree (`Document`)
//! - Article input/output records
//! - Common error types
//! - Traits for the external parsing and inflection collaborators
//! - Configuration management

pub mod article;
pub mod config;
pub mod document;

pub use article::{Article, ArticleResult, ParsedArticle};
pub use config::{AppConfig, ConfigError, ExtractionConfig, LoggingConfig, OutputConfig};
pub use document::{DepLabel, Document, DocumentBuilder, Sentence, Token};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for Strex operations
#[derive(Error, Debug)]
pub enum StrexError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StrexError>;

// ============================================================================
// Traits
// ============================================================================

/// Turns raw article text into a dependency-parsed document.
///
/// Implemented outside this workspace (tagger, parser, sentence splitter).
/// Implementations are expected to return well-formed trees; anything else
/// should surface as `StrexError::ParseError` or `StrexError::InvalidDocument`.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Document>;
}

/// Morphology service producing the past-tense surface form of a verb.
pub trait Inflector: Send + Sync {
    fn past_tense(&self, verb: &Token) -> String;
}

// ============================================================================
// Tests
// ============================================================================
