//! Strex Extractor - Streak and record statement extraction
//!
//! Works on dependency-parsed sports articles:
//! - Sentence selection for streak and record cues
//! - Noun chunk merging and cue token location
//! - Statement reconstruction from the cue token's clause
//! - Dateline and wire-tag stripping

pub mod caption;
pub mod inflect;
pub mod locator;
pub mod matcher;
pub mod noun_chunks;
pub mod pipeline;
pub mod prepositions;
pub mod reconstruct;
pub mod roles;
pub mod selector;
pub mod stats;
pub mod subject;

pub use caption::CaptionStripper;
pub use inflect::RuleInflector;
pub use locator::CueTokenLocator;
pub use matcher::{Match, Matcher, PatternElement, TokenPattern, TokenPredicate};
pub use noun_chunks::{merge_noun_chunks, noun_chunks, MergedDocument};
pub use pipeline::{ArticleOutcome, ArticleProcessor};
pub use prepositions::PrepositionalPhraseCollector;
pub use reconstruct::{Reconstruction, SkipReason, StatementReconstructor};
pub use roles::{partition, CueRole, RoleGroups};
pub use selector::{CueCategory, SelectedSentences, SelectionAccumulator, SentenceSelector};
pub use stats::ExtractionStats;
pub use subject::resolve_subject;
