//! Per-article extraction pipeline
//!
//! Selection runs on the parsed document as delivered. Cue location and
//! reconstruction run on the noun-phrase merged copy, restricted to the
//! selected sentences.

use strex_core::{
    Article, ArticleResult, Document, DocumentParser, ExtractionConfig, Inflector,
    ParsedArticle, Result, Sentence,
};

use crate::caption::CaptionStripper;
use crate::inflect::RuleInflector;
use crate::locator::CueTokenLocator;
use crate::noun_chunks::merge_noun_chunks;
use crate::prepositions::PrepositionalPhraseCollector;
use crate::reconstruct::StatementReconstructor;
use crate::roles::{partition, CueRole};
use crate::selector::{SelectionAccumulator, SentenceSelector};
use crate::stats::ExtractionStats;

/// Everything produced for one article
#[derive(Debug, Clone)]
pub struct ArticleOutcome {
    pub result: ArticleResult,
    /// Selected sentence texts, streaks first, caption-stripped when enabled
    pub selected: Vec<String>,
    pub stats: ExtractionStats,
}

/// Runs selection, location and reconstruction for articles
#[derive(Debug, Clone)]
pub struct ArticleProcessor<I = RuleInflector> {
    selector: SentenceSelector,
    locator: CueTokenLocator,
    reconstructor: StatementReconstructor<I>,
    stripper: CaptionStripper,
    strip_captions: bool,
}

impl ArticleProcessor<RuleInflector> {
    pub fn new() -> Self {
        Self::with_inflector(RuleInflector::new())
    }
}

impl Default for ArticleProcessor<RuleInflector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Inflector> ArticleProcessor<I> {
    pub fn with_inflector(inflector: I) -> Self {
        Self {
            selector: SentenceSelector::new(),
            locator: CueTokenLocator::new(),
            reconstructor: StatementReconstructor::with_inflector(inflector),
            stripper: CaptionStripper::new(),
            strip_captions: false,
        }
    }

    /// Build a processor from extraction settings
    pub fn from_config(config: &ExtractionConfig, inflector: I) -> Result<Self> {
        Ok(Self {
            selector: SentenceSelector::from_config(config),
            locator: CueTokenLocator::with_cues(&config.streak_cues),
            reconstructor: StatementReconstructor::with_inflector(inflector)
                .with_prepositions(PrepositionalPhraseCollector::from_config(config)),
            stripper: CaptionStripper::new(),
            strip_captions: config.strip_captions,
        })
    }

    pub fn with_strip_captions(mut self, strip_captions: bool) -> Self {
        self.strip_captions = strip_captions;
        self
    }

    pub fn selector(&self) -> &SentenceSelector {
        &self.selector
    }

    /// Process an already parsed document
    pub fn process_document(&self, id: &str, label: &str, doc: &Document) -> Result<ArticleOutcome> {
        let mut stats = ExtractionStats {
            articles: 1,
            ..Default::default()
        };

        let mut starts = SelectionAccumulator::new();
        let selected = self.selector.select(doc, &mut starts);
        stats.streak_sentences = selected.streaks.len();
        stats.record_sentences = selected.records.len();

        let merged = merge_noun_chunks(doc)?;
        let sentences: Vec<Sentence> = selected
            .all()
            .into_iter()
            .map(|sentence| merged.map_sentence(sentence))
            .collect();
        let merged_doc = &merged.document;

        let cues = self.locator.locate_in_sentences(merged_doc, &sentences);
        let groups = partition(merged_doc, &cues);
        stats.cue_tokens = cues.len();
        stats.unsupported_roles = cues.len() - groups.direct.len() - groups.prepositional.len();

        let mut result = ArticleResult::new(id, label);
        let ordered = groups
            .prepositional
            .iter()
            .map(|&t| (t, CueRole::PrepositionalObject))
            .chain(groups.direct.iter().map(|&t| (t, CueRole::DirectObjectLike)));
        for (token, role) in ordered {
            let outcome = self.reconstructor.reconstruct(merged_doc, token, role);
            stats.record(&outcome);
            if let Some(statement) = outcome.into_statement() {
                result.statements.push(statement);
            }
        }

        let all = selected.all();
        let selected_texts = if self.strip_captions {
            self.stripper.strip_sentences(doc, &all)
        } else {
            all.iter().map(|&sentence| doc.sentence_text(sentence)).collect()
        };

        tracing::info!(
            article = %id,
            selected = all.len(),
            cues = stats.cue_tokens,
            statements = result.statements.len(),
            "Processed article"
        );

        Ok(ArticleOutcome {
            result,
            selected: selected_texts,
            stats,
        })
    }

    pub fn process_parsed(&self, article: &ParsedArticle) -> Result<ArticleOutcome> {
        self.process_document(&article.id, &article.label, &article.document)
    }

    /// Parse raw text, then process it
    pub fn process_article(
        &self,
        parser: &dyn DocumentParser,
        article: &Article,
    ) -> Result<ArticleOutcome> {
        let doc = parser.parse(&article.text)?;
        self.process_document(&article.id, &article.label, &doc)
    }

    /// Process a batch, each article with its own accumulator
    pub fn process_batch(
        &self,
        articles: &[ParsedArticle],
    ) -> Result<(Vec<ArticleOutcome>, ExtractionStats)> {
        let outcomes = articles
            .iter()
            .map(|article| self.process_parsed(article))
            .collect::<Result<Vec<_>>>()?;
        let stats = outcomes.iter().map(|outcome| outcome.stats).sum();
        Ok((outcomes, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_core::DocumentBuilder;

    /// LOS ANGELES -- The Lakers extended their winning streak to five games.
    /// Davis scored a career - high 40 points.
    fn article() -> Document {
        DocumentBuilder::new()
            .sentence(&[
                ("LOS", "PROPN", "NNP", "compound", 1),
                ("ANGELES", "PROPN", "NNP", "npadvmod", 5),
                ("--", "PUNCT", ":", "punct", 5),
                ("The", "DET", "DT", "det", 4),
                ("Lakers", "PROPN", "NNPS", "nsubj", 5),
                ("extended", "VERB", "VBD", "ROOT", 5),
                ("their", "PRON", "PRP$", "poss", 8),
                ("winning", "VERB", "VBG", "amod", 8),
                ("streak", "NOUN", "NN", "dobj", 5),
                ("to", "ADP", "IN", "prep", 8),
                ("five", "NUM", "CD", "nummod", 11),
                ("games", "NOUN", "NNS", "pobj", 9),
                (".", "PUNCT", ".", "punct", 5),
            ])
            .sentence(&[
                ("Davis", "PROPN", "NNP", "nsubj", 1),
                ("scored", "VERB", "VBD", "ROOT", 1),
                ("a", "DET", "DT", "det", 7),
                ("career", "NOUN", "NN", "compound", 5),
                ("-", "PUNCT", "HYPH", "punct", 5),
                ("high", "ADJ", "JJ", "amod", 7),
                ("40", "NUM", "CD", "nummod", 7),
                ("points", "NOUN", "NNS", "dobj", 1),
                (".", "PUNCT", ".", "punct", 1),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_process_document() {
        let outcome = ArticleProcessor::new()
            .process_document("recap-1", "nba", &article())
            .unwrap();

        assert_eq!(outcome.result.id, "recap-1");
        assert_eq!(outcome.result.label, "nba");
        assert_eq!(
            outcome.result.statements,
            vec!["The Lakers extended their winning streak to five games ".to_string()]
        );
        assert_eq!(outcome.stats.streak_sentences, 1);
        assert_eq!(outcome.stats.record_sentences, 1);
        assert_eq!(outcome.stats.cue_tokens, 1);
        assert_eq!(outcome.stats.statements, 1);
    }

    #[test]
    fn test_selected_texts_with_caption_stripping() {
        let doc = article();
        let plain = ArticleProcessor::new()
            .process_document("a", "b", &doc)
            .unwrap();
        assert!(plain.selected[0].starts_with("LOS ANGELES --"));

        let stripped = ArticleProcessor::new()
            .with_strip_captions(true)
            .process_document("a", "b", &doc)
            .unwrap();
        assert_eq!(
            stripped.selected[0],
            "The Lakers extended their winning streak to five games."
        );
        assert_eq!(stripped.selected[1], "Davis scored a career - high 40 points.");
    }

    #[test]
    fn test_from_default_config() {
        let processor =
            ArticleProcessor::from_config(&ExtractionConfig::default(), RuleInflector::new());
        assert!(processor.is_ok());
    }
}
