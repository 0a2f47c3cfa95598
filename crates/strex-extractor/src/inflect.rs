//! Rule-based past-tense inflection
//!
//! Irregular verbs come from a small dictionary of forms common in game
//! recaps; everything else follows the regular `-ed` spelling rules.

use std::collections::HashMap;

use strex_core::document::TAG_PAST_PARTICIPLE;
use strex_core::{Inflector, Token};

/// (base form, past tense, past participle)
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("be", "was", "been"),
    ("beat", "beat", "beaten"),
    ("become", "became", "become"),
    ("begin", "began", "begun"),
    ("break", "broke", "broken"),
    ("bring", "brought", "brought"),
    ("build", "built", "built"),
    ("come", "came", "come"),
    ("do", "did", "done"),
    ("draw", "drew", "drawn"),
    ("drive", "drove", "driven"),
    ("fall", "fell", "fallen"),
    ("feel", "felt", "felt"),
    ("fight", "fought", "fought"),
    ("find", "found", "found"),
    ("get", "got", "gotten"),
    ("give", "gave", "given"),
    ("go", "went", "gone"),
    ("have", "had", "had"),
    ("hit", "hit", "hit"),
    ("hold", "held", "held"),
    ("keep", "kept", "kept"),
    ("lead", "led", "led"),
    ("lose", "lost", "lost"),
    ("make", "made", "made"),
    ("put", "put", "put"),
    ("ride", "rode", "ridden"),
    ("run", "ran", "run"),
    ("see", "saw", "seen"),
    ("set", "set", "set"),
    ("shoot", "shot", "shot"),
    ("sink", "sank", "sunk"),
    ("spin", "spun", "spun"),
    ("split", "split", "split"),
    ("steal", "stole", "stolen"),
    ("strike", "struck", "struck"),
    ("sweep", "swept", "swept"),
    ("take", "took", "taken"),
    ("throw", "threw", "thrown"),
    ("win", "won", "won"),
];

/// Past tense from an irregular table plus regular spelling rules
#[derive(Debug, Clone)]
pub struct RuleInflector {
    /// base form -> past tense
    irregular: HashMap<String, String>,
    /// past participle -> past tense
    participles: HashMap<String, String>,
}

impl RuleInflector {
    pub fn new() -> Self {
        let mut inflector = Self {
            irregular: HashMap::new(),
            participles: HashMap::new(),
        };
        for &(base, past, participle) in IRREGULAR_VERBS {
            inflector.add_irregular(base, past, participle);
        }
        inflector
    }

    /// Register an irregular verb
    pub fn add_irregular(&mut self, base: &str, past: &str, participle: &str) {
        self.irregular
            .insert(base.to_lowercase(), past.to_lowercase());
        self.participles
            .insert(participle.to_lowercase(), past.to_lowercase());
    }

    /// Lowercased past tense of a base form
    pub fn inflect_base(&self, base: &str) -> String {
        let base = base.to_lowercase();
        match self.irregular.get(&base) {
            Some(past) => past.clone(),
            None => regular_past(&base),
        }
    }

    fn lowercase_past(&self, verb: &Token) -> String {
        let text = verb.lower();
        let base = if verb.lemma.is_empty() {
            text.clone()
        } else {
            verb.lemma.to_lowercase()
        };

        if let Some(past) = self.irregular.get(&base) {
            return past.clone();
        }
        // Parsers without a lemmatizer leave the lemma as the surface form
        if verb.tag == TAG_PAST_PARTICIPLE {
            if let Some(past) = self.participles.get(&text) {
                return past.clone();
            }
            if text.ends_with("ed") {
                return text;
            }
        }
        regular_past(&base)
    }
}

impl Default for RuleInflector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inflector for RuleInflector {
    fn past_tense(&self, verb: &Token) -> String {
        let past = self.lowercase_past(verb);
        if verb.is_upper() && verb.text.chars().count() > 1 {
            past.to_uppercase()
        } else if verb.text.starts_with(char::is_uppercase) {
            capitalize(&past)
        } else {
            past
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Regular `-ed` past tense of a lowercase base form
fn regular_past(base: &str) -> String {
    let chars: Vec<char> = base.chars().collect();
    let n = chars.len();
    if n == 0 {
        return String::new();
    }

    let last = chars[n - 1];
    if last == 'e' {
        return format!("{base}d");
    }
    if last == 'y' && n > 1 && !is_vowel(chars[n - 2]) {
        return format!("{}ied", &base[..base.len() - 1]);
    }
    // Single-syllable consonant-vowel-consonant: stop -> stopped
    if n >= 3
        && !is_vowel(last)
        && !matches!(last, 'w' | 'x' | 'y')
        && is_vowel(chars[n - 2])
        && !is_vowel(chars[n - 3])
        && chars.iter().filter(|&&c| is_vowel(c)).count() == 1
    {
        return format!("{base}{last}ed");
    }
    format!("{base}ed")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb(text: &str, lemma: &str, tag: &str) -> Token {
        Token::new(text).with_lemma(lemma).with_tag(tag).with_pos("VERB")
    }

    #[test]
    fn test_regular_rules() {
        let inflector = RuleInflector::new();
        assert_eq!(inflector.inflect_base("extend"), "extended");
        assert_eq!(inflector.inflect_base("score"), "scored");
        assert_eq!(inflector.inflect_base("rally"), "rallied");
        assert_eq!(inflector.inflect_base("play"), "played");
        assert_eq!(inflector.inflect_base("stop"), "stopped");
        assert_eq!(inflector.inflect_base("fix"), "fixed");
        assert_eq!(inflector.inflect_base("open"), "opened");
    }

    #[test]
    fn test_irregular_from_lemma() {
        let inflector = RuleInflector::new();
        assert_eq!(inflector.past_tense(&verb("wins", "win", "VBZ")), "won");
        assert_eq!(inflector.past_tense(&verb("broken", "break", "VBN")), "broke");
    }

    #[test]
    fn test_participle_without_lemma() {
        let inflector = RuleInflector::new();
        assert_eq!(inflector.past_tense(&verb("taken", "taken", "VBN")), "took");
        assert_eq!(inflector.past_tense(&verb("extended", "extended", "VBN")), "extended");
    }

    #[test]
    fn test_capitalization_is_kept() {
        let inflector = RuleInflector::new();
        assert_eq!(inflector.past_tense(&verb("Extend", "extend", "VB")), "Extended");
        assert_eq!(inflector.past_tense(&verb("WIN", "win", "VB")), "WON");
    }

    #[test]
    fn test_add_irregular() {
        let mut inflector = RuleInflector::new();
        inflector.add_irregular("outdo", "outdid", "outdone");
        assert_eq!(inflector.past_tense(&verb("outdo", "outdo", "VB")), "outdid");
        assert_eq!(inflector.past_tense(&verb("outdone", "outdone", "VBN")), "outdid");
    }
}
