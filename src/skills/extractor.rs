//! Vocabulary-driven skill extraction from free text

use crate::error::{Result, SkillMatcherError};
use crate::skills::normalizer::normalize;
use crate::skills::vocabulary::SkillVocabulary;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;

/// Whole-word matcher compiled once from a vocabulary.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    pattern: Regex,
    phrase_count: usize,
}

impl SkillExtractor {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        let mut keys: Vec<String> = vocabulary
            .phrases()
            .iter()
            .map(|p| normalize(p))
            .filter(|k| !k.is_empty())
            .collect();

        if keys.is_empty() {
            return Err(SkillMatcherError::InvalidVocabulary(
                "vocabulary has no usable skill phrases".to_string(),
            ));
        }

        // Longest first: the regex engine takes the first alternative that
        // matches, so "power bi" has to precede "bi".
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let alternation = keys.iter().map(|k| guarded(k)).collect::<Vec<_>>().join("|");
        let pattern = Regex::new(&format!(r"(?i)(?:{})", alternation))
            .map_err(|e| SkillMatcherError::InvalidVocabulary(format!("Failed to build skill pattern: {}", e)))?;

        debug!("Compiled skill pattern with {} phrases", keys.len());

        Ok(Self {
            pattern,
            phrase_count: keys.len(),
        })
    }

    /// Canonical keys of every vocabulary phrase found in `text`.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| normalize(m.as_str()))
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Union of the skills found in each text.
    pub fn extract_all<'a, I>(&self, texts: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().flat_map(|t| self.extract(t)).collect()
    }

    pub fn phrase_count(&self) -> usize {
        self.phrase_count
    }
}

/// Escape `key` and anchor it so it only matches as a whole token.
///
/// `\b` needs a word character on the inner side, so phrases that start or
/// end with a symbol ("c++", ".net") take `\B` on that edge instead.
fn guarded(key: &str) -> String {
    let edge = |c: Option<char>| match c {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => r"\B",
    };
    format!(
        "{}{}{}",
        edge(key.chars().next()),
        regex::escape(key),
        edge(key.chars().last())
    )
}

/// One-shot extraction; compiles the pattern on every call.
pub fn extract(text: &str, vocabulary: &SkillVocabulary) -> Result<BTreeSet<String>> {
    Ok(SkillExtractor::new(vocabulary)?.extract(text))
}
