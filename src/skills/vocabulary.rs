//! Known skill phrases used for text extraction

use crate::skills::normalizer::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of recognised skill phrases, de-duplicated by canonical key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillVocabulary {
    phrases: Vec<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            let key = normalize(phrase);
            if key.is_empty() || !seen.insert(key) {
                continue;
            }
            kept.push(phrase.to_string());
        }
        Self { phrases: kept }
    }

    /// The vocabulary the matcher ships with.
    pub fn builtin() -> Self {
        Self::new(default_skill_phrases())
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl From<Vec<String>> for SkillVocabulary {
    fn from(phrases: Vec<String>) -> Self {
        Self::new(phrases)
    }
}

impl From<SkillVocabulary> for Vec<String> {
    fn from(vocabulary: SkillVocabulary) -> Self {
        vocabulary.phrases
    }
}

pub fn default_skill_phrases() -> Vec<String> {
    vec![
        "python", "pandas", "power bi", "bi", "sql", "otimização", "api", "rest",
        "flask", "java", "spring", "microserviços", "gestão de estoque", "transporte",
        "sap", "excel", "análise financeira", "contabilidade", "gestão de projetos",
        "logística", "supply chain management", "liderança", "comunicação", "docker",
        "django",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_by_canonical_key() {
        let vocab = SkillVocabulary::new(["Python", "python ", "SQL (ANSI)", "sql", "", "(x)"]);
        assert_eq!(vocab.phrases(), &["Python".to_string(), "SQL (ANSI)".to_string()]);
    }

    #[test]
    fn test_builtin_is_not_empty() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.len(), 25);
        assert!(vocab.phrases().iter().any(|p| p == "power bi"));
    }

    #[test]
    fn test_toml_roundtrip_as_plain_list() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            skills: SkillVocabulary,
        }
        let parsed: Wrapper = toml::from_str(r#"skills = ["rust", "Rust", "tokio"]"#).unwrap();
        assert_eq!(parsed.skills.len(), 2);
    }
}
