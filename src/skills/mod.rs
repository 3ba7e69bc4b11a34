//! Skill normalization, extraction, scoring and discovery

pub mod normalizer;
pub mod skill_set;
pub mod vocabulary;
pub mod extractor;
pub mod scorer;
pub mod discovery;
pub mod search;

pub use extractor::SkillExtractor;
pub use skill_set::{Skill, SkillSet};
pub use vocabulary::SkillVocabulary;
