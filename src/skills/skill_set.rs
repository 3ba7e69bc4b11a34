//! Insertion-ordered skill sets keyed by canonical key

use crate::skills::normalizer::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A skill as compared (`key`) and as shown (`label`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub key: String,
    pub label: String,
}

impl Skill {
    /// `None` when the label normalizes to an empty key.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = normalize(label);
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key,
            label: label.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    skills: Vec<Skill>,
    keys: HashSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut set = Self::new();
        for label in labels {
            set.insert(label.as_ref());
        }
        set
    }

    /// Returns `true` when a new key was added. The first label seen for a key
    /// is the one kept.
    pub fn insert(&mut self, label: &str) -> bool {
        match Skill::from_label(label) {
            Some(skill) => self.insert_skill(skill),
            None => false,
        }
    }

    pub fn insert_skill(&mut self, skill: Skill) -> bool {
        if skill.key.is_empty() || !self.keys.insert(skill.key.clone()) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.key.as_str())
    }
}

impl<'a> FromIterator<&'a str> for SkillSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}
