//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatcherError};
use crate::skills::discovery::DEFAULT_ORIGIN;
use crate::skills::vocabulary::SkillVocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub recommendation: RecommendationConfig,
    pub discovery: DiscoveryConfig,
    pub data: DataConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub skills: SkillVocabulary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Jobs scoring at or below this percentage are not recommended
    pub threshold: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub origin: String,
    pub suppress_declared: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyConfig {
                skills: SkillVocabulary::builtin(),
            },
            recommendation: RecommendationConfig { threshold: Some(30) },
            discovery: DiscoveryConfig {
                origin: DEFAULT_ORIGIN.to_string(),
                suppress_declared: false,
            },
            data: DataConfig {
                data_dir: PathBuf::from("data"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load `path`, writing defaults there on first run.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Self::reset_at(path)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SkillMatcherError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Overwrite `path` with the default configuration.
    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SkillMatcherError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
            .join("config.toml")
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary.skills
    }
}
