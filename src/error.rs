//! Error handling for the skill matcher

use crate::models::EmployeeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("Project {project_id} references unknown participant {employee_id}")]
    MissingParticipant {
        project_id: u64,
        employee_id: EmployeeId,
    },

    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, SkillMatcherError>;

impl From<askama::Error> for SkillMatcherError {
    fn from(err: askama::Error) -> Self {
        SkillMatcherError::OutputFormatting(err.to_string())
    }
}
