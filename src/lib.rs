//! Skill matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod skills;

pub use config::Config;
pub use error::{Result, SkillMatcherError};
