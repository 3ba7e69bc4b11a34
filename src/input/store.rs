//! JSON record files in a data directory

use crate::error::{Result, SkillMatcherError};
use crate::models::{Employee, JobOpening, Project};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const EMPLOYEES_FILE: &str = "employees.json";
pub const JOBS_FILE: &str = "jobs.json";
pub const PROJECTS_FILE: &str = "projects.json";

/// Loads and replaces the record files the matcher works on.
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub async fn load_employees(&self) -> Result<Vec<Employee>> {
        self.load(EMPLOYEES_FILE).await
    }

    pub async fn load_jobs(&self) -> Result<Vec<JobOpening>> {
        self.load(JOBS_FILE).await
    }

    pub async fn load_projects(&self) -> Result<Vec<Project>> {
        self.load(PROJECTS_FILE).await
    }

    /// Replace the employee file in one step.
    pub async fn save_employees(&self, employees: &[Employee]) -> Result<()> {
        self.replace(EMPLOYEES_FILE, employees).await
    }

    async fn load<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            return Err(SkillMatcherError::InvalidInput(format!(
                "Data file does not exist: {}",
                path.display()
            )));
        }

        info!("Loading records from: {}", path.display());
        let content = tokio::fs::read_to_string(&path).await?;
        let records: Vec<T> = serde_json::from_str(&content)?;
        Ok(records)
    }

    async fn replace<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<()> {
        let path = self.data_dir.join(file_name);
        let mut content = serde_json::to_string_pretty(records)?;
        content.push('\n');

        tokio::fs::create_dir_all(&self.data_dir).await?;
        let data_dir = self.data_dir.clone();
        let target = path.clone();

        // Write next to the target so the final rename stays on one filesystem.
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&data_dir)?;
            tmp.write_all(content.as_bytes())?;
            tmp.flush()?;
            tmp.persist(&target).map_err(|e| SkillMatcherError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| SkillMatcherError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

        info!("Saved {} records to: {}", records.len(), path.display());
        Ok(())
    }
}
