//! Plain records exchanged with the persistence and presentation layers

use crate::skills::normalizer::normalize;
use crate::skills::skill_set::SkillSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

pub type EmployeeId = u64;
pub type JobId = u64;
pub type ProjectId = u64;

/// A skill inferred from task text rather than declared by the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredSkill {
    #[serde(deserialize_with = "lenient_label")]
    pub skill: String,
    #[serde(default)]
    pub origin: String,
    /// Run date, `YYYY-MM-DD` (UTC)
    #[serde(default)]
    pub date: String,
}

impl DiscoveredSkill {
    pub fn key(&self) -> String {
        normalize(&self.skill)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_labels")]
    pub declared_skills: Vec<String>,
    #[serde(default)]
    pub discovered_skills: Vec<DiscoveredSkill>,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
            email: None,
            declared_skills: Vec::new(),
            discovered_skills: Vec::new(),
        }
    }

    pub fn with_declared<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Union of declared and discovered skills; declared labels win on collisions.
    pub fn skill_set(&self) -> SkillSet {
        let mut set = SkillSet::from_labels(&self.declared_skills);
        for entry in &self.discovered_skills {
            set.insert(&entry.skill);
        }
        set
    }

    pub fn declared_keys(&self) -> HashSet<String> {
        self.declared_skills
            .iter()
            .map(|s| normalize(s))
            .filter(|k| !k.is_empty())
            .collect()
    }

    pub fn discovered_keys(&self) -> HashSet<String> {
        self.discovered_skills
            .iter()
            .map(DiscoveredSkill::key)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: JobId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_labels")]
    pub required_skills: Vec<String>,
}

impl JobOpening {
    pub fn new<I, S>(id: JobId, title: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            title: title.into(),
            required_skills: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required_set(&self) -> SkillSet {
        SkillSet::from_labels(&self.required_skills)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient_label")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub participants: Vec<EmployeeId>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
            participants: Vec::new(),
        }
    }

    pub fn with_task(mut self, description: impl Into<String>) -> Self {
        self.tasks.push(Task {
            description: description.into(),
        });
        self
    }

    pub fn with_participants(mut self, ids: &[EmployeeId]) -> Self {
        self.participants.extend_from_slice(ids);
        self
    }
}

fn coerce_label(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    }
}

/// Non-string labels become empty strings, which every skill set ignores.
fn lenient_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_label(serde_json::Value::deserialize(deserializer)?))
}

fn lenient_labels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(coerce_label)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_string_labels_are_coerced() {
        let json = r#"{"id": 7, "name": "Ana", "declared_skills": ["Python", 42, null, "SQL"]}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(employee.declared_skills, vec!["Python", "", "", "SQL"]);
        assert_eq!(employee.skill_set().len(), 2);
        assert!(employee.discovered_skills.is_empty());
    }

    #[test]
    fn test_null_skill_list_is_empty() {
        let json = r#"{"id": 1, "title": "Analyst", "required_skills": null}"#;
        let job: JobOpening = serde_json::from_str(json).unwrap();
        assert!(job.required_skills.is_empty());
    }

    #[test]
    fn test_effective_skill_set_prefers_declared_label() {
        let mut employee = Employee::new(1, "Ana").with_declared(["Python (Avançado)", "SQL"]);
        employee.discovered_skills.push(DiscoveredSkill {
            skill: "Python".to_string(),
            origin: "project-tasks".to_string(),
            date: "2024-05-01".to_string(),
        });
        employee.discovered_skills.push(DiscoveredSkill {
            skill: "Docker".to_string(),
            origin: "project-tasks".to_string(),
            date: "2024-05-01".to_string(),
        });

        let set = employee.skill_set();
        let labels: Vec<&str> = set.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Python (Avançado)", "SQL", "Docker"]);
    }

    #[test]
    fn test_discovered_entry_without_provenance() {
        let json = r#"{"id": 2, "name": "Bruno", "discovered_skills": [{"skill": "Docker"}]}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();

        let entry = &employee.discovered_skills[0];
        assert_eq!(entry.skill, "Docker");
        assert!(entry.origin.is_empty());
        assert!(entry.date.is_empty());
        assert!(employee.discovered_keys().contains("docker"));
    }

    #[test]
    fn test_project_deserializes_without_optional_fields() {
        let project: Project = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(project.tasks.is_empty());
        assert!(project.participants.is_empty());
    }
}
