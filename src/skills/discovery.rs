//! Skill discovery: merge skills found in project tasks into employee records

use crate::error::{Result, SkillMatcherError};
use crate::models::{DiscoveredSkill, Employee, EmployeeId, Project, ProjectId};
use crate::skills::extractor::SkillExtractor;
use crate::skills::normalizer::display_label;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const DEFAULT_ORIGIN: &str = "project-tasks";

/// One entry appended during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub skill: DiscoveredSkill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingParticipant {
    pub project_id: ProjectId,
    pub employee_id: EmployeeId,
}

impl From<&MissingParticipant> for SkillMatcherError {
    fn from(missing: &MissingParticipant) -> Self {
        SkillMatcherError::MissingParticipant {
            project_id: missing.project_id,
            employee_id: missing.employee_id,
        }
    }
}

/// Outcome of a single project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDiscovery {
    /// Participants that gained at least one skill, already updated
    pub updated: Vec<Employee>,
    pub added: Vec<DiscoveryEntry>,
    pub missing_participants: Vec<MissingParticipant>,
}

/// Outcome of a run over many projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub date: String,
    pub origin: String,
    pub projects_scanned: usize,
    /// Every employee, in input order, with new entries appended
    pub employees: Vec<Employee>,
    pub added: Vec<DiscoveryEntry>,
    pub missing_participants: Vec<MissingParticipant>,
}

impl DiscoveryReport {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
    }
}

pub struct SkillDiscovery<'a> {
    extractor: &'a SkillExtractor,
    origin: String,
    suppress_declared: bool,
}

impl<'a> SkillDiscovery<'a> {
    pub fn new(extractor: &'a SkillExtractor) -> Self {
        Self {
            extractor,
            origin: DEFAULT_ORIGIN.to_string(),
            suppress_declared: false,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Also skip keys the employee already declared.
    pub fn suppress_declared(mut self, suppress: bool) -> Self {
        self.suppress_declared = suppress;
        self
    }

    /// Skills found in `project`'s tasks that `employee` has not recorded yet.
    pub fn new_skills(&self, project: &Project, employee: &Employee) -> BTreeSet<String> {
        let extracted = self
            .extractor
            .extract_all(project.tasks.iter().map(|t| t.description.as_str()));

        let mut known: HashSet<String> = employee.discovered_keys();
        if self.suppress_declared {
            known.extend(employee.declared_keys());
        }

        extracted.into_iter().filter(|key| !known.contains(key)).collect()
    }

    /// Compute updated copies of the project's participants.
    ///
    /// Participants absent from `employees` are logged and reported; the rest
    /// are still processed.
    pub fn discover_project(
        &self,
        project: &Project,
        employees: &BTreeMap<EmployeeId, Employee>,
        date: &str,
    ) -> ProjectDiscovery {
        let mut outcome = ProjectDiscovery::default();
        let mut seen = HashSet::new();

        for &employee_id in &project.participants {
            if !seen.insert(employee_id) {
                continue;
            }

            let Some(employee) = employees.get(&employee_id) else {
                let missing = MissingParticipant {
                    project_id: project.id,
                    employee_id,
                };
                warn!("{}; skipping", SkillMatcherError::from(&missing));
                outcome.missing_participants.push(missing);
                continue;
            };

            let new_keys = self.new_skills(project, employee);
            if new_keys.is_empty() {
                debug!("No new skills for employee {} in project {}", employee_id, project.id);
                continue;
            }

            let mut updated = employee.clone();
            for key in new_keys {
                let entry = DiscoveredSkill {
                    skill: display_label(&key),
                    origin: self.origin.clone(),
                    date: date.to_string(),
                };
                updated.discovered_skills.push(entry.clone());
                outcome.added.push(DiscoveryEntry {
                    employee_id,
                    project_id: project.id,
                    skill: entry,
                });
            }
            outcome.updated.push(updated);
        }

        outcome
    }

    /// Apply every project in order over one working copy of `employees`.
    ///
    /// Fails with `InvalidInput` when two records share an id, since a
    /// participant id could then name either of them.
    pub fn discover_all(&self, projects: &[Project], employees: Vec<Employee>, date: &str) -> Result<DiscoveryReport> {
        let mut seen = HashSet::new();
        if let Some(dup) = employees.iter().find(|e| !seen.insert(e.id)) {
            return Err(SkillMatcherError::InvalidInput(format!(
                "Employee id {} appears more than once",
                dup.id
            )));
        }

        let order: Vec<EmployeeId> = employees.iter().map(|e| e.id).collect();
        let mut by_id: BTreeMap<EmployeeId, Employee> = employees.into_iter().map(|e| (e.id, e)).collect();

        let mut report = DiscoveryReport {
            date: date.to_string(),
            origin: self.origin.clone(),
            projects_scanned: projects.len(),
            ..Default::default()
        };

        for project in projects {
            let outcome = self.discover_project(project, &by_id, date);
            for employee in outcome.updated {
                by_id.insert(employee.id, employee);
            }
            report.added.extend(outcome.added);
            report.missing_participants.extend(outcome.missing_participants);
        }

        info!(
            "Discovery scanned {} projects: {} new skills, {} missing participants",
            report.projects_scanned,
            report.added.len(),
            report.missing_participants.len()
        );

        report.employees = order.into_iter().filter_map(|id| by_id.remove(&id)).collect();
        Ok(report)
    }
}

/// Today's run date, UTC.
pub fn run_date() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::vocabulary::SkillVocabulary;

    const DATE: &str = "2024-06-01";

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(&SkillVocabulary::builtin()).unwrap()
    }

    fn project() -> Project {
        Project::new(10, "Migração")
            .with_task("Criar API REST em Flask")
            .with_task("Modelar tabelas em SQL e dashboards no Power BI")
            .with_participants(&[1, 2])
    }

    fn employees() -> Vec<Employee> {
        vec![
            Employee::new(1, "Ana").with_declared(["Python", "SQL"]),
            Employee::new(2, "Bruno").with_declared(["Java"]),
            Employee::new(3, "Carla").with_declared(["Excel"]),
        ]
    }

    #[test]
    fn test_appends_capitalized_entries() {
        let extractor = extractor();
        let discovery = SkillDiscovery::new(&extractor);
        let report = discovery.discover_all(&[project()], employees(), DATE).unwrap();

        let ana = &report.employees[0];
        let labels: Vec<&str> = ana.discovered_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(labels, vec!["Api", "Flask", "Power bi", "Rest", "Sql"]);
        assert!(ana.discovered_skills.iter().all(|s| s.origin == DEFAULT_ORIGIN && s.date == DATE));
        assert_eq!(ana.declared_skills, vec!["Python", "SQL"]);

        assert_eq!(report.employees[1].discovered_skills.len(), 5);
        assert!(report.employees[2].discovered_skills.is_empty());
        assert_eq!(report.added.len(), 10);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let extractor = extractor();
        let discovery = SkillDiscovery::new(&extractor);
        let first = discovery.discover_all(&[project()], employees(), DATE).unwrap();
        let second = discovery.discover_all(&[project()], first.employees.clone(), "2024-06-02").unwrap();

        assert!(!second.has_changes());
        assert_eq!(second.employees, first.employees);
    }

    #[test]
    fn test_existing_entry_with_other_casing_is_known() {
        let extractor = extractor();
        let mut ana = Employee::new(1, "Ana");
        ana.discovered_skills.push(DiscoveredSkill {
            skill: "FLASK (framework)".to_string(),
            origin: "manual".to_string(),
            date: "2023-01-01".to_string(),
        });

        let project = Project::new(1, "p").with_task("Flask e Docker").with_participants(&[1]);
        let report = SkillDiscovery::new(&extractor).discover_all(&[project], vec![ana], DATE).unwrap();

        let skills: Vec<&str> = report.employees[0].discovered_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(skills, vec!["FLASK (framework)", "Docker"]);
    }

    #[test]
    fn test_declared_skills_are_rediscovered_by_default() {
        let extractor = extractor();
        let project = Project::new(1, "p").with_task("Consultas SQL").with_participants(&[1]);
        let ana = Employee::new(1, "Ana").with_declared(["SQL"]);

        let report = SkillDiscovery::new(&extractor).discover_all(&[project.clone()], vec![ana.clone()], DATE).unwrap();
        assert_eq!(report.added.len(), 1);

        let report = SkillDiscovery::new(&extractor)
            .suppress_declared(true)
            .discover_all(&[project], vec![ana], DATE).unwrap();
        assert!(report.added.is_empty());
    }

    #[test]
    fn test_missing_participant_is_skipped() {
        let extractor = extractor();
        let project = Project::new(7, "p").with_task("Docker").with_participants(&[99, 1]);
        let report = SkillDiscovery::new(&extractor).discover_all(&[project], employees(), DATE).unwrap();

        assert_eq!(
            report.missing_participants,
            vec![MissingParticipant { project_id: 7, employee_id: 99 }]
        );
        assert_eq!(report.employees[0].discovered_skills.len(), 1);
    }

    #[test]
    fn test_same_skill_across_projects_is_recorded_once() {
        let extractor = extractor();
        let a = Project::new(1, "a").with_task("Docker compose").with_participants(&[2]);
        let b = Project::new(2, "b").with_task("Imagens Docker e Java").with_participants(&[2, 2]);

        let report = SkillDiscovery::new(&extractor)
            .with_origin("sprint-review")
            .discover_all(&[a, b], employees(), DATE).unwrap();

        let bruno = &report.employees[1];
        let skills: Vec<&str> = bruno.discovered_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(skills, vec!["Docker", "Java"]);
        assert_eq!(report.added[0].project_id, 1);
        assert_eq!(report.added[1].project_id, 2);
        assert_eq!(bruno.discovered_skills[0].origin, "sprint-review");
    }

    #[test]
    fn test_discover_project_leaves_input_untouched() {
        let extractor = extractor();
        let map: BTreeMap<EmployeeId, Employee> = employees().into_iter().map(|e| (e.id, e)).collect();
        let before = map.clone();

        let outcome = SkillDiscovery::new(&extractor).discover_project(&project(), &map, DATE);
        assert_eq!(outcome.updated.len(), 2);
        assert_eq!(map, before);
    }

    #[test]
    fn test_duplicate_employee_ids_are_rejected() {
        let extractor = extractor();
        let employees = vec![
            Employee::new(1, "Ana").with_declared(["SQL"]),
            Employee::new(1, "Ana Souza").with_declared(["Excel"]),
            Employee::new(2, "Bruno"),
        ];
        let project = Project::new(1, "p").with_task("Docker").with_participants(&[2]);

        let err = SkillDiscovery::new(&extractor)
            .discover_all(&[project], employees, DATE)
            .unwrap_err();
        assert!(matches!(err, SkillMatcherError::InvalidInput(_)));
    }

    #[test]
    fn test_run_date_format() {
        let date = run_date();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }
}
