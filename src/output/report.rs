//! Report structures handed to the formatters

use crate::models::{Employee, EmployeeId, ProjectId};
use crate::skills::discovery::{DiscoveryReport, MissingParticipant};
use crate::skills::scorer::Recommendation;
use crate::skills::skill_set::Skill;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ranked job recommendations for one employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub employee: EmployeeSummary,

    /// Effective skill set (declared first, then discovered)
    pub skills: Vec<Skill>,

    /// Threshold applied, if any
    pub threshold: Option<u32>,

    pub recommendations: Vec<Recommendation>,

    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub role: Option<String>,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            role: employee.role.clone(),
        }
    }
}

impl RecommendationReport {
    pub fn new(employee: &Employee, threshold: Option<u32>, recommendations: Vec<Recommendation>) -> Self {
        Self {
            employee: employee.into(),
            skills: employee.skill_set().iter().cloned().collect(),
            threshold,
            recommendations,
            generated_at: timestamp(),
        }
    }
}

/// What a discovery run added, grouped per employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySummary {
    pub date: String,
    pub origin: String,
    pub projects_scanned: usize,
    pub dry_run: bool,
    pub employees: Vec<EmployeeDiscoveries>,
    pub missing_participants: Vec<MissingParticipant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDiscoveries {
    pub employee: EmployeeSummary,
    pub skills: Vec<DiscoveredFrom>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredFrom {
    pub skill: String,
    pub project_id: ProjectId,
}

impl DiscoverySummary {
    pub fn from_report(report: &DiscoveryReport, dry_run: bool) -> Self {
        let by_id: HashMap<EmployeeId, &Employee> = report.employees.iter().map(|e| (e.id, e)).collect();

        let mut employees: Vec<EmployeeDiscoveries> = Vec::new();
        for entry in &report.added {
            let item = DiscoveredFrom {
                skill: entry.skill.skill.clone(),
                project_id: entry.project_id,
            };
            match employees.iter_mut().find(|e| e.employee.id == entry.employee_id) {
                Some(existing) => existing.skills.push(item),
                None => {
                    let employee = match by_id.get(&entry.employee_id) {
                        Some(e) => EmployeeSummary::from(*e),
                        None => EmployeeSummary {
                            id: entry.employee_id,
                            name: String::new(),
                            role: None,
                        },
                    };
                    employees.push(EmployeeDiscoveries {
                        employee,
                        skills: vec![item],
                    });
                }
            }
        }

        Self {
            date: report.date.clone(),
            origin: report.origin.clone(),
            projects_scanned: report.projects_scanned,
            dry_run,
            employees,
            missing_participants: report.missing_participants.clone(),
        }
    }

    pub fn total_added(&self) -> usize {
        self.employees.iter().map(|e| e.skills.len()).sum()
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::discovery::SkillDiscovery;
    use crate::skills::extractor::SkillExtractor;
    use crate::skills::vocabulary::SkillVocabulary;
    use crate::models::Project;

    #[test]
    fn test_summary_groups_by_employee() {
        let extractor = SkillExtractor::new(&SkillVocabulary::builtin()).unwrap();
        let projects = vec![
            Project::new(1, "a").with_task("Docker e SQL").with_participants(&[1, 2]),
            Project::new(2, "b").with_task("Excel").with_participants(&[1, 5]),
        ];
        let employees = vec![Employee::new(1, "Ana"), Employee::new(2, "Bruno")];
        let report = SkillDiscovery::new(&extractor).discover_all(&projects, employees, "2024-06-01").unwrap();

        let summary = DiscoverySummary::from_report(&report, true);
        assert_eq!(summary.employees.len(), 2);
        assert_eq!(summary.employees[0].employee.name, "Ana");
        assert_eq!(summary.employees[0].skills.len(), 3);
        assert_eq!(summary.total_added(), 5);
        assert_eq!(summary.missing_participants.len(), 1);
    }
}
