//! Compatibility scoring between an employee's skills and a job's requirements

use crate::models::{Employee, JobId, JobOpening};
use crate::skills::skill_set::{Skill, SkillSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Required skills the employee has, in requirement order
    pub matched: Vec<Skill>,
    /// Required skills the employee lacks, in requirement order
    pub missing: Vec<Skill>,
    /// Share of the requirements covered, 0-100
    pub percentage: u32,
}

impl CompatibilityResult {
    pub fn matched_labels(&self) -> Vec<&str> {
        self.matched.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn missing_labels(&self) -> Vec<&str> {
        self.missing.iter().map(|s| s.label.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job_id: JobId,
    pub title: String,
    #[serde(flatten)]
    pub result: CompatibilityResult,
}

/// Match `employee_skills` against `required_skills`.
///
/// Labels in the result come from the requirement side. An empty requirement
/// set scores 0.
pub fn score(employee_skills: &SkillSet, required_skills: &SkillSet) -> CompatibilityResult {
    let (matched, missing): (Vec<Skill>, Vec<Skill>) = required_skills
        .iter()
        .cloned()
        .partition(|skill| employee_skills.contains_key(&skill.key));

    let percentage = percentage(matched.len(), required_skills.len());

    CompatibilityResult {
        matched,
        missing,
        percentage,
    }
}

/// `part / whole * 100`, rounded half to even. Zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = part as u64 * 100;
    let whole = whole as u64;
    let quotient = scaled / whole;
    let twice_remainder = (scaled % whole) * 2;

    let rounded = if twice_remainder > whole || (twice_remainder == whole && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded as u32
}

/// Rank `jobs` for one employee.
///
/// Jobs sharing no skill with the employee are dropped. With a `threshold`,
/// jobs scoring at or below it are dropped as well. The rest are ordered by
/// percentage, highest first, keeping input order among equal scores.
pub fn recommend(employee_skills: &SkillSet, jobs: &[JobOpening], threshold: Option<u32>) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = jobs
        .iter()
        .map(|job| Recommendation {
            job_id: job.id,
            title: job.title.clone(),
            result: score(employee_skills, &job.required_set()),
        })
        .filter(|rec| !rec.result.matched.is_empty())
        .filter(|rec| threshold.map_or(true, |t| rec.result.percentage > t))
        .collect();

    // sort_by is stable
    recommendations.sort_by(|a, b| b.result.percentage.cmp(&a.result.percentage));
    recommendations
}

pub fn recommend_for_employee(employee: &Employee, jobs: &[JobOpening], threshold: Option<u32>) -> Vec<Recommendation> {
    recommend(&employee.skill_set(), jobs, threshold)
}
