//! Employee lookup by skill substring

use crate::models::Employee;

/// Employees with a declared or discovered skill containing `query`,
/// case-insensitively. A blank query keeps everyone.
pub fn search_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return employees.iter().collect();
    }

    employees
        .iter()
        .filter(|employee| {
            employee
                .declared_skills
                .iter()
                .map(String::as_str)
                .chain(employee.discovered_skills.iter().map(|s| s.skill.as_str()))
                .any(|label| label.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscoveredSkill;

    fn employees() -> Vec<Employee> {
        let mut carla = Employee::new(3, "Carla").with_declared(["Excel"]);
        carla.discovered_skills.push(DiscoveredSkill {
            skill: "Power bi".to_string(),
            origin: "project-tasks".to_string(),
            date: "2024-06-01".to_string(),
        });
        vec![
            Employee::new(1, "Ana").with_declared(["Python (Avançado)", "SQL"]),
            Employee::new(2, "Bruno").with_declared(["Java", "Docker"]),
            carla,
        ]
    }

    #[test]
    fn test_matches_declared_and_discovered() {
        let employees = employees();
        let names: Vec<&str> = search_employees(&employees, "BI").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Carla"]);

        let names: Vec<&str> = search_employees(&employees, "avan").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);
    }

    #[test]
    fn test_blank_query_returns_all() {
        let employees = employees();
        assert_eq!(search_employees(&employees, "  ").len(), 3);
    }

    #[test]
    fn test_no_match() {
        let employees = employees();
        assert!(search_employees(&employees, "kotlin").is_empty());
    }
}
