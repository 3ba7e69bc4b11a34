//! Output formatters for recommendation and discovery reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String>;
    fn format_discovery(&self, summary: &DiscoverySummary) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter for a requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

const STYLES: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #007acc; border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .score-badge { display: inline-block; padding: 4px 12px; border-radius: 12px; font-weight: bold; color: white; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .footer { margin-top: 20px; color: #6c757d; font-size: 0.9em; }
"#;

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Job Recommendations - {{ employee_name }}</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="container">
        <h1>Job Recommendations for {{ employee_name }}</h1>
        <p><strong>Skills:</strong> {{ skills }}</p>
        {% if rows.is_empty() %}
        <p>No job openings passed the filters.</p>
        {% else %}
        <table>
            <tr><th>#</th><th>Job</th><th>Match</th><th>Matched skills</th><th>Skills to develop</th></tr>
            {% for row in rows %}
            <tr>
                <td>{{ row.rank }}</td>
                <td>{{ row.title }}</td>
                <td><span class="score-badge {{ row.score_class }}">{{ row.percentage }}%</span></td>
                <td>{{ row.matched }}</td>
                <td>{{ row.missing }}</td>
            </tr>
            {% endfor %}
        </table>
        {% endif %}
        <div class="footer">
            <p>Generated: {{ generated_at }} | Threshold: {{ threshold }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct RecommendationTemplate {
    include_styles: bool,
    styles: &'static str,
    employee_name: String,
    skills: String,
    rows: Vec<HtmlRecommendationRow>,
    generated_at: String,
    threshold: String,
}

struct HtmlRecommendationRow {
    rank: usize,
    title: String,
    percentage: u32,
    score_class: &'static str,
    matched: String,
    missing: String,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Skill Discovery - {{ date }}</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="container">
        <h1>Skill Discovery</h1>
        <p><strong>Date:</strong> {{ date }} | <strong>Origin:</strong> {{ origin }} | <strong>Projects scanned:</strong> {{ projects_scanned }}{% if dry_run %} | <em>dry run</em>{% endif %}</p>
        {% if rows.is_empty() %}
        <p>No new skills discovered.</p>
        {% else %}
        <table>
            <tr><th>Employee</th><th>New skills</th></tr>
            {% for row in rows %}
            <tr><td>{{ row.employee }}</td><td>{{ row.skills }}</td></tr>
            {% endfor %}
        </table>
        {% endif %}
        {% if !missing.is_empty() %}
        <h2>Unknown participants</h2>
        <ul>
            {% for m in missing %}<li>{{ m }}</li>{% endfor %}
        </ul>
        {% endif %}
    </div>
</body>
</html>"#, ext = "html")]
struct DiscoveryTemplate {
    include_styles: bool,
    styles: &'static str,
    date: String,
    origin: String,
    projects_scanned: usize,
    dry_run: bool,
    rows: Vec<HtmlDiscoveryRow>,
    missing: Vec<String>,
}

struct HtmlDiscoveryRow {
    employee: String,
    skills: String,
}

fn score_label(percentage: u32) -> (&'static str, Color) {
    match percentage {
        90..=100 => ("EXCELLENT", Color::Green),
        70..=89 => ("GOOD", Color::BrightGreen),
        50..=69 => ("FAIR", Color::Yellow),
        _ => ("LOW", Color::Red),
    }
}

fn score_class(percentage: u32) -> &'static str {
    match percentage {
        90..=100 => "score-excellent",
        70..=89 => "score-good",
        50..=69 => "score-fair",
        _ => "score-poor",
    }
}

fn join_or_dash(labels: &[&str]) -> String {
    if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join(", ")
    }
}

fn threshold_text(threshold: Option<u32>) -> String {
    match threshold {
        Some(t) => format!("> {}%", t),
        None => "none".to_string(),
    }
}

fn missing_text(missing: &crate::skills::discovery::MissingParticipant) -> String {
    format!("employee {} (project {})", missing.employee_id, missing.project_id)
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, percentage: u32) -> String {
        let (badge, color) = score_label(percentage);
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("JOB RECOMMENDATIONS: {}", report.employee.name), 1));
        if let Some(role) = &report.employee.role {
            output.push_str(&format!("Role: {}\n", role));
        }
        let skills: Vec<&str> = report.skills.iter().map(|s| s.label.as_str()).collect();
        output.push_str(&format!("Skills: {}\n", join_or_dash(&skills)));
        output.push_str(&format!(
            "Generated: {} | Threshold: {}\n",
            report.generated_at,
            threshold_text(report.threshold)
        ));

        if report.recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("No job openings passed the filters.", Color::Yellow)));
            return Ok(output);
        }

        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&self.format_header(&format!("{}. {}", i + 1, rec.title), 2));
            output.push_str(&format!(
                "Match: {}% {}\n",
                rec.result.percentage,
                self.format_score_badge(rec.result.percentage)
            ));
            output.push_str(&format!(
                "✓ Matched: {}\n",
                self.colorize(&join_or_dash(&rec.result.matched_labels()), Color::Green)
            ));
            output.push_str(&format!(
                "✗ To develop: {}\n",
                self.colorize(&join_or_dash(&rec.result.missing_labels()), Color::Red)
            ));
        }

        Ok(output)
    }

    fn format_discovery(&self, summary: &DiscoverySummary) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("SKILL DISCOVERY", 1));
        output.push_str(&format!(
            "Date: {} | Origin: {} | Projects scanned: {}\n",
            summary.date, summary.origin, summary.projects_scanned
        ));
        if summary.dry_run {
            output.push_str(&format!("{}\n", self.colorize("Dry run: nothing was saved", Color::Yellow)));
        }

        if summary.employees.is_empty() {
            output.push_str("\nNo new skills discovered.\n");
        } else {
            output.push_str(&self.format_header(&format!("{} new skills", summary.total_added()), 2));
            for item in &summary.employees {
                let skills: Vec<&str> = item.skills.iter().map(|s| s.skill.as_str()).collect();
                output.push_str(&format!(
                    "• {} (#{}): {}\n",
                    item.employee.name,
                    item.employee.id,
                    self.colorize(&skills.join(", "), Color::Cyan)
                ));
            }
        }

        if !summary.missing_participants.is_empty() {
            output.push_str(&self.format_header("Unknown participants", 3));
            for missing in &summary.missing_participants {
                output.push_str(&format!("⚠ {}\n", missing_text(missing)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_discovery(&self, summary: &DiscoverySummary) -> Result<String> {
        self.to_json(summary)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# Job Recommendations for {}\n\n", report.employee.name));
        let skills: Vec<&str> = report.skills.iter().map(|s| s.label.as_str()).collect();
        output.push_str(&format!("**Skills:** {}\n\n", join_or_dash(&skills)));
        output.push_str(&format!(
            "**Generated:** {} | **Threshold:** {}\n\n",
            report.generated_at,
            threshold_text(report.threshold)
        ));

        if report.recommendations.is_empty() {
            output.push_str("_No job openings passed the filters._\n");
            return Ok(output);
        }

        output.push_str("| # | Job | Match | Matched skills | Skills to develop |\n");
        output.push_str("|---|-----|-------|----------------|-------------------|\n");
        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {}% | {} | {} |\n",
                i + 1,
                rec.title,
                rec.result.percentage,
                join_or_dash(&rec.result.matched_labels()),
                join_or_dash(&rec.result.missing_labels())
            ));
        }

        Ok(output)
    }

    fn format_discovery(&self, summary: &DiscoverySummary) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Skill Discovery\n\n");
        output.push_str(&format!(
            "**Date:** {} | **Origin:** `{}` | **Projects scanned:** {}\n\n",
            summary.date, summary.origin, summary.projects_scanned
        ));
        if summary.dry_run {
            output.push_str("> Dry run: nothing was saved.\n\n");
        }

        if summary.employees.is_empty() {
            output.push_str("_No new skills discovered._\n");
        } else {
            for item in &summary.employees {
                output.push_str(&format!("## {} (#{})\n\n", item.employee.name, item.employee.id));
                for skill in &item.skills {
                    output.push_str(&format!("- {} _(project {})_\n", skill.skill, skill.project_id));
                }
                output.push('\n');
            }
        }

        if !summary.missing_participants.is_empty() {
            output.push_str("## Unknown participants\n\n");
            for missing in &summary.missing_participants {
                output.push_str(&format!("- {}\n", missing_text(missing)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        let skills: Vec<&str> = report.skills.iter().map(|s| s.label.as_str()).collect();
        let rows = report
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| HtmlRecommendationRow {
                rank: i + 1,
                title: rec.title.clone(),
                percentage: rec.result.percentage,
                score_class: score_class(rec.result.percentage),
                matched: join_or_dash(&rec.result.matched_labels()),
                missing: join_or_dash(&rec.result.missing_labels()),
            })
            .collect();

        let template = RecommendationTemplate {
            include_styles: self.include_styles,
            styles: STYLES,
            employee_name: report.employee.name.clone(),
            skills: join_or_dash(&skills),
            rows,
            generated_at: report.generated_at.clone(),
            threshold: threshold_text(report.threshold),
        };
        Ok(template.render()?)
    }

    fn format_discovery(&self, summary: &DiscoverySummary) -> Result<String> {
        let rows = summary
            .employees
            .iter()
            .map(|item| HtmlDiscoveryRow {
                employee: format!("{} (#{})", item.employee.name, item.employee.id),
                skills: item.skills.iter().map(|s| s.skill.as_str()).collect::<Vec<_>>().join(", "),
            })
            .collect();

        let template = DiscoveryTemplate {
            include_styles: self.include_styles,
            styles: STYLES,
            date: summary.date.clone(),
            origin: summary.origin.clone(),
            projects_scanned: summary.projects_scanned,
            dry_run: summary.dry_run,
            rows,
            missing: summary.missing_participants.iter().map(missing_text).collect(),
        };
        Ok(template.render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn recommendations(&self, report: &RecommendationReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_recommendations(report)
    }

    pub fn discovery(&self, summary: &DiscoverySummary, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_discovery(summary)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, JobOpening};
    use crate::skills::scorer::recommend_for_employee;

    fn report() -> RecommendationReport {
        let employee = Employee::new(1, "Ana").with_declared(["Python", "SQL"]);
        let jobs = vec![
            JobOpening::new(1, "Data Analyst", ["Python", "SQL", "Power BI"]),
            JobOpening::new(2, "Backend <Java>", ["Java", "SQL"]),
        ];
        let recs = recommend_for_employee(&employee, &jobs, Some(30));
        RecommendationReport::new(&employee, Some(30), recs)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false).format_recommendations(&report()).unwrap();
        assert!(output.contains("JOB RECOMMENDATIONS: Ana"));
        assert!(output.contains("1. Data Analyst"));
        assert!(output.contains("Match: 67% [FAIR]"));
        assert!(output.contains("✗ To develop: Power BI"));
        assert!(output.contains("Threshold: > 30%"));
    }

    #[test]
    fn test_json_is_parseable() {
        let output = JsonFormatter::new(false).format_recommendations(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["recommendations"][0]["percentage"], 67);
        assert_eq!(value["recommendations"][1]["job_id"], 2);
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter.format_recommendations(&report()).unwrap();
        assert!(output.contains("| 1 | Data Analyst | 67% | Python, SQL | Power BI |"));
    }

    #[test]
    fn test_html_escapes_titles() {
        let output = HtmlFormatter::new(false).format_recommendations(&report()).unwrap();
        assert!(output.contains("Backend &lt;Java&gt;"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, true, true);
        let output = generator.recommendations(&report(), OutputFormat::Html).unwrap();
        assert!(output.contains("<style>"));
        assert_eq!(generator.formatter(OutputFormat::Markdown).supports_format(), OutputFormat::Markdown);
    }
}
