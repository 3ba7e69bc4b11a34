//! skill-matcher: job recommendations and skill discovery from the command line

use clap::Parser;
use log::{debug, error, info};
use skill_matcher::cli::{self, Cli, Commands, ConfigAction};
use skill_matcher::config::{Config, OutputFormat};
use skill_matcher::input::DataStore;
use skill_matcher::output::formatter::save_report_to_file;
use skill_matcher::output::{DiscoverySummary, RecommendationReport, ReportGenerator};
use skill_matcher::skills::discovery::{run_date, SkillDiscovery};
use skill_matcher::skills::scorer::recommend_for_employee;
use skill_matcher::skills::search::search_employees;
use skill_matcher::skills::SkillExtractor;
use skill_matcher::{Result, SkillMatcherError};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_file = cli.config_file();
    let config = match Config::load_or_init(&config_file) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data.data_dir.clone());

    if let Err(e) = run_command(cli.command, config, config_file, data_dir).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(format) => cli::parse_output_format(format).map_err(SkillMatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn run_command(command: Commands, config: Config, config_file: PathBuf, data_dir: PathBuf) -> Result<()> {
    let store = DataStore::new(data_dir);
    let generator = ReportGenerator::with_options(config.output.color_output, true, true);

    match command {
        Commands::Recommend {
            employee,
            threshold,
            no_threshold,
            output,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let threshold = cli::resolve_threshold(threshold, no_threshold, config.recommendation.threshold);

            let employees = store.load_employees().await?;
            let jobs = store.load_jobs().await?;

            let target = employees
                .iter()
                .find(|e| e.id == employee)
                .ok_or(SkillMatcherError::EmployeeNotFound(employee))?;

            info!("Ranking {} job openings for employee {}", jobs.len(), target.id);
            let recommendations = recommend_for_employee(target, &jobs, threshold);
            debug!("{} recommendations after filtering", recommendations.len());

            let report = RecommendationReport::new(target, threshold, recommendations);
            let rendered = generator.recommendations(&report, format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Discover { dry_run, origin, output } => {
            let format = output_format(output.as_deref(), &config)?;
            let extractor = SkillExtractor::new(config.vocabulary())?;
            let discovery = SkillDiscovery::new(&extractor)
                .with_origin(origin.unwrap_or_else(|| config.discovery.origin.clone()))
                .suppress_declared(config.discovery.suppress_declared);

            let employees = store.load_employees().await?;
            let projects = store.load_projects().await?;

            let report = discovery.discover_all(&projects, employees, &run_date())?;

            if report.has_changes() && !dry_run {
                store.save_employees(&report.employees).await?;
            } else if dry_run {
                info!("Dry run: employee records left unchanged");
            }

            let summary = DiscoverySummary::from_report(&report, dry_run);
            println!("{}", generator.discovery(&summary, format)?);
        }

        Commands::Extract { text } => {
            let extractor = SkillExtractor::new(config.vocabulary())?;
            let found = extractor.extract(&text);
            if found.is_empty() {
                println!("No known skills found ({} phrases checked).", extractor.phrase_count());
            } else {
                println!("Found {} of {} known skills:", found.len(), extractor.phrase_count());
                for skill in found {
                    println!("{}", skill);
                }
            }
        }

        Commands::Search { query } => {
            let employees = store.load_employees().await?;
            let matches = search_employees(&employees, &query);
            if matches.is_empty() {
                println!("No employees with a skill matching '{}'.", query);
            }
            for employee in matches {
                let skills: Vec<String> = employee.skill_set().iter().map(|s| s.label.clone()).collect();
                println!("#{} {}: {}", employee.id, employee.name, skills.join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("{}", config.to_toml()?);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_file.display());
            }

            Some(ConfigAction::Reset) => {
                Config::reset_at(&config_file)?;
                println!("Configuration at {} reset to defaults.", config_file.display());
            }
        },
    }

    Ok(())
}
