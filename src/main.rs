//! ATS analyzer: heuristic applicant tracking system compatibility checks

use anyhow::Context;
use ats_analyzer::cli::{Cli, Commands, ConfigAction};
use ats_analyzer::config::{Config, OutputFormat};
use ats_analyzer::error::Result;
use ats_analyzer::input::manager::{validate_file_extension, JOB_EXTENSIONS, RESUME_EXTENSIONS};
use ats_analyzer::input::InputManager;
use ats_analyzer::output::{save_report_to_file, suggest_filename, AnalysisReport, ReportGenerator, ReportMetadata};
use ats_analyzer::processing::analyzer::{AnalysisInput, AtsAnalyzer};
use ats_analyzer::processing::keywords::{extract_target_keywords, list_roles};
use clap::Parser;
use log::{debug, error, info};
use std::path::Path;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            role,
            output,
            save,
            detailed,
            no_color,
        } => {
            validate_file_extension(&resume, RESUME_EXTENSIONS)?;
            if let Some(job) = &job {
                validate_file_extension(job, JOB_EXTENSIONS)?;
            }

            let output_format = match output {
                Some(format) => format.parse::<OutputFormat>()?,
                None => config.output.format,
            };
            let target_role = role.or_else(|| config.analysis.default_target_role.clone());

            info!("Analyzing {}", resume.display());
            let start = Instant::now();

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = match &job {
                Some(path) => Some(input_manager.extract_text(path).await?),
                None => None,
            };

            let mut input = AnalysisInput::new(resume_text);
            if let Some(job_text) = job_text {
                input = input.with_job_description(job_text);
            }
            if let Some(role) = &target_role {
                input = input.with_target_role(role.clone());
            }

            let result = AtsAnalyzer::from_config(&config.analysis).analyze(&input);

            let mut metadata = ReportMetadata::new(resume.display().to_string());
            metadata.job_file = job.as_ref().map(|p| p.display().to_string());
            metadata.target_role = target_role;
            metadata.processing_time_ms = start.elapsed().as_millis() as u64;
            let report = AnalysisReport::new(result, metadata);

            let use_colors = config.output.color_output && !no_color && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed || config.output.detailed);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Roles => {
            println!("Available target roles\n");
            for (role, keywords) in list_roles() {
                println!("  • {} ({} keywords)", role, keywords.len());
                println!("    {}", keywords.join(", "));
            }
        }

        Commands::Keywords { job, role } => {
            let job_text = match &job {
                Some(path) => {
                    validate_file_extension(path, JOB_EXTENSIONS)?;
                    Some(InputManager::new().extract_text(path).await?)
                }
                None => None,
            };
            let target_role = role.or_else(|| config.analysis.default_target_role.clone());

            let target = extract_target_keywords(job_text.as_deref(), target_role.as_deref());
            println!("Target keywords ({:?}, {} total)\n", target.source, target.keywords.len());
            for (i, keyword) in target.keywords.iter().enumerate() {
                println!("  {:>2}. {}", i + 1, keyword);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                println!("Analysis:");
                println!("  missing_keywords_limit: {}", config.analysis.missing_keywords_limit);
                println!("  found_keywords_limit: {}", config.analysis.found_keywords_limit);
                println!(
                    "  default_target_role: {}",
                    config.analysis.default_target_role.as_deref().unwrap_or("none")
                );
                println!("\nOutput:");
                println!("  format: {}", format_name(config.output.format));
                println!("  detailed: {}", config.output.detailed);
                println!("  color_output: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                debug!("Saved configuration to {}", config_path.display());
                println!("Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Console => "console",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "markdown",
        OutputFormat::Html => "html",
    }
}
