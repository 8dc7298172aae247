//! Spec Validator CLI
//!
//! Runs the semantic rules over Swagger/OpenAPI files and directories.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use swagger_semantics::loader::{validate_directory, validate_file, FileReport};
use swagger_semantics::{OutputFormat, Severity, SpecValidator, ValidatorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spec-validator")]
#[command(about = "Semantic validation for Swagger/OpenAPI documents")]
struct Cli {
    /// Config file (defaults to spec-validator.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate spec files or directories
    Check {
        /// Files or directories to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output format (text or json)
        #[arg(short, long)]
        format: Option<String>,
        /// Also warn about keys next to a schema $ref
        #[arg(long)]
        ref_siblings: bool,
        /// Only print errors
        #[arg(long)]
        errors_only: bool,
    },

    /// Write a JSON summary report
    Report {
        /// Files or directories to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write it to this file instead
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Exit status for a validation run: 0 when clean, 1 when any error-level
/// diagnostic was found, 2 when any file could not be loaded
fn exit_code(reports: &[FileReport]) -> i32 {
    if reports.iter().any(FileReport::is_failed) {
        2
    } else if reports.iter().all(FileReport::is_clean) {
        0
    } else {
        1
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut config = match &cli.config {
        Some(path) => ValidatorConfig::load_from(Some(&path.to_string_lossy())),
        None => ValidatorConfig::load(),
    }
    .context("failed to load configuration")?;

    match cli.command {
        Commands::Check {
            paths,
            format,
            ref_siblings,
            errors_only,
        } => {
            if let Some(format) = format {
                config.output.format = match format.as_str() {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => anyhow::bail!("invalid format '{}'; use 'text' or 'json'", other),
                };
            }
            config.rules.ref_siblings |= ref_siblings;
            config.output.include_warnings &= !errors_only;

            let validator = SpecValidator::with_config(&config.rules);
            let reports = collect_reports(&paths, &config, &validator);

            match config.output.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&reports)?);
                }
                OutputFormat::Text => print_text(&reports, config.output.include_warnings),
            }

            Ok(exit_code(&reports))
        }

        Commands::Report { paths, output } => {
            let validator = SpecValidator::with_config(&config.rules);
            let reports = collect_reports(&paths, &config, &validator);

            let mut report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "rules": validator.rules().names(),
                "files": reports.len(),
                "results": {}
            });

            for file in &reports {
                let mut entry = serde_json::json!({
                    "errors": file.diagnostics.error_count(),
                    "warnings": file.diagnostics.warning_count(),
                    "diagnostics": file.diagnostics,
                });
                if let Some(failure) = &file.failure {
                    entry["failure"] = serde_json::json!(failure);
                }
                report["results"][file.path.display().to_string()] = entry;
            }

            let report_json = serde_json::to_string_pretty(&report)?;

            if let Some(path) = output {
                std::fs::write(&path, &report_json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("✅ Report written to {:?}", path);
            } else {
                println!("{}", report_json);
            }

            Ok(exit_code(&reports))
        }

        Commands::Config { write } => {
            match write {
                Some(path) => {
                    config
                        .save(&path.to_string_lossy())
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("✅ Config written to {:?}", path);
                }
                None => print!("{}", config.to_toml()?),
            }
            Ok(0)
        }
    }
}

/// Reports for every file named or found under a named directory; files
/// that fail to load are kept as failed reports
fn collect_reports(
    paths: &[PathBuf],
    config: &ValidatorConfig,
    validator: &SpecValidator,
) -> Vec<FileReport> {
    let mut reports = Vec::new();
    for path in paths {
        if path.is_dir() {
            reports.extend(validate_directory(path, &config.output.extensions, validator));
        } else {
            reports.push(
                validate_file(path, validator).unwrap_or_else(|e| FileReport::failed(path, &e)),
            );
        }
    }
    reports
}

fn print_text(reports: &[FileReport], include_warnings: bool) {
    let mut errors = 0;
    let mut warnings = 0;
    let mut failed = 0;

    for report in reports {
        if let Some(failure) = &report.failure {
            failed += 1;
            println!("💥 {}", report.path.display());
            println!("   └─ {}", failure);
            continue;
        }

        errors += report.diagnostics.error_count();
        warnings += report.diagnostics.warning_count();

        let shown: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| include_warnings || d.level == Severity::Error)
            .collect();

        if shown.is_empty() {
            println!("✅ {}", report.path.display());
            continue;
        }

        let marker = if report.is_clean() { "⚠️ " } else { "❌" };
        println!("{} {}", marker, report.path.display());
        for diagnostic in shown {
            println!("   └─ {}", diagnostic);
        }
    }

    println!();
    println!(
        "{} file(s), {} unreadable, {} error(s), {} warning(s)",
        reports.len(),
        failed,
        errors,
        warnings
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_semantics::{Diagnostic, DiagnosticCode, Diagnostics, SpecPath};

    fn report(name: &str, diagnostics: Diagnostics) -> FileReport {
        FileReport {
            path: PathBuf::from(name),
            diagnostics,
            failure: None,
        }
    }

    #[test]
    fn test_exit_code() {
        let clean = report("a.json", Diagnostics::new());
        let mut found = Diagnostics::new();
        found.push(Diagnostic::new(SpecPath::root(), DiagnosticCode::RangeViolation, "bad"));
        let dirty = report("b.json", found);
        let broken = FileReport {
            failure: Some("JSON error".to_string()),
            ..report("c.json", Diagnostics::new())
        };

        assert_eq!(exit_code(&[]), 0);
        assert_eq!(exit_code(&[clean.clone()]), 0);
        assert_eq!(exit_code(&[clean.clone(), dirty.clone()]), 1);
        assert_eq!(exit_code(&[broken.clone()]), 2);
        assert_eq!(exit_code(&[clean, dirty, broken]), 2);
    }

    #[test]
    fn test_collect_reports_keeps_unloadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let missing = dir.path().join("missing.yaml");

        let config = ValidatorConfig::default();
        let validator = SpecValidator::new();

        let from_dir = collect_reports(&[dir.path().to_path_buf()], &config, &validator);
        assert_eq!(from_dir.len(), 1);
        assert_eq!(exit_code(&from_dir), 2);

        let named = collect_reports(&[broken, missing], &config, &validator);
        assert_eq!(named.len(), 2);
        assert!(named.iter().all(FileReport::is_failed));
    }
}
