use clap::ValueEnum;
use colored::*;
use models::{Record, ValidationReport};
use parser::RuleSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use validators::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct DocumentOutcome {
    path: PathBuf,
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ValidationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Picks the target to validate against: the explicit one, or the rule
/// file's only target.
pub fn resolve_target(rules: &RuleSet, target: Option<&str>) -> Result<String, String> {
    match target {
        Some(target) => {
            if !rules.targets.contains_key(target) {
                return Err(format!(
                    "Unknown target '{}'. Available targets are: {}",
                    target,
                    rules.targets.keys().cloned().collect::<Vec<_>>().join(", ")
                ));
            }
            Ok(target.to_string())
        }
        None => rules.sole_target().map(str::to_string).ok_or_else(|| {
            format!(
                "Rule file defines {} targets, choose one with --target",
                rules.targets.len()
            )
        }),
    }
}

/// Validates every document under `path`. Returns whether all of them passed.
pub fn validate_documents(
    rules_path: &Path,
    target: Option<&str>,
    path: &Path,
    format: OutputFormat,
    verbose: bool,
) -> Result<bool, String> {
    let rules = parser::load_rules(rules_path).map_err(|e| e.to_string())?;
    let target = resolve_target(&rules, target)?;
    let registry = rules.build_registry().map_err(|e| e.to_string())?;

    let documents = utils::collect_documents(path).map_err(|e| e.to_string())?;
    logging::info(&format!(
        "Validating {} document(s) against '{}'",
        documents.len(),
        target
    ));

    let outcomes: Vec<DocumentOutcome> = documents
        .into_iter()
        .map(|document| check_document(&registry, &target, document, verbose))
        .collect();

    match format {
        OutputFormat::Text => print_text(&outcomes),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcomes)
                .map_err(|e| format!("Failed to serialize results: {}", e))?;
            println!("{}", json);
        }
    }

    Ok(outcomes.iter().all(|outcome| outcome.is_valid))
}

fn check_document(
    registry: &Registry<Record>,
    target: &str,
    path: PathBuf,
    verbose: bool,
) -> DocumentOutcome {
    match evaluator::evaluate_document(registry, target, &path, verbose) {
        Ok(report) => DocumentOutcome {
            path,
            is_valid: report.is_valid,
            report: Some(report),
            error: None,
        },
        Err(e) => {
            logging::error(&format!("Error processing {}: {}", path.display(), e));
            DocumentOutcome {
                path,
                is_valid: false,
                report: None,
                error: Some(e),
            }
        }
    }
}

fn print_text(outcomes: &[DocumentOutcome]) {
    let mut valid_count = 0;
    let mut invalid_count = 0;

    println!("Validating {} document(s)...", outcomes.len());

    for outcome in outcomes {
        match (&outcome.report, &outcome.error) {
            (Some(report), _) if report.is_valid => {
                println!("{} Valid: {}", "✅".green(), outcome.path.display());
                valid_count += 1;
            }
            (Some(report), _) => {
                println!("{} Invalid: {}", "❌".red(), outcome.path.display());
                for (i, issue) in report.issues.iter().enumerate() {
                    println!("   {}. {}", i + 1, issue);
                }
                invalid_count += 1;
            }
            (None, error) => {
                println!(
                    "{} Error processing {}: {}",
                    "❌".red(),
                    outcome.path.display(),
                    error.as_deref().unwrap_or("unknown error")
                );
                invalid_count += 1;
            }
        }
    }

    println!(
        "\nSummary: {} valid, {} invalid",
        valid_count.to_string().green(),
        invalid_count.to_string().red()
    );
}

/// Checks a rule file and lists what it registers.
pub fn describe_rules(rules_path: &Path) -> Result<(), String> {
    let rules = parser::load_rules(rules_path).map_err(|e| e.to_string())?;
    let registry = rules.build_registry().map_err(|e| e.to_string())?;

    println!(
        "{} {} defines {} target(s)",
        "✓".green(),
        rules_path.display(),
        registry.len()
    );

    for target in registry.targets() {
        let descriptions = registry
            .validators(target)
            .map(|validators| validators.describe())
            .unwrap_or_default();

        println!("\n{} ({} validator(s))", target.bold(), descriptions.len());
        for (i, description) in descriptions.iter().enumerate() {
            println!("   {}. {}", i + 1, description);
        }
    }

    Ok(())
}
