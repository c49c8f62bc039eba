use models::{Record, ValidationReport, ValidationResult};
use std::path::Path;
use validators::Registry;

/// Validates every record of an in-memory document against `target`.
///
/// When the document holds more than one record, each issue message ends
/// with the record's 1-based position.
pub fn evaluate_records(
    registry: &Registry<Record>,
    target: &str,
    records: &[Record],
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let [record] = records {
        report.extend(registry.validate(target, record));
        return report;
    }

    for (i, record) in records.iter().enumerate() {
        report.extend(
            registry
                .validate(target, record)
                .into_iter()
                .map(|issue| ValidationResult {
                    message: format!("{} (record {})", issue.message, i + 1),
                    ..issue
                }),
        );
    }

    report
}

pub fn evaluate_document(
    registry: &Registry<Record>,
    target: &str,
    path: &Path,
    verbose: bool,
) -> Result<ValidationReport, String> {
    if !registry.contains_target(target) {
        logging::warning(&format!(
            "No validators registered for target '{}', every record passes",
            target
        ));
    }

    let records = parser::load_records(path).map_err(|e| e.to_string())?;
    let report = evaluate_records(registry, target, &records);

    if verbose && report.is_valid {
        logging::info(&format!(
            "Checked {} record(s) in {}",
            records.len(),
            path.display()
        ));
    }

    Ok(report)
}
