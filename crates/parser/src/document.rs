use models::{Record, RecordError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Record {index}: {source}")]
    NotARecord {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("Document must be an object or a list of objects: {0}")]
    NotADocument(#[source] RecordError),
}

/// Splits a parsed document into records: a single object, or a list of them.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, DocumentError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                Record::from_value(item).map_err(|source| DocumentError::NotARecord {
                    index: i + 1,
                    source,
                })
            })
            .collect(),
        other => Record::from_value(other)
            .map(|record| vec![record])
            .map_err(DocumentError::NotADocument),
    }
}

/// Reads a `.json` document, or any other file as YAML.
pub fn load_records(path: &Path) -> Result<Vec<Record>, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let value: Value = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    let records = records_from_value(value)?;
    logging::debug(&format!(
        "Loaded {} record(s) from {}",
        records.len(),
        path.display()
    ));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_single_object_is_one_record() {
        let records = records_from_value(json!({"name": "Ada"})).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_list_item_that_is_not_an_object() {
        let err = records_from_value(json!([{"name": "Ada"}, "Grace"])).unwrap_err();
        assert_eq!(err.to_string(), "Record 2: expected an object, found a string");
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        assert!(matches!(
            records_from_value(json!(42)),
            Err(DocumentError::NotADocument(_))
        ));
    }

    #[test]
    fn test_yaml_document_from_file() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "- name: Ada\n  role: admin\n- name: ~").unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_json_document_from_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"name": "Hello World"}}"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].get("name"), Some(&json!("Hello World")));
    }
}
