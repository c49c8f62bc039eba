// utils crate

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DOCUMENT_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Rule files are named `<anything>.rules.<json|yaml|yml>`.
pub fn is_rules_file(path: &Path) -> bool {
    let stem_is_rules = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase().ends_with(".rules"))
        .unwrap_or(false);

    stem_is_rules && has_document_extension(path)
}

pub fn is_document_file(path: &Path) -> bool {
    has_document_extension(path) && !is_rules_file(path)
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            DOCUMENT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Expands `path` into the documents to validate.
///
/// A file is taken as-is, whatever its name. A directory is walked
/// recursively and yields its document files in sorted order.
pub fn collect_documents(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Path does not exist: {}", path.display()),
        ));
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && is_document_file(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    Ok(documents)
}
