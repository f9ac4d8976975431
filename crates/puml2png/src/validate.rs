//! Input path validation.
//!
//! Both CLI modes only hand validated paths to the library crates: the
//! single-file mode requires an existing, readable `.puml` file, the watch
//! mode an existing directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use puml2png_render::PUML_EXTENSION;

use crate::error::CliError;

/// Validate a candidate source file path.
pub(crate) fn validate_source_path(raw: &str) -> Result<PathBuf, CliError> {
    if raw.trim().is_empty() {
        return Err(CliError::Validation("file path cannot be empty".to_owned()));
    }

    let path = PathBuf::from(raw);

    if !path.exists() {
        return Err(CliError::Validation(format!("file does not exist: {raw}")));
    }
    if !path.is_file() {
        return Err(CliError::Validation(format!(
            "path is not a regular file: {raw}"
        )));
    }
    if let Err(err) = File::open(&path) {
        return Err(CliError::Validation(format!(
            "file is not readable: {raw}: {err}"
        )));
    }
    if !has_source_extension(&path) {
        return Err(CliError::Validation(format!(
            "file must have the {PUML_EXTENSION} extension: {raw}"
        )));
    }

    Ok(path)
}

/// Validate a candidate watch directory.
pub(crate) fn validate_watch_dir(dir: PathBuf) -> Result<PathBuf, CliError> {
    if !dir.exists() {
        return Err(CliError::Validation(format!(
            "directory does not exist: {}",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(CliError::Validation(format!(
            "path is not a directory: {}",
            dir.display()
        )));
    }
    Ok(dir)
}

fn has_source_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(PUML_EXTENSION))
}
