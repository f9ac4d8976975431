//! Per-file conversion orchestration.
//!
//! Reads a `.puml` source, applies a cheap structural guard, renders via the
//! server client, and writes the PNG next to the source. Every failure is an
//! explicit result value so callers (the CLI and the watch engine) can skip
//! a file and keep going.

use std::path::{Path, PathBuf};

use crate::client::{PlantUmlClient, RenderError};
use crate::consts::PNG_EXTENSION;

/// Failure to convert a single source file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source is empty or missing the `@startuml`/`@enduml` markers.
    #[error("{path} is not a valid PlantUML diagram")]
    InvalidSource { path: PathBuf },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Converts PlantUML source files to sibling PNG artifacts.
pub struct PlantUmlConverter {
    client: PlantUmlClient,
}

impl PlantUmlConverter {
    /// Create a converter backed by the given render client.
    #[must_use]
    pub fn new(client: PlantUmlClient) -> Self {
        Self { client }
    }

    /// Convert a source file, logging the outcome.
    ///
    /// Returns `true` only if the artifact was written. Never panics; this
    /// is the entry point the watch engine calls per file.
    pub fn process_file(&self, source: &Path) -> bool {
        match self.convert_to_png(source) {
            Ok(artifact) => {
                tracing::info!(
                    source = %source.display(),
                    artifact = %artifact.display(),
                    "converted"
                );
                true
            }
            Err(err) => {
                tracing::error!(source = %source.display(), %err, "conversion failed");
                false
            }
        }
    }

    /// Convert a source file and return the artifact path.
    pub fn convert_to_png(&self, source: &Path) -> Result<PathBuf, ConvertError> {
        let content = std::fs::read_to_string(source).map_err(|e| ConvertError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;

        if !is_valid_diagram_source(&content) {
            return Err(ConvertError::InvalidSource {
                path: source.to_path_buf(),
            });
        }

        let data = self.client.render_png(&content)?;

        let artifact = artifact_path(source);
        std::fs::write(&artifact, &data).map_err(|e| ConvertError::Write {
            path: artifact.clone(),
            source: e,
        })?;

        Ok(artifact)
    }
}

/// Derived artifact path: same directory, same base name, `.png` extension.
#[must_use]
pub fn artifact_path(source: &Path) -> PathBuf {
    source.with_extension(PNG_EXTENSION)
}

/// Structural guard, not a parser: non-blank content carrying both the
/// begin and end diagram markers.
fn is_valid_diagram_source(content: &str) -> bool {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.contains("@startuml") && trimmed.contains("@enduml")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_http::one_shot_server;

    /// Client pointing at the discard port; tests that must not touch the
    /// network fail loudly if they do.
    fn offline_converter() -> PlantUmlConverter {
        PlantUmlConverter::new(PlantUmlClient::new("http://127.0.0.1:9"))
    }

    #[test]
    fn test_artifact_path_sibling_png() {
        assert_eq!(
            artifact_path(Path::new("docs/diagram.puml")),
            Path::new("docs/diagram.png")
        );
    }

    #[test]
    fn test_artifact_path_uppercase_extension() {
        assert_eq!(
            artifact_path(Path::new("docs/DIAGRAM.PUML")),
            Path::new("docs/DIAGRAM.png")
        );
    }

    #[test]
    fn test_artifact_path_dotted_base_name() {
        assert_eq!(
            artifact_path(Path::new("v1.2/api.v2.puml")),
            Path::new("v1.2/api.v2.png")
        );
    }

    #[test]
    fn test_valid_diagram_source() {
        assert!(is_valid_diagram_source("@startuml\nA -> B\n@enduml"));
        assert!(is_valid_diagram_source("  \n@startuml\n@enduml\n  "));
    }

    #[test]
    fn test_invalid_diagram_source() {
        assert!(!is_valid_diagram_source(""));
        assert!(!is_valid_diagram_source("   \n\t  "));
        assert!(!is_valid_diagram_source("@startuml\nA -> B"));
        assert!(!is_valid_diagram_source("A -> B\n@enduml"));
    }

    #[test]
    fn test_convert_missing_file_is_read_error() {
        let converter = offline_converter();
        let err = converter
            .convert_to_png(Path::new("/nonexistent/x.puml"))
            .unwrap_err();

        assert!(matches!(err, ConvertError::Read { .. }));
    }

    #[test]
    fn test_convert_rejects_blank_content_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("blank.puml");
        std::fs::write(&source, "   \n  ").unwrap();

        let converter = offline_converter();
        let err = converter.convert_to_png(&source).unwrap_err();

        assert!(matches!(err, ConvertError::InvalidSource { .. }));
    }

    #[test]
    fn test_convert_rejects_missing_markers_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plain.puml");
        std::fs::write(&source, "just some text").unwrap();

        let converter = offline_converter();
        let err = converter.convert_to_png(&source).unwrap_err();

        assert!(matches!(err, ConvertError::InvalidSource { .. }));
    }

    #[test]
    fn test_convert_writes_artifact_beside_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("seq.puml");
        std::fs::write(&source, "@startuml\nA -> B\n@enduml").unwrap();

        let url = one_shot_server("200 OK", b"png-bytes");
        let converter = PlantUmlConverter::new(PlantUmlClient::new(url));

        let artifact = converter.convert_to_png(&source).unwrap();

        assert_eq!(artifact, dir.path().join("seq.png"));
        assert_eq!(std::fs::read(&artifact).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_convert_overwrites_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("seq.puml");
        std::fs::write(&source, "@startuml\nA -> B\n@enduml").unwrap();
        std::fs::write(dir.path().join("seq.png"), b"stale").unwrap();

        let url = one_shot_server("200 OK", b"fresh");
        let converter = PlantUmlConverter::new(PlantUmlClient::new(url));

        converter.convert_to_png(&source).unwrap();

        assert_eq!(std::fs::read(dir.path().join("seq.png")).unwrap(), b"fresh");
    }

    #[test]
    fn test_process_file_reports_failure_without_panicking() {
        let converter = offline_converter();
        assert!(!converter.process_file(Path::new("/nonexistent/x.puml")));
    }

    #[test]
    fn test_process_file_success() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ok.puml");
        std::fs::write(&source, "@startuml\nA -> B\n@enduml").unwrap();

        let url = one_shot_server("200 OK", b"png");
        let converter = PlantUmlConverter::new(PlantUmlClient::new(url));

        assert!(converter.process_file(&source));
    }
}
