//! Internal constants for PlantUML rendering.

use std::time::Duration;

/// Default PlantUML server used when no URL is configured.
pub const DEFAULT_SERVER_URL: &str = "http://www.plantuml.com/plantuml";

/// Default HTTP timeout for render requests (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source file extension (matched case-insensitively).
pub const PUML_EXTENSION: &str = ".puml";

/// Rendered artifact extension.
pub const PNG_EXTENSION: &str = "png";
