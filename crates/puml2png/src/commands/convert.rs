//! Single-file conversion mode.

use puml2png_render::{PlantUmlClient, PlantUmlConverter};

use crate::error::CliError;
use crate::output::Output;
use crate::validate::validate_source_path;

/// Convert one `.puml` file and report the artifact path.
pub(crate) fn execute(file: &str, server_url: &str, output: &Output) -> Result<(), CliError> {
    let source = validate_source_path(file)?;

    let converter = PlantUmlConverter::new(PlantUmlClient::new(server_url));
    let artifact = converter.convert_to_png(&source)?;

    output.success(&format!(
        "Converted {} -> {}",
        source.display(),
        artifact.display()
    ));
    Ok(())
}
