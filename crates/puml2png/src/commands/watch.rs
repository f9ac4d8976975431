//! Directory watch mode.

use std::path::{Path, PathBuf};
use std::time::Duration;

use puml2png_render::{PlantUmlClient, PlantUmlConverter};
use puml2png_watch::WatchEngine;

use crate::error::CliError;
use crate::output::Output;
use crate::validate::validate_watch_dir;

/// Watch a directory until interrupted, converting sources as they qualify.
///
/// The directory defaults to the current working directory; the default is
/// resolved here, once, so the engine only ever sees an explicit path.
pub(crate) fn execute(
    dir: Option<PathBuf>,
    server_url: &str,
    interval_secs: u64,
    output: &Output,
) -> Result<(), CliError> {
    let root = match dir {
        Some(dir) => validate_watch_dir(dir)?,
        None => std::env::current_dir()?,
    };

    let converter = PlantUmlConverter::new(PlantUmlClient::new(server_url));
    let engine = WatchEngine::new(move |source: &Path| converter.process_file(source))
        .interval(Duration::from_secs(interval_secs));

    output.info(&format!(
        "Watching {} every {interval_secs}s (Ctrl-C to stop)",
        root.display()
    ));

    engine.run(&root)?;
    Ok(())
}
