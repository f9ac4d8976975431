//! CLI error types.

use puml2png_render::ConvertError;
use puml2png_watch::WatchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Watch(#[from] WatchError),

    #[error("{0}")]
    Validation(String),
}
