//! Polling directory watcher for puml2png.
//!
//! Scans a directory tree for `.puml` sources on a fixed cadence and decides
//! per file whether a fresh conversion is warranted:
//! - [`decision`]: the fixed-priority decision rules
//! - [`engine`]: file enumeration, the poll loop, and cooperative stopping
//!
//! Polling is deliberate: OS-level filesystem events could replace the scan
//! internally, but the decision semantics (missing artifact, recent source,
//! desynchronized pair) are the contract and would have to be preserved.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use puml2png_watch::WatchEngine;
//!
//! let engine = WatchEngine::new(|source: &Path| {
//!     // convert the file, return success
//!     true
//! });
//! let stop = engine.stop_handle();
//! engine.run(Path::new("docs"))?;
//! ```

mod decision;
mod engine;

pub use decision::DecisionReason;
pub use engine::{
    DEFAULT_POLL_INTERVAL, DEFAULT_RECENCY_WINDOW, PollRecord, SourceConverter, StopHandle,
    WatchEngine, WatchError, artifact_path,
};
