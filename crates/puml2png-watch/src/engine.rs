//! Polling watch engine.
//!
//! Scans a directory tree for `.puml` sources on a fixed cadence, applies
//! the decision policy per file, and hands qualifying files to a converter.
//! Files are processed sequentially: the render server is the bottleneck,
//! and one outbound request at a time needs no rate limiting.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime};

use crate::decision::{DecisionReason, evaluate};

/// Default pause between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default trailing window defining "recently modified".
pub const DEFAULT_RECENCY_WINDOW: Duration = Duration::from_secs(10);

/// Source extension, matched case-insensitively against file names.
const PUML_EXTENSION: &str = ".puml";

/// Artifact extension substituted for the source extension.
const PNG_EXTENSION: &str = "png";

/// Upper bound on how long a stop request can go unnoticed during sleep.
const STOP_CHECK_SLICE: Duration = Duration::from_millis(100);

/// Converts a single source file; `true` on success.
///
/// Implemented by the conversion service in the CLI wiring; closures work
/// directly, which keeps the engine testable without HTTP.
pub trait SourceConverter {
    fn convert(&self, source: &Path) -> bool;
}

impl<F: Fn(&Path) -> bool> SourceConverter for F {
    fn convert(&self, source: &Path) -> bool {
        self(source)
    }
}

/// Fatal watch failure: the directory tree could not be enumerated.
///
/// Per-file conversion failures are not errors at this level; they are
/// recorded in [`PollRecord`] and the cycle continues.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Per-file record emitted by a poll cycle.
#[derive(Debug)]
pub struct PollRecord {
    pub source: PathBuf,
    pub reason: DecisionReason,
    /// Conversion outcome; `None` when the decision was [`DecisionReason::UpToDate`].
    pub converted: Option<bool>,
}

/// Cooperative stop flag for a running watch loop.
///
/// Cloneable and settable from any thread; the loop observes it at cycle
/// boundaries and while sleeping, never by interrupting in-flight work.
#[derive(Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the watch loop to stop after the current iteration.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Polling watch engine over a directory tree.
pub struct WatchEngine<C> {
    converter: C,
    interval: Duration,
    recency_window: Duration,
    clock: Box<dyn Fn() -> SystemTime + Send + Sync>,
    stop: StopHandle,
}

impl<C: SourceConverter> WatchEngine<C> {
    /// Create an engine with default interval and recency window.
    #[must_use]
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            interval: DEFAULT_POLL_INTERVAL,
            recency_window: DEFAULT_RECENCY_WINDOW,
            clock: Box::new(SystemTime::now),
            stop: StopHandle::default(),
        }
    }

    /// Set the pause between poll cycles.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the trailing window defining "recently modified".
    #[must_use]
    pub fn recency_window(mut self, window: Duration) -> Self {
        self.recency_window = window;
        self
    }

    /// Replace the wall clock used for recency checks.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> SystemTime + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Handle for requesting a stop from another thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run one poll cycle over `root` and return the per-file records.
    ///
    /// A conversion failure for one file never aborts the cycle; only a
    /// failure to enumerate the tree is an error.
    pub fn poll_once(&self, root: &Path) -> Result<Vec<PollRecord>, WatchError> {
        let sources = list_source_files(root)?;
        let mut records = Vec::with_capacity(sources.len());

        for source in sources {
            let reason = self.decide(&source);
            let converted = if reason.should_convert() {
                tracing::info!(source = %source.display(), ?reason, "converting");
                let ok = self.converter.convert(&source);
                if !ok {
                    tracing::error!(source = %source.display(), "conversion failed");
                }
                Some(ok)
            } else {
                None
            };
            records.push(PollRecord {
                source,
                reason,
                converted,
            });
        }

        Ok(records)
    }

    /// Poll until a stop is requested.
    ///
    /// The stop flag is checked before and after each sleep, so a stop
    /// requested mid-sleep is honored within [`STOP_CHECK_SLICE`], not
    /// after another full cycle. A stop is a normal outcome; only an
    /// enumeration failure is an error.
    pub fn run(&self, root: &Path) -> Result<(), WatchError> {
        tracing::info!(root = %root.display(), "starting watch mode");

        while !self.stop.is_stop_requested() {
            self.poll_once(root)?;
            if self.stop.is_stop_requested() {
                break;
            }
            self.sleep_until_next_cycle();
        }

        tracing::info!("watch mode stopped");
        Ok(())
    }

    /// Decide whether `source` needs conversion right now.
    ///
    /// "Now" is sampled once per file so both recency checks of a pair see
    /// the same instant.
    fn decide(&self, source: &Path) -> DecisionReason {
        let now = (self.clock)();
        let artifact = artifact_path(source);

        let artifact_exists = artifact.exists();
        let source_recent = self.modified_within_window(source, now);
        let artifact_recent = artifact_exists && self.modified_within_window(&artifact, now);

        evaluate(artifact_exists, source_recent, artifact_recent)
    }

    /// Whether `path` was modified within the recency window of `now`.
    ///
    /// An unreadable modification time counts as not recent; a timestamp in
    /// the future counts as recent.
    fn modified_within_window(&self, path: &Path, now: SystemTime) -> bool {
        match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => now
                .duration_since(mtime)
                .map_or(true, |age| age <= self.recency_window),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read modification time");
                false
            }
        }
    }

    /// Sleep for the poll interval in slices, waking early on stop.
    fn sleep_until_next_cycle(&self) {
        let deadline = Instant::now() + self.interval;
        loop {
            if self.stop.is_stop_requested() {
                return;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            std::thread::sleep(remaining.min(STOP_CHECK_SLICE));
        }
    }
}

/// Derived artifact path: same directory, same base name, `.png`.
#[must_use]
pub fn artifact_path(source: &Path) -> PathBuf {
    source.with_extension(PNG_EXTENSION)
}

/// Enumerate regular `.puml` files under `root`, sorted lexicographically
/// for reproducible processing order.
fn list_source_files(root: &Path) -> Result<Vec<PathBuf>, WatchError> {
    let mut files = Vec::new();
    collect_source_files(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_source_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), WatchError> {
    let scan_err = |e: std::io::Error| WatchError::Scan {
        path: dir.to_path_buf(),
        source: e,
    };

    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(scan_err)?;

        if file_type.is_dir() {
            collect_source_files(&path, files)?;
        } else if file_type.is_file() && has_source_extension(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Case-insensitive match on the `.puml` extension.
fn has_source_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(PUML_EXTENSION))
}
