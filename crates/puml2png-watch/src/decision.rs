//! Per-file conversion decision policy.
//!
//! Each poll cycle produces one decision per source file from three
//! observations: does the artifact exist, was the source modified within
//! the recency window, was the artifact modified within the window.

/// Why a source file does or does not get converted this cycle.
///
/// The "should convert" flag is derived from the variant, so flag and
/// reason cannot disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionReason {
    /// No artifact exists beside the source.
    NoArtifactExists,
    /// The source was modified within the recency window; regenerate on
    /// every save while the author is editing.
    SourceRecentlyModified,
    /// The source is recent but the existing artifact is not.
    SynchronizationRequired,
    /// Existing artifact, stale source; nothing to do.
    UpToDate,
}

impl DecisionReason {
    /// Whether this decision triggers a conversion.
    #[must_use]
    pub fn should_convert(self) -> bool {
        !matches!(self, Self::UpToDate)
    }
}

/// Evaluate the decision rules in their fixed priority order.
///
/// The third rule re-checks source recency on its own instead of being
/// folded into the second: the intended behavior for a stale but
/// desynchronized source/artifact pair is still an open product question
/// (see DESIGN.md), so the branch structure is kept as-is rather than
/// simplified.
#[must_use]
#[allow(clippy::fn_params_excessive_bools)] // the three observations are the policy's whole input
pub fn evaluate(artifact_exists: bool, source_recent: bool, artifact_recent: bool) -> DecisionReason {
    if !artifact_exists {
        return DecisionReason::NoArtifactExists;
    }
    if source_recent {
        return DecisionReason::SourceRecentlyModified;
    }
    if source_recent && !artifact_recent {
        return DecisionReason::SynchronizationRequired;
    }
    DecisionReason::UpToDate
}
