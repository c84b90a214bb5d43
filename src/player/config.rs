use serde::{Deserialize, Serialize};

/// Cross-source ordering of the played-back message stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageOrdering {
    /// Drain each source completely before starting the next, in
    /// construction order. Cheap, and correct only when sources are
    /// supplied pre-sorted with non-overlapping spans; with overlapping
    /// or out-of-order spans the stream is not globally time-sorted.
    #[default]
    SourceOrder,

    /// Streaming merge keyed by `log_time` across all sources. Globally
    /// time-sorted even for overlapping spans; ties go to the
    /// earlier-constructed source.
    LogTime,
}

/// Playback engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub ordering: MessageOrdering,
}

impl PlayerConfig {
    pub fn with_ordering(mut self, ordering: MessageOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}
