use crate::time::{TimeSpan, Timestamp};

/// Span table used to route a timestamp to the source responsible for it.
///
/// Spans are kept in source construction order, not sorted by start time;
/// routing is a linear scan in that order, matching iteration order.
#[derive(Debug, Clone)]
pub struct Timeline {
    spans: Vec<TimeSpan>,
}

impl Timeline {
    pub fn new(spans: Vec<TimeSpan>) -> Self {
        Self { spans }
    }

    /// Index of the source to consult for `time`: the first span whose
    /// start is strictly after `time`, falling back to index 0 when no
    /// span qualifies.
    ///
    /// This is deliberately not an interval containment search. A time
    /// before all spans, inside a gap, or after all spans still resolves
    /// to some source, never to an error.
    pub fn route(&self, time: Timestamp) -> usize {
        self.spans
            .iter()
            .position(|span| span.start > time)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
