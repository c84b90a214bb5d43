//! Multi-source playback engine for recorded, time-stamped message logs.
//!
//! Wrap each physical log in a [`LogSource`] and hand the set to a
//! [`MultiSourcePlayer`]: it merges the per-log catalogs into one,
//! plays the logs back as a single ordered message stream, and answers
//! point-in-time backfill lookups for seeking.

pub mod catalog;
pub mod error;
pub mod memory;
pub mod message;
pub mod player;
pub mod source;
pub mod time;

pub use catalog::{
    Catalog, DatatypeRegistry, PlayerProblem, ProblemSeverity, PublisherIndex, Topic, TopicStats,
};
pub use error::{PlayerError, SourceError};
pub use memory::{MemoryFailure, MemoryLogSource};
pub use message::{BackfillArgs, MessageEvent, MessageIteratorArgs};
pub use player::{merge_catalogs, MessageOrdering, MultiSourcePlayer, PlayerConfig, Timeline};
pub use source::{LogSource, MessageStream};
pub use time::{TimeSpan, Timestamp};
