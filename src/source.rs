use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::catalog::Catalog;
use crate::error::SourceError;
use crate::message::{BackfillArgs, MessageEvent, MessageIteratorArgs};

/// A lazy, finite, single-pass sequence of message events. Mid-stream
/// failures arrive as an `Err` item and end the stream.
pub type MessageStream<'a> = BoxStream<'a, Result<MessageEvent, SourceError>>;

/// Contract for reading one recorded log.
///
/// Implementations wrap exactly one physical log (a bag file, an mcap
/// file, an in-memory fixture). The playback engine composes several of
/// them into one virtual log; it never looks inside a source beyond this
/// surface.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Load the log's metadata catalog.
    ///
    /// Must be called exactly once, before `messages` or `backfill`.
    /// Calling it again is undefined for the source; the engine guards
    /// against it.
    async fn initialize(&self) -> Result<Catalog, SourceError>;

    /// Start a message pass over the log.
    ///
    /// Events are yielded in non-decreasing `log_time` order. Each call
    /// starts a fresh pass; a previous pass is restarted by simply
    /// issuing a new call. Dropping the stream cancels the pass and
    /// releases its resources.
    async fn messages<'a>(
        &'a self,
        args: MessageIteratorArgs,
    ) -> Result<MessageStream<'a>, SourceError>;

    /// The latest message at or before `args.time` for each requested
    /// topic, considering only this source's own span. Topics with no
    /// qualifying message are omitted.
    async fn backfill(&self, args: BackfillArgs) -> Result<Vec<MessageEvent>, SourceError>;
}
