use std::sync::Arc;

use futures::future;

use crate::catalog::Catalog;
use crate::error::PlayerError;
use crate::message::{BackfillArgs, MessageEvent, MessageIteratorArgs};
use crate::player::config::{MessageOrdering, PlayerConfig};
use crate::player::merge::merge_catalogs;
use crate::player::stream::{concat_in_source_order, merge_by_log_time};
use crate::player::timeline::Timeline;
use crate::source::{LogSource, MessageStream};

/// Presents several recorded logs as one virtual log.
///
/// The player owns its sources for its whole lifetime; sources are fixed
/// at construction and released when the player is dropped. `initialize`
/// must complete before `messages` or `backfill` is called.
pub struct MultiSourcePlayer {
    sources: Vec<Arc<dyn LogSource>>,
    config: PlayerConfig,
    timeline: Option<Timeline>,
}

impl MultiSourcePlayer {
    pub fn new(sources: Vec<Arc<dyn LogSource>>) -> Result<Self, PlayerError> {
        Self::with_config(sources, PlayerConfig::default())
    }

    pub fn with_config(
        sources: Vec<Arc<dyn LogSource>>,
        config: PlayerConfig,
    ) -> Result<Self, PlayerError> {
        if sources.is_empty() {
            return Err(PlayerError::NoSources);
        }
        Ok(Self {
            sources,
            config,
            timeline: None,
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Initialize every source concurrently and merge their catalogs.
    ///
    /// All-or-nothing: the first source failure aborts the call and is
    /// surfaced unchanged; no partial catalog is produced and the player
    /// stays uninitialized.
    pub async fn initialize(&mut self) -> Result<Catalog, PlayerError> {
        if self.timeline.is_some() {
            return Err(PlayerError::AlreadyInitialized);
        }

        let catalogs =
            future::try_join_all(self.sources.iter().map(|source| source.initialize())).await?;

        for (index, catalog) in catalogs.iter().enumerate() {
            tracing::debug!(
                source = index,
                topics = catalog.topics.len(),
                span = %catalog.span,
                "source catalog loaded"
            );
        }

        let timeline = Timeline::new(catalogs.iter().map(|catalog| catalog.span).collect());
        let merged = merge_catalogs(catalogs).ok_or(PlayerError::NoSources)?;

        if !merged.problems.is_empty() {
            tracing::warn!(
                problems = merged.problems.len(),
                "merged catalog carries source problems"
            );
        }
        tracing::info!(
            sources = self.sources.len(),
            topics = merged.topics.len(),
            span = %merged.span,
            start_utc = ?merged.span.start.to_utc(),
            "playback initialized"
        );

        self.timeline = Some(timeline);
        Ok(merged)
    }

    /// One continuous message stream over all sources.
    ///
    /// Ordering across sources follows the configured `MessageOrdering`.
    /// With `SourceOrder`, source passes are opened lazily one at a time;
    /// with `LogTime`, all passes are opened up front so their heads can
    /// be compared. In both orderings a failure from the active source
    /// ends the stream after that error item.
    pub async fn messages<'a>(
        &'a self,
        args: MessageIteratorArgs,
    ) -> Result<MessageStream<'a>, PlayerError> {
        if self.timeline.is_none() {
            return Err(PlayerError::NotInitialized);
        }
        match self.config.ordering {
            MessageOrdering::SourceOrder => Ok(concat_in_source_order(&self.sources, args)),
            MessageOrdering::LogTime => {
                let mut passes = Vec::with_capacity(self.sources.len());
                for source in &self.sources {
                    passes.push(source.messages(args.clone()).await?);
                }
                Ok(merge_by_log_time(passes))
            }
        }
    }

    /// Latest message per requested topic at or before `args.time`.
    ///
    /// Exactly one source is consulted, chosen by the timeline's
    /// closest-after-else-first routing. A topic whose latest message
    /// lives in a different source is not found; there is no
    /// cross-source fallback.
    pub async fn backfill(&self, args: BackfillArgs) -> Result<Vec<MessageEvent>, PlayerError> {
        let timeline = self.timeline.as_ref().ok_or(PlayerError::NotInitialized)?;
        let index = timeline.route(args.time);
        tracing::debug!(time = %args.time, source = index, "backfill routed");
        Ok(self.sources[index].backfill(args).await?)
    }
}
