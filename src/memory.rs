//! In-memory log source for deterministic testing
//!
//! Implements the `LogSource` contract over a fixed message list without
//! touching any real log format. Use this for unit and integration tests
//! that need to drive the playback engine with known content, injected
//! failures, and verifiable resource handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;

use crate::catalog::{Catalog, DatatypeRegistry, PlayerProblem, PublisherIndex, Topic};
use crate::error::SourceError;
use crate::message::{BackfillArgs, MessageEvent, MessageIteratorArgs};
use crate::source::{LogSource, MessageStream};
use crate::time::{TimeSpan, Timestamp};

/// Failure to inject into a source operation.
///
/// `SourceError` itself is not `Clone` (it can wrap `std::io::Error`),
/// so the injectable failures are mirrored here and converted on use.
#[derive(Debug, Clone)]
pub enum MemoryFailure {
    Malformed(String),
    UnsupportedSchema(String),
    Failed(String),
}

impl MemoryFailure {
    fn into_source_error(self) -> SourceError {
        match self {
            MemoryFailure::Malformed(msg) => SourceError::Malformed(msg),
            MemoryFailure::UnsupportedSchema(msg) => SourceError::UnsupportedSchema(msg),
            MemoryFailure::Failed(msg) => SourceError::Failed(msg),
        }
    }
}

/// In-memory `LogSource` with builder-style configuration.
///
/// The catalog is derived from the configured messages: topics in
/// first-seen order, per-topic counts and first/last times, and a span
/// covering all message times. Extra catalog content (datatypes,
/// publishers, problems, profile) is attached explicitly.
pub struct MemoryLogSource {
    messages: Vec<MessageEvent>,
    profile: Option<String>,
    datatypes: DatatypeRegistry,
    publishers_by_topic: PublisherIndex,
    problems: Vec<PlayerProblem>,
    initialize_failure: Option<MemoryFailure>,
    /// Yield this many events, then fail the stream.
    fail_stream_after: Option<(usize, MemoryFailure)>,
    event_delay: Duration,
    /// Captured iterator args for verification
    iterator_calls: Arc<Mutex<Vec<MessageIteratorArgs>>>,
    /// Captured backfill args for verification
    backfill_calls: Arc<Mutex<Vec<BackfillArgs>>>,
    initialize_calls: Arc<AtomicUsize>,
    open_streams: Arc<AtomicUsize>,
}

impl Default for MemoryLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLogSource {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            profile: None,
            datatypes: DatatypeRegistry::new(),
            publishers_by_topic: PublisherIndex::new(),
            problems: Vec::new(),
            initialize_failure: None,
            fail_stream_after: None,
            event_delay: Duration::ZERO,
            iterator_calls: Arc::new(Mutex::new(Vec::new())),
            backfill_calls: Arc::new(Mutex::new(Vec::new())),
            initialize_calls: Arc::new(AtomicUsize::new(0)),
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Configure the messages this source replays. Messages are sorted by
    /// `log_time` so the source honors the per-source ordering contract
    /// regardless of the order fixtures list them in.
    pub fn with_messages(mut self, mut messages: Vec<MessageEvent>) -> Self {
        messages.sort_by_key(|message| message.log_time);
        self.messages = messages;
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_datatype(mut self, name: impl Into<String>, definition: serde_json::Value) -> Self {
        self.datatypes.insert(name.into(), definition);
        self
    }

    pub fn with_publishers<I, S>(mut self, topic: impl Into<String>, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.publishers_by_topic
            .insert(topic.into(), publishers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_problem(mut self, problem: PlayerProblem) -> Self {
        self.problems.push(problem);
        self
    }

    /// Configure a delay between emitted events (default: none).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.event_delay = delay;
        self
    }

    /// Configure `initialize` to fail.
    pub fn failing_on_initialize(mut self, failure: MemoryFailure) -> Self {
        self.initialize_failure = Some(failure);
        self
    }

    /// Configure message passes to fail after yielding `events` items.
    pub fn failing_after(mut self, events: usize, failure: MemoryFailure) -> Self {
        self.fail_stream_after = Some((events, failure));
        self
    }

    /// Number of times `initialize` was called.
    pub fn initialize_count(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    /// Iterator args received so far.
    pub fn iterator_calls(&self) -> Vec<MessageIteratorArgs> {
        self.iterator_calls.lock().clone()
    }

    /// Backfill args received so far.
    pub fn backfill_calls(&self) -> Vec<BackfillArgs> {
        self.backfill_calls.lock().clone()
    }

    /// Streams currently held open by consumers. Drops to zero once every
    /// pass has been exhausted or cancelled.
    pub fn open_stream_count(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    fn span(&self) -> TimeSpan {
        let start: Option<Timestamp> = self.messages.first().map(|m| m.log_time);
        let end = self.messages.last().map(|m| m.log_time);
        match (start, end) {
            (Some(start), Some(end)) => TimeSpan::new(start, end),
            _ => TimeSpan::default(),
        }
    }

    fn build_catalog(&self) -> Catalog {
        let mut catalog = Catalog::new(self.span());
        for message in &self.messages {
            let topic = Topic::new(
                message.topic.clone(),
                message.schema_name.clone().unwrap_or_default(),
            );
            if !catalog.topics.contains(&topic) {
                catalog.topics.push(topic);
            }
            let stats = catalog.topic_stats.entry(message.topic.clone()).or_default();
            stats.num_messages += 1;
            if stats.first_message_time.is_none() {
                stats.first_message_time = Some(message.log_time);
            }
            stats.last_message_time = Some(message.log_time);
        }
        catalog.datatypes = self.datatypes.clone();
        catalog.publishers_by_topic = self.publishers_by_topic.clone();
        catalog.problems = self.problems.clone();
        catalog.profile = self.profile.clone();
        catalog
    }

    fn select(&self, args: &MessageIteratorArgs) -> Vec<Result<MessageEvent, SourceError>> {
        let selected = self.messages.iter().filter(|message| {
            if let Some(start) = args.start {
                if message.log_time < start {
                    return false;
                }
            }
            if let Some(end) = args.end {
                if message.log_time > end {
                    return false;
                }
            }
            if let Some(topics) = &args.topics {
                if !topics.contains(&message.topic) {
                    return false;
                }
            }
            true
        });

        match &self.fail_stream_after {
            Some((after, failure)) => selected
                .take(*after)
                .cloned()
                .map(Ok)
                .chain(std::iter::once(Err(failure.clone().into_source_error())))
                .collect(),
            None => selected.cloned().map(Ok).collect(),
        }
    }
}

/// Decrements the open-stream counter when the pass it guards is dropped.
struct StreamGuard(Arc<AtomicUsize>);

impl StreamGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LogSource for MemoryLogSource {
    async fn initialize(&self) -> Result<Catalog, SourceError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = &self.initialize_failure {
            return Err(failure.clone().into_source_error());
        }
        Ok(self.build_catalog())
    }

    async fn messages<'a>(
        &'a self,
        args: MessageIteratorArgs,
    ) -> Result<MessageStream<'a>, SourceError> {
        let items = self.select(&args);
        self.iterator_calls.lock().push(args);

        let guard = StreamGuard::new(self.open_streams.clone());
        let delay = self.event_delay;
        let stream = stream::iter(items)
            .then(move |item| {
                let _live = &guard;
                async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    item
                }
            })
            .boxed();
        Ok(stream)
    }

    async fn backfill(&self, args: BackfillArgs) -> Result<Vec<MessageEvent>, SourceError> {
        self.backfill_calls.lock().push(args.clone());

        let mut results = Vec::new();
        for topic in &args.topics {
            let latest = self
                .messages
                .iter()
                .filter(|message| &message.topic == topic && message.log_time <= args.time)
                .next_back();
            if let Some(message) = latest {
                results.push(message.clone());
            }
        }
        Ok(results)
    }
}
