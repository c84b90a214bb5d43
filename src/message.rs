use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// One timestamped, topic-tagged payload emitted during iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub topic: String,
    /// Time the message was recorded into the log.
    pub log_time: Timestamp,
    /// Time the message was published, when the log distinguishes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    pub data: serde_json::Value,
    #[serde(default)]
    pub size_bytes: u64,
}

impl MessageEvent {
    pub fn new(topic: impl Into<String>, log_time: Timestamp, data: serde_json::Value) -> Self {
        Self {
            topic: topic.into(),
            log_time,
            publish_time: None,
            schema_name: None,
            data,
            size_bytes: 0,
        }
    }

    pub fn with_schema(mut self, schema_name: impl Into<String>) -> Self {
        self.schema_name = Some(schema_name.into());
        self
    }

    pub fn with_publish_time(mut self, publish_time: Timestamp) -> Self {
        self.publish_time = Some(publish_time);
        self
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }
}

/// Selection for a message iteration pass.
///
/// `start` and `end` are inclusive bounds on `log_time`; `None` means
/// unbounded on that side. `topics` restricts the pass to the named
/// topics; `None` means all topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIteratorArgs {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub topics: Option<BTreeSet<String>>,
}

impl MessageIteratorArgs {
    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = Some(topics.into_iter().map(Into::into).collect());
        self
    }
}

/// Request for the latest message per topic at or before `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillArgs {
    pub topics: BTreeSet<String>,
    pub time: Timestamp,
}

impl BackfillArgs {
    pub fn new<I, S>(topics: I, time: Timestamp) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
            time,
        }
    }
}
