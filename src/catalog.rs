use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::time::{TimeSpan, Timestamp};

/// A named channel in a recording. Identity is the `(name, schema_name)`
/// pair, so the same topic name recorded under two schemas yields two
/// distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub schema_name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_name: schema_name.into(),
        }
    }
}

/// Per-topic message statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopicStats {
    pub num_messages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_message_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_time: Option<Timestamp>,
}

/// Schema name to schema definition. The definition is opaque to the
/// playback layer and passed through to consumers as is.
pub type DatatypeRegistry = HashMap<String, serde_json::Value>;

/// Topic name to the set of publisher identifiers seen on it.
pub type PublisherIndex = HashMap<String, HashSet<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemSeverity {
    Error,
    Warn,
    Info,
}

/// A diagnostic a source wants surfaced to the consumer alongside its
/// catalog, e.g. a dropped chunk or an unreadable attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerProblem {
    pub severity: ProblemSeverity,
    pub message: String,
}

impl PlayerProblem {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: ProblemSeverity::Error,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: ProblemSeverity::Warn,
            message: message.into(),
        }
    }
}

/// Everything a source reports about itself at initialization time.
///
/// The merged view over several sources is the same shape; merging never
/// shrinks the topic list or the datatype registry, and the merged span
/// contains every contributing span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub span: TimeSpan,
    /// Unique topics, first-seen order preserved.
    pub topics: Vec<Topic>,
    /// Statistics keyed by topic name.
    pub topic_stats: HashMap<String, TopicStats>,
    pub datatypes: DatatypeRegistry,
    pub publishers_by_topic: PublisherIndex,
    pub problems: Vec<PlayerProblem>,
    /// Source-format hint, e.g. "ros1" or "mcap".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Catalog {
    pub fn new(span: TimeSpan) -> Self {
        Self {
            span,
            topics: Vec::new(),
            topic_stats: HashMap::new(),
            datatypes: DatatypeRegistry::new(),
            publishers_by_topic: PublisherIndex::new(),
            problems: Vec::new(),
            profile: None,
        }
    }
}
