use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::catalog::{Catalog, DatatypeRegistry, PlayerProblem, PublisherIndex, Topic, TopicStats};
use crate::time::Timestamp;

/// Reduce per-source catalogs into one merged catalog.
///
/// The first catalog seeds the result and the rest fold in, in the order
/// given, which is the source construction order. All first-seen tie
/// breaks therefore resolve by that order, making the merge deterministic
/// for a fixed source list. Returns `None` for an empty input.
pub fn merge_catalogs(catalogs: Vec<Catalog>) -> Option<Catalog> {
    let mut iter = catalogs.into_iter();
    let mut merged = iter.next()?;
    for catalog in iter {
        merged.span = merged.span.union(&catalog.span);
        merge_topics(&mut merged.topics, catalog.topics);
        merge_topic_stats(&mut merged.topic_stats, catalog.topic_stats);
        merge_datatypes(&mut merged.datatypes, catalog.datatypes);
        merge_publishers(&mut merged.publishers_by_topic, catalog.publishers_by_topic);
        merge_problems(&mut merged.problems, catalog.problems);
        merged.profile = catalog.profile;
    }
    Some(merged)
}

/// Append unseen topics, preserving first-seen order. A topic is the same
/// entry only if both name and schema name match.
fn merge_topics(merged: &mut Vec<Topic>, incoming: Vec<Topic>) {
    for topic in incoming {
        if !merged.contains(&topic) {
            merged.push(topic);
        }
    }
}

/// Sum message counts and widen first/last message times per topic name.
fn merge_topic_stats(
    merged: &mut HashMap<String, TopicStats>,
    incoming: HashMap<String, TopicStats>,
) {
    for (name, stats) in incoming {
        match merged.entry(name) {
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                current.num_messages += stats.num_messages;
                current.first_message_time =
                    earliest(current.first_message_time, stats.first_message_time);
                current.last_message_time =
                    latest(current.last_message_time, stats.last_message_time);
            }
            Entry::Vacant(entry) => {
                entry.insert(stats);
            }
        }
    }
}

fn earliest(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn latest(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// First-seen schema definition wins; later definitions for the same name
/// are discarded, never overwritten.
fn merge_datatypes(merged: &mut DatatypeRegistry, incoming: DatatypeRegistry) {
    for (name, definition) in incoming {
        merged.entry(name).or_insert(definition);
    }
}

fn merge_publishers(merged: &mut PublisherIndex, incoming: PublisherIndex) {
    for (topic, publishers) in incoming {
        merged.entry(topic).or_default().extend(publishers);
    }
}

fn merge_problems(merged: &mut Vec<PlayerProblem>, incoming: Vec<PlayerProblem>) {
    for problem in incoming {
        if !merged.contains(&problem) {
            merged.push(problem);
        }
    }
}
