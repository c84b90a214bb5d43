//! Cross-source stream composition
//!
//! Both orderings are pull-based: every element is produced on demand, so
//! the consumer paces playback and dropping the stream cancels it. A
//! failure item from the active source is yielded once and ends the whole
//! stream; no further sources are consulted.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::message::{MessageEvent, MessageIteratorArgs};
use crate::source::{LogSource, MessageStream};

struct ConcatState<'a> {
    sources: &'a [Arc<dyn LogSource>],
    args: MessageIteratorArgs,
    next_index: usize,
    current: Option<MessageStream<'a>>,
    halted: bool,
}

/// Visit sources strictly in construction order, fully draining each
/// source's pass before opening the next. Passes are opened lazily, one
/// at a time, and dropped as soon as they are exhausted, so at most one
/// source pass is live at any moment.
pub fn concat_in_source_order<'a>(
    sources: &'a [Arc<dyn LogSource>],
    args: MessageIteratorArgs,
) -> MessageStream<'a> {
    let state = ConcatState {
        sources,
        args,
        next_index: 0,
        current: None,
        halted: false,
    };
    stream::unfold(state, |mut state| async move {
        if state.halted {
            return None;
        }
        loop {
            if state.current.is_none() {
                let sources = state.sources;
                let source = sources.get(state.next_index)?;
                state.next_index += 1;
                let args = state.args.clone();
                match source.messages(args).await {
                    Ok(pass) => state.current = Some(pass),
                    Err(err) => {
                        state.halted = true;
                        return Some((Err(err), state));
                    }
                }
            }
            match state.current.as_mut()?.next().await {
                Some(Ok(event)) => return Some((Ok(event), state)),
                Some(Err(err)) => {
                    state.halted = true;
                    state.current = None;
                    return Some((Err(err), state));
                }
                None => state.current = None,
            }
        }
    })
    .boxed()
}

struct MergeSlot<'a> {
    pass: MessageStream<'a>,
    head: Option<MessageEvent>,
    done: bool,
}

/// Streaming merge of already-opened passes, keyed by `log_time`. Holds
/// one buffered head element per source and no more. Ties break toward
/// the earlier slot, which is the earlier-constructed source.
pub fn merge_by_log_time(passes: Vec<MessageStream<'_>>) -> MessageStream<'_> {
    let slots: Vec<MergeSlot> = passes
        .into_iter()
        .map(|pass| MergeSlot {
            pass,
            head: None,
            done: false,
        })
        .collect();
    stream::unfold(slots, |mut slots| async move {
        for index in 0..slots.len() {
            if slots[index].done || slots[index].head.is_some() {
                continue;
            }
            match slots[index].pass.next().await {
                Some(Ok(event)) => slots[index].head = Some(event),
                Some(Err(err)) => {
                    // Abort: release every pass before surfacing the error.
                    slots.clear();
                    return Some((Err(err), slots));
                }
                None => {
                    slots[index].done = true;
                    slots[index].pass = stream::empty().boxed();
                }
            }
        }
        let next = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.head.as_ref().map(|event| (index, event.log_time)))
            .min_by_key(|&(_, log_time)| log_time)?
            .0;
        let event = slots[next].head.take()?;
        Some((Ok(event), slots))
    })
    .boxed()
}
