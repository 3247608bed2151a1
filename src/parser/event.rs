//! Event normalization: raw events into decoded stacks.
//!
//! Frames keep the order the recorder wrote them in (sampled frame first).
//! Reversal into caller order is left to the aggregators.

use super::frame::{decode_frame, DecodedFrame};
use super::schema::{EventBatch, RawEvent};
use crate::utils::error::{DecodeError, ParseError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Ordered decoded frames of one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedStack {
    frames: Vec<DecodedFrame>,
}

impl DecodedStack {
    pub fn new(frames: Vec<DecodedFrame>) -> Self {
        Self { frames }
    }

    /// Frames as recorded: sampled frame first, outermost caller last
    pub fn frames(&self) -> &[DecodedFrame] {
        &self.frames
    }

    /// Frames in caller order: outermost caller first, sampled frame last
    pub fn caller_order(&self) -> Vec<&DecodedFrame> {
        self.frames.iter().rev().collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// What to do with an event whose stack contains a malformed frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Abort the whole batch on the first malformed frame
    #[default]
    Strict,

    /// Drop the offending event and keep going
    SkipEvent,
}

/// Counters describing an event batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub events: usize,
    pub events_with_stacks: usize,
    pub frames: usize,
    pub malformed_frames: usize,
}

/// Parse an event batch from a JSON value
///
/// # Errors
/// * `ParseError::InvalidFormat` - payload is not a JSON object
/// * `ParseError::JsonError` - payload does not match the batch shape
pub fn parse_batch(raw: &serde_json::Value) -> Result<EventBatch, ParseError> {
    if !raw.is_object() {
        return Err(ParseError::InvalidFormat(
            "Event payload must be a JSON object".to_string(),
        ));
    }

    let batch = EventBatch::deserialize(raw)?;
    debug!("Parsed batch with {} events", batch.events.len());
    Ok(batch)
}

/// Parse an event batch from JSON text
pub fn parse_batch_str(raw: &str) -> Result<EventBatch, ParseError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    parse_batch(&value)
}

/// Decode the stack trace of one event
///
/// **Public** - events without attributes or without a stack trace yield an
/// empty stack
pub fn normalize_event(event: &RawEvent) -> Result<DecodedStack, DecodeError> {
    let Some(trace) = event.stack_trace() else {
        return Ok(DecodedStack::default());
    };

    let frames = trace
        .frames
        .iter()
        .map(|frame| decode_frame(&frame.name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedStack::new(frames))
}

/// Decode every event of a batch under the given policy
///
/// Under `Strict` the output lines up with the input events, empty stacks
/// included. `SkipEvent` drops events, so indices no longer line up.
///
/// # Errors
/// * `DecodeError::InEvent` - strict policy and a malformed frame was found
pub fn normalize_batch(
    batch: &EventBatch,
    policy: DecodePolicy,
) -> Result<Vec<DecodedStack>, DecodeError> {
    debug!(
        "Normalizing {} events ({:?} policy)",
        batch.events.len(),
        policy
    );

    let mut stacks = Vec::with_capacity(batch.events.len());
    let mut skipped = 0usize;

    for (index, event) in batch.events.iter().enumerate() {
        match normalize_event(event) {
            Ok(stack) => stacks.push(stack),
            Err(e) => match policy {
                DecodePolicy::Strict => {
                    return Err(DecodeError::InEvent {
                        index,
                        source: Box::new(e),
                    })
                }
                DecodePolicy::SkipEvent => {
                    warn!("Skipping event {} ({}): {}", index, event.event_type, e);
                    skipped += 1;
                }
            },
        }
    }

    if skipped > 0 {
        warn!("Skipped {} of {} events", skipped, batch.events.len());
    }

    Ok(stacks)
}

/// Count events, stacks and frames in a batch without failing on bad frames
pub fn batch_stats(batch: &EventBatch) -> BatchStats {
    let mut stats = BatchStats {
        events: batch.events.len(),
        ..Default::default()
    };

    for trace in batch.events.iter().filter_map(RawEvent::stack_trace) {
        stats.events_with_stacks += 1;
        stats.frames += trace.frames.len();
        stats.malformed_frames += trace
            .frames
            .iter()
            .filter(|frame| decode_frame(&frame.name).is_err())
            .count();
    }

    stats
}
