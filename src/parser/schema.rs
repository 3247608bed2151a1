//! Input JSON schema definitions for event batches.
//!
//! This module defines the payload the host recorder hands us:
//! `{ "events": [ { "type": ..., "attributes": { "stackTrace": { "frames": [...] } } } ] }`

use serde::{Deserialize, Serialize};

/// A full batch of recorded events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    /// Recorded events, in recording order
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// A single recorded event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event type tag (e.g. "jdk.ExecutionSample")
    #[serde(rename = "type", default)]
    pub event_type: String,

    /// Event attributes, absent for some event types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<EventAttributes>,
}

impl RawEvent {
    /// Raw stack trace of this event, if one was recorded
    pub fn stack_trace(&self) -> Option<&RawStackTrace> {
        self.attributes.as_ref()?.stack_trace.as_ref()
    }
}

/// Attribute mapping of an event
///
/// Only `stackTrace` drives the graphs. The remaining known fields are kept
/// for completeness, anything else lands in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAttributes {
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<serde_json::Value>,

    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<serde_json::Value>,

    #[serde(
        rename = "eventThread",
        alias = "sampledThread",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub thread: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,

    #[serde(rename = "stackTrace", default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<RawStackTrace>,

    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Raw stack trace payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStackTrace {
    /// Frames, sampled (innermost) frame first
    #[serde(default)]
    pub frames: Vec<RawFrame>,

    /// Set by the recorder when deep stacks were cut off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

/// Raw frame descriptor: `fully.qualified.Class#method(args)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    pub name: String,
}

impl RawFrame {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
