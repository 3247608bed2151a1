//! Event parsing and frame decoding.
//!
//! This module handles:
//! - Deserializing the raw event batch JSON
//! - Decoding frame descriptors into package/class/method
//! - Normalizing events into decoded stacks

pub mod event;
pub mod frame;
pub mod schema;

// Re-export main types
pub use event::{
    batch_stats, normalize_batch, normalize_event, parse_batch, parse_batch_str, BatchStats,
    DecodePolicy, DecodedStack,
};
pub use frame::{decode_frame, DecodedFrame};
pub use schema::{EventAttributes, EventBatch, RawEvent, RawFrame, RawStackTrace};
