//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for scripting

mod json;

pub use json::JsonEventSink;
