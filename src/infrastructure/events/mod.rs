//! Event Sink Implementations
//!
//! Concrete implementations of the PushEventSink port.

mod json;

pub use json::JsonEventSink;
