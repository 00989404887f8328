//! Core state and transport for the SARA_OS terminal client.
//!
//! The conversation store holds the ordered chat log and the single-flight
//! status gate; the uplink client performs one HTTP call per submission.
//! Nothing in this crate knows how entries are rendered.

pub mod client;
pub mod config;
pub mod conversation;

pub use client::{ChatClient, ChatOutcome, ClientError, Uplink};
pub use config::{ConfigError, LinkConfig};
pub use conversation::{
    Conversation, EntryKind, LINK_DOWN_MESSAGE, LogEntry, SendCommand, Status,
};
