//! Conversation log and single-flight status gate

use crate::client::{ChatOutcome, ClientError};
use chrono::{DateTime, Local};
use tracing::debug;

/// Fixed message appended when the uplink cannot be reached. Transport
/// fault detail is collapsed into this sentinel; the detail only survives
/// in the tracing output.
pub const LINK_DOWN_MESSAGE: &str = "CLOUD CONNECTION FAILED";

/// Speaker labels used by seeded and generated entries.
pub mod source {
    pub const SYS: &str = "SYS";
    pub const MEM: &str = "MEM";
    pub const USER: &str = "USER";
    pub const SARA: &str = "SARA";
    pub const ERR: &str = "ERR";
}

/// Presentation category of an entry. Drives styling only, never behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    System,
    User,
    Ai,
    Error,
}

/// A single item in the conversation log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub source: String,
    pub kind: EntryKind,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    fn new(source: impl Into<String>, kind: EntryKind, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    pub fn system(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(source, EntryKind::System, message)
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(source::USER, EntryKind::User, message)
    }

    pub fn reply(message: impl Into<String>) -> Self {
        Self::new(source::SARA, EntryKind::Ai, message)
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::new(source::ERR, EntryKind::Error, message)
    }
}

/// Single-flight gate over the uplink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Processing,
}

/// Description of the one network call a submission produces. The store
/// never performs the call itself; the caller executes the command and
/// feeds the settled result back through [`Conversation::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCommand {
    pub message: String,
}

/// Ordered, append-only conversation log plus the `idle`/`processing`
/// status gate. All mutations happen on the single control path
/// submit -> settle; there is no other writer.
#[derive(Debug)]
pub struct Conversation {
    entries: Vec<LogEntry>,
    status: Status,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Creates the session log with the fixed boot banner.
    pub fn new() -> Self {
        let mut conversation = Self {
            entries: Vec::new(),
            status: Status::Idle,
        };
        conversation.append(LogEntry::system(source::SYS, "BIO-LINK ESTABLISHED..."));
        conversation.append(LogEntry::system(source::MEM, "LOADING CONSTITUTION..."));
        conversation.append(LogEntry::reply("WATCHING."));
        conversation
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_processing(&self) -> bool {
        self.status == Status::Processing
    }

    /// Adds an entry to the end of the log. User-authored entries must
    /// carry a non-empty message; anything else is accepted as-is.
    pub fn append(&mut self, entry: LogEntry) {
        if entry.kind == EntryKind::User && entry.message.trim().is_empty() {
            debug!("dropping user entry with blank message");
            return;
        }
        self.entries.push(entry);
    }

    /// Accepts user input. Blank input and input arriving while a call is
    /// in flight are rejected with no state change. Otherwise the user
    /// entry is appended, the gate closes, and the send command for the
    /// caller to execute is returned.
    pub fn submit(&mut self, text: &str) -> Option<SendCommand> {
        if text.trim().is_empty() {
            return None;
        }
        if self.is_processing() {
            debug!("submission rejected while a call is in flight");
            return None;
        }
        self.append(LogEntry::user(text));
        self.status = Status::Processing;
        Some(SendCommand {
            message: text.to_string(),
        })
    }

    /// Folds a settled chat call back into the log. Every branch returns
    /// the gate to idle; there is no retry.
    pub fn settle(&mut self, outcome: Result<ChatOutcome, ClientError>) {
        match outcome {
            Ok(ChatOutcome::Reply(message)) => self.append(LogEntry::reply(message)),
            Ok(ChatOutcome::Reported(message)) => self.append(LogEntry::fault(message)),
            Ok(ChatOutcome::Empty) => {
                // A payload with neither field settles the call without
                // appending an entry.
                debug!("uplink payload carried neither reply nor error");
            }
            Err(err) => {
                debug!(error = %err, "uplink transport failure");
                self.append(LogEntry::fault(LINK_DOWN_MESSAGE));
            }
        }
        self.status = Status::Idle;
    }

    /// Claims the gate for a health probe. Returns false without side
    /// effects when a call is already in flight.
    pub fn begin_probe(&mut self) -> bool {
        if self.is_processing() {
            debug!("probe rejected while a call is in flight");
            return false;
        }
        self.status = Status::Processing;
        true
    }

    /// Folds a settled health probe back into the log.
    pub fn settle_probe(&mut self, outcome: Result<String, ClientError>) {
        match outcome {
            Ok(status_text) => {
                self.append(LogEntry::system(source::SYS, format!("LINK OK: {status_text}")));
            }
            Err(err) => {
                debug!(error = %err, "probe transport failure");
                self.append(LogEntry::fault(LINK_DOWN_MESSAGE));
            }
        }
        self.status = Status::Idle;
    }
}
