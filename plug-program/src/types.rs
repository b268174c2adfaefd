//! Core types for the plug program library
//!
//! This module defines the error taxonomy shared by the vocabulary, decoder,
//! encoder and editing layers, plus the small identifier types used to address
//! nodes inside a [`Program`](crate::Program).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for program operations
pub type Result<T> = std::result::Result<T, ProgramError>;

/// Which of the two vocabulary dictionaries an entry or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Trigger conditions (`upload`, `reset`, `key0`, ...)
    Event,
    /// Device instructions (`s`, `w`, `a`, ...)
    Command,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Event => write!(f, "event"),
            RegistryKind::Command => write!(f, "command"),
        }
    }
}

/// Errors that can occur while building a vocabulary or handling a program
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("Duplicate {kind} code: {code:?}")]
    DuplicateCode { kind: RegistryKind, code: String },

    #[error("Invalid {kind} code: {code:?}")]
    InvalidCode { kind: RegistryKind, code: String },

    #[error("Unknown {kind} code: {code:?}")]
    UnknownCode { kind: RegistryKind, code: String },

    #[error("Unknown {kind} label: {label:?}")]
    UnknownLabel { kind: RegistryKind, label: String },

    #[error("Malformed program at byte {offset}: {reason}")]
    MalformedProgram { offset: usize, reason: String },

    #[error("Invalid command argument: {0:?}")]
    InvalidArgument(String),

    #[error("Program already contains the default event")]
    DuplicateDefaultEvent,

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Command {command} not found in event {event}")]
    CommandNotFound { event: EventId, command: CommandId },

    #[error("A menu is already open")]
    MenuAlreadyOpen,

    #[error("No menu is open")]
    NoOpenMenu,
}

impl ProgramError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        ProgramError::MalformedProgram {
            offset,
            reason: reason.into(),
        }
    }
}

/// Stable handle of an event inside its program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub(crate) u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Stable handle of a command inside its program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub(crate) u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}
