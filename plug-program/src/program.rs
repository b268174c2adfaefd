//! In-memory program tree
//!
//! A [`Program`] is an ordered list of [`Event`]s, each owning an ordered list
//! of [`Command`]s. Nodes carry stable ids so views can address them without
//! holding borrows into the tree. Ids never take part in equality.
//!
//! The program keeps one structural rule itself: at most one default
//! (`upload`) event exists and it always sits at index 0. The encoder relies
//! on this, since the default event is written without a block header.

use crate::types::{CommandId, EventId, ProgramError, Result};
use crate::vocabulary::UPLOAD_CODE;
use serde::Serialize;

/// A single device instruction
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    #[serde(skip)]
    id: CommandId,
    /// Command code as written in the program string (e.g. `w`)
    code: String,
    /// Display label resolved from the vocabulary (e.g. `WAIT`)
    label: String,
    /// Numeric literal kept as text
    argument: String,
}

impl Command {
    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.label == other.label && self.argument == other.argument
    }
}

impl Eq for Command {}

/// A trigger condition owning its commands
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    #[serde(skip)]
    id: EventId,
    /// Event code (e.g. `reset`, `key0`); authoritative for encoding
    code: String,
    /// Display label resolved from the vocabulary (e.g. `On Reset`)
    label: String,
    commands: Vec<Command>,
}

impl Event {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// True for the implicit `upload` event
    pub fn is_default(&self) -> bool {
        self.code == UPLOAD_CODE
    }

    /// Look up a command of this event by id
    pub fn command(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub(crate) fn command_mut(&mut self, id: CommandId) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn commands_mut(&mut self) -> &mut Vec<Command> {
        &mut self.commands
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.label == other.label && self.commands == other.commands
    }
}

impl Eq for Event {}

/// Ordered collection of events forming one uploadable script
#[derive(Debug, Clone, Default, Serialize)]
pub struct Program {
    events: Vec<Event>,
    #[serde(skip)]
    next_id: u64,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by id
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// True if the program already holds the default `upload` event
    pub fn has_default_event(&self) -> bool {
        self.events.first().is_some_and(Event::is_default)
    }

    /// Total number of commands across all events
    pub fn command_count(&self) -> usize {
        self.events.iter().map(|e| e.commands.len()).sum()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }

    /// Add an event with an already resolved code and label.
    ///
    /// Regular events go to the end. The default event goes to index 0 and
    /// is refused if the program already has one.
    pub(crate) fn insert_event(&mut self, code: &str, label: &str) -> Result<EventId> {
        let is_default = code == UPLOAD_CODE;
        if is_default && self.has_default_event() {
            return Err(ProgramError::DuplicateDefaultEvent);
        }

        let id = EventId(self.allocate_id());
        let event = Event {
            id,
            code: code.to_string(),
            label: label.to_string(),
            commands: Vec::new(),
        };

        if is_default {
            self.events.insert(0, event);
        } else {
            self.events.push(event);
        }
        Ok(id)
    }

    /// Append a command with an already resolved code and label
    pub(crate) fn push_command(
        &mut self,
        event: EventId,
        code: &str,
        label: &str,
        argument: &str,
    ) -> Result<CommandId> {
        validate_argument(argument)?;
        let id = CommandId(self.next_id);
        let target = self
            .events
            .iter_mut()
            .find(|e| e.id == event)
            .ok_or(ProgramError::EventNotFound(event))?;
        target.commands.push(Command {
            id,
            code: code.to_string(),
            label: label.to_string(),
            argument: argument.to_string(),
        });
        self.next_id += 1;
        Ok(id)
    }

    pub(crate) fn replace_argument(
        &mut self,
        event: EventId,
        command: CommandId,
        argument: &str,
    ) -> Result<()> {
        validate_argument(argument)?;
        let target = self
            .event_mut(event)
            .ok_or(ProgramError::EventNotFound(event))?
            .command_mut(command)
            .ok_or(ProgramError::CommandNotFound { event, command })?;
        target.argument = argument.to_string();
        Ok(())
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events
    }
}

impl Eq for Program {}

/// True for characters allowed in a command argument
pub(crate) fn is_argument_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Check that an argument is a non-empty run of digits and decimal points
pub fn validate_argument(argument: &str) -> Result<()> {
    if argument.is_empty() || !argument.chars().all(is_argument_char) {
        return Err(ProgramError::InvalidArgument(argument.to_string()));
    }
    Ok(())
}
