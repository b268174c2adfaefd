//! Editing protocol
//!
//! The four mutations a view may apply to a program, and an [`Editor`]
//! session that drives them through at most one pending selection menu.
//!
//! Appends always go to the end of their list, except the default event,
//! which the program keeps at index 0. Removals are idempotent.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::program::Program;
use crate::types::{CommandId, EventId, ProgramError, RegistryKind, Result};
use crate::vocabulary::Vocabulary;

/// Argument given to commands created from a menu
pub const DEFAULT_ARGUMENT: &str = "0";

impl Program {
    /// Append a command chosen by label to `event`, with argument `0`
    pub fn append_command(
        &mut self,
        vocabulary: &Vocabulary,
        event: EventId,
        label: &str,
    ) -> Result<CommandId> {
        let code = vocabulary.code_for_command_label(label)?;
        let id = self.push_command(event, code, label, DEFAULT_ARGUMENT)?;
        log::debug!("Appended command {:?} to {}", code, event);
        Ok(id)
    }

    /// Append an event chosen by label, with no commands
    pub fn append_event(&mut self, vocabulary: &Vocabulary, label: &str) -> Result<EventId> {
        let code = vocabulary.code_for_event_label(label)?;
        let id = self.insert_event(code, label)?;
        log::debug!("Appended event {:?} as {}", code, id);
        Ok(id)
    }

    /// Remove `command` from `event`; returns false if it was already gone
    pub fn remove_command(&mut self, event: EventId, command: CommandId) -> bool {
        let Some(target) = self.event_mut(event) else {
            return false;
        };
        let commands = target.commands_mut();
        let before = commands.len();
        commands.retain(|c| c.id() != command);
        before != commands.len()
    }

    /// Remove `event` and its commands; returns false if it was already gone
    pub fn remove_event(&mut self, event: EventId) -> bool {
        let events = self.events_mut();
        let before = events.len();
        events.retain(|e| e.id() != event);
        before != events.len()
    }

    /// Replace the argument of a command
    pub fn set_argument(&mut self, event: EventId, command: CommandId, argument: &str) -> Result<()> {
        self.replace_argument(event, command, argument)
    }
}

/// What a menu selection will create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// A new event appended to the program
    NewEvent,
    /// A new command appended to the given event
    NewCommand(EventId),
}

/// An open selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMenu {
    target: MenuTarget,
    items: Vec<String>,
}

impl PendingMenu {
    pub fn target(&self) -> MenuTarget {
        self.target
    }

    /// Labels offered, in vocabulary order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn offers(&self, label: &str) -> bool {
        self.items.iter().any(|item| item == label)
    }
}

/// Node created by a menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    Event(EventId),
    Command(EventId, CommandId),
}

/// One editing session over a program
pub struct Editor<'v> {
    vocabulary: &'v Vocabulary,
    program: Program,
    menu: Option<PendingMenu>,
}

impl<'v> Editor<'v> {
    /// Start a session over an existing program
    pub fn new(vocabulary: &'v Vocabulary, program: Program) -> Self {
        Self {
            vocabulary,
            program,
            menu: None,
        }
    }

    /// Start a session from a stored program string
    pub fn load(vocabulary: &'v Vocabulary, text: &str) -> Result<Self> {
        let program = Decoder::new(vocabulary).decode(text)?;
        Ok(Self::new(vocabulary, program))
    }

    /// Start a session from a stored program string, falling back to an
    /// empty program if it cannot be decoded. The decode error is returned
    /// alongside so it can be shown to the user.
    pub fn load_or_empty(vocabulary: &'v Vocabulary, text: &str) -> (Self, Option<ProgramError>) {
        match Self::load(vocabulary, text) {
            Ok(editor) => (editor, None),
            Err(e) => {
                log::error!("Stored program rejected, starting empty: {}", e);
                (Self::new(vocabulary, Program::new()), Some(e))
            }
        }
    }

    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    pub fn pending_menu(&self) -> Option<&PendingMenu> {
        self.menu.as_ref()
    }

    /// Open the "new event" menu
    pub fn open_event_menu(&mut self) -> Result<&PendingMenu> {
        let items = self
            .vocabulary
            .all_event_labels(&self.program)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.open_menu(MenuTarget::NewEvent, items)
    }

    /// Open the "new command" menu for `event`
    pub fn open_command_menu(&mut self, event: EventId) -> Result<&PendingMenu> {
        if self.program.event(event).is_none() {
            return Err(ProgramError::EventNotFound(event));
        }
        let items = self
            .vocabulary
            .all_command_labels()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.open_menu(MenuTarget::NewCommand(event), items)
    }

    fn open_menu(&mut self, target: MenuTarget, items: Vec<String>) -> Result<&PendingMenu> {
        if self.menu.is_some() {
            return Err(ProgramError::MenuAlreadyOpen);
        }
        log::trace!("Opening menu {:?} with {} items", target, items.len());
        Ok(&*self.menu.insert(PendingMenu { target, items }))
    }

    /// Pick `label` from the open menu.
    ///
    /// The menu is closed whatever the outcome. On error the program is left
    /// unchanged.
    pub fn select(&mut self, label: &str) -> Result<Appended> {
        let menu = self.menu.take().ok_or(ProgramError::NoOpenMenu)?;
        let kind = match menu.target {
            MenuTarget::NewEvent => RegistryKind::Event,
            MenuTarget::NewCommand(_) => RegistryKind::Command,
        };
        if !menu.offers(label) {
            return Err(ProgramError::UnknownLabel {
                kind,
                label: label.to_string(),
            });
        }

        match menu.target {
            MenuTarget::NewEvent => self
                .program
                .append_event(self.vocabulary, label)
                .map(Appended::Event),
            MenuTarget::NewCommand(event) => self
                .program
                .append_command(self.vocabulary, event, label)
                .map(|command| Appended::Command(event, command)),
        }
    }

    /// Close the open menu without changing the program.
    ///
    /// Returns false if no menu was open.
    pub fn dismiss(&mut self) -> bool {
        self.menu.take().is_some()
    }

    pub fn remove_event(&mut self, event: EventId) -> bool {
        self.program.remove_event(event)
    }

    pub fn remove_command(&mut self, event: EventId, command: CommandId) -> bool {
        self.program.remove_command(event, command)
    }

    pub fn set_argument(&mut self, event: EventId, command: CommandId, argument: &str) -> Result<()> {
        self.program.set_argument(event, command, argument)
    }

    /// Encode the current program for upload
    pub fn serialize(&self) -> Result<String> {
        Encoder::new(self.vocabulary).encode(&self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_config(&DeviceConfig::new().with_keys(1).with_outputs(2)).unwrap()
    }

    #[test]
    fn test_append_then_encode() {
        let vocab = Vocabulary::standard();
        let mut program = Program::new();

        let event = program.append_event(&vocab, "On Reset").unwrap();
        program.append_command(&vocab, event, "WAIT").unwrap();

        let text = Encoder::new(&vocab).encode(&program).unwrap();
        assert_eq!(text, "@reset:w0");
    }

    #[test]
    fn test_append_unknown_label() {
        let vocab = Vocabulary::standard();
        let mut program = Program::new();

        let err = program.append_event(&vocab, "On Key 9").unwrap_err();
        assert!(matches!(err, ProgramError::UnknownLabel { kind: RegistryKind::Event, .. }));

        let event = program.append_event(&vocab, "On Upload").unwrap();
        let err = program.append_command(&vocab, event, "CH.Z").unwrap_err();
        assert!(matches!(err, ProgramError::UnknownLabel { kind: RegistryKind::Command, .. }));
        assert!(program.events()[0].commands().is_empty());
    }

    #[test]
    fn test_default_event_append_rules() {
        let vocab = Vocabulary::standard();
        let mut program = Program::new();

        program.append_event(&vocab, "On Reset").unwrap();
        let upload = program.append_event(&vocab, "On Upload").unwrap();
        assert_eq!(program.events()[0].id(), upload);

        let err = program.append_event(&vocab, "On Upload").unwrap_err();
        assert_eq!(err, ProgramError::DuplicateDefaultEvent);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_idempotent_removal() {
        let vocab = Vocabulary::standard();
        let mut program = Program::new();
        let keep = program.append_event(&vocab, "On Upload").unwrap();
        let gone = program.append_event(&vocab, "On Reset").unwrap();
        let cmd = program.append_command(&vocab, keep, "SAY").unwrap();

        assert!(program.remove_event(gone));
        let snapshot = program.clone();
        assert!(!program.remove_event(gone));
        assert_eq!(program, snapshot);

        assert!(program.remove_command(keep, cmd));
        assert!(!program.remove_command(keep, cmd));
        assert!(!program.remove_command(gone, cmd));
        assert!(program.events()[0].commands().is_empty());
    }

    #[test]
    fn test_removal_keeps_sibling_order() {
        let vocab = vocabulary();
        let mut program = Decoder::new(&vocab).decode("s1w2a1b0").unwrap();
        let event = program.events()[0].id();
        let second = program.events()[0].commands()[1].id();

        program.remove_command(event, second);
        let codes: Vec<&str> = program.events()[0].commands().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["s", "a", "b"]);
    }

    #[test]
    fn test_set_argument() {
        let vocab = Vocabulary::standard();
        let mut editor = Editor::load(&vocab, "s1").unwrap();
        let event = editor.program().events()[0].id();
        let command = editor.program().events()[0].commands()[0].id();

        editor.set_argument(event, command, "42").unwrap();
        assert_eq!(editor.serialize().unwrap(), "s42");

        assert!(editor.set_argument(event, command, "4 2").is_err());
        assert_eq!(editor.serialize().unwrap(), "s42");
    }

    #[test]
    fn test_event_menu_hides_existing_default() {
        let vocab = vocabulary();
        let mut editor = Editor::new(&vocab, Program::new());

        let items = editor.open_event_menu().unwrap().items().to_vec();
        assert_eq!(items, vec!["On Upload", "On Reset", "On Key 0"]);
        editor.select("On Upload").unwrap();

        let items = editor.open_event_menu().unwrap().items().to_vec();
        assert_eq!(items, vec!["On Reset", "On Key 0"]);
    }

    #[test]
    fn test_single_menu_at_a_time() {
        let vocab = vocabulary();
        let mut editor = Editor::new(&vocab, Program::new());

        editor.open_event_menu().unwrap();
        assert_eq!(
            editor.open_event_menu().unwrap_err(),
            ProgramError::MenuAlreadyOpen
        );
        assert!(editor.dismiss());
        assert!(!editor.dismiss());
        assert!(editor.open_event_menu().is_ok());
    }

    #[test]
    fn test_dismiss_leaves_program_untouched() {
        let vocab = vocabulary();
        let mut editor = Editor::load(&vocab, "s1").unwrap();
        let before = editor.program().clone();
        let event = before.events()[0].id();

        editor.open_command_menu(event).unwrap();
        assert!(editor.dismiss());
        assert_eq!(editor.program(), &before);
        assert!(editor.pending_menu().is_none());
    }

    #[test]
    fn test_select_appends_command() {
        let vocab = vocabulary();
        let mut editor = Editor::load(&vocab, "@key0:").unwrap();
        let event = editor.program().events()[0].id();

        let menu = editor.open_command_menu(event).unwrap();
        assert_eq!(menu.target(), MenuTarget::NewCommand(event));
        assert_eq!(menu.items(), ["SAY", "WAIT", "CH.A", "CH.B"]);

        let appended = editor.select("CH.B").unwrap();
        assert!(matches!(appended, Appended::Command(e, _) if e == event));
        assert_eq!(editor.serialize().unwrap(), "@key0:b0");
        assert!(editor.pending_menu().is_none());
    }

    #[test]
    fn test_failed_select_changes_nothing() {
        let vocab = vocabulary();
        let mut editor = Editor::load(&vocab, "s1").unwrap();
        let before = editor.program().clone();

        // Default event already present, so it is not on offer
        editor.open_event_menu().unwrap();
        assert!(editor.select("On Upload").is_err());
        assert_eq!(editor.program(), &before);
        assert!(editor.pending_menu().is_none());

        // Target event removed while its menu was open
        let event = before.events()[0].id();
        editor.open_command_menu(event).unwrap();
        editor.remove_event(event);
        assert_eq!(
            editor.select("SAY").unwrap_err(),
            ProgramError::EventNotFound(event)
        );
        assert!(editor.program().is_empty());

        assert_eq!(editor.select("SAY").unwrap_err(), ProgramError::NoOpenMenu);
    }

    #[test]
    fn test_command_menu_for_missing_event() {
        let vocab = vocabulary();
        let mut editor = Editor::new(&vocab, Program::new());
        let ghost = EventId(99);
        assert_eq!(
            editor.open_command_menu(ghost).unwrap_err(),
            ProgramError::EventNotFound(ghost)
        );
        assert!(editor.pending_menu().is_none());
    }

    #[test]
    fn test_load_or_empty() {
        let vocab = Vocabulary::standard();
        let (editor, err) = Editor::load_or_empty(&vocab, "s1@bogus:w1");
        assert!(editor.program().is_empty());
        assert!(matches!(err, Some(ProgramError::UnknownCode { .. })));

        let (editor, err) = Editor::load_or_empty(&vocab, "s1");
        assert_eq!(editor.program().len(), 1);
        assert!(err.is_none());
    }
}
