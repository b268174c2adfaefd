//! Vocabulary registry
//!
//! Builds the event and command dictionaries once at startup: the fixed
//! entries first, then one event per device key and one command per output
//! channel. After [`VocabularyBuilder::build`] the vocabulary is read-only and
//! is passed by reference to the decoder, encoder and editor.

use crate::config::DeviceConfig;
use crate::program::Program;
use crate::types::{RegistryKind, Result};
use crate::vocabulary::dictionary::Dictionary;

/// Implicit event used when a block has no `code:` header
pub const UPLOAD_CODE: &str = "upload";
pub const UPLOAD_LABEL: &str = "On Upload";
pub const RESET_CODE: &str = "reset";
pub const RESET_LABEL: &str = "On Reset";
pub const SAY_CODE: &str = "s";
pub const SAY_LABEL: &str = "SAY";
pub const WAIT_CODE: &str = "w";
pub const WAIT_LABEL: &str = "WAIT";

const KEY_CODE_PREFIX: &str = "key";
const KEY_LABEL_PREFIX: &str = "On Key ";
const CHANNEL_LABEL_PREFIX: &str = "CH.";

/// Lowercase name of output channel `index`: `a`..`z`, then `aa`, `ab`, ...
pub fn channel_name(index: u32) -> String {
    let mut n = u64::from(index) + 1;
    let mut name = Vec::new();
    while n > 0 {
        n -= 1;
        name.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    name.reverse();
    name.into_iter().map(char::from).collect()
}

/// Mutable stage of the vocabulary, used only during startup
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    events: Dictionary,
    commands: Dictionary,
}

impl VocabularyBuilder {
    /// Start from the fixed entries (`upload`, `reset`, `s`, `w`)
    pub fn new() -> Self {
        let events = Dictionary::seeded(
            RegistryKind::Event,
            &[(UPLOAD_CODE, UPLOAD_LABEL), (RESET_CODE, RESET_LABEL)],
        );
        let commands = Dictionary::seeded(
            RegistryKind::Command,
            &[(SAY_CODE, SAY_LABEL), (WAIT_CODE, WAIT_LABEL)],
        );

        Self { events, commands }
    }

    /// Register an additional event type
    pub fn register_event(
        &mut self,
        code: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<&mut Self> {
        self.events.register(code, label)?;
        Ok(self)
    }

    /// Register an additional command type
    pub fn register_command(
        &mut self,
        code: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<&mut Self> {
        self.commands.register(code, label)?;
        Ok(self)
    }

    /// Add `key0`..`key{n-1}` events labelled `On Key {i}`
    pub fn with_keys(&mut self, key_count: u32) -> Result<&mut Self> {
        for i in 0..key_count {
            self.register_event(
                format!("{KEY_CODE_PREFIX}{i}"),
                format!("{KEY_LABEL_PREFIX}{i}"),
            )?;
        }
        Ok(self)
    }

    /// Add one channel command per output, labelled `CH.A`, `CH.B`, ...
    pub fn with_outputs(&mut self, out_count: u32) -> Result<&mut Self> {
        for i in 0..out_count {
            let name = channel_name(i);
            let label = format!("{CHANNEL_LABEL_PREFIX}{}", name.to_ascii_uppercase());
            self.register_command(name, label)?;
        }
        Ok(self)
    }

    /// Freeze the dictionaries
    pub fn build(self) -> Vocabulary {
        Vocabulary {
            events: self.events,
            commands: self.commands,
        }
    }
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only event and command vocabularies
#[derive(Debug, Clone)]
pub struct Vocabulary {
    events: Dictionary,
    commands: Dictionary,
}

impl Vocabulary {
    /// Vocabulary with only the fixed entries
    pub fn standard() -> Self {
        VocabularyBuilder::new().build()
    }

    /// Seed and extend the vocabulary for a device
    pub fn from_config(config: &DeviceConfig) -> Result<Self> {
        let mut builder = VocabularyBuilder::new();
        builder
            .with_keys(config.key_count)?
            .with_outputs(config.out_count)?;
        let vocabulary = builder.build();

        log::info!(
            "Vocabulary ready: {} event types, {} command types",
            vocabulary.events.len(),
            vocabulary.commands.len()
        );
        Ok(vocabulary)
    }

    pub fn events(&self) -> &Dictionary {
        &self.events
    }

    pub fn commands(&self) -> &Dictionary {
        &self.commands
    }

    pub fn resolve_event_label(&self, code: &str) -> Result<&str> {
        self.events.label(code)
    }

    pub fn resolve_command_label(&self, code: &str) -> Result<&str> {
        self.commands.label(code)
    }

    pub fn code_for_event_label(&self, label: &str) -> Result<&str> {
        self.events.code_for_label(label)
    }

    pub fn code_for_command_label(&self, label: &str) -> Result<&str> {
        self.commands.code_for_label(label)
    }

    /// Labels for the "new event" menu.
    ///
    /// The default event is left out once `program` already has one.
    pub fn all_event_labels(&self, program: &Program) -> Vec<&str> {
        let skip_default = program.has_default_event();
        self.events
            .entries()
            .iter()
            .filter(|entry| !(skip_default && entry.code == UPLOAD_CODE))
            .map(|entry| entry.label.as_str())
            .collect()
    }

    /// Labels for the "new command" menu
    pub fn all_command_labels(&self) -> Vec<&str> {
        self.commands.labels().collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}
