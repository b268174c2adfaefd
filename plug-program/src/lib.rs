//! Plug Program Library
//!
//! Encoder, decoder and editing model for the compact automation programs run
//! by the plug controller. A program assigns, per trigger event (upload,
//! reset, key presses), an ordered list of commands (say, wait, channel
//! power) with numeric arguments.
//!
//! # Architecture
//!
//! - A [`Vocabulary`] maps short codes to labels for events and commands. It
//!   is built once per device from a [`DeviceConfig`] and read-only afterwards.
//! - The [`Decoder`] turns a program string into a [`Program`] tree.
//! - The [`Encoder`] turns a tree back into a program string.
//! - The [`Editor`] applies append/remove operations through a single
//!   pending selection menu.
//!
//! The library does NOT:
//! - Talk to the controller (uploading is up to the caller)
//! - Check argument ranges against device capabilities
//! - Keep undo history
//!
//! # Program format
//!
//! ```text
//! program  := block ('@' block)*
//! block    := commands | code ':' commands
//! commands := ([a-z]+ [0-9.]+)*
//! ```
//!
//! A block without a header belongs to the default `upload` event, which may
//! only be the first block.
//!
//! # Example Usage
//!
//! ```
//! use plug_program::{DeviceConfig, Editor, Vocabulary};
//!
//! let config = DeviceConfig::new().with_keys(1).with_outputs(2);
//! let vocabulary = Vocabulary::from_config(&config).unwrap();
//!
//! let mut editor = Editor::load(&vocabulary, "a1w5a0").unwrap();
//! editor.open_event_menu().unwrap();
//! let key = match editor.select("On Key 0").unwrap() {
//!     plug_program::Appended::Event(id) => id,
//!     _ => unreachable!(),
//! };
//! editor.open_command_menu(key).unwrap();
//! editor.select("CH.B").unwrap();
//!
//! assert_eq!(editor.serialize().unwrap(), "a1w5a0@key0:b0");
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod edit;
pub mod encoder;
pub mod program;
pub mod scanner;
pub mod types;
pub mod vocabulary;

// Re-export main types for convenience
pub use config::DeviceConfig;
pub use decoder::Decoder;
pub use edit::{Appended, Editor, MenuTarget, PendingMenu, DEFAULT_ARGUMENT};
pub use encoder::Encoder;
pub use program::{validate_argument, Command, Event, Program};
pub use types::{CommandId, EventId, ProgramError, RegistryKind, Result};
pub use vocabulary::{Dictionary, Vocabulary, VocabularyBuilder, VocabularyEntry, UPLOAD_CODE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decode a program string with `vocabulary`
pub fn decode(text: &str, vocabulary: &Vocabulary) -> Result<Program> {
    Decoder::new(vocabulary).decode(text)
}

/// Encode `program` with `vocabulary`
pub fn encode(program: &Program, vocabulary: &Vocabulary) -> Result<String> {
    Encoder::new(vocabulary).encode(program)
}
