//! Program string encoder
//!
//! Inverse of the [`Decoder`](crate::Decoder): writes each event as
//! `@code:` followed by its commands as `code` + `argument`, with no
//! delimiter between commands. The default event is written bare, which is
//! only unambiguous because [`Program`] keeps it at index 0.

use crate::program::Program;
use crate::types::Result;
use crate::vocabulary::Vocabulary;

/// Encoder bound to one vocabulary
pub struct Encoder<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Encoder<'v> {
    /// Create an encoder checking codes against `vocabulary`
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Encode a program into its upload string
    ///
    /// Fails with `UnknownCode` if the program holds a node whose code is not
    /// part of this encoder's vocabulary.
    ///
    /// # Example
    /// ```
    /// use plug_program::{Decoder, Encoder, Vocabulary};
    ///
    /// let vocabulary = Vocabulary::standard();
    /// let program = Decoder::new(&vocabulary).decode("s1@reset:w2.5").unwrap();
    ///
    /// assert_eq!(Encoder::new(&vocabulary).encode(&program).unwrap(), "s1@reset:w2.5");
    /// ```
    pub fn encode(&self, program: &Program) -> Result<String> {
        let mut out = String::new();

        for event in program.events() {
            self.vocabulary.resolve_event_label(event.code())?;
            if !event.is_default() {
                out.push('@');
                out.push_str(event.code());
                out.push(':');
            }

            for command in event.commands() {
                self.vocabulary.resolve_command_label(command.code())?;
                out.push_str(command.code());
                out.push_str(command.argument());
            }
        }

        log::debug!("Encoded {} events into {} bytes", program.len(), out.len());
        Ok(out)
    }
}
