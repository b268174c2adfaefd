//! Program string decoder
//!
//! Turns the compact program string into a [`Program`] tree. The string is a
//! list of `@`-separated blocks; each block is either a bare command string
//! (the default `upload` event) or `code:commands`.

use crate::program::Program;
use crate::scanner::scan_commands;
use crate::types::{ProgramError, Result};
use crate::vocabulary::{Vocabulary, UPLOAD_CODE};

const BLOCK_SEPARATOR: char = '@';
const HEADER_SEPARATOR: char = ':';

/// Decoder bound to one vocabulary
pub struct Decoder<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Decoder<'v> {
    /// Create a decoder resolving codes against `vocabulary`
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Decode a program string
    ///
    /// Empty blocks are skipped, so `""` yields an empty program. The default
    /// event may only appear as the first non-empty block.
    ///
    /// # Example
    /// ```
    /// use plug_program::{Decoder, Vocabulary};
    ///
    /// let vocabulary = Vocabulary::standard();
    /// let program = Decoder::new(&vocabulary).decode("s1@reset:w2.5").unwrap();
    ///
    /// assert_eq!(program.len(), 2);
    /// assert_eq!(program.events()[1].label(), "On Reset");
    /// assert_eq!(program.events()[1].commands()[0].argument(), "2.5");
    /// ```
    pub fn decode(&self, text: &str) -> Result<Program> {
        let mut program = Program::new();
        let mut block_offset = 0;

        for block in text.split(BLOCK_SEPARATOR) {
            let offset = block_offset;
            block_offset += block.len() + BLOCK_SEPARATOR.len_utf8();

            if block.is_empty() {
                log::trace!("Skipping empty block at {}", offset);
                continue;
            }
            self.decode_block(&mut program, block, offset)?;
        }

        log::debug!(
            "Decoded {} events with {} commands",
            program.len(),
            program.command_count()
        );
        Ok(program)
    }

    fn decode_block(&self, program: &mut Program, block: &str, offset: usize) -> Result<()> {
        let parts: Vec<&str> = block.split(HEADER_SEPARATOR).collect();
        let (code, commands, commands_offset) = match parts.as_slice() {
            [commands] => (UPLOAD_CODE, *commands, offset),
            [code, commands] => {
                if *code == UPLOAD_CODE {
                    log::warn!("Explicit {:?} header at {}, treating as default event", code, offset);
                }
                (*code, *commands, offset + code.len() + HEADER_SEPARATOR.len_utf8())
            }
            _ => {
                return Err(ProgramError::malformed(
                    offset,
                    format!("block has {} ':' separators, expected at most one", parts.len() - 1),
                ))
            }
        };

        let label = self.vocabulary.resolve_event_label(code)?;
        if code == UPLOAD_CODE && !program.is_empty() {
            return Err(ProgramError::malformed(
                offset,
                "default event must be the first block",
            ));
        }
        let event = program.insert_event(code, label)?;
        log::debug!("Block at {}: event {:?} ({})", offset, code, label);

        for raw in scan_commands(commands, commands_offset)? {
            let label = self.vocabulary.resolve_command_label(raw.code)?;
            program.push_command(event, raw.code, label, raw.argument)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::types::RegistryKind;

    fn decode(text: &str) -> Result<Program> {
        Decoder::new(&Vocabulary::standard()).decode(text)
    }

    #[test]
    fn test_empty_string() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("@").unwrap().is_empty());
        assert!(decode("@@").unwrap().is_empty());
    }

    #[test]
    fn test_default_event() {
        let program = decode("s1w2").unwrap();
        assert_eq!(program.len(), 1);

        let event = &program.events()[0];
        assert_eq!(event.code(), "upload");
        assert_eq!(event.label(), "On Upload");
        assert_eq!(event.commands().len(), 2);
        assert_eq!(event.commands()[0].code(), "s");
        assert_eq!(event.commands()[0].label(), "SAY");
        assert_eq!(event.commands()[0].argument(), "1");
        assert_eq!(event.commands()[1].code(), "w");
        assert_eq!(event.commands()[1].argument(), "2");
    }

    #[test]
    fn test_explicit_event() {
        let program = decode("s1@reset:w2.5").unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.events()[0].code(), "upload");
        assert_eq!(program.events()[0].commands()[0].code(), "s");
        assert_eq!(program.events()[1].code(), "reset");
        assert_eq!(program.events()[1].commands()[0].code(), "w");
        assert_eq!(program.events()[1].commands()[0].argument(), "2.5");
    }

    #[test]
    fn test_event_without_commands() {
        let program = decode("@reset:").unwrap();
        assert_eq!(program.len(), 1);
        assert!(program.events()[0].commands().is_empty());
    }

    #[test]
    fn test_unknown_command_code() {
        let err = decode("z1").unwrap_err();
        assert_eq!(
            err,
            ProgramError::UnknownCode {
                kind: RegistryKind::Command,
                code: "z".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_event_code() {
        let err = decode("@key0:s1").unwrap_err();
        assert!(matches!(
            err,
            ProgramError::UnknownCode { kind: RegistryKind::Event, .. }
        ));

        // Registered once the device reports a key
        let vocab = Vocabulary::from_config(&DeviceConfig::new().with_keys(1)).unwrap();
        let program = Decoder::new(&vocab).decode("@key0:s1").unwrap();
        assert_eq!(program.events()[0].label(), "On Key 0");
    }

    #[test]
    fn test_too_many_colons() {
        let err = decode("s1@reset:w1:w2").unwrap_err();
        assert!(matches!(err, ProgramError::MalformedProgram { offset: 3, .. }));
    }

    #[test]
    fn test_default_event_must_lead() {
        let err = decode("@reset:w1@s2").unwrap_err();
        assert!(matches!(err, ProgramError::MalformedProgram { offset: 10, .. }));

        assert!(decode("s1@s2").is_err());
        assert!(decode("s1@upload:s2").is_err());
    }

    #[test]
    fn test_explicit_upload_header() {
        let program = decode("upload:s1@reset:w1").unwrap();
        assert_eq!(program.events()[0].code(), "upload");
        assert_eq!(program, decode("s1@reset:w1").unwrap());
    }

    #[test]
    fn test_error_offset_is_absolute() {
        let err = decode("s1@reset:w1#").unwrap_err();
        assert_eq!(
            err,
            ProgramError::MalformedProgram {
                offset: 11,
                reason: "unexpected character '#'".to_string()
            }
        );
    }

    #[test]
    fn test_channel_commands() {
        let vocab = Vocabulary::from_config(&DeviceConfig::new().with_outputs(4)).unwrap();
        let program = Decoder::new(&vocab).decode("a1w10a0.5d0").unwrap();
        let labels: Vec<&str> = program.events()[0]
            .commands()
            .iter()
            .map(|c| c.label())
            .collect();
        assert_eq!(labels, vec!["CH.A", "WAIT", "CH.A", "CH.D"]);
    }
}
