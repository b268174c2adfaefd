//! Command-string scanner
//!
//! Splits the command part of a block into letter runs and numeric runs,
//! left to right, and pairs them into raw commands. Any byte outside
//! `[a-z0-9.]` stops the scan with an error carrying its absolute offset in
//! the program string.

use crate::program::is_argument_char;
use crate::types::{ProgramError, Result};

/// Kind of a scanned run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One or more lowercase letters (a command code)
    Letters,
    /// One or more digits or decimal points (an argument)
    Number,
}

/// A run of characters of one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset in the full program string
    pub offset: usize,
}

/// A command code with its argument, not yet resolved against a vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCommand<'a> {
    pub code: &'a str,
    pub argument: &'a str,
    pub offset: usize,
}

/// Iterator over the tokens of a command string
pub struct Scanner<'a> {
    input: &'a str,
    /// Offset of `input` within the program string
    base: usize,
    pos: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, base: usize) -> Self {
        Self {
            input,
            base,
            pos: 0,
            failed: false,
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = &self.input[self.pos..];
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let c = self.input[self.pos..].chars().next()?;
        let offset = self.base + self.pos;

        let kind = if c.is_ascii_lowercase() {
            TokenKind::Letters
        } else if is_argument_char(c) {
            TokenKind::Number
        } else {
            self.failed = true;
            return Some(Err(ProgramError::malformed(
                offset,
                format!("unexpected character {c:?}"),
            )));
        };

        let text = match kind {
            TokenKind::Letters => self.take_while(|c| c.is_ascii_lowercase()),
            TokenKind::Number => self.take_while(is_argument_char),
        };
        log::trace!("Scanned {:?} {:?} at {}", kind, text, offset);
        Some(Ok(Token { kind, text, offset }))
    }
}

/// Scan a command string into `code` + `argument` pairs
pub fn scan_commands(input: &str, base: usize) -> Result<Vec<RawCommand<'_>>> {
    let mut commands = Vec::new();
    let mut scanner = Scanner::new(input, base);

    while let Some(token) = scanner.next() {
        let token = token?;
        if token.kind != TokenKind::Letters {
            return Err(ProgramError::malformed(
                token.offset,
                format!("argument {:?} has no command code", token.text),
            ));
        }

        // Letter runs are maximal, so the next token is either a number or
        // the end of the input
        match scanner.next().transpose()? {
            Some(argument) => commands.push(RawCommand {
                code: token.text,
                argument: argument.text,
                offset: token.offset,
            }),
            None => {
                return Err(ProgramError::malformed(
                    token.offset,
                    format!("command {:?} has no argument", token.text),
                ))
            }
        }
    }

    Ok(commands)
}
