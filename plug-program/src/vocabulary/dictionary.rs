//! Ordered code/label dictionary
//!
//! Keeps entries in registration order (which is also menu order) with a
//! code index for constant-time lookups.

use crate::types::{ProgramError, RegistryKind, Result};
use serde::Serialize;
use std::collections::HashMap;

/// A short code mapped to its human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    /// Code as written in the program string
    pub code: String,
    /// Label shown in menus and the event/command tree
    pub label: String,
}

/// One of the two vocabulary dictionaries
#[derive(Debug, Clone)]
pub struct Dictionary {
    kind: RegistryKind,

    /// Entries in registration order
    entries: Vec<VocabularyEntry>,

    /// Key: code, Value: index into `entries`
    code_lookup: HashMap<String, usize>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            code_lookup: HashMap::new(),
        }
    }

    /// Create a dictionary from fixed entries with distinct, well-formed codes
    pub(crate) fn seeded(kind: RegistryKind, seed: &[(&str, &str)]) -> Self {
        let mut dict = Self::new(kind);
        for (code, label) in seed {
            dict.code_lookup.insert(code.to_string(), dict.entries.len());
            dict.entries.push(VocabularyEntry {
                code: code.to_string(),
                label: label.to_string(),
            });
        }
        dict
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Add a new entry at the end of the dictionary
    ///
    /// Command codes must be lowercase letters so the scanner can split them
    /// from their argument; event codes may also contain digits.
    pub fn register(&mut self, code: impl Into<String>, label: impl Into<String>) -> Result<()> {
        let code = code.into();
        let label = label.into();

        if !self.is_valid_code(&code) {
            return Err(ProgramError::InvalidCode {
                kind: self.kind,
                code,
            });
        }
        if self.code_lookup.contains_key(&code) {
            return Err(ProgramError::DuplicateCode {
                kind: self.kind,
                code,
            });
        }

        log::trace!("Registered {} code {:?} as {:?}", self.kind, code, label);
        self.code_lookup.insert(code.clone(), self.entries.len());
        self.entries.push(VocabularyEntry { code, label });
        Ok(())
    }

    fn is_valid_code(&self, code: &str) -> bool {
        !code.is_empty()
            && code.chars().all(|c| match self.kind {
                RegistryKind::Command => c.is_ascii_lowercase(),
                RegistryKind::Event => c.is_ascii_lowercase() || c.is_ascii_digit(),
            })
    }

    /// Resolve a code to its label
    pub fn label(&self, code: &str) -> Result<&str> {
        self.code_lookup
            .get(code)
            .map(|&idx| self.entries[idx].label.as_str())
            .ok_or_else(|| ProgramError::UnknownCode {
                kind: self.kind,
                code: code.to_string(),
            })
    }

    /// Resolve a label back to its code (first registered match wins)
    pub fn code_for_label(&self, label: &str) -> Result<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.code.as_str())
            .ok_or_else(|| ProgramError::UnknownLabel {
                kind: self.kind,
                label: label.to_string(),
            })
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.code_lookup.contains_key(code)
    }

    /// Labels in registration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Codes in registration order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.code.as_str())
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut dict = Dictionary::new(RegistryKind::Command);
        dict.register("s", "SAY").unwrap();
        dict.register("w", "WAIT").unwrap();

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.label("w").unwrap(), "WAIT");
        assert_eq!(dict.code_for_label("SAY").unwrap(), "s");
        assert_eq!(dict.labels().collect::<Vec<_>>(), vec!["SAY", "WAIT"]);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut dict = Dictionary::new(RegistryKind::Event);
        dict.register("reset", "On Reset").unwrap();

        let err = dict.register("reset", "Again").unwrap_err();
        assert_eq!(
            err,
            ProgramError::DuplicateCode {
                kind: RegistryKind::Event,
                code: "reset".to_string()
            }
        );
        // Original entry untouched
        assert_eq!(dict.label("reset").unwrap(), "On Reset");
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_unknown_lookups() {
        let dict = Dictionary::new(RegistryKind::Command);
        assert!(matches!(
            dict.label("z"),
            Err(ProgramError::UnknownCode { kind: RegistryKind::Command, .. })
        ));
        assert!(matches!(
            dict.code_for_label("ZAP"),
            Err(ProgramError::UnknownLabel { kind: RegistryKind::Command, .. })
        ));
    }

    #[test]
    fn test_first_label_match_wins() {
        let mut dict = Dictionary::new(RegistryKind::Command);
        dict.register("x", "SAME").unwrap();
        dict.register("y", "SAME").unwrap();
        assert_eq!(dict.code_for_label("SAME").unwrap(), "x");
    }

    #[test]
    fn test_code_charset() {
        let mut commands = Dictionary::new(RegistryKind::Command);
        assert!(commands.register("", "EMPTY").is_err());
        assert!(commands.register("a1", "DIGIT").is_err());
        assert!(commands.register("A", "UPPER").is_err());
        assert!(commands.register("halt", "HALT").is_ok());

        let mut events = Dictionary::new(RegistryKind::Event);
        assert!(events.register("key0", "On Key 0").is_ok());
        assert!(events.register("bad:code", "Bad").is_err());
        assert!(events.register("at@", "Bad").is_err());
    }
}
