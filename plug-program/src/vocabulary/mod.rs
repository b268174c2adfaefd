//! Event and command vocabularies
//!
//! This module contains the ordered code/label dictionaries and the
//! vocabulary registry built from them at startup.

pub mod dictionary;
pub mod registry;

// Re-export key types for convenience
pub use dictionary::{Dictionary, VocabularyEntry};
pub use registry::{
    channel_name, Vocabulary, VocabularyBuilder, RESET_CODE, RESET_LABEL, SAY_CODE, SAY_LABEL,
    UPLOAD_CODE, UPLOAD_LABEL, WAIT_CODE, WAIT_LABEL,
};
