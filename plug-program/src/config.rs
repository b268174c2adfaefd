//! Device configuration types
//!
//! This module defines what the library needs to know about the connected
//! controller: how many keys and output channels it has, and the program it
//! currently stores. The field names follow the controller's own `CFG` object
//! (`keyCount`, `outCount`, `program`, `version`).

use serde::{Deserialize, Serialize};

/// Configuration reported by the controller at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Number of keys; each adds an `On Key {i}` event
    #[serde(default)]
    pub key_count: u32,

    /// Number of output channels; each adds a `CH.{A+i}` command
    #[serde(default)]
    pub out_count: u32,

    /// Program currently stored on the controller
    #[serde(default)]
    pub program: Option<String>,

    /// Firmware version for display only
    #[serde(default)]
    pub version: Option<String>,
}

impl DeviceConfig {
    /// Create a configuration with no keys, no outputs and no program
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the key count
    pub fn with_keys(mut self, key_count: u32) -> Self {
        self.key_count = key_count;
        self
    }

    /// Builder method: set the output channel count
    pub fn with_outputs(mut self, out_count: u32) -> Self {
        self.out_count = out_count;
        self
    }

    /// Builder method: set the stored program
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Builder method: set the firmware version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The stored program, or an empty string when there is none
    pub fn stored_program(&self) -> &str {
        self.program.as_deref().unwrap_or("")
    }
}
