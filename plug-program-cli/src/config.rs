//! Configuration loading and parsing
//!
//! Two sources are supported: a `config.toml` describing the device and the
//! output preferences, or the `cfg.js` script the controller serves to its
//! web editor (`let CFG={...}`).

use anyhow::{Context, Result};
use plug_program::DeviceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub device: DeviceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Request path the controller accepts programs on
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,
}

fn default_upload_endpoint() -> String {
    "/setprog".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            upload_endpoint: default_upload_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

/// Problems with the shape of a controller script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("no `CFG` assignment found")]
    MissingAssignment,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load the device configuration from a controller `cfg.js` or a JSON file
pub fn load_device_script(path: &Path) -> Result<DeviceConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read device script: {:?}", path))?;

    parse_device_script(&content)
        .with_context(|| format!("Failed to parse device script: {:?}", path))
}

/// Parse `let CFG={...};` or a bare JSON object
pub fn parse_device_script(content: &str) -> Result<DeviceConfig> {
    let content = content.trim();
    let json = if content.starts_with('{') {
        content
    } else {
        let (_, rest) = content
            .split_once("CFG")
            .ok_or(ScriptError::MissingAssignment)?;
        let (_, object) = rest
            .split_once('=')
            .ok_or(ScriptError::MissingAssignment)?;
        object.trim().trim_end_matches(';').trim_end()
    };

    let config: DeviceConfig = serde_json::from_str(json)?;
    log::debug!(
        "Device script: {} keys, {} outputs, firmware {:?}",
        config.key_count,
        config.out_count,
        config.version
    );
    Ok(config)
}
