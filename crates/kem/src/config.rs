//! Service configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! key_path = "kyber_keys.json"
//! accelerator = "simulated"      # "software" | "simulated" | "verilator"
//! parity_checks = true
//!
//! [poll]
//! budget_cycles = 50000
//! step_cycles = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use kyberlink_hardware::PollConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default key file location
pub const DEFAULT_KEY_PATH: &str = "kyber_keys.json";

/// Which transform implementation mirrors the service arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceleratorKind {
    /// Software reference only
    Software,
    /// In-process simulated core behind the register bridge
    #[default]
    Simulated,
    /// Verilator model behind the register bridge (needs the `verilator` feature)
    Verilator,
}

/// Configuration of a [`crate::KemService`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Location of the key file
    pub key_path: PathBuf,
    /// Parity accelerator
    pub accelerator: AcceleratorKind,
    /// Mirror encrypt/decrypt arithmetic on the accelerator and log mismatches
    pub parity_checks: bool,
    /// Poll budget for bridge commands
    pub poll: PollConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
            accelerator: AcceleratorKind::default(),
            parity_checks: true,
            poll: PollConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Same configuration with a different key path
    pub fn with_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_path = path.into();
        self
    }

    /// Same configuration with a different accelerator
    pub fn with_accelerator(mut self, kind: AcceleratorKind) -> Self {
        self.accelerator = kind;
        self
    }
}
