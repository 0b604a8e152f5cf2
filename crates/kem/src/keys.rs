//! Key material and its on-disk store

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kyberlink_algorithms::Polynomial;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Public key, secret key and the public matrix, all in the NTT domain
///
/// The matrix is drawn once at key generation and reused for every
/// encryption. All three polynomials are wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    /// `matrix∘secret + error`
    pub public: Polynomial,
    /// Secret polynomial
    pub secret: Polynomial,
    /// Public matrix element
    pub matrix: Polynomial,
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("public", &self.public)
            .field("secret", &"<redacted>")
            .field("matrix", &self.matrix)
            .finish()
    }
}

/// JSON file holding one [`KeyMaterial`]
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the key file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::KeyStore {
            path: self.path.clone(),
            source,
        }
    }

    /// Load key material; `Ok(None)` if the file does not exist
    pub fn load(&self) -> Result<Option<KeyMaterial>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no key file");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let keys: KeyMaterial = serde_json::from_str(&text)?;
        info!(path = %self.path.display(), "loaded key material");
        Ok(Some(keys))
    }

    /// Write key material, creating parent directories as needed
    pub fn save(&self, keys: &KeyMaterial) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut json = serde_json::to_string(keys)?;
        let written = fs::write(&self.path, json.as_bytes()).map_err(|e| self.io_error(e));
        json.zeroize();
        written?;
        info!(path = %self.path.display(), "saved key material");
        Ok(())
    }
}
