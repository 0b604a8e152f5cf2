//! Ciphertext and its JSON wire format
//!
//! ```json
//! {"u": [..256 ints..], "v": [..256 ints..], "is_encrypted": true}
//! ```
//!
//! Payloads that do not have this shape are not ciphertexts; the service
//! hands them back unchanged so stored plaintext keeps reading correctly.

use kyberlink_algorithms::Polynomial;
use kyberlink_params::ring::N;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ciphertext `(u, v)`, both in the NTT domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// `matrix∘r + e1`
    pub u: Polynomial,
    /// `public∘r + NTT(e2 + m)`
    pub v: Polynomial,
}

/// JSON shape of a ciphertext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Coefficients of `u`
    pub u: Vec<i64>,
    /// Coefficients of `v`
    pub v: Vec<i64>,
    /// Marker distinguishing ciphertext from stored plaintext
    #[serde(default)]
    pub is_encrypted: bool,
}

impl From<&Ciphertext> for WireMessage {
    fn from(ct: &Ciphertext) -> Self {
        Self {
            u: ct.u.coeffs().iter().map(|&c| c as i64).collect(),
            v: ct.v.coeffs().iter().map(|&c| c as i64).collect(),
            is_encrypted: true,
        }
    }
}

impl TryFrom<WireMessage> for Ciphertext {
    type Error = Error;

    fn try_from(wire: WireMessage) -> Result<Self> {
        for (name, values) in [("u", &wire.u), ("v", &wire.v)] {
            if values.len() != N {
                return Err(Error::MalformedCiphertext(format!(
                    "'{}' has {} coefficients, expected {}",
                    name,
                    values.len(),
                    N
                )));
            }
        }
        Ok(Self {
            u: Polynomial::from_signed(&wire.u)?,
            v: Polynomial::from_signed(&wire.v)?,
        })
    }
}

impl Ciphertext {
    /// Serialize to the JSON wire format
    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(&WireMessage::from(self))?)
    }

    /// Parse the JSON wire format
    ///
    /// Any payload that is not a JSON object with integer arrays `u` and `v`
    /// of 256 entries yields [`Error::MalformedCiphertext`]. Coefficients are
    /// reduced into [0, q).
    pub fn from_wire(text: &str) -> Result<Self> {
        let wire: WireMessage = serde_json::from_str(text)
            .map_err(|e| Error::MalformedCiphertext(e.to_string()))?;
        Ciphertext::try_from(wire)
    }
}
