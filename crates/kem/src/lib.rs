//! Message encryption service for the kyberlink engine
//!
//! A Kyber-style public key scheme over a single ring element, wrapped in a
//! service object that owns key material, persists it, and cross-checks its
//! arithmetic against the transform core.
//!
//! This is not a secure KEM: the public matrix is fixed at key generation
//! and reused, and message decoding is heuristic.
//!
//! # Example
//!
//! ```no_run
//! use kyberlink_kem::{KemService, MessageCipher, ServiceConfig};
//!
//! let service = KemService::open(ServiceConfig::default())?;
//! let wire = service.encrypt("Hello Kyber!");
//! assert_eq!(service.decrypt(&wire), "Hello Kyber!");
//! # Ok::<(), kyberlink_kem::Error>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod ciphertext;
pub mod codec;
pub mod config;
pub mod error;
pub mod keys;
pub mod scheme;
pub mod service;
pub mod traits;

pub use ciphertext::{Ciphertext, WireMessage};
pub use config::{AcceleratorKind, ServiceConfig};
pub use error::{Error, Result};
pub use keys::{KeyMaterial, KeyStore};
pub use service::KemService;
pub use traits::MessageCipher;
