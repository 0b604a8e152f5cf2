//! Message codec constants
//!
//! The decode thresholds were tuned against the paired encoder and are kept
//! literally; they do not follow from the modulus.

use crate::ring::Q;

/// Number of message bits carried by one polynomial
pub const MESSAGE_BITS: usize = 256;

/// Maximum message length in bytes
pub const MESSAGE_BYTES: usize = MESSAGE_BITS / 8;

/// Lower bound (exclusive) of the high cluster
pub const CLUSTER_LOW: u16 = 200;

/// Upper bound (exclusive) of the high cluster
pub const CLUSTER_HIGH: u16 = Q - 200;

/// Target level used when the high cluster is empty
pub const DEFAULT_TARGET: u16 = 1664;

/// Placeholder returned when a ciphertext cannot be decrypted
pub const DECRYPTION_FAILED: &str = "[Decryption Failed]";
