//! Fixed-width lattice arithmetic for the kyberlink engine
//!
//! This crate is the software reference for the transform core. Every
//! operation reproduces the 16-bit datapath of the hardware ALU, including
//! the truncation inside Montgomery reduction, so that a coefficient computed
//! here can be compared word-for-word with one read back over the bus.
//!
//! The library is usable in both `std` and `no_std` environments; the ROM
//! emitter and serde support need `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Polynomial engine
pub mod poly;
pub use poly::montgomery;
pub use poly::polynomial::Polynomial;
pub use poly::zetas::{ZetaTable, ZETAS};
