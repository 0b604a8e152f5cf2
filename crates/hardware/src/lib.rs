//! Hardware bridge for the kyberlink transform core
//!
//! The transform core is driven through a small memory-mapped register file
//! (see [`kyberlink_params::registers`]). This crate provides:
//!
//! - [`RegisterBackend`], the contract every register-level simulator or
//!   device driver implements;
//! - [`HardwareBridge`], the driver that speaks the command/poll protocol
//!   over any backend;
//! - [`SimulatedCore`], an in-process cycle-stepped model of the core;
//! - [`SoftwareAccelerator`], the pure software reference;
//! - the [`Accelerator`] capability shared by the last two paths, which is
//!   what the KEM service uses for parity checking.
//!
//! A Verilator-built simulator library can be linked with the `verilator`
//! feature.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod accelerator;
pub mod backend;
pub mod bridge;
pub mod error;
pub mod poll;
pub mod sim;
pub mod software;
#[cfg(feature = "verilator")]
pub mod verilator;
pub mod words;

pub use accelerator::{mismatches, Accelerator};
pub use backend::RegisterBackend;
pub use bridge::{HardwareBridge, Slot};
pub use error::{Error, Result};
pub use poll::{PollConfig, PollOutcome};
pub use sim::SimulatedCore;
pub use software::SoftwareAccelerator;
#[cfg(feature = "verilator")]
pub use verilator::VerilatorBackend;
