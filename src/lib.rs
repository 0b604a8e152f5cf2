//! # kyberlink
//!
//! Kyber-style lattice arithmetic, a small message encryption service built
//! on it, and a register-level bridge used to check a hardware NTT core
//! against the software engine bit for bit.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`params`]: ring constants, codec thresholds, the core's register map
//! - [`algorithms`]: Montgomery unit, twiddle tables, NTT/INTT, ROM emitter
//! - [`hardware`]: register backends, the command/poll bridge, simulated core
//! - [`kem`]: codec, key store, wire format and the encryption service
//!
//! ## Features
//!
//! - `verilator`: link a Verilator-built `libkyber_sim` and enable
//!   `accelerator = "verilator"`

pub use kyberlink_algorithms as algorithms;
pub use kyberlink_hardware as hardware;
pub use kyberlink_kem as kem;
pub use kyberlink_params as params;

/// Common imports for kyberlink users
pub mod prelude {
    pub use crate::algorithms::poly::prelude::*;
    pub use crate::hardware::{Accelerator, HardwareBridge, PollConfig, PollOutcome, RegisterBackend, SimulatedCore};
    pub use crate::kem::{KemService, MessageCipher, ServiceConfig};
}
