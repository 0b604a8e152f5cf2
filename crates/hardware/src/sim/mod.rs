//! In-process simulation of the transform core
//!
//! [`SimulatedCore`] is a cycle-stepped model of the register file, the
//! coefficient memory, the sponge and the transform datapath. It implements
//! [`crate::RegisterBackend`], so the bridge drives it exactly as it would
//! drive the RTL simulator.

mod device;
pub mod sponge;

pub use self::device::SimulatedCore;
pub use self::sponge::Sponge;
