// Path: crates/algorithms/src/poly/mod.rs
//! Polynomial Engine
//!
//! Arithmetic over Z_q[x]/(x^256 + 1) with q = 3329, carried out on 16-bit
//! words exactly as the hardware transform core does it.

pub mod montgomery;
pub mod ntt;
pub mod polynomial;
#[cfg(feature = "alloc")]
pub mod rom;
pub mod sampling;
pub mod zetas;

/// Prelude for easy importing of common polynomial types and traits.
pub mod prelude {
    pub use super::montgomery::{add_sub, fold_signed, multiply, reduce};
    pub use super::ntt::{ntt_mul, ntt_mul_acc, CooleyTukeyNtt, InverseNttOperator, NttOperator};
    pub use super::polynomial::Polynomial;
    pub use super::sampling::{SmallSampler, UniformSampler};
    pub use super::zetas::{ZetaTable, ZETAS};
}
