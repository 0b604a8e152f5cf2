//! zetas.rs - Twiddle tables shared by the software engine and the ROM
//!
//! `forward[i] = 17^bitrev7(i) · R mod q` and
//! `inverse[i] = forward[i]^-1 · R² mod q`, so that the Montgomery product
//! of a twiddle with its inverse is R. Both tables are computed by a const
//! fn; the runtime engine and the emitted ROM read the same static.

use kyberlink_params::ring::{MONT_R, MONT_R2, Q, ROOT_OF_UNITY, ZETA_COUNT};

/// Forward and inverse twiddle factors in Montgomery form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZetaTable {
    /// Bit-reversed powers of the root of unity, times R
    pub forward: [u16; ZETA_COUNT],
    /// Inverses of `forward`, times R²
    pub inverse: [u16; ZETA_COUNT],
}

const fn pow_mod(base: u32, mut exp: u32) -> u32 {
    let q = Q as u32;
    let mut acc = 1u32;
    let mut b = base % q;
    while exp != 0 {
        if exp & 1 == 1 {
            acc = acc * b % q;
        }
        b = b * b % q;
        exp >>= 1;
    }
    acc
}

const fn bitrev7(i: usize) -> u32 {
    let mut r = 0u32;
    let mut x = i as u32;
    let mut bit = 0;
    while bit < 7 {
        r = (r << 1) | (x & 1);
        x >>= 1;
        bit += 1;
    }
    r
}

impl ZetaTable {
    /// Derive both tables from the root of unity.
    pub const fn generate() -> Self {
        let q = Q as u32;
        let mut forward = [0u16; ZETA_COUNT];
        let mut inverse = [0u16; ZETA_COUNT];
        let mut i = 0;
        while i < ZETA_COUNT {
            let plain = pow_mod(ROOT_OF_UNITY as u32, bitrev7(i));
            forward[i] = (plain * MONT_R as u32 % q) as u16;
            // Fermat inverse of the Montgomery-form twiddle
            let inv = pow_mod(forward[i] as u32, q - 2);
            inverse[i] = (inv * MONT_R2 as u32 % q) as u16;
            i += 1;
        }
        ZetaTable { forward, inverse }
    }

    /// Twiddle factor `k` of the forward transform
    #[inline(always)]
    pub fn zeta(&self, k: usize) -> u16 {
        self.forward[k]
    }

    /// Twiddle factor `k` of the inverse transform
    #[inline(always)]
    pub fn zeta_inv(&self, k: usize) -> u16 {
        self.inverse[k]
    }
}

impl Default for ZetaTable {
    fn default() -> Self {
        Self::generate()
    }
}

/// The table used by the engine and the ROM emitter
pub static ZETAS: ZetaTable = ZetaTable::generate();
