//! ntt.rs - Number Theoretic Transform over Z_q[x]/(x^256 + 1)
//!
//! Seven butterfly layers, matching the hardware transform core step for step.
//!
//! ## Domains
//! - Twiddles are stored in Montgomery form, so `multiply(x, zeta)` yields a
//!   plain-domain product and coefficients never leave the standard domain.
//! - The inverse transform ends with a scale by `128^-1·R` (512), undoing the
//!   factor of 128 that the Gentleman-Sande butterflies accumulate.
//!
//! After the forward transform a polynomial is represented by 128 residues
//! modulo `x² - ζ`; [`ntt_mul`] multiplies two such representations.

use kyberlink_params::ring::{INV_128_MONT, MONT_R2, N, Q};

use super::montgomery::{add_sub, mod_add, multiply};
use super::polynomial::Polynomial;
use super::zetas::ZETAS;

/// Trait for forward Number Theoretic Transform
pub trait NttOperator {
    /// Transform coefficients in place into the NTT domain
    fn ntt(coeffs: &mut [u16; N]);
}

/// Trait for inverse Number Theoretic Transform
pub trait InverseNttOperator {
    /// Transform NTT-domain values in place back to coefficients
    fn inv_ntt(coeffs: &mut [u16; N]);
}

/// Cooley-Tukey forward / Gentleman-Sande inverse NTT
pub struct CooleyTukeyNtt;

impl NttOperator for CooleyTukeyNtt {
    fn ntt(coeffs: &mut [u16; N]) {
        let mut k = 1usize;
        let mut len = N / 2;
        while len >= 2 {
            let mut start = 0;
            while start < N {
                let zeta = ZETAS.zeta(k);
                k += 1;
                for j in start..start + len {
                    let t = multiply(coeffs[j + len], zeta);
                    let (s, d) = add_sub(coeffs[j], t);
                    coeffs[j] = s;
                    coeffs[j + len] = d;
                }
                start += 2 * len;
            }
            len >>= 1;
        }
    }
}

impl InverseNttOperator for CooleyTukeyNtt {
    fn inv_ntt(coeffs: &mut [u16; N]) {
        let mut len = 2;
        while len <= N / 2 {
            // Each layer restarts at the first twiddle of its group
            let mut k = (N / 2) / len;
            let mut start = 0;
            while start < N {
                let zeta_inv = ZETAS.zeta_inv(k);
                k += 1;
                for j in start..start + len {
                    let (s, d) = add_sub(coeffs[j], coeffs[j + len]);
                    coeffs[j] = s;
                    coeffs[j + len] = multiply(d, zeta_inv);
                }
                start += 2 * len;
            }
            len <<= 1;
        }

        for c in coeffs.iter_mut() {
            *c = multiply(*c, INV_128_MONT);
        }
    }
}

/// Product of two degree-one residues modulo `x² - zeta`.
#[inline(always)]
fn basemul(a0: u16, a1: u16, b0: u16, b1: u16, zeta: u16) -> (u16, u16) {
    let r0 = mod_add(multiply(multiply(a1, b1), zeta), multiply(a0, b0));
    let r1 = mod_add(multiply(a0, b1), multiply(a1, b0));
    // Three Montgomery products left a factor R^-1 on each term
    (multiply(r0, MONT_R2), multiply(r1, MONT_R2))
}

/// NTT-domain product of two transformed polynomials.
///
/// `INTT(ntt_mul(NTT(a), NTT(b)))` is the negacyclic product `a·b`.
pub fn ntt_mul(a: &[u16; N], b: &[u16; N]) -> [u16; N] {
    let mut out = [0u16; N];
    for i in 0..N / 4 {
        let zeta = ZETAS.zeta(64 + i);
        let neg_zeta = Q - zeta;
        for (offset, z) in [(0usize, zeta), (2, neg_zeta)] {
            let idx = 4 * i + offset;
            let (r0, r1) = basemul(a[idx], a[idx + 1], b[idx], b[idx + 1], z);
            out[idx] = r0;
            out[idx + 1] = r1;
        }
    }
    out
}

/// Multiply-accumulate in the NTT domain: `acc + a∘b`.
pub fn ntt_mul_acc(acc: &[u16; N], a: &[u16; N], b: &[u16; N]) -> [u16; N] {
    let prod = ntt_mul(a, b);
    let mut out = [0u16; N];
    for i in 0..N {
        out[i] = mod_add(acc[i], prod[i]);
    }
    out
}

/// Convenience methods on [`Polynomial`]
impl Polynomial {
    /// Forward transform in place
    pub fn ntt_inplace(&mut self) {
        CooleyTukeyNtt::ntt(self.as_mut_array());
    }

    /// Inverse transform in place
    pub fn from_ntt_inplace(&mut self) {
        CooleyTukeyNtt::inv_ntt(self.as_mut_array());
    }

    /// Forward transform returning a new polynomial
    pub fn to_ntt(&self) -> Self {
        let mut p = self.clone();
        p.ntt_inplace();
        p
    }

    /// Inverse transform returning a new polynomial
    pub fn from_ntt(&self) -> Self {
        let mut p = self.clone();
        p.from_ntt_inplace();
        p
    }

    /// NTT-domain product with `other`
    pub fn ntt_mul(&self, other: &Self) -> Self {
        Polynomial::from_array(ntt_mul(self.as_array(), other.as_array()))
    }
}
