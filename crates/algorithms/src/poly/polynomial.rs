//! polynomial.rs - Fixed-degree polynomial over Z_q
//!
//! Coefficients are kept as 16-bit words in [0, q), the width of the
//! hardware datapath. Every constructor reduces or rejects out-of-range
//! input, so no other component ever observes an unreduced coefficient.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use core::ops::{Add, Neg, Sub};
use kyberlink_params::ring::{N, Q};
use zeroize::Zeroize;

use super::montgomery::{mod_add, mod_sub, reduce};
use crate::error::{validate, Error, Result};

/// A polynomial in the ring R_q = Z_q[X]/(X^256 + 1)
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u16>", into = "Vec<u16>")
)]
pub struct Polynomial {
    coeffs: [u16; N],
}

impl Polynomial {
    /// Creates a new polynomial with all coefficients set to zero
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Creates a polynomial from a slice of reduced coefficients
    pub fn from_coeffs(coeffs: &[u16]) -> Result<Self> {
        validate::length("polynomial", coeffs.len())?;
        validate::reduced("coeffs", coeffs)?;
        let mut out = [0u16; N];
        out.copy_from_slice(coeffs);
        Ok(Self { coeffs: out })
    }

    /// Creates a polynomial from arbitrary integers, reducing each into [0, q)
    pub fn from_signed(values: &[i64]) -> Result<Self> {
        validate::length("polynomial", values.len())?;
        let mut arr = [0i64; N];
        arr.copy_from_slice(values);
        Ok(Self::from_signed_array(&arr))
    }

    /// Reduces a full array of arbitrary integers into [0, q)
    pub fn from_signed_array(values: &[i64; N]) -> Self {
        let mut out = [0u16; N];
        for (dst, &v) in out.iter_mut().zip(values.iter()) {
            *dst = reduce(v);
        }
        Self { coeffs: out }
    }

    /// Wraps a coefficient array, reducing every entry modulo q
    pub fn from_array(mut coeffs: [u16; N]) -> Self {
        for c in coeffs.iter_mut() {
            *c %= Q;
        }
        Self { coeffs }
    }

    /// Returns the coefficients as a slice
    pub fn coeffs(&self) -> &[u16] {
        &self.coeffs
    }

    /// Returns the coefficient array
    pub fn as_array(&self) -> &[u16; N] {
        &self.coeffs
    }

    pub(crate) fn as_mut_array(&mut self) -> &mut [u16; N] {
        &mut self.coeffs
    }

    /// Coefficient-wise addition modulo q
    pub fn add_mod(&self, other: &Self) -> Self {
        let mut coeffs = [0u16; N];
        for i in 0..N {
            coeffs[i] = mod_add(self.coeffs[i], other.coeffs[i]);
        }
        Self { coeffs }
    }

    /// Coefficient-wise subtraction modulo q
    pub fn sub_mod(&self, other: &Self) -> Self {
        let mut coeffs = [0u16; N];
        for i in 0..N {
            coeffs[i] = mod_sub(self.coeffs[i], other.coeffs[i]);
        }
        Self { coeffs }
    }

    /// Negation modulo q
    pub fn neg_mod(&self) -> Self {
        let mut coeffs = [0u16; N];
        for i in 0..N {
            coeffs[i] = mod_sub(0, self.coeffs[i]);
        }
        Self { coeffs }
    }

    /// Negacyclic schoolbook multiplication, the O(n²) reference product
    pub fn schoolbook_mul(&self, other: &Self) -> Self {
        let mut acc = [0i64; N];
        for i in 0..N {
            for j in 0..N {
                let prod = self.coeffs[i] as i64 * other.coeffs[j] as i64;
                let k = i + j;
                if k < N {
                    acc[k] += prod;
                } else {
                    // x^N = -1
                    acc[k - N] -= prod;
                }
            }
        }
        let mut coeffs = [0u16; N];
        for (dst, v) in coeffs.iter_mut().zip(acc) {
            *dst = reduce(v);
        }
        Self { coeffs }
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl AsRef<[u16]> for Polynomial {
    fn as_ref(&self) -> &[u16] {
        &self.coeffs
    }
}

#[cfg(feature = "alloc")]
impl TryFrom<Vec<u16>> for Polynomial {
    type Error = Error;

    fn try_from(coeffs: Vec<u16>) -> Result<Self> {
        Self::from_coeffs(&coeffs)
    }
}

#[cfg(feature = "alloc")]
impl From<Polynomial> for Vec<u16> {
    fn from(poly: Polynomial) -> Self {
        poly.coeffs.to_vec()
    }
}

impl Add for Polynomial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add_mod(&self, &rhs)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add_mod(self, rhs)
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Polynomial::sub_mod(&self, &rhs)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        Polynomial::sub_mod(self, rhs)
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Polynomial::neg_mod(&self)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg_mod(self)
    }
}
