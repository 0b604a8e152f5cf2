//! The transform capability shared by the software and hardware paths

use kyberlink_algorithms::Polynomial;

use crate::error::Result;

/// Transform operations the KEM service can mirror for parity checking
///
/// Inputs are plain [`Polynomial`]s. Hardware readback is sign-folded and
/// reduced into [0, q) before it is returned, so results from different
/// implementations compare with `==`.
pub trait Accelerator {
    /// Implementation name, used in logs
    fn name(&self) -> &str;

    /// Forward NTT
    fn forward_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial>;

    /// Inverse NTT
    fn inverse_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial>;

    /// NTT-domain multiply-accumulate: `acc + a∘b`
    fn mul_acc(&mut self, acc: &Polynomial, a: &Polynomial, b: &Polynomial) -> Result<Polynomial>;

    /// Expand `seed` through the sponge into a uniform polynomial
    fn keygen(&mut self, seed: u32) -> Result<Polynomial>;
}

impl<A: Accelerator + ?Sized> Accelerator for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn forward_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial> {
        (**self).forward_ntt(poly)
    }

    fn inverse_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial> {
        (**self).inverse_ntt(poly)
    }

    fn mul_acc(&mut self, acc: &Polynomial, a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
        (**self).mul_acc(acc, a, b)
    }

    fn keygen(&mut self, seed: u32) -> Result<Polynomial> {
        (**self).keygen(seed)
    }
}

/// Number of coefficient positions where two polynomials differ
pub fn mismatches(a: &Polynomial, b: &Polynomial) -> usize {
    a.coeffs()
        .iter()
        .zip(b.coeffs())
        .filter(|(x, y)| x != y)
        .count()
}
