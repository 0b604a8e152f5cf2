//! Pure software implementation of the transform capability

use kyberlink_algorithms::poly::ntt::ntt_mul_acc;
use kyberlink_algorithms::Polynomial;

use crate::accelerator::Accelerator;
use crate::error::Result;
use crate::sim::sponge::{expand_seed, squeeze_uniform, Sponge};

/// Runs every operation on the CPU reference engine
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareAccelerator;

impl SoftwareAccelerator {
    /// Create the software path
    pub fn new() -> Self {
        Self
    }
}

impl Accelerator for SoftwareAccelerator {
    fn name(&self) -> &str {
        "software"
    }

    fn forward_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial> {
        Ok(poly.to_ntt())
    }

    fn inverse_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial> {
        Ok(poly.from_ntt())
    }

    fn mul_acc(&mut self, acc: &Polynomial, a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
        Ok(Polynomial::from_array(ntt_mul_acc(
            acc.as_array(),
            a.as_array(),
            b.as_array(),
        )))
    }

    fn keygen(&mut self, seed: u32) -> Result<Polynomial> {
        let mut sponge = Sponge::default();
        for word in expand_seed(seed) {
            sponge.absorb_word(word);
        }
        let (coeffs, _) = squeeze_uniform(&mut sponge);
        Ok(Polynomial::from_array(coeffs))
    }
}
