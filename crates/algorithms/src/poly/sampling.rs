//! sampling.rs - Coefficient samplers
//!
//! The small sampler draws every coefficient uniformly from {-2, .., 2},
//! the distribution used for secrets, errors, the public matrix and the
//! encryption noise. The uniform sampler covers all of [0, q) and provides
//! the 12-bit rejection step the hardware key-generation squeeze performs.

use kyberlink_params::ring::{ETA, N, Q};
use rand::{CryptoRng, Rng, RngCore};

use super::montgomery::reduce;
use super::polynomial::Polynomial;

/// Sampler for coefficients uniform in {-ETA, .., ETA}
pub struct SmallSampler;

impl SmallSampler {
    /// Samples a polynomial with small coefficients, reduced into [0, q)
    pub fn sample<R: RngCore + CryptoRng>(rng: &mut R) -> Polynomial {
        let mut coeffs = [0u16; N];
        for c in coeffs.iter_mut() {
            let v: i16 = rng.gen_range(-ETA..=ETA);
            *c = reduce(v as i64);
        }
        Polynomial::from_array(coeffs)
    }
}

/// Sampler for coefficients uniform in [0, q)
pub struct UniformSampler;

impl UniformSampler {
    /// Samples a polynomial uniformly at random
    pub fn sample<R: RngCore + CryptoRng>(rng: &mut R) -> Polynomial {
        let mut coeffs = [0u16; N];
        let mut filled = 0;
        let mut buf = [0u8; 168];
        while filled < N {
            rng.fill_bytes(&mut buf);
            filled += rej_uniform(&mut coeffs[filled..], &buf);
        }
        Polynomial::from_array(coeffs)
    }
}

/// 12-bit rejection sampling.
///
/// Consumes `buf` three bytes at a time, producing two 12-bit candidates per
/// triple and keeping those below q. Returns the number of coefficients
/// written to `out`.
pub fn rej_uniform(out: &mut [u16], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for chunk in buf.chunks_exact(3) {
        if ctr >= out.len() {
            break;
        }
        let d1 = (chunk[0] as u16 | ((chunk[1] as u16) << 8)) & 0x0FFF;
        let d2 = ((chunk[1] as u16) >> 4) | ((chunk[2] as u16) << 4);
        if d1 < Q {
            out[ctr] = d1;
            ctr += 1;
        }
        if d2 < Q && ctr < out.len() {
            out[ctr] = d2;
            ctr += 1;
        }
    }
    ctr
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_small_coefficients_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let p = SmallSampler::sample(&mut rng);
        for &c in p.coeffs() {
            assert!(c <= 2 || c >= Q - 2, "coefficient {} outside {{-2..2}}", c);
        }
    }

    #[test]
    fn test_small_hits_every_value() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let p = SmallSampler::sample(&mut rng);
        for v in [0, 1, 2, Q - 1, Q - 2] {
            assert!(p.coeffs().contains(&v), "value {} never sampled", v);
        }
    }

    #[test]
    fn test_uniform_reduced() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let p = UniformSampler::sample(&mut rng);
        assert!(p.coeffs().iter().all(|&c| c < Q));
    }

    #[test]
    fn test_rej_uniform_rejects() {
        // 0xFFF twice: both candidates rejected
        let mut out = [0u16; 4];
        assert_eq!(rej_uniform(&mut out, &[0xFF, 0xFF, 0xFF]), 0);
        // 0x001 and 0x002
        assert_eq!(rej_uniform(&mut out, &[0x01, 0x20, 0x00]), 2);
        assert_eq!(&out[..2], &[1, 2]);
    }

    #[test]
    fn test_rej_uniform_respects_output_len() {
        let mut out = [0u16; 1];
        assert_eq!(rej_uniform(&mut out, &[0x01, 0x20, 0x00, 0x03, 0x00, 0x00]), 1);
        assert_eq!(out[0], 1);
    }
}
