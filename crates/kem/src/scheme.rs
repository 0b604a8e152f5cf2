//! The public key scheme over one ring element
//!
//! All products are NTT-domain products ([`Polynomial::ntt_mul`]); every
//! noise term is drawn uniformly from {-2, .., 2}.
//!
//! - keygen: `public = matrix∘secret + error`
//! - encrypt: `u = matrix∘r + e1`, `v = public∘r + NTT(e2 + encode(m))`
//! - decrypt: `m' = INTT(v - secret∘u)`

use kyberlink_algorithms::poly::sampling::SmallSampler;
use kyberlink_algorithms::Polynomial;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::ciphertext::Ciphertext;
use crate::codec;
use crate::error::Result;
use crate::keys::KeyMaterial;

/// Generate fresh key material.
pub fn keygen<R: RngCore + CryptoRng>(rng: &mut R) -> KeyMaterial {
    let secret = SmallSampler::sample(rng).to_ntt();
    let mut error = SmallSampler::sample(rng).to_ntt();
    let matrix = SmallSampler::sample(rng).to_ntt();
    let public = &matrix.ntt_mul(&secret) + &error;
    error.zeroize();
    KeyMaterial {
        public,
        secret,
        matrix,
    }
}

/// Ephemeral values of one encryption
pub(crate) struct Ephemeral {
    pub(crate) r_hat: Polynomial,
    pub(crate) e1_hat: Polynomial,
    e2: Polynomial,
}

impl Ephemeral {
    pub(crate) fn sample<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            r_hat: SmallSampler::sample(rng).to_ntt(),
            e1_hat: SmallSampler::sample(rng).to_ntt(),
            e2: SmallSampler::sample(rng),
        }
    }
}

impl Drop for Ephemeral {
    fn drop(&mut self) {
        self.r_hat.zeroize();
        self.e1_hat.zeroize();
        self.e2.zeroize();
    }
}

/// Encrypt with explicitly supplied ephemeral values.
pub(crate) fn encrypt_with(keys: &KeyMaterial, text: &str, eph: &Ephemeral) -> Ciphertext {
    let u = &keys.matrix.ntt_mul(&eph.r_hat) + &eph.e1_hat;
    let noisy_message = &eph.e2 + &codec::encode(text);
    let v = &keys.public.ntt_mul(&eph.r_hat) + &noisy_message.to_ntt();
    Ciphertext { u, v }
}

/// Encrypt `text` (at most 32 bytes are carried) under `keys`.
pub fn encrypt<R: RngCore + CryptoRng>(keys: &KeyMaterial, text: &str, rng: &mut R) -> Ciphertext {
    let eph = Ephemeral::sample(rng);
    encrypt_with(keys, text, &eph)
}

/// Recover the noisy message polynomial `INTT(v - secret∘u)`.
pub fn recover_message(keys: &KeyMaterial, ct: &Ciphertext) -> Polynomial {
    (&ct.v - &keys.secret.ntt_mul(&ct.u)).from_ntt()
}

/// Decrypt to text, with NUL characters removed.
pub fn decrypt(keys: &KeyMaterial, ct: &Ciphertext) -> Result<String> {
    let message = recover_message(keys, ct);
    let text = codec::decode_poly(&message)?;
    Ok(text.replace('\0', ""))
}
