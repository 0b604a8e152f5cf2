//! Packing of 16-bit coefficients into 32-bit bus words
//!
//! Two coefficients share one memory word: the even-indexed coefficient in
//! the low half, the odd-indexed one in the high half. On readback each half
//! is interpreted as a signed 16-bit value.

use kyberlink_algorithms::montgomery::fold_signed;
use kyberlink_params::registers::SLOT_WORDS;
use kyberlink_params::ring::N;

/// Pack 256 coefficients into 128 bus words.
pub fn pack(coeffs: &[u16; N]) -> [u32; SLOT_WORDS] {
    let mut words = [0u32; SLOT_WORDS];
    for (w, pair) in words.iter_mut().zip(coeffs.chunks_exact(2)) {
        *w = (pair[0] as u32) | ((pair[1] as u32) << 16);
    }
    words
}

/// Unpack 128 bus words into raw 16-bit halves.
pub fn unpack_raw(words: &[u32; SLOT_WORDS]) -> [u16; N] {
    let mut coeffs = [0u16; N];
    for (pair, &w) in coeffs.chunks_exact_mut(2).zip(words.iter()) {
        pair[0] = (w & 0xFFFF) as u16;
        pair[1] = (w >> 16) as u16;
    }
    coeffs
}

/// Unpack 128 bus words into sign-folded coefficients.
pub fn unpack_signed(words: &[u32; SLOT_WORDS]) -> [i64; N] {
    let raw = unpack_raw(words);
    let mut out = [0i64; N];
    for (dst, &half) in out.iter_mut().zip(raw.iter()) {
        *dst = fold_signed(half) as i64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_half_is_even_index() {
        let mut coeffs = [0u16; N];
        coeffs[0] = 0x0001;
        coeffs[1] = 0x0002;
        coeffs[255] = 0x0CFF;
        let words = pack(&coeffs);
        assert_eq!(words[0], 0x0002_0001);
        assert_eq!(words[127], 0x0CFF_0000);
        assert_eq!(unpack_raw(&words), coeffs);
    }

    #[test]
    fn test_signed_fold() {
        let mut words = [0u32; SLOT_WORDS];
        words[0] = 0xFFFF_8000;
        words[1] = 0x7FFF_0D00;
        let c = unpack_signed(&words);
        assert_eq!(&c[..4], &[-32768, -1, 0x0D00, 32767]);
    }
}
