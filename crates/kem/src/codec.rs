//! String ⇄ polynomial message codec
//!
//! `encode` spreads the UTF-8 bytes of a message over the 256 coefficients,
//! one bit per coefficient, LSB first; a one bit becomes `round(q/2)`.
//!
//! `decode` does not assume the one level survived exactly. It estimates the
//! level from the coefficients that are clearly away from zero (the "high
//! cluster"), then assigns each coefficient to whichever of 0 and that level
//! is nearer on the circle Z_q.

use kyberlink_algorithms::Polynomial;
use kyberlink_params::codec::{CLUSTER_HIGH, CLUSTER_LOW, DEFAULT_TARGET, MESSAGE_BITS, MESSAGE_BYTES};
use kyberlink_params::ring::{HALF_Q, N, Q};

use crate::error::{Error, Result};

/// Map text to a message polynomial. Input beyond 32 bytes is dropped.
pub fn encode(text: &str) -> Polynomial {
    let mut coeffs = [0u16; N];
    let bits = text
        .as_bytes()
        .iter()
        .take(MESSAGE_BYTES)
        .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1));
    for (c, bit) in coeffs.iter_mut().take(MESSAGE_BITS).zip(bits) {
        *c = if bit == 1 { HALF_Q } else { 0 };
    }
    Polynomial::from_array(coeffs)
}

/// Level of the one bits: integer mean of the high cluster.
fn target_level(coeffs: &[u16]) -> u16 {
    let (sum, count) = coeffs
        .iter()
        .filter(|&&c| c > CLUSTER_LOW && c < CLUSTER_HIGH)
        .fold((0u64, 0u64), |(s, n), &c| (s + c as u64, n + 1));
    if count == 0 {
        DEFAULT_TARGET
    } else {
        (sum / count) as u16
    }
}

/// Recover bits from message coefficients.
pub fn decode_bits(coeffs: &[u16]) -> Vec<u8> {
    let target = target_level(coeffs) as i32;
    coeffs
        .iter()
        .map(|&c| {
            let c = (c % Q) as i32;
            let to_zero = c.min(Q as i32 - c);
            let to_target = (c - target).abs();
            u8::from(to_target < to_zero)
        })
        .collect()
}

/// Map message coefficients back to text.
///
/// Bytes are packed LSB first and cut at the first zero byte; invalid UTF-8
/// is replaced with U+FFFD.
pub fn decode(coeffs: &[u16]) -> Result<String> {
    if coeffs.len() != MESSAGE_BITS {
        return Err(Error::DecodeFailure(format!(
            "expected {} message coefficients, got {}",
            MESSAGE_BITS,
            coeffs.len()
        )));
    }
    let bytes: Vec<u8> = decode_bits(coeffs)
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | (bit << i))
        })
        .take_while(|&b| b != 0)
        .collect();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode a message polynomial
pub fn decode_poly(poly: &Polynomial) -> Result<String> {
    decode(poly.coeffs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_bit_order() {
        // 'A' = 0x41 = 0b0100_0001
        let p = encode("A");
        let c = p.coeffs();
        assert_eq!(&c[..8], &[1664, 0, 0, 0, 0, 0, 1664, 0]);
        assert!(c[8..].iter().all(|&x| x == 0));
    }

    #[test]
    fn test_encode_truncates_long_input() {
        let long = "x".repeat(40);
        let decoded = decode_poly(&encode(&long)).unwrap();
        assert_eq!(decoded, "x".repeat(MESSAGE_BYTES));
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(decode_poly(&encode("")).unwrap(), "");
    }

    #[test]
    fn test_default_target_when_cluster_empty() {
        assert_eq!(target_level(&[0u16; N]), DEFAULT_TARGET);
        // Boundary values are outside the cluster
        assert_eq!(target_level(&[CLUSTER_LOW, CLUSTER_HIGH, 5]), DEFAULT_TARGET);
    }

    #[test]
    fn test_adaptive_target_follows_drift() {
        // One bits drifted well below q/2 still decode as ones
        let mut coeffs = [0u16; N];
        for (i, c) in coeffs.iter_mut().enumerate().take(8) {
            // 'c' = 0x63 = 0b0110_0011
            if (0x63u8 >> i) & 1 == 1 {
                *c = 1100;
            } else {
                *c = 3320;
            }
        }
        assert_eq!(target_level(&coeffs), 1100);
        assert_eq!(decode(&coeffs).unwrap(), "c");
    }

    #[test]
    fn test_noise_tolerance() {
        let p = encode("Hello Kyber!");
        let noisy: Vec<u16> = p
            .coeffs()
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let delta = (i % 7) as i32 * 60 - 180;
                (c as i32 + delta).rem_euclid(Q as i32) as u16
            })
            .collect();
        assert_eq!(decode(&noisy).unwrap(), "Hello Kyber!");
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let mut coeffs = [0u16; N];
        // 0xFF
        for c in coeffs.iter_mut().take(8) {
            *c = HALF_Q;
        }
        assert_eq!(decode(&coeffs).unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_stops_at_zero_byte() {
        let mut coeffs = encode("ab").coeffs().to_vec();
        // third byte zero, fourth byte 'c'
        let tail = encode("c");
        coeffs[24..32].copy_from_slice(&tail.coeffs()[..8]);
        assert_eq!(decode(&coeffs).unwrap(), "ab");
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(decode(&[0u16; 10]), Err(Error::DecodeFailure(_))));
    }

    proptest! {
        #[test]
        fn ascii_round_trip(text in "[ -~]{0,32}") {
            prop_assert_eq!(decode_poly(&encode(&text)).unwrap(), text);
        }

        #[test]
        fn multibyte_round_trip(text in "[α-ω가-힣]{0,8}") {
            prop_assume!(text.len() <= 32);
            prop_assert_eq!(decode_poly(&encode(&text)).unwrap(), text);
        }
    }
}
