//! montgomery.rs - 16-bit Montgomery arithmetic unit
//!
//! Every function here mirrors one block of the hardware ALU. Operands are
//! 16-bit words; products are formed in 32 bits and reduced with the 16-bit
//! Montgomery constant, so `multiply(a, b) = a·b·R^-1 mod q` with R = 2^16.
//!
//! The reduction is performed on the *signed* interpretation of the words
//! and the intermediate `m` is truncated to 16 bits, which is what the RTL
//! does. Replacing this with wide-integer arithmetic gives different words
//! for operands outside [0, q) and is not a valid substitute.

use kyberlink_params::ring::{MONT_R2, Q, Q_I32, QINV};

/// Montgomery reduction of a 32-bit product.
///
/// Returns `a·R^-1` in (-q, q) without the final correction.
#[inline(always)]
pub fn montgomery_reduce(a: i32) -> i32 {
    let m = (a as i16).wrapping_mul(QINV);
    (a - (m as i32) * Q_I32) >> 16
}

/// Montgomery multiply: `a·b·R^-1 mod q` as the ALU computes it.
///
/// The inputs are read as signed 16-bit values. One conditional correction
/// brings the result into [0, q) for in-range operands.
#[inline(always)]
pub fn multiply(a: u16, b: u16) -> u16 {
    let p = (a as i16 as i32) * (b as i16 as i32);
    let mut t = montgomery_reduce(p);
    if t >= Q_I32 {
        t -= Q_I32;
    } else if t < 0 {
        t += Q_I32;
    }
    t as u16
}

/// Modular addition with a single conditional subtraction.
#[inline(always)]
pub fn mod_add(a: u16, b: u16) -> u16 {
    let s = a as u32 + b as u32;
    if s >= Q as u32 {
        (s - Q as u32) as u16
    } else {
        s as u16
    }
}

/// Modular subtraction with a single conditional addition.
#[inline(always)]
pub fn mod_sub(a: u16, b: u16) -> u16 {
    if a >= b {
        a - b
    } else {
        (a as u32 + Q as u32 - b as u32) as u16
    }
}

/// Fused butterfly: returns `(a + t mod q, a - t mod q)`.
#[inline(always)]
pub fn add_sub(a: u16, t: u16) -> (u16, u16) {
    (mod_add(a, t), mod_sub(a, t))
}

/// Convert into the Montgomery domain: `a·R mod q`.
#[inline(always)]
pub fn to_montgomery(a: u16) -> u16 {
    multiply(a, MONT_R2)
}

/// Convert out of the Montgomery domain: `a·R^-1 mod q`.
#[inline(always)]
pub fn from_montgomery(a: u16) -> u16 {
    multiply(a, 1)
}

/// Interpret a 16-bit word as two's complement.
#[inline(always)]
pub fn fold_signed(word: u16) -> i32 {
    let w = word as i32;
    if w > 32767 {
        w - 65536
    } else {
        w
    }
}

/// Canonical reduction of any integer into [0, q).
#[inline(always)]
pub fn reduce(value: i64) -> u16 {
    value.rem_euclid(Q as i64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyberlink_params::ring::MONT_R;
    use proptest::prelude::*;

    #[test]
    fn test_multiply_identity() {
        // R·R²·R^-1 = R²
        assert_eq!(multiply(MONT_R, MONT_R2), MONT_R2);
        assert_eq!(multiply(MONT_R, 1), 1);
        assert_eq!(from_montgomery(to_montgomery(1234)), 1234);
    }

    #[test]
    fn test_add_sub_edges() {
        assert_eq!(add_sub(0, 0), (0, 0));
        assert_eq!(add_sub(Q - 1, 1), (0, Q - 2));
        assert_eq!(add_sub(0, 1), (1, Q - 1));
        assert_eq!(add_sub(Q - 1, Q - 1), (Q - 2, 0));
    }

    #[test]
    fn test_fold_signed() {
        assert_eq!(fold_signed(0), 0);
        assert_eq!(fold_signed(32767), 32767);
        assert_eq!(fold_signed(32768), -32768);
        assert_eq!(fold_signed(0xFFFF), -1);
    }

    #[test]
    fn test_reduce_negative() {
        assert_eq!(reduce(-1), Q - 1);
        assert_eq!(reduce(Q as i64), 0);
        assert_eq!(reduce(-(Q as i64) * 5 + 7), 7);
    }

    proptest! {
        #[test]
        fn multiply_matches_modular_product(a in any::<i16>(), b in any::<i16>()) {
            let r = fold_signed(multiply(a as u16, b as u16)) as i64;
            let lhs = (r * MONT_R as i64).rem_euclid(Q as i64);
            let rhs = (a as i64 * b as i64).rem_euclid(Q as i64);
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn multiply_in_range_for_reduced_operands(a in 0u16..Q, b in 0u16..Q) {
            prop_assert!(multiply(a, b) < Q);
        }

        #[test]
        fn add_sub_in_range(a in 0u16..Q, t in 0u16..Q) {
            let (s, d) = add_sub(a, t);
            prop_assert!(s < Q && d < Q);
            prop_assert_eq!(s, reduce(a as i64 + t as i64));
            prop_assert_eq!(d, reduce(a as i64 - t as i64));
        }
    }
}
