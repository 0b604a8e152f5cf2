//! Constants for the polynomial ring Z_q[x]/(x^256 + 1)

/// Polynomial degree
pub const N: usize = 256;

/// Coefficient modulus
pub const Q: u16 = 3329;

/// Modulus as a signed 32-bit value, the width of the multiplier output
pub const Q_I32: i32 = Q as i32;

/// Primitive 256-th root of unity mod Q
pub const ROOT_OF_UNITY: u16 = 17;

/// Montgomery radix residue: 2^16 mod Q
pub const MONT_R: u16 = 2285;

/// R^2 mod Q, used to move values into the Montgomery domain
pub const MONT_R2: u16 = 1353;

/// Q^-1 mod 2^16 as a signed 16-bit word (62209 unsigned)
///
/// The reduction subtracts `m * Q`, which is the same as adding
/// `(-Q^-1 mod 2^16) * Q` for every `m` except the i16::MIN wrap.
pub const QINV: i16 = -3327;

/// Number of twiddle factors in the bit-reversed table
pub const ZETA_COUNT: usize = 128;

/// Number of butterfly layers (lengths 128 down to 2)
pub const NTT_LAYERS: usize = 7;

/// 128^-1 mod Q in Montgomery form, the final INTT scale
pub const INV_128_MONT: u16 = 512;

/// round(Q / 2), the coefficient that encodes a one bit
pub const HALF_Q: u16 = 1664;

/// Bound of the small noise distribution: coefficients in {-ETA, .., ETA}
pub const ETA: i16 = 2;
