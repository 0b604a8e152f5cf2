//! Keccak-f[1600] sponge with a word-wide absorb port
//!
//! Models the sponge block of the transform core: 32-bit words are absorbed
//! little-endian into a rate of `lanes` 64-bit lanes, the final word closes
//! the input with SHAKE padding, and output is squeezed 32 bits at a time.
//! With the default rate of 21 lanes the output stream is SHAKE-128.

use kyberlink_algorithms::poly::sampling::rej_uniform;
use kyberlink_params::registers::{SEED_WORDS, SHAKE128_RATE_LANES};
use kyberlink_params::ring::N;

const KECCAK_ROUNDS: usize = 24;
const KECCAK_STATE_SIZE: usize = 25;

/// Clock cycles one permutation occupies the sponge
pub const PERMUTATION_CYCLES: u32 = KECCAK_ROUNDS as u32;

/// Keccak round constants.
const RC: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation offsets for the ρ step.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// π-mapping indexes.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

fn keccak_f1600(state: &mut [u64; KECCAK_STATE_SIZE]) {
    for &rc in RC.iter() {
        // θ
        let mut c = [0u64; 5];
        for (x, cx) in c.iter_mut().enumerate() {
            *cx = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }
        // ρ + π
        let mut t = state[1];
        for (&j, &rho) in PI.iter().zip(RHO.iter()) {
            let tmp = state[j];
            state[j] = t.rotate_left(rho);
            t = tmp;
        }
        // χ
        for y in 0..5 {
            let mut row = [0u64; 5];
            row.copy_from_slice(&state[5 * y..5 * y + 5]);
            for x in 0..5 {
                state[x + 5 * y] ^= (!row[(x + 1) % 5]) & row[(x + 2) % 5];
            }
        }
        // ι
        state[0] ^= rc;
    }
}

#[inline(always)]
fn xor_byte(state: &mut [u64; KECCAK_STATE_SIZE], pos: usize, val: u8) {
    state[pos / 8] ^= (val as u64) << ((pos % 8) * 8);
}

#[inline(always)]
fn get_byte(state: &[u64; KECCAK_STATE_SIZE], pos: usize) -> u8 {
    (state[pos / 8] >> ((pos % 8) * 8)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Absorbing,
    Squeezing,
}

/// Word-oriented Keccak sponge
#[derive(Debug, Clone)]
pub struct Sponge {
    state: [u64; KECCAK_STATE_SIZE],
    rate: usize,
    pos: usize,
    phase: Phase,
}

impl Default for Sponge {
    fn default() -> Self {
        Self::new(SHAKE128_RATE_LANES)
    }
}

impl Sponge {
    /// New sponge absorbing at `lanes` 64-bit lanes per block (clamped to 1..=24)
    pub fn new(lanes: u32) -> Self {
        Self {
            state: [0; KECCAK_STATE_SIZE],
            rate: (lanes.clamp(1, 24) as usize) * 8,
            pos: 0,
            phase: Phase::Absorbing,
        }
    }

    /// Rate in 64-bit lanes
    pub fn rate_lanes(&self) -> u32 {
        (self.rate / 8) as u32
    }

    /// True once the input has been padded and output is available
    pub fn is_squeezing(&self) -> bool {
        self.phase == Phase::Squeezing
    }

    /// Clear the state and start a new absorb
    pub fn reset(&mut self) {
        self.state = [0; KECCAK_STATE_SIZE];
        self.pos = 0;
        self.phase = Phase::Absorbing;
    }

    /// Absorb one 32-bit word. Returns the number of permutations run.
    ///
    /// Absorbing after the sponge has switched to squeezing starts a new
    /// message.
    pub fn absorb_word(&mut self, word: u32) -> u32 {
        if self.phase == Phase::Squeezing {
            self.reset();
        }
        let mut perms = 0;
        for b in word.to_le_bytes() {
            xor_byte(&mut self.state, self.pos, b);
            self.pos += 1;
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
                perms += 1;
            }
        }
        perms
    }

    /// Apply SHAKE padding and switch to squeezing. Returns the number of
    /// permutations run.
    pub fn finalize(&mut self) -> u32 {
        if self.phase == Phase::Squeezing {
            return 0;
        }
        xor_byte(&mut self.state, self.pos, 0x1F);
        xor_byte(&mut self.state, self.rate - 1, 0x80);
        keccak_f1600(&mut self.state);
        self.pos = 0;
        self.phase = Phase::Squeezing;
        1
    }

    /// Squeeze output bytes. Returns the number of permutations run.
    pub fn squeeze(&mut self, out: &mut [u8]) -> u32 {
        let mut perms = self.finalize();
        for b in out.iter_mut() {
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
                perms += 1;
            }
            *b = get_byte(&self.state, self.pos);
            self.pos += 1;
        }
        perms
    }

    /// Squeeze one little-endian 32-bit word
    pub fn squeeze_word(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.squeeze(&mut bytes);
        u32::from_le_bytes(bytes)
    }
}

/// The seed words absorbed for a key-generation seed: `seed + i`.
pub fn expand_seed(seed: u32) -> [u32; SEED_WORDS] {
    let mut words = [0u32; SEED_WORDS];
    for (i, w) in words.iter_mut().enumerate() {
        *w = seed.wrapping_add(i as u32);
    }
    words
}

/// Squeeze a uniform polynomial by 12-bit rejection sampling.
///
/// Returns the coefficients and the number of permutations run.
pub fn squeeze_uniform(sponge: &mut Sponge) -> ([u16; N], u32) {
    let mut coeffs = [0u16; N];
    let mut filled = 0;
    let mut perms = 0;
    // Multiple of three so candidates never straddle two reads
    let mut buf = [0u8; 168];
    while filled < N {
        perms += sponge.squeeze(&mut buf);
        filled += rej_uniform(&mut coeffs[filled..], &buf);
    }
    (coeffs, perms)
}
