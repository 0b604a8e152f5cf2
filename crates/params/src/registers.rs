//! Register map of the transform core
//!
//! Byte addresses on the 32-bit bus. The memory window is word addressed
//! with a stride of four bytes.

/// Status register
pub const STATUS: u32 = 0x0000;

/// Sponge control register (bit 1 = absorb last)
pub const SPONGE_CTRL: u32 = 0x0004;

/// Sponge rate register, in 64-bit lanes
pub const SPONGE_RATE: u32 = 0x0010;

/// Sponge data register: writes absorb, reads squeeze
pub const SPONGE_DATA: u32 = 0x0014;

/// Command register: `opcode << 1 | start`
pub const COMMAND: u32 = 0x0020;

/// Base address of the coefficient memory window
pub const MEM_BASE: u32 = 0x1000;

/// Address stride between memory words
pub const MEM_STRIDE: u32 = 4;

/// Status bit: sponge permutation in progress
pub const STATUS_SPONGE_BUSY: u32 = 1 << 0;

/// Status bit: transform core running a command
pub const STATUS_CORE_BUSY: u32 = 1 << 1;

/// Status bit: sponge ready to absorb another word
pub const STATUS_ABSORB_READY: u32 = 1 << 2;

/// Status bit: squeeze output valid
pub const STATUS_SQUEEZE_VALID: u32 = 1 << 3;

/// Sponge control bit marking the final absorbed word
pub const CTRL_ABSORB_LAST: u32 = 1 << 1;

/// Command register start bit
pub const CMD_START: u32 = 1;

/// Opcode: key generation (squeeze a uniform polynomial)
pub const OP_KEYGEN: u32 = 1;

/// Opcode: forward NTT on slot A
pub const OP_NTT: u32 = 8;

/// Opcode: inverse NTT on slot A
pub const OP_INTT: u32 = 9;

/// Opcode: ACC += A * B in the NTT domain
pub const OP_MUL_ACC: u32 = 10;

/// Words per polynomial slot (two coefficients per word)
pub const SLOT_WORDS: usize = 128;

/// Number of polynomial slots in the memory window
pub const SLOT_COUNT: usize = 3;

/// Total memory window size in words
pub const MEM_WORDS: usize = SLOT_WORDS * SLOT_COUNT;

/// Sponge rate for SHAKE-128, in 64-bit lanes (168 bytes)
pub const SHAKE128_RATE_LANES: u32 = 21;

/// Default poll budget, in clock cycles
pub const DEFAULT_POLL_BUDGET: u32 = 50_000;

/// Default poll step, in clock cycles
pub const DEFAULT_POLL_STEP: u32 = 10;

/// Cycles allowed for the sponge permutation after absorbing a seed
pub const SPONGE_SETTLE_CYCLES: u32 = 50;

/// Cycles stepped between the key generation command write and the poll
pub const KEYGEN_LAUNCH_CYCLES: u32 = 2;

/// Number of words in a batch-absorbed seed
pub const SEED_WORDS: usize = 8;

/// Seed the service absorbs before the key generation command
pub const KEYGEN_SEED: u32 = 0x1234;
