//! Cycle-stepped register model of the transform core

use kyberlink_algorithms::poly::ntt::{ntt_mul_acc, CooleyTukeyNtt, InverseNttOperator, NttOperator};
use kyberlink_params::registers::{
    CMD_START, COMMAND, CTRL_ABSORB_LAST, MEM_BASE, MEM_STRIDE, MEM_WORDS, OP_INTT, OP_KEYGEN,
    OP_MUL_ACC, OP_NTT, SHAKE128_RATE_LANES, SLOT_WORDS, SPONGE_CTRL, SPONGE_DATA, SPONGE_RATE,
    STATUS, STATUS_ABSORB_READY, STATUS_CORE_BUSY, STATUS_SPONGE_BUSY, STATUS_SQUEEZE_VALID,
};
use kyberlink_params::ring::{N, NTT_LAYERS};
use tracing::{debug, trace};

use super::sponge::{squeeze_uniform, Sponge, PERMUTATION_CYCLES};
use crate::backend::RegisterBackend;
use crate::bridge::Slot;
use crate::error::{Error, Result};
use crate::words::{pack, unpack_raw};

/// Fixed pipeline fill/drain overhead of every command
const PIPELINE_CYCLES: u32 = 8;
/// One butterfly per cycle
const NTT_CYCLES: u32 = (NTT_LAYERS * N / 2) as u32 + PIPELINE_CYCLES;
/// Butterflies plus one scaling multiply per coefficient
const INTT_CYCLES: u32 = NTT_CYCLES + N as u32;
/// One residue pair per cycle
const MUL_ACC_CYCLES: u32 = (N / 2) as u32 + PIPELINE_CYCLES;

/// Result of a running command, committed to memory when it completes
#[derive(Debug, Clone)]
struct Pending {
    slot: Slot,
    words: [u32; SLOT_WORDS],
}

/// In-process model of the transform core
///
/// Commands compute their result when issued but only write it back to the
/// memory window once the modelled latency has elapsed, so a caller that
/// stops polling early observes the previous memory contents.
#[derive(Debug, Clone)]
pub struct SimulatedCore {
    memory: Vec<u32>,
    ctrl: u32,
    rate: u32,
    sponge: Sponge,
    sponge_busy: u32,
    core_busy: u32,
    pending: Option<Pending>,
    cycle: u64,
    open: bool,
    batch_absorb: bool,
    latency_scale: u32,
}

impl Default for SimulatedCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedCore {
    /// A core in reset; [`RegisterBackend::init`] brings it up
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEM_WORDS],
            ctrl: 0,
            rate: SHAKE128_RATE_LANES,
            sponge: Sponge::new(SHAKE128_RATE_LANES),
            sponge_busy: 0,
            core_busy: 0,
            pending: None,
            cycle: 0,
            open: false,
            batch_absorb: true,
            latency_scale: 1,
        }
    }

    /// Enable or disable the batch seed-absorb helper
    pub fn with_batch_absorb(mut self, enabled: bool) -> Self {
        self.batch_absorb = enabled;
        self
    }

    /// Multiply every command latency, to model a slower core
    pub fn with_latency_scale(mut self, scale: u32) -> Self {
        self.latency_scale = scale.max(1);
        self
    }

    /// Clock cycles elapsed since the last reset
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(Error::backend(operation, "core not initialized"))
        }
    }

    fn mem_index(addr: u32, operation: &'static str) -> Result<usize> {
        let offset = addr - MEM_BASE;
        if offset % MEM_STRIDE != 0 {
            return Err(Error::backend(operation, format!("unaligned address {:#06x}", addr)));
        }
        let index = (offset / MEM_STRIDE) as usize;
        if index >= MEM_WORDS {
            return Err(Error::backend(operation, format!("unmapped address {:#06x}", addr)));
        }
        Ok(index)
    }

    fn status(&self) -> u32 {
        let mut status = 0;
        if self.sponge_busy > 0 {
            status |= STATUS_SPONGE_BUSY;
        }
        if self.core_busy > 0 {
            status |= STATUS_CORE_BUSY;
        }
        if self.sponge_busy == 0 && !self.sponge.is_squeezing() {
            status |= STATUS_ABSORB_READY;
        }
        if self.sponge_busy == 0 && self.sponge.is_squeezing() {
            status |= STATUS_SQUEEZE_VALID;
        }
        status
    }

    fn slot_coeffs(&self, slot: Slot) -> [u16; N] {
        let base = slot.base_word();
        let mut words = [0u32; SLOT_WORDS];
        words.copy_from_slice(&self.memory[base..base + SLOT_WORDS]);
        unpack_raw(&words)
    }

    fn absorb(&mut self, word: u32) {
        let mut perms = self.sponge.absorb_word(word);
        if self.ctrl & CTRL_ABSORB_LAST != 0 {
            perms += self.sponge.finalize();
        }
        self.sponge_busy += perms * PERMUTATION_CYCLES;
    }

    fn issue(&mut self, opcode: u32) -> Result<()> {
        let (slot, coeffs, latency) = match opcode {
            OP_NTT => {
                let mut c = self.slot_coeffs(Slot::A);
                CooleyTukeyNtt::ntt(&mut c);
                (Slot::A, c, NTT_CYCLES)
            }
            OP_INTT => {
                let mut c = self.slot_coeffs(Slot::A);
                CooleyTukeyNtt::inv_ntt(&mut c);
                (Slot::A, c, INTT_CYCLES)
            }
            OP_MUL_ACC => {
                let a = self.slot_coeffs(Slot::A);
                let b = self.slot_coeffs(Slot::B);
                let acc = self.slot_coeffs(Slot::Acc);
                (Slot::Acc, ntt_mul_acc(&acc, &a, &b), MUL_ACC_CYCLES)
            }
            OP_KEYGEN => {
                let (c, perms) = squeeze_uniform(&mut self.sponge);
                (Slot::B, c, perms * PERMUTATION_CYCLES + N as u32 + PIPELINE_CYCLES)
            }
            other => {
                return Err(Error::backend("write", format!("unknown opcode {}", other)));
            }
        };
        debug!(opcode, latency, "simulated core command issued");
        self.pending = Some(Pending {
            slot,
            words: pack(&coeffs),
        });
        self.core_busy = latency * self.latency_scale;
        Ok(())
    }

    fn commit(&mut self) {
        if let Some(done) = self.pending.take() {
            let base = done.slot.base_word();
            self.memory[base..base + SLOT_WORDS].copy_from_slice(&done.words);
            trace!(slot = ?done.slot, cycle = self.cycle, "simulated core command retired");
        }
    }
}

impl RegisterBackend for SimulatedCore {
    fn name(&self) -> &str {
        "simulated"
    }

    fn init(&mut self) -> Result<()> {
        let batch_absorb = self.batch_absorb;
        let latency_scale = self.latency_scale;
        *self = Self {
            open: true,
            batch_absorb,
            latency_scale,
            ..Self::new()
        };
        // Reset pulse
        self.cycle = 5;
        Ok(())
    }

    fn step(&mut self, cycles: u32) {
        if !self.open {
            return;
        }
        self.cycle += cycles as u64;
        self.sponge_busy = self.sponge_busy.saturating_sub(cycles);
        if self.core_busy > 0 {
            self.core_busy = self.core_busy.saturating_sub(cycles);
            if self.core_busy == 0 {
                self.commit();
            }
        }
    }

    fn read(&mut self, addr: u32) -> Result<u32> {
        self.ensure_open("read")?;
        let value = match addr {
            STATUS => self.status(),
            SPONGE_CTRL => self.ctrl,
            SPONGE_RATE => self.rate,
            SPONGE_DATA => {
                if self.sponge_busy == 0 && self.sponge.is_squeezing() {
                    self.sponge.squeeze_word()
                } else {
                    0
                }
            }
            COMMAND => 0,
            a if a >= MEM_BASE => self.memory[Self::mem_index(a, "read")?],
            a => return Err(Error::backend("read", format!("unmapped address {:#06x}", a))),
        };
        // Every bus transaction costs a cycle
        self.step(1);
        Ok(value)
    }

    fn write(&mut self, addr: u32, value: u32) -> Result<()> {
        self.ensure_open("write")?;
        match addr {
            STATUS => {}
            SPONGE_CTRL => self.ctrl = value,
            SPONGE_RATE => {
                self.rate = value;
                self.sponge = Sponge::new(value);
            }
            SPONGE_DATA => self.absorb(value),
            COMMAND => {
                if value & CMD_START != 0 {
                    if self.core_busy > 0 {
                        debug!(value, "command ignored while core busy");
                    } else {
                        self.issue(value >> 1)?;
                    }
                }
            }
            a if a >= MEM_BASE => {
                let index = Self::mem_index(a, "write")?;
                self.memory[index] = value;
            }
            a => return Err(Error::backend("write", format!("unmapped address {:#06x}", a))),
        }
        self.step(1);
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn supports_batch_absorb(&self) -> bool {
        self.batch_absorb
    }

    fn absorb_seed(&mut self, words: &[u32]) -> Result<()> {
        if !self.batch_absorb {
            return Err(Error::Unsupported("absorb_seed"));
        }
        self.write(SPONGE_RATE, SHAKE128_RATE_LANES)?;
        for (i, &word) in words.iter().enumerate() {
            let last = i + 1 == words.len();
            self.write(SPONGE_CTRL, if last { CTRL_ABSORB_LAST } else { 0 })?;
            self.write(SPONGE_DATA, word)?;
        }
        self.write(SPONGE_CTRL, 0)
    }
}
