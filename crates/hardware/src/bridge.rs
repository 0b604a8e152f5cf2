//! Command/poll driver for the transform core
//!
//! The bridge owns a [`RegisterBackend`] and speaks the core's protocol:
//! operands are written into the memory window, a command word starts the
//! operation, STATUS is polled until the core goes idle, and the result is
//! read back. The memory window holds three polynomial slots.
//!
//! | slot | words | role |
//! |------|-------|------|
//! | A | 0..128 | NTT / INTT operand and result, multiply operand |
//! | B | 128..256 | multiply operand, key generation output |
//! | ACC | 256..384 | multiply-accumulate accumulator |

use kyberlink_algorithms::Polynomial;
use kyberlink_params::registers::{
    CMD_START, COMMAND, CTRL_ABSORB_LAST, KEYGEN_LAUNCH_CYCLES, MEM_BASE, MEM_STRIDE, OP_INTT,
    OP_KEYGEN, OP_MUL_ACC, OP_NTT, SEED_WORDS, SLOT_COUNT, SLOT_WORDS, SPONGE_CTRL, SPONGE_DATA,
    SPONGE_SETTLE_CYCLES,
};
use kyberlink_params::ring::N;
use tracing::{debug, info, warn};

use crate::accelerator::Accelerator;
use crate::backend::RegisterBackend;
use crate::error::{Error, Result};
use crate::poll::{wait_idle, PollConfig, PollOutcome};
use crate::sim::sponge::expand_seed;
use crate::words::{pack, unpack_signed};

/// One of the three polynomial slots of the memory window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Transform operand and first multiply operand
    A,
    /// Second multiply operand and key generation output
    B,
    /// Multiply-accumulate accumulator
    Acc,
}

impl Slot {
    /// Slot number in the memory window
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
            Slot::Acc => 2,
        }
    }

    /// First memory word of the slot
    pub fn base_word(self) -> usize {
        self.index() * SLOT_WORDS
    }

    /// Bus address of word `word` within the slot
    pub fn address(self, word: usize) -> u32 {
        MEM_BASE + ((self.base_word() + word) as u32) * MEM_STRIDE
    }
}

impl TryFrom<usize> for Slot {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Slot::A),
            1 => Ok(Slot::B),
            2 => Ok(Slot::Acc),
            _ => Err(Error::InvalidSlot(index)),
        }
    }
}

const _: () = assert!(SLOT_COUNT == 3);

/// Driver speaking the register protocol over a backend
pub struct HardwareBridge<B: RegisterBackend> {
    backend: B,
    poll: PollConfig,
    closed: bool,
}

impl<B: RegisterBackend> HardwareBridge<B> {
    /// Initialise `backend` and wrap it
    pub fn new(mut backend: B, poll: PollConfig) -> Result<Self> {
        backend.init()?;
        info!(
            backend = backend.name(),
            budget_cycles = poll.budget_cycles,
            step_cycles = poll.step_cycles,
            "hardware bridge initialised"
        );
        Ok(Self {
            backend,
            poll,
            closed: false,
        })
    }

    /// The wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Poll configuration in use
    pub fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    /// Write 256 coefficients into a slot
    pub fn write_slot(&mut self, slot: Slot, coeffs: &[u16; N]) -> Result<()> {
        for (i, word) in pack(coeffs).into_iter().enumerate() {
            self.backend.write(slot.address(i), word)?;
        }
        Ok(())
    }

    /// Read a slot back as sign-folded coefficients
    pub fn read_slot(&mut self, slot: Slot) -> Result<[i64; N]> {
        let mut words = [0u32; SLOT_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.backend.read(slot.address(i))?;
        }
        Ok(unpack_signed(&words))
    }

    /// Wait for the core to go idle, logging a timeout
    pub fn wait(&mut self, opcode: u32) -> Result<PollOutcome> {
        let outcome = wait_idle(&mut self.backend, &self.poll)?;
        match outcome {
            PollOutcome::Ready { cycles } => debug!(opcode, cycles, "command complete"),
            PollOutcome::TimedOut { cycles } => warn!(
                opcode,
                cycles,
                "transform core still busy after poll budget; reading memory as is"
            ),
        }
        Ok(outcome)
    }

    /// Start `opcode` and poll until it finishes or the budget runs out
    pub fn command(&mut self, opcode: u32) -> Result<PollOutcome> {
        self.backend.write(COMMAND, (opcode << 1) | CMD_START)?;
        self.wait(opcode)
    }

    /// Absorb a key-generation seed into the sponge
    ///
    /// Uses the backend's batch helper when available (eight words,
    /// `seed + i`); otherwise writes a single absorb-last word by hand.
    pub fn absorb_seed(&mut self, seed: u32) -> Result<()> {
        if self.backend.supports_batch_absorb() {
            let words = expand_seed(seed);
            debug!(words = SEED_WORDS, "absorbing seed through batch helper");
            self.backend.absorb_seed(&words)?;
        } else {
            debug!("absorbing single-word seed through registers");
            self.backend.write(SPONGE_CTRL, CTRL_ABSORB_LAST)?;
            self.backend.write(SPONGE_DATA, seed)?;
        }
        self.backend.step(SPONGE_SETTLE_CYCLES);
        Ok(())
    }

    /// Release the backend
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if !self.closed {
            self.backend.close();
            self.closed = true;
        }
    }

    fn run_on_slot_a(&mut self, poly: &Polynomial, opcode: u32) -> Result<Polynomial> {
        self.write_slot(Slot::A, poly.as_array())?;
        self.command(opcode)?;
        Ok(Polynomial::from_signed_array(&self.read_slot(Slot::A)?))
    }
}

impl<B: RegisterBackend> Drop for HardwareBridge<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<B: RegisterBackend> Accelerator for HardwareBridge<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn forward_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial> {
        self.run_on_slot_a(poly, OP_NTT)
    }

    fn inverse_ntt(&mut self, poly: &Polynomial) -> Result<Polynomial> {
        self.run_on_slot_a(poly, OP_INTT)
    }

    fn mul_acc(&mut self, acc: &Polynomial, a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
        self.write_slot(Slot::A, a.as_array())?;
        self.write_slot(Slot::B, b.as_array())?;
        self.write_slot(Slot::Acc, acc.as_array())?;
        self.command(OP_MUL_ACC)?;
        Ok(Polynomial::from_signed_array(&self.read_slot(Slot::Acc)?))
    }

    fn keygen(&mut self, seed: u32) -> Result<Polynomial> {
        self.absorb_seed(seed)?;
        self.backend.write(COMMAND, (OP_KEYGEN << 1) | CMD_START)?;
        self.backend.step(KEYGEN_LAUNCH_CYCLES);
        self.wait(OP_KEYGEN)?;
        Ok(Polynomial::from_signed_array(&self.read_slot(Slot::B)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedCore;
    use crate::software::SoftwareAccelerator;
    use kyberlink_params::ring::Q;

    fn bridge() -> HardwareBridge<SimulatedCore> {
        HardwareBridge::new(SimulatedCore::new(), PollConfig::default()).unwrap()
    }

    fn ramp() -> Polynomial {
        let mut c = [0u16; N];
        for (i, x) in c.iter_mut().enumerate() {
            *x = ((i * 97 + 5) % Q as usize) as u16;
        }
        Polynomial::from_array(c)
    }

    #[test]
    fn test_slot_addresses() {
        assert_eq!(Slot::A.address(0), 0x1000);
        assert_eq!(Slot::B.address(0), 0x1000 + 128 * 4);
        assert_eq!(Slot::Acc.address(127), 0x1000 + 383 * 4);
        assert_eq!(Slot::try_from(2).unwrap(), Slot::Acc);
        assert_eq!(Slot::try_from(3), Err(Error::InvalidSlot(3)));
    }

    #[test]
    fn test_slot_round_trip() {
        let mut hw = bridge();
        let p = ramp();
        hw.write_slot(Slot::B, p.as_array()).unwrap();
        let back = hw.read_slot(Slot::B).unwrap();
        assert_eq!(Polynomial::from_signed_array(&back), p);
    }

    #[test]
    fn test_ntt_parity() {
        let mut hw = bridge();
        let mut sw = SoftwareAccelerator::new();
        let p = ramp();
        assert_eq!(hw.forward_ntt(&p).unwrap(), sw.forward_ntt(&p).unwrap());
        assert_eq!(hw.inverse_ntt(&p).unwrap(), sw.inverse_ntt(&p).unwrap());
    }

    #[test]
    fn test_keygen_parity_with_batch_absorb() {
        let mut hw = bridge();
        let mut sw = SoftwareAccelerator::new();
        assert_eq!(hw.keygen(0x1234).unwrap(), sw.keygen(0x1234).unwrap());
    }

    #[test]
    fn test_keygen_register_fallback() {
        let core = SimulatedCore::new().with_batch_absorb(false);
        let mut hw = HardwareBridge::new(core, PollConfig::default()).unwrap();
        let single = hw.keygen(0x1234).unwrap();
        assert!(single.coeffs().iter().all(|&c| c < Q));
        // A single-word absorb is a different sponge input
        let mut sw = SoftwareAccelerator::new();
        assert_ne!(single, sw.keygen(0x1234).unwrap());
    }

    #[test]
    fn test_timeout_still_returns() {
        let core = SimulatedCore::new().with_latency_scale(100);
        let poll = PollConfig {
            budget_cycles: 100,
            step_cycles: 10,
        };
        let mut hw = HardwareBridge::new(core, poll).unwrap();
        assert_eq!(hw.poll_config(), &poll);
        let p = ramp();
        hw.write_slot(Slot::A, p.as_array()).unwrap();
        let outcome = hw.command(OP_NTT).unwrap();
        assert_eq!(outcome, PollOutcome::TimedOut { cycles: 100 });
        // Memory still holds the operand
        let back = hw.read_slot(Slot::A).unwrap();
        assert_eq!(Polynomial::from_signed_array(&back), p);
    }
}
