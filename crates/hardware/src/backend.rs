//! Register-level backend contract
//!
//! A backend owns one instance of the transform core (simulated or real) and
//! exposes clocking and 32-bit bus transactions. The bridge never touches
//! core state except through this trait.

use crate::error::{Error, Result};

/// Bus and clock access to one transform core instance
pub trait RegisterBackend {
    /// Human readable backend name, used in logs
    fn name(&self) -> &str;

    /// Reset the core and bring it out of reset
    fn init(&mut self) -> Result<()>;

    /// Advance the clock by `cycles` cycles
    fn step(&mut self, cycles: u32);

    /// Read the 32-bit register or memory word at byte address `addr`
    fn read(&mut self, addr: u32) -> Result<u32>;

    /// Write a 32-bit register or memory word at byte address `addr`
    fn write(&mut self, addr: u32, value: u32) -> Result<()>;

    /// Release the core. Further transactions are undefined.
    fn close(&mut self);

    /// Whether [`RegisterBackend::absorb_seed`] is implemented
    fn supports_batch_absorb(&self) -> bool {
        false
    }

    /// Absorb a multi-word seed into the sponge in one call
    fn absorb_seed(&mut self, _words: &[u32]) -> Result<()> {
        Err(Error::Unsupported("absorb_seed"))
    }
}

impl<B: RegisterBackend + ?Sized> RegisterBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn init(&mut self) -> Result<()> {
        (**self).init()
    }

    fn step(&mut self, cycles: u32) {
        (**self).step(cycles)
    }

    fn read(&mut self, addr: u32) -> Result<u32> {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u32, value: u32) -> Result<()> {
        (**self).write(addr, value)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn supports_batch_absorb(&self) -> bool {
        (**self).supports_batch_absorb()
    }

    fn absorb_seed(&mut self, words: &[u32]) -> Result<()> {
        (**self).absorb_seed(words)
    }
}
