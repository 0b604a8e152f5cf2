//! Backend linking a Verilator-built `libkyber_sim`
//!
//! The simulator library keeps one global model instance, so at most one
//! [`VerilatorBackend`] may be live per process; [`VerilatorBackend::new`]
//! enforces this.

#![allow(unsafe_code)]

use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::backend::RegisterBackend;
use crate::error::{Error, Result};

mod ffi {
    use std::os::raw::c_int;

    #[link(name = "kyber_sim")]
    extern "C" {
        pub fn sim_init();
        pub fn sim_step(cycles: c_int);
        pub fn sim_write(addr: c_int, data: c_int) -> c_int;
        pub fn sim_read(addr: c_int) -> c_int;
        pub fn sim_close();
        pub fn absorb_seed(seed: *mut u32, word_count: c_int);
    }
}

static IN_USE: AtomicBool = AtomicBool::new(false);

/// Register backend over the Verilator model
#[derive(Debug)]
pub struct VerilatorBackend {
    open: bool,
}

impl VerilatorBackend {
    /// Claim the process-wide simulator instance
    pub fn new() -> Result<Self> {
        if IN_USE.swap(true, Ordering::AcqRel) {
            return Err(Error::backend("init", "simulator instance already in use"));
        }
        Ok(Self { open: false })
    }
}

impl RegisterBackend for VerilatorBackend {
    fn name(&self) -> &str {
        "verilator"
    }

    fn init(&mut self) -> Result<()> {
        // SAFETY: the global model is owned by this backend (see `new`)
        unsafe { ffi::sim_init() };
        self.open = true;
        debug!("verilator model reset");
        Ok(())
    }

    fn step(&mut self, cycles: u32) {
        let cycles = c_int::try_from(cycles).unwrap_or(c_int::MAX);
        // SAFETY: sim_step is a no-op before sim_init
        unsafe { ffi::sim_step(cycles) };
    }

    fn read(&mut self, addr: u32) -> Result<u32> {
        if !self.open {
            return Err(Error::backend("read", "model not initialized"));
        }
        // SAFETY: plain integer arguments; the model is live
        let value = unsafe { ffi::sim_read(addr as c_int) };
        // -1 doubles as the bus-timeout marker; it is also a legal data word
        Ok(value as u32)
    }

    fn write(&mut self, addr: u32, value: u32) -> Result<()> {
        if !self.open {
            return Err(Error::backend("write", "model not initialized"));
        }
        // SAFETY: plain integer arguments; the model is live
        let rc = unsafe { ffi::sim_write(addr as c_int, value as c_int) };
        if rc != 0 {
            return Err(Error::backend("write", format!("no bus ack at {:#06x}", addr)));
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            // SAFETY: releases the model created by sim_init
            unsafe { ffi::sim_close() };
            self.open = false;
        }
    }

    fn supports_batch_absorb(&self) -> bool {
        true
    }

    fn absorb_seed(&mut self, words: &[u32]) -> Result<()> {
        if !self.open {
            return Err(Error::backend("absorb_seed", "model not initialized"));
        }
        let mut buf = words.to_vec();
        let count = c_int::try_from(buf.len())
            .map_err(|_| Error::backend("absorb_seed", "seed too long"))?;
        // SAFETY: buf outlives the call and holds `count` words
        unsafe { ffi::absorb_seed(buf.as_mut_ptr(), count) };
        Ok(())
    }
}

impl Drop for VerilatorBackend {
    fn drop(&mut self) {
        self.close();
        IN_USE.store(false, Ordering::Release);
    }
}
