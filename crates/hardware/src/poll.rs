//! Bounded busy-wait on the core-busy status bit
//!
//! After every command write the bridge polls STATUS, stepping the clock
//! between reads, until the core reports idle or the cycle budget runs out.
//! Running out of budget is reported, not raised: the caller carries on with
//! whatever the memory window holds.

use kyberlink_params::registers::{
    DEFAULT_POLL_BUDGET, DEFAULT_POLL_STEP, STATUS, STATUS_CORE_BUSY,
};
use serde::{Deserialize, Serialize};

use crate::backend::RegisterBackend;
use crate::error::Result;

/// Poll budget and granularity, in clock cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Cycles to spend before giving up
    pub budget_cycles: u32,
    /// Cycles stepped between two status reads
    pub step_cycles: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            budget_cycles: DEFAULT_POLL_BUDGET,
            step_cycles: DEFAULT_POLL_STEP,
        }
    }
}

/// How a poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The core went idle after `cycles` stepped cycles
    Ready {
        /// Cycles stepped while waiting
        cycles: u32,
    },
    /// The budget was exhausted with the core still busy
    TimedOut {
        /// Cycles stepped while waiting
        cycles: u32,
    },
}

impl PollOutcome {
    /// True if the core finished inside the budget
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }

    /// Cycles stepped while waiting
    pub fn cycles(&self) -> u32 {
        match *self {
            PollOutcome::Ready { cycles } | PollOutcome::TimedOut { cycles } => cycles,
        }
    }
}

/// Wait for the core-busy bit to clear.
pub fn wait_idle<B: RegisterBackend + ?Sized>(backend: &mut B, config: &PollConfig) -> Result<PollOutcome> {
    let step = config.step_cycles.max(1);
    let mut spent = 0u32;
    while spent < config.budget_cycles {
        let status = backend.read(STATUS)?;
        if status & STATUS_CORE_BUSY == 0 {
            return Ok(PollOutcome::Ready { cycles: spent });
        }
        backend.step(step);
        spent = spent.saturating_add(step);
    }
    Ok(PollOutcome::TimedOut { cycles: spent })
}
