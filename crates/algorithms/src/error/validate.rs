//! Checks applied to polynomial inputs before they enter the engine

use kyberlink_params::ring::{N, Q};

use super::{Error, Result};

/// Reject a coefficient slice that is not exactly one polynomial long.
#[inline(always)]
pub fn length(context: &'static str, actual: usize) -> Result<()> {
    if actual != N {
        return Err(Error::Length {
            context,
            expected: N,
            actual,
        });
    }
    Ok(())
}

/// Reject coefficients outside [0, q).
#[inline(always)]
pub fn reduced(name: &'static str, coeffs: &[u16]) -> Result<()> {
    match coeffs.iter().position(|&c| c >= Q) {
        Some(_) => Err(Error::param(name, "coefficient not reduced modulo q")),
        None => Ok(()),
    }
}
