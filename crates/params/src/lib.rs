//! Constant values for the kyberlink engine
//!
//! Shared by the software reference, the hardware bridge and the ROM
//! generator. Anything that must agree bit-for-bit between software and the
//! transform core lives here.

#![no_std]

pub mod codec;
pub mod registers;
pub mod ring;
