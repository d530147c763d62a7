//! This module contains the pure, stateless codec kernels that sit behind the
//! bridge's `ShortTextCodec` seam.
//!
//! Kernels report failures through `KernelError`. At the codec boundary those are
//! flattened into the non-positive sentinel the codec contract prescribes; the
//! bridge never sees a `KernelError`.

use thiserror::Error;

pub mod codebook;
pub mod leb128;

pub use codebook::CodebookCodec;

//==================================================================================
// 1. Kernel Errors
//==================================================================================

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error("output does not fit into the destination buffer")]
    OutputOverflow,

    #[error("input ended in the middle of a token")]
    Truncated,

    #[error("length header does not fit into a usize")]
    VarintOverflow,

    #[error("reserved code 0x{0:02X}")]
    ReservedCode(u8),

    #[error("declared length {declared} does not match decoded length {decoded}")]
    LengthMismatch { declared: usize, decoded: usize },

    #[error("declared length {0} is outside the accepted range")]
    InvalidLength(usize),
}

impl KernelError {
    /// The non-positive value returned across the codec boundary for this error.
    pub fn sentinel(self) -> i32 {
        match self {
            KernelError::OutputOverflow => -1,
            KernelError::Truncated => -2,
            KernelError::VarintOverflow => -3,
            KernelError::ReservedCode(_) => -4,
            KernelError::LengthMismatch { .. } => -5,
            KernelError::InvalidLength(_) => -6,
        }
    }
}

/// Flattens a kernel result into the codec contract's integer.
pub(crate) fn to_sentinel(result: Result<usize, KernelError>) -> i32 {
    match result {
        Ok(len) => i32::try_from(len).unwrap_or(KernelError::OutputOverflow.sentinel()),
        Err(e) => e.sentinel(),
    }
}

//==================================================================================
// 2. Bounded Output
//==================================================================================

/// A cursor over a fixed destination slice. Every write is bounds-checked, so a
/// kernel cannot write past the buffer it was given.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn push(&mut self, byte: u8) -> Result<(), KernelError> {
        let slot = self.dst.get_mut(self.pos).ok_or(KernelError::OutputOverflow)?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    pub fn extend(&mut self, bytes: &[u8]) -> Result<(), KernelError> {
        let end = self
            .pos
            .checked_add(bytes.len())
            .filter(|&end| end <= self.dst.len())
            .ok_or(KernelError::OutputOverflow)?;
        self.dst[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}
