// In: src/bridge/scratch.rs

//! The Buffer Manager: owns the fixed-capacity scratch region the codec writes
//! into.
//!
//! A `ScratchBuffer` is an owning handle. Its memory is released when the handle
//! is dropped, which happens exactly once on every exit path of the call that
//! created it. Nothing outside the bridge ever sees the buffer itself.

use log::trace;

use crate::error::{BridgeError, Operation};

#[derive(Debug)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
}

impl ScratchBuffer {
    /// Allocates a zeroed buffer of exactly `capacity` bytes.
    ///
    /// # Errors
    /// Returns `BridgeError::AllocationFailure` if the allocator cannot satisfy
    /// the request (including capacities the platform cannot represent).
    pub fn allocate(capacity: usize, op: Operation) -> Result<Self, BridgeError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| BridgeError::AllocationFailure(op))?;
        // Within the reservation, so this cannot reallocate.
        buf.resize(capacity, 0);
        trace!("allocated {} byte scratch buffer for {}", capacity, op);
        Ok(Self { buf })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The whole region, for the codec to write into.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// The first `len` bytes. `len` must not exceed the capacity; callers go
    /// through `ProducedLength`, which guarantees it.
    pub(crate) fn prefix(&self, len: usize) -> &[u8] {
        &self.buf[..len]
    }

    /// Releases the buffer now. Consuming `self` makes a second release
    /// impossible.
    pub fn release(self) {
        drop(self);
    }
}
