// In: src/bridge/output.rs

//! The Output Adapter: copies the produced prefix of the scratch buffer into an
//! owned result and releases the scratch buffer.
//!
//! The scratch buffer is consumed here, so by the time a front end builds its
//! managed object (and possibly fails to), the scratch memory is already gone.

use super::invoke::ProducedLength;
use super::scratch::ScratchBuffer;
use crate::error::{BridgeError, Operation};

/// Copies exactly `len` bytes out of `scratch` into a fresh vector.
fn copy_prefix(
    scratch: ScratchBuffer,
    len: ProducedLength,
    op: Operation,
) -> Result<Vec<u8>, BridgeError> {
    let mut owned = Vec::new();
    let reserved = owned.try_reserve_exact(len.get());
    if reserved.is_ok() {
        owned.extend_from_slice(scratch.prefix(len.get()));
    }
    scratch.release();
    reserved.map_err(|_| BridgeError::AllocationFailure(op))?;
    Ok(owned)
}

/// Compression result: the produced bytes, exactly.
pub fn emit_bytes(scratch: ScratchBuffer, len: ProducedLength) -> Result<Vec<u8>, BridgeError> {
    copy_prefix(scratch, len, Operation::Compress)
}

/// Decompression result: the produced bytes read as UTF-8 text.
///
/// Bytes that are not valid UTF-8 did not come from compressing text, so they
/// are reported as `InvalidCompressedData`.
pub fn emit_text(scratch: ScratchBuffer, len: ProducedLength) -> Result<String, BridgeError> {
    let bytes = copy_prefix(scratch, len, Operation::Decompress)?;
    String::from_utf8(bytes).map_err(|_| BridgeError::InvalidCompressedData)
}
