//! This module contains the pure, panic-free kernels for LEB128 (Little-Endian
//! Base 128) variable-length encoding of a single `usize`.
//!
//! The codebook codec uses it for its length header, so short strings pay one
//! byte for it and payloads up to 16 KiB pay two.

use super::{KernelError, SliceWriter};

/// The largest number of bytes a `usize` can occupy once encoded.
pub const MAX_ENCODED_LEN: usize = (usize::BITS as usize + 6) / 7;

/// Returns how many bytes `value` occupies once encoded.
pub fn encoded_len(value: usize) -> usize {
    let significant_bits = (usize::BITS - value.leading_zeros()).max(1) as usize;
    (significant_bits + 6) / 7
}

/// Encodes `value` into `out`, returning the number of bytes written.
pub fn encode_one(value: usize, out: &mut SliceWriter<'_>) -> Result<usize, KernelError> {
    let mut current_value = value;
    let mut written = 0;
    loop {
        let mut byte = (current_value & 0x7F) as u8;
        current_value >>= 7;
        if current_value != 0 {
            byte |= 0x80;
        }
        out.push(byte)?;
        written += 1;

        if current_value == 0 {
            return Ok(written);
        }
    }
}

/// Decodes one value from the front of `input`, returning `(value, bytes_consumed)`.
pub fn decode_one(input: &[u8]) -> Result<(usize, usize), KernelError> {
    let mut result: usize = 0;
    let mut shift: u32 = 0;

    for (idx, &byte) in input.iter().enumerate() {
        if shift >= usize::BITS {
            return Err(KernelError::VarintOverflow);
        }
        let payload = (byte & 0x7F) as usize;
        // Bits that would be shifted out of the top of a usize.
        if shift > 0 && payload >> (usize::BITS - shift) != 0 {
            return Err(KernelError::VarintOverflow);
        }
        result |= payload << shift;

        if byte & 0x80 == 0 {
            return Ok((result, idx + 1));
        }
        shift += 7;
    }

    Err(KernelError::Truncated)
}
