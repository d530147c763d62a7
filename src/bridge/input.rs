// In: src/bridge/input.rs

//! The Input Adapter: turns a caller-supplied value into a validated `RawInput`.
//!
//! Null and empty values are rejected here, before the Buffer Manager allocates
//! anything. Content is otherwise opaque.

use crate::error::{BridgeError, Operation};

/// An immutable view over caller-owned bytes. The bridge never owns it; the
/// borrow ends with the call.
#[derive(Debug, Clone, Copy)]
pub struct RawInput<'a> {
    bytes: &'a [u8],
}

impl<'a> RawInput<'a> {
    /// Accepts the UTF-8 bytes of a caller string.
    pub fn from_text(text: Option<&'a str>, op: Operation) -> Result<Self, BridgeError> {
        Self::from_bytes(text.map(str::as_bytes), op)
    }

    /// Accepts a caller byte array.
    pub fn from_bytes(bytes: Option<&'a [u8]>, op: Operation) -> Result<Self, BridgeError> {
        let bytes = bytes.ok_or(BridgeError::NullInput(op))?;
        if bytes.is_empty() {
            return Err(BridgeError::EmptyInput(op));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the borrowed input has zero length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
