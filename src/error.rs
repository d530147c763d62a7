// In: src/error.rs

//! This module defines the single, unified error type for the shorttext bridge.
//! It uses the `thiserror` crate for the caller-visible messages, and exposes the
//! coarse `ErrorKind` / `ErrorCategory` views the FFI front ends translate from.
//!
//! Every failed call carries exactly one variant. The messages are fixed per
//! kind and per direction so callers can match on them.

use std::fmt;

use thiserror::Error;

//==================================================================================
// I. Call Direction
//==================================================================================

/// The direction of a bridge call. It selects the wording of the error messages
/// and decides how a failed codec return is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Compress,
    Decompress,
}

impl Operation {
    /// What the caller handed in, as named in error messages.
    pub(crate) fn subject(self) -> &'static str {
        match self {
            Operation::Compress => "text",
            Operation::Decompress => "compressed data",
        }
    }

    /// The scratch buffer's role, as named in error messages.
    pub(crate) fn buffer_role(self) -> &'static str {
        match self {
            Operation::Compress => "compression",
            Operation::Decompress => "decompression",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Compress => f.write_str("compress"),
            Operation::Decompress => f.write_str("decompress"),
        }
    }
}

//==================================================================================
// II. The Error Type
//==================================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The caller passed no value at all.
    #[error("Input {} cannot be null", .0.subject())]
    NullInput(Operation),

    /// The caller passed a value whose byte length is zero.
    #[error("Input {} cannot be empty", .0.subject())]
    EmptyInput(Operation),

    /// The scratch buffer or the bridge-side result copy could not be obtained.
    #[error("Failed to allocate {} buffer", .0.buffer_role())]
    AllocationFailure(Operation),

    /// The compression routine reported failure (non-positive return).
    #[error("Compression failed")]
    CodecFailure,

    /// The decompression routine rejected its input, or its output was not text.
    #[error("Decompression failed - invalid compressed data")]
    InvalidCompressedData,
}

/// The five failure kinds, stripped of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullInput,
    EmptyInput,
    AllocationFailure,
    CodecFailure,
    InvalidCompressedData,
}

/// The caller-visible class of a failure. Front ends map each category onto one
/// exception type of their host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input from the caller, including corrupt compressed payloads.
    InvalidArgument,
    /// Memory could not be obtained.
    ResourceExhaustion,
    /// The codec failed on input it should have accepted.
    InternalFailure,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::NullInput(_) => ErrorKind::NullInput,
            BridgeError::EmptyInput(_) => ErrorKind::EmptyInput,
            BridgeError::AllocationFailure(_) => ErrorKind::AllocationFailure,
            BridgeError::CodecFailure => ErrorKind::CodecFailure,
            BridgeError::InvalidCompressedData => ErrorKind::InvalidCompressedData,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind().category()
    }

    /// The error a non-positive codec return translates to for `op`.
    pub(crate) fn codec_rejected(op: Operation) -> Self {
        match op {
            Operation::Compress => BridgeError::CodecFailure,
            Operation::Decompress => BridgeError::InvalidCompressedData,
        }
    }
}

impl ErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorKind::NullInput | ErrorKind::EmptyInput | ErrorKind::InvalidCompressedData => {
                ErrorCategory::InvalidArgument
            }
            ErrorKind::AllocationFailure => ErrorCategory::ResourceExhaustion,
            ErrorKind::CodecFailure => ErrorCategory::InternalFailure,
        }
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

#[cfg(feature = "python")]
impl From<BridgeError> for pyo3::PyErr {
    fn from(err: BridgeError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyValueError};

        let message = err.to_string();
        match err.category() {
            ErrorCategory::InvalidArgument => PyValueError::new_err(message),
            ErrorCategory::ResourceExhaustion => PyMemoryError::new_err(message),
            ErrorCategory::InternalFailure => PyRuntimeError::new_err(message),
        }
    }
}
