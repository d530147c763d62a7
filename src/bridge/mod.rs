// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the shorttext library. It sits
// between a managed caller (Python via `ffi::python`, the JVM via `ffi::jni`, or
// plain Rust) and a closed short-text codec reached through `ShortTextCodec`.
//
// Call Flow (both directions):
//
//   1. [Input Adapter (input)]        -> caller value -> `RawInput` | NullInput / EmptyInput
//         |
//   2. [Buffer Manager (scratch)]     -> `ScratchBuffer` of the configured capacity
//         |                              | AllocationFailure
//   3. [Codec Invocation (invoke)]    -> `ProducedLength` | CodecFailure / InvalidCompressedData
//         |
//   4. [Output Adapter (output)]      -> owned `Vec<u8>` / `String`, scratch released
//         |
//   5. [Error Translator (error, ffi)] -> `BridgeError` -> host exception
//
// The scratch buffer is an owning handle: whichever step returns early, it is
// dropped exactly once on the way out. A call keeps no state once it returns.
//
// ====================================================================================
pub mod input;
pub mod invoke;
pub mod output;
pub mod scratch;
pub mod stateless_api;

use std::fmt;

use log::trace;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Operation};
use crate::kernels::CodebookCodec;
use crate::traits::ShortTextCodec;

use input::RawInput;
use scratch::ScratchBuffer;

// --- Low-Level Stateless API (for FFI and testing) ---
pub use stateless_api::{compress, decompress};

/// Where a call currently is. Failure is possible from every stage between
/// `Start` and `Done`, and always ends the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStage {
    Start,
    Validating,
    Allocating,
    Invoking,
    Emitting,
    Done,
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Mediates all traffic between a caller and a codec.
///
/// A `Bridge` holds only its configuration and the codec handle. Both are
/// read-only, so one bridge can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Bridge<C = CodebookCodec> {
    config: BridgeConfig,
    codec: C,
}

impl Default for Bridge<CodebookCodec> {
    fn default() -> Self {
        Self::new(BridgeConfig::default(), CodebookCodec)
    }
}

impl<C: ShortTextCodec> Bridge<C> {
    pub fn new(config: BridgeConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Compresses `text`. `None` stands for a null reference from the caller.
    pub fn compress(&self, text: Option<&str>) -> Result<Vec<u8>, BridgeError> {
        let op = Operation::Compress;
        enter(op, CallStage::Validating);
        let input = RawInput::from_text(text, op)?;

        let (scratch, produced) = self.run(op, &input)?;

        enter(op, CallStage::Emitting);
        let compressed = output::emit_bytes(scratch, produced)?;
        enter(op, CallStage::Done);
        Ok(compressed)
    }

    /// Decompresses `bytes` back into text. `None` stands for a null reference
    /// from the caller.
    pub fn decompress(&self, bytes: Option<&[u8]>) -> Result<String, BridgeError> {
        let op = Operation::Decompress;
        enter(op, CallStage::Validating);
        let input = RawInput::from_bytes(bytes, op)?;

        let (scratch, produced) = self.run(op, &input)?;

        enter(op, CallStage::Emitting);
        let text = output::emit_text(scratch, produced)?;
        enter(op, CallStage::Done);
        Ok(text)
    }

    /// The shared middle of both directions: allocate, then invoke. On failure
    /// the scratch buffer is dropped before the error propagates.
    fn run(
        &self,
        op: Operation,
        input: &RawInput<'_>,
    ) -> Result<(ScratchBuffer, invoke::ProducedLength), BridgeError> {
        enter(op, CallStage::Allocating);
        let mut scratch = ScratchBuffer::allocate(self.config.max_buffer_size, op)?;

        enter(op, CallStage::Invoking);
        let produced = invoke::invoke(&self.codec, op, input, &mut scratch)?;
        Ok((scratch, produced))
    }
}

fn enter(op: Operation, stage: CallStage) {
    trace!("{}: {}", op, stage);
}
