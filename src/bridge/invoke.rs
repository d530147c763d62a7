// In: src/bridge/invoke.rs

//! Codec Invocation: the single synchronous call into the codec.
//!
//! The codec speaks in sentinel-coded integers. This step is the only place
//! that reads them; past it, success is a `ProducedLength` and failure is a
//! `BridgeError`. There is no retry.

use log::trace;

use super::input::RawInput;
use super::scratch::ScratchBuffer;
use crate::error::{BridgeError, Operation};
use crate::traits::ShortTextCodec;

/// The number of valid bytes the codec wrote. Always in `1..=capacity` of the
/// scratch buffer it was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducedLength(pub(super) usize);

impl ProducedLength {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Runs `op` on `input`, writing into `scratch`.
///
/// A return of zero or less becomes `CodecFailure` when compressing and
/// `InvalidCompressedData` when decompressing. A return larger than the scratch
/// capacity is classified the same way, so the buffer is never read past its end.
pub fn invoke<C: ShortTextCodec + ?Sized>(
    codec: &C,
    op: Operation,
    input: &RawInput<'_>,
    scratch: &mut ScratchBuffer,
) -> Result<ProducedLength, BridgeError> {
    let capacity = scratch.capacity();
    let returned = match op {
        Operation::Compress => codec.compress(input.as_bytes(), scratch.as_mut_slice()),
        Operation::Decompress => codec.decompress(input.as_bytes(), scratch.as_mut_slice()),
    };

    let produced = usize::try_from(returned)
        .ok()
        .filter(|&len| len > 0 && len <= capacity)
        .ok_or(BridgeError::codec_rejected(op))?;

    trace!("{} produced {} of {} bytes", op, produced, capacity);
    Ok(ProducedLength(produced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// A codec that ignores its input and reports a fixed result.
    struct FixedReturn(i32);

    impl ShortTextCodec for FixedReturn {
        fn compress(&self, _src: &[u8], _dst: &mut [u8]) -> i32 {
            self.0
        }

        fn decompress(&self, _src: &[u8], _dst: &mut [u8]) -> i32 {
            self.0
        }
    }

    fn run(codec: FixedReturn, op: Operation, capacity: usize) -> Result<ProducedLength, BridgeError> {
        let input = RawInput::from_bytes(Some(&b"payload"[..]), op).unwrap();
        let mut scratch = ScratchBuffer::allocate(capacity, op).unwrap();
        invoke(&codec, op, &input, &mut scratch)
    }

    #[test]
    fn test_positive_return_is_produced_length() {
        let produced = run(FixedReturn(5), Operation::Compress, 16).unwrap();
        assert_eq!(produced.get(), 5);
    }

    #[test]
    fn test_non_positive_return_fails_by_direction() {
        for sentinel in [0, -1, i32::MIN] {
            let err = run(FixedReturn(sentinel), Operation::Compress, 16).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CodecFailure);

            let err = run(FixedReturn(sentinel), Operation::Decompress, 16).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCompressedData);
        }
    }

    #[test]
    fn test_return_beyond_capacity_is_rejected() {
        let err = run(FixedReturn(17), Operation::Compress, 16).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);

        let err = run(FixedReturn(17), Operation::Decompress, 16).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCompressedData);

        assert_eq!(run(FixedReturn(16), Operation::Compress, 16).unwrap().get(), 16);
    }
}
