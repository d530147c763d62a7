// In: src/bridge/stateless_api.rs

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::kernels::CodebookCodec;

/// Compresses `text` with the default codec and the build-time buffer ceiling.
pub fn compress(text: &str) -> Result<Vec<u8>, BridgeError> {
    Bridge::<CodebookCodec>::default().compress(Some(text))
}

/// Decompresses `bytes` produced by [`compress`] back into text.
pub fn decompress(bytes: &[u8]) -> Result<String, BridgeError> {
    Bridge::<CodebookCodec>::default().decompress(Some(bytes))
}
