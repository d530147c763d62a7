//! This module defines the seam between the bridge and the codec it drives.

/// A closed short-text codec, driven through two pure functions.
///
/// Both functions write into `dst` and return the number of bytes produced, or a
/// non-positive value on failure. Implementations must never write past
/// `dst.len()`; an output that would not fit is a failure. The bridge treats the
/// codec as a black box and interprets nothing but the returned integer.
pub trait ShortTextCodec: Send + Sync {
    /// Compresses the UTF-8 bytes in `src` into `dst`.
    fn compress(&self, src: &[u8], dst: &mut [u8]) -> i32;

    /// Decompresses `src` into `dst`. The produced bytes are expected to be UTF-8.
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> i32;
}

impl<C: ShortTextCodec + ?Sized> ShortTextCodec for &C {
    fn compress(&self, src: &[u8], dst: &mut [u8]) -> i32 {
        (**self).compress(src, dst)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> i32 {
        (**self).decompress(src, dst)
    }
}
