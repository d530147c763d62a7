//! This module contains the codebook codec: a prefix, byte-oriented compressor
//! for short natural-language strings.
//!
//! Frequent English fragments are replaced by one-byte codes from a static
//! codebook; everything else is carried through verbatim. The format is:
//!
//! ```text
//! [LEB128 decoded length] [token]*
//!
//! token := 0x00 ..= N-1          codebook entry (N = CODEBOOK.len())
//!        | 0xFE b                one verbatim byte
//!        | 0xFF n b0 .. bn       n + 1 verbatim bytes (2 ..= 256)
//! ```
//!
//! Codes `N ..= 0xFD` are reserved and rejected by the decoder. The length
//! header makes every truncation of a valid payload detectable.

use std::sync::OnceLock;

use hashbrown::HashMap;

use super::{leb128, to_sentinel, KernelError, SliceWriter};
use crate::traits::ShortTextCodec;

//==================================================================================
// 1. Format Constants
//==================================================================================

/// Escape for a single verbatim byte.
pub const VERBATIM_BYTE: u8 = 0xFE;
/// Escape for a run of 2 to 256 verbatim bytes.
pub const VERBATIM_RUN: u8 = 0xFF;
/// Longest run a single `VERBATIM_RUN` token can carry.
pub const MAX_VERBATIM_RUN: usize = 256;

/// Ordered by rough frequency in English prose; the index is the code.
#[rustfmt::skip]
pub const CODEBOOK: &[&str] = &[
    " ", "e", "t", "a", "o", "i", "n", "s", "r", "h", "l", "d", "c", "u", "m", "f", "p",
    "g", "w", "y", "b", "v", "k", "x", "j", "q", "z", ".", ",", "!", "?", "'", "\"", "-",
    ":", ";", "/", "(", ")", "\n", "\r\n", "\t", "0", "1", "2", "3", "4", "5", "6", "7",
    "8", "9", "T", "I", "A", "S", "H", "W", "C", "M", "B", "P", "D", "R", "L", "N", "E",
    "F", "G", "O", "the", " the ", "The ", "th", "he", "in", "er", "an", "re", "on", "at",
    "en", "nd", "ti", "es", "or", "te", "of", "ed", "is", "it", "al", "ar", "st", "to",
    "nt", "ng", "se", "ha", "as", "ou", "io", "le", "ve", "co", "me", "de", "hi", "ri",
    "ro", "ic", "ne", "ea", "ra", "ce", "li", "ch", "ll", "be", "ma", "si", "om", "ur",
    "ca", "el", "ta", "la", "ns", "di", "fo", "ho", "pe", "ec", "pr", "no", "ct", "us",
    "ac", "ot", "il", "tr", "ly", "nc", "et", "ut", "ss", "so", "rs", "un", "lo", "wa",
    "ge", "ie", "wh", "ee", "wi", "em", "ad", "ol", " a ", " an ", " and ", " of ", " to ",
    " in ", " is ", " it ", " that ", " for ", " with ", " on ", " as ", " be ", " by ",
    " this ", " you ", " are ", " was ", " from ", "ing", "ion", "tion", "ation", "ent",
    "ment", "ness", "able", "ous", "ive", "ight", "ould", "ther", "here", "ere", "ver",
    "all", "ter", "ate", "ers", "est", "his", "our", "ell", ". ", ", ", "? ", "! ", ": ",
    "; ", " - ", "http://", "https://", "www.", ".com", ".org", ".net", "://", "  ",
    "    ", "e ", "s ", "t ", "d ", "y ", "n ", "r ", "o ",
];

/// Longest codebook entry, in bytes.
const MAX_ENTRY_LEN: usize = 8;

static INDEX: OnceLock<HashMap<&'static [u8], u8>> = OnceLock::new();

/// Fragment -> code lookup, built on first use and shared read-only afterwards.
fn index() -> &'static HashMap<&'static [u8], u8> {
    INDEX.get_or_init(|| {
        CODEBOOK
            .iter()
            .enumerate()
            .map(|(code, entry)| (entry.as_bytes(), code as u8))
            .collect()
    })
}

/// Finds the longest codebook entry that prefixes `rest`.
fn longest_match(rest: &[u8]) -> Option<(u8, usize)> {
    let index = index();
    (1..=rest.len().min(MAX_ENTRY_LEN))
        .rev()
        .find_map(|len| index.get(&rest[..len]).map(|&code| (code, len)))
}

//==================================================================================
// 2. Core Logic
//==================================================================================

fn flush_verbatim(pending: &[u8], out: &mut SliceWriter<'_>) -> Result<(), KernelError> {
    match pending.len() {
        0 => Ok(()),
        1 => {
            out.push(VERBATIM_BYTE)?;
            out.push(pending[0])
        }
        len => {
            out.push(VERBATIM_RUN)?;
            out.push((len - 1) as u8)?;
            out.extend(pending)
        }
    }
}

/// Writes the header and token stream for `src`. With `use_codebook` off every
/// byte goes out verbatim in maximal runs.
fn encode_tokens(src: &[u8], dst: &mut [u8], use_codebook: bool) -> Result<usize, KernelError> {
    let mut out = SliceWriter::new(dst);
    leb128::encode_one(src.len(), &mut out)?;

    let mut pos = 0;
    let mut pending_start = 0;
    while pos < src.len() {
        let hit = if use_codebook { longest_match(&src[pos..]) } else { None };
        match hit {
            Some((code, len)) => {
                flush_verbatim(&src[pending_start..pos], &mut out)?;
                out.push(code)?;
                pos += len;
                pending_start = pos;
            }
            None => {
                pos += 1;
                if pos - pending_start == MAX_VERBATIM_RUN {
                    flush_verbatim(&src[pending_start..pos], &mut out)?;
                    pending_start = pos;
                }
            }
        }
    }
    flush_verbatim(&src[pending_start..], &mut out)?;

    Ok(out.position())
}

/// Compresses `src` into `dst`, returning the number of bytes written.
///
/// Codebook hits separated by short verbatim spans can cost more than carrying
/// the whole input verbatim. When the greedy stream exceeds
/// `CodebookCodec::max_compressed_len` (or does not fit `dst`), the all-verbatim
/// encoding is written instead, so the output never exceeds that bound.
pub fn encode(src: &[u8], dst: &mut [u8]) -> Result<usize, KernelError> {
    if src.is_empty() {
        return Err(KernelError::InvalidLength(0));
    }

    let bound = CodebookCodec::max_compressed_len(src.len());
    match encode_tokens(src, dst, true) {
        Ok(len) if len <= bound => Ok(len),
        Ok(_) | Err(KernelError::OutputOverflow) => encode_tokens(src, dst, false),
        Err(e) => Err(e),
    }
}

/// Decompresses `src` into `dst`, returning the number of bytes written.
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, KernelError> {
    let (declared, header_len) = leb128::decode_one(src)?;
    if declared == 0 || declared > dst.len() {
        return Err(KernelError::InvalidLength(declared));
    }

    // Bounding the writer by the declared length rejects payloads that overrun it.
    let mut out = SliceWriter::new(&mut dst[..declared]);
    let mut pos = header_len;
    while pos < src.len() {
        let token = src[pos];
        pos += 1;
        match token {
            VERBATIM_BYTE => {
                let byte = *src.get(pos).ok_or(KernelError::Truncated)?;
                out.push(byte)?;
                pos += 1;
            }
            VERBATIM_RUN => {
                let len = *src.get(pos).ok_or(KernelError::Truncated)? as usize + 1;
                let run = src.get(pos + 1..pos + 1 + len).ok_or(KernelError::Truncated)?;
                out.extend(run)?;
                pos += 1 + len;
            }
            code => {
                let entry = CODEBOOK
                    .get(code as usize)
                    .ok_or(KernelError::ReservedCode(code))?;
                out.extend(entry.as_bytes())?;
            }
        }
    }

    if out.position() != declared {
        return Err(KernelError::LengthMismatch {
            declared,
            decoded: out.position(),
        });
    }
    Ok(declared)
}

//==================================================================================
// 3. Codec Facade
//==================================================================================

/// The default codec driven by the bridge.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodebookCodec;

impl CodebookCodec {
    /// Upper bound on the compressed size of any `input_len`-byte input: the
    /// header plus every byte carried verbatim in maximal runs. `encode` falls
    /// back to exactly that encoding, so the bound is reached but never exceeded.
    pub fn max_compressed_len(input_len: usize) -> usize {
        leb128::encoded_len(input_len) + input_len + 2 * input_len.div_ceil(MAX_VERBATIM_RUN)
    }

    /// Largest input length whose worst-case compressed size fits into `capacity`.
    pub fn max_input_for_capacity(capacity: usize) -> usize {
        // max_compressed_len is monotonic, so a binary search finds the boundary.
        let (mut lo, mut hi) = (0usize, capacity);
        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            if Self::max_compressed_len(mid) <= capacity {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }
}

impl ShortTextCodec for CodebookCodec {
    fn compress(&self, src: &[u8], dst: &mut [u8]) -> i32 {
        to_sentinel(encode(src, dst))
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> i32 {
        to_sentinel(decode(src, dst))
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn compress_vec(text: &str) -> Vec<u8> {
        let mut dst = vec![0u8; CodebookCodec::max_compressed_len(text.len())];
        let len = encode(text.as_bytes(), &mut dst).unwrap();
        dst.truncate(len);
        dst
    }

    fn decompress_vec(bytes: &[u8], capacity: usize) -> Result<Vec<u8>, KernelError> {
        let mut dst = vec![0u8; capacity];
        let len = decode(bytes, &mut dst)?;
        dst.truncate(len);
        Ok(dst)
    }

    #[test]
    fn test_codebook_fits_code_space() {
        assert!(CODEBOOK.len() < VERBATIM_BYTE as usize);
        assert!(CODEBOOK.iter().all(|e| !e.is_empty() && e.len() <= MAX_ENTRY_LEN));
        // Every entry must map back to its own code.
        assert_eq!(index().len(), CODEBOOK.len());
    }

    #[test]
    fn test_known_encoding() {
        // Header 2, then "H" and "i" as single codes.
        assert_eq!(compress_vec("Hi"), vec![2, 56, 5]);
    }

    #[test]
    fn test_roundtrip_simple_text() {
        let original = "Hello, World!";
        let compressed = compress_vec(original);
        assert_eq!(compressed.len(), 10);
        assert_eq!(decompress_vec(&compressed, 64).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_roundtrip_prose_compresses() {
        let original = "The quick brown fox jumps over the lazy dog. ".repeat(3);
        let compressed = compress_vec(&original);
        assert!(compressed.len() * 10 < original.len() * 8);
        assert_eq!(decompress_vec(&compressed, 1024).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_roundtrip_non_ascii_uses_verbatim_runs() {
        let original = "Hello \u{4e16}\u{754c} \u{1F30D} \u{41f}\u{440}\u{438}\u{432}\u{435}\u{442}";
        let compressed = compress_vec(original);
        assert!(compressed.contains(&VERBATIM_RUN));
        assert_eq!(decompress_vec(&compressed, 256).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_long_verbatim_input_splits_runs() {
        let original: Vec<u8> = std::iter::repeat([0xC3u8, 0xA9]).take(300).flatten().collect();
        let mut dst = vec![0u8; CodebookCodec::max_compressed_len(original.len())];
        let len = encode(&original, &mut dst).unwrap();
        assert!(len <= CodebookCodec::max_compressed_len(original.len()));
        assert_eq!(decompress_vec(&dst[..len], 1024).unwrap(), original);
    }

    #[test]
    fn test_alternating_hits_and_escapes_stay_within_bound() {
        // A codebook hit between lone escaped bytes is the costliest greedy shape.
        let patterns = ["aJ", "xQ", "a\u{e9}", "eZ", "J a", "\u{4e16}e", "Q"];
        for pattern in patterns {
            for repeats in [1, 2, 3, 10, 100, 255, 1_000] {
                let original = pattern.repeat(repeats);
                let bound = CodebookCodec::max_compressed_len(original.len());
                let mut dst = vec![0u8; bound];
                let len = encode(original.as_bytes(), &mut dst).unwrap();
                assert!(len <= bound, "{:?} x{}: {} > {}", pattern, repeats, len, bound);
                assert_eq!(
                    decompress_vec(&dst[..len], original.len()).unwrap(),
                    original.as_bytes()
                );
            }
        }
    }

    #[test]
    fn test_fallback_output_is_all_verbatim() {
        // 1. Arrange
        let original = "aJ".repeat(100);
        let mut dst = vec![0u8; CodebookCodec::max_compressed_len(original.len())];

        // 2. Act
        let len = encode(original.as_bytes(), &mut dst).unwrap();

        // 3. Assert: header 200 (2 bytes), then one 200-byte run.
        assert_eq!(len, 2 + 2 + 200);
        assert_eq!(&dst[2..4], &[VERBATIM_RUN, 199]);
        assert_eq!(&dst[4..len], original.as_bytes());
    }

    #[test]
    fn test_random_mixed_text_stays_within_bound() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let alphabet = ['a', 'e', 't', ' ', 'J', 'Q', 'Z', '\u{e9}', '\u{4e16}', '\u{1F30D}', '.'];
        let mut rng = StdRng::seed_from_u64(0xB0_0D);
        for _ in 0..2_000 {
            let chars = rng.random_range(1..300);
            let original: String = (0..chars)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect();
            let bound = CodebookCodec::max_compressed_len(original.len());
            let mut dst = vec![0u8; bound];
            let len = encode(original.as_bytes(), &mut dst).unwrap();
            assert!(len <= bound);
            assert_eq!(
                decompress_vec(&dst[..len], original.len()).unwrap(),
                original.as_bytes()
            );
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        let original = "Testing idempotency of compression";
        assert_eq!(compress_vec(original), compress_vec(original));
    }

    #[test]
    fn test_encode_into_short_buffer_fails() {
        let mut dst = [0u8; 3];
        assert_eq!(
            encode(b"Hello, World!", &mut dst),
            Err(KernelError::OutputOverflow)
        );
    }

    #[test]
    fn test_encode_empty_input_fails() {
        let mut dst = [0u8; 8];
        assert!(encode(b"", &mut dst).is_err());
    }

    #[test]
    fn test_decode_rejects_reserved_code() {
        let reserved = CODEBOOK.len() as u8;
        assert_eq!(
            decompress_vec(&[1, reserved], 16),
            Err(KernelError::ReservedCode(reserved))
        );
    }

    #[test]
    fn test_decode_rejects_every_truncation() {
        let compressed = compress_vec("Fourth string with unicode: \u{4f60}\u{597d}");
        for cut in 0..compressed.len() {
            assert!(
                decompress_vec(&compressed[..cut], 1024).is_err(),
                "truncation to {} bytes was accepted",
                cut
            );
        }
    }

    #[test]
    fn test_decode_rejects_zero_length_header() {
        assert_eq!(decompress_vec(&[0], 16), Err(KernelError::InvalidLength(0)));
    }

    #[test]
    fn test_decode_rejects_header_beyond_capacity() {
        let compressed = compress_vec("a fairly ordinary sentence");
        assert_eq!(
            decompress_vec(&compressed, 8),
            Err(KernelError::InvalidLength(26))
        );
    }

    #[test]
    fn test_decode_rejects_overrun_of_declared_length() {
        // Declares 1 byte, carries 2.
        let err = decompress_vec(&[1, 3, 3], 16).unwrap_err();
        assert_eq!(err, KernelError::OutputOverflow);
    }

    #[test]
    fn test_decode_all_ff_is_truncated() {
        assert!(decompress_vec(&[0xFF; 10], 65_536).is_err());
    }

    #[test]
    fn test_max_input_for_capacity_is_tight() {
        let capacity = 65_536;
        let max_input = CodebookCodec::max_input_for_capacity(capacity);
        assert!(CodebookCodec::max_compressed_len(max_input) <= capacity);
        assert!(CodebookCodec::max_compressed_len(max_input + 1) > capacity);
    }

    #[test]
    fn test_codec_facade_uses_sentinels() {
        let codec = CodebookCodec;
        let mut dst = [0u8; 32];
        assert_eq!(codec.compress(b"Hi", &mut dst), 3);
        assert!(codec.decompress(&[0xFE], &mut dst) <= 0);
    }
}
