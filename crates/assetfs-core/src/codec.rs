//! Payload codec.
//!
//! File content is gzip-compressed, base64-encoded (standard alphabet,
//! padded) and wrapped to [`LINE_WIDTH`] columns so generated artifacts
//! stay readable and diff line by line. The wrapping is cosmetic:
//! [`decode`] ignores all ASCII whitespace.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::codec;
//!
//! let payload = codec::encode(b"hello").unwrap();
//! assert!(payload.lines().all(|line| line.len() <= codec::LINE_WIDTH));
//! assert_eq!(codec::decode(&payload).unwrap(), b"hello");
//!
//! // Empty content round-trips through an empty payload.
//! assert_eq!(codec::encode(b"").unwrap(), "");
//! assert!(codec::decode("").unwrap().is_empty());
//! ```

use crate::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{self, Read, Write};

/// Maximum number of payload characters per line.
pub const LINE_WIDTH: usize = 80;

/// Compresses and encodes `data` into a wrapped text payload.
///
/// Every line, including the last, ends with `\n`. Empty input produces an
/// empty payload.
///
/// # Errors
///
/// Returns the compressor's I/O error if compression fails.
pub fn encode(data: &[u8]) -> io::Result<String> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    Ok(wrap(&STANDARD.encode(compressed), LINE_WIDTH))
}

/// Decodes a payload produced by [`encode`].
///
/// Whitespace anywhere in the payload is ignored. An empty payload decodes
/// to empty content without running the decompressor.
///
/// # Errors
///
/// Returns `Error::Decode` if the payload is not valid base64 or does not
/// hold a valid gzip stream.
pub fn decode(payload: &str) -> Result<Vec<u8>> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Ok(Vec::new());
    }

    let compressed = STANDARD.decode(&compact).map_err(|e| Error::Decode {
        message: format!("invalid base64: {e}"),
    })?;

    let mut data = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut data)
        .map_err(|e| Error::Decode {
            message: format!("invalid gzip stream: {e}"),
        })?;

    Ok(data)
}

/// Splits ASCII `text` into `width`-column lines, each ending in `\n`.
fn wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / width + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(width.min(rest.len()));
        out.push_str(line);
        out.push('\n');
        rest = tail;
    }
    out
}
