//! Transport token encoding for the PlantUML text protocol.
//!
//! PlantUML servers accept diagram source as a URL path segment: the source
//! bytes are compressed with a raw deflate stream (no zlib or gzip framing)
//! and the compressed bytes are encoded with PlantUML's own base64 alphabet.
//! The alphabet differs from RFC 4648 (it starts at `'0'` and ends with
//! `'-'` and `'_'`) and emits no padding, so tokens are URL-safe as-is.
//! Standard base64 would be rejected by the server, which is why this
//! encoder cannot be replaced with the `base64` crate.

use std::io::Write;

use flate2::Compression;
use flate2::write::DeflateEncoder;

/// PlantUML base64 alphabet (index 0 = `'0'`, index 63 = `'_'`).
const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Encode diagram source into a URL-safe transport token.
///
/// Deterministic over the input text; empty input produces an empty token.
/// Encoding never fails: the deflate sink is an in-memory buffer.
#[must_use]
pub fn encode_diagram_source(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }

    encode_base64(&deflate(source.as_bytes()))
}

/// Compress bytes as a raw deflate stream at best compression.
fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    if encoder.write_all(data).is_err() {
        return Vec::new();
    }
    encoder.finish().unwrap_or_default()
}

/// Encode bytes with the PlantUML base64 alphabet.
///
/// Standard base64 bit packing (3 bytes to 4 characters), except that no
/// padding is emitted: a trailing 1-byte group produces 2 characters and a
/// trailing 2-byte group produces 3.
fn encode_base64(data: &[u8]) -> String {
    let mut token = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);

        token.push(ALPHABET[usize::from(b1 >> 2)] as char);
        token.push(ALPHABET[usize::from(((b1 & 0x03) << 4) | (b2 >> 4))] as char);
        if chunk.len() > 1 {
            token.push(ALPHABET[usize::from(((b2 & 0x0F) << 2) | (b3 >> 6))] as char);
        }
        if chunk.len() > 2 {
            token.push(ALPHABET[usize::from(b3 & 0x3F)] as char);
        }
    }

    token
}
