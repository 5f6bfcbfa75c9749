// projectinfo/src/normalize.rs
//! Bytes → valid UTF-8 text, dropping whatever does not decode.

use std::borrow::Cow;

/// Return `bytes` as text. Valid input is borrowed as-is; otherwise every byte
/// that is not part of a well-formed UTF-8 sequence is discarded and the rest
/// is kept in order. Never fails; fully invalid input yields `""`.
pub fn to_valid_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    tracing::debug!("dropped {dropped} invalid UTF-8 byte(s)");
    Cow::Owned(out)
}

/// Owned convenience wrapper over [`to_valid_text`].
pub fn into_valid_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => to_valid_text(e.as_bytes()).into_owned(),
    }
}
