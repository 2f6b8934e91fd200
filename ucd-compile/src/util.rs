//! Small helpers that sit below the core passes.
//!
//! Encoding a codepoint sequence to UTF-8 is assumed to be a primitive the
//! runtime already has; this just leans on `char`'s own encoder rather than
//! reimplementing it.

use ucd_parse::Codepoint;

/// Encode a sequence of codepoints as a single UTF-8 byte string.
///
/// A codepoint with no scalar value (a lone surrogate) is dropped with a
/// diagnostic; this should never happen for codepoints reachable from
/// `UnicodeData.txt` decomposition or case mapping fields.
pub fn encode_utf8(codepoints: &[Codepoint]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(codepoints.len() * 2);
    let mut scratch = [0u8; 4];
    for &cp in codepoints {
        match cp.scalar() {
            Some(ch) => {
                let s = ch.encode_utf8(&mut scratch);
                buf.extend_from_slice(s.as_bytes());
            }
            None => {
                eprintln!(
                    "warning: codepoint {} has no scalar value, skipping \
                     in UTF-8 encoding", cp);
            }
        }
    }
    buf
}
