//! UTF-8 sequence validation and scalar encoding.
//!
//! The decoder enforces the structural rules of RFC 3629: the lead byte fixes
//! the sequence length, every trailing byte matches `10xxxxxx`, overlong forms
//! are rejected, and so are surrogate code points and anything above U+10FFFF.

use thiserror::Error;

use crate::Writer;

/// Reasons a byte sequence is not a UTF-8 scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Utf8Error {
    /// The input ends before the sequence announced by the lead byte.
    #[error("truncated UTF-8 sequence")]
    Truncated,
    /// Bad lead byte, bad continuation byte, overlong form, surrogate or
    /// out-of-range code point.
    #[error("invalid UTF-8 sequence")]
    Invalid,
}

/// Returns `true` for bytes of the form `10xxxxxx`.
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Length of the sequence introduced by `lead`, or `None` if `lead` cannot
/// start a sequence.
#[inline]
pub fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Decodes the scalar at the start of `bytes`.
///
/// Returns the code point and the number of bytes it occupies.
///
/// ```
/// use json_doc_buffers::utf8::{decode, Utf8Error};
///
/// assert_eq!(decode(&[0xC2, 0xA9]), Ok((0xA9, 2)));
/// assert_eq!(decode(&[0xC2]), Err(Utf8Error::Truncated));
/// assert_eq!(decode(&[0xC0, 0x80]), Err(Utf8Error::Invalid));
/// ```
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), Utf8Error> {
    let lead = *bytes.first().ok_or(Utf8Error::Truncated)?;
    let len = sequence_len(lead).ok_or(Utf8Error::Invalid)?;
    if len == 1 {
        return Ok((u32::from(lead), 1));
    }
    let mut code = u32::from(lead) & (0x7F >> len);
    for i in 1..len {
        // A bad byte before the end of input is reported as invalid, not truncated.
        let b = *bytes.get(i).ok_or(Utf8Error::Truncated)?;
        if !is_continuation(b) {
            return Err(Utf8Error::Invalid);
        }
        code = (code << 6) | u32::from(b & 0x3F);
    }
    let valid = match len {
        2 => code >= 0x80,
        3 => code >= 0x800 && !(0xD800..=0xDFFF).contains(&code),
        _ => (0x1_0000..=0x10_FFFF).contains(&code),
    };
    if valid {
        Ok((code, len))
    } else {
        Err(Utf8Error::Invalid)
    }
}

/// Writes `scalar` as UTF-8 and returns the number of bytes written.
///
/// Surrogate code points and values above U+10FFFF are not scalars; nothing
/// is written for them and `0` is returned.
pub fn write_scalar(writer: &mut Writer, scalar: u32) -> usize {
    match scalar {
        0..=0x7F => {
            writer.u8(scalar as u8);
            1
        }
        0x80..=0x7FF => {
            writer.buf(&[0xC0 | (scalar >> 6) as u8, 0x80 | (scalar & 0x3F) as u8]);
            2
        }
        0xD800..=0xDFFF => 0,
        0x800..=0xFFFF => {
            writer.buf(&[
                0xE0 | (scalar >> 12) as u8,
                0x80 | ((scalar >> 6) & 0x3F) as u8,
                0x80 | (scalar & 0x3F) as u8,
            ]);
            3
        }
        0x1_0000..=0x10_FFFF => {
            writer.buf(&[
                0xF0 | (scalar >> 18) as u8,
                0x80 | ((scalar >> 12) & 0x3F) as u8,
                0x80 | ((scalar >> 6) & 0x3F) as u8,
                0x80 | (scalar & 0x3F) as u8,
            ]);
            4
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(scalar: u32) -> Vec<u8> {
        let mut writer = Writer::with_alloc_size(8);
        write_scalar(&mut writer, scalar);
        writer.flush()
    }

    #[test]
    fn write_scalar_matches_std() {
        for c in ['A', '\u{7F}', '\u{80}', '©', '\u{7FF}', '\u{800}', '€', '\u{FFFF}', '\u{1D11E}', '\u{10FFFF}'] {
            let mut expected = [0u8; 4];
            assert_eq!(encoded(c as u32), c.encode_utf8(&mut expected).as_bytes());
        }
    }

    #[test]
    fn write_scalar_skips_non_scalars() {
        assert!(encoded(0xD800).is_empty());
        assert!(encoded(0xDFFF).is_empty());
        assert!(encoded(0x11_0000).is_empty());
    }

    #[test]
    fn decode_valid_sequences() {
        assert_eq!(decode(b"a"), Ok((0x61, 1)));
        assert_eq!(decode("€".as_bytes()), Ok((0x20AC, 3)));
        assert_eq!(decode("\u{1D11E}x".as_bytes()), Ok((0x1D11E, 4)));
        assert_eq!(decode("\u{10FFFF}".as_bytes()), Ok((0x10FFFF, 4)));
    }

    #[test]
    fn decode_rejects_overlong() {
        assert_eq!(decode(&[0xC1, 0xBF]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xE0, 0x9F, 0xBF]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xF0, 0x8F, 0xBF, 0xBF]), Err(Utf8Error::Invalid));
    }

    #[test]
    fn decode_rejects_surrogates_and_out_of_range() {
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xED, 0xBF, 0xBF]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80]), Err(Utf8Error::Invalid));
    }

    #[test]
    fn decode_rejects_bad_lead_and_continuation() {
        assert_eq!(decode(&[0x80]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xF8, 0x80, 0x80, 0x80]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xC2, 0x41]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xE2, 0x82, 0xC0]), Err(Utf8Error::Invalid));
        assert_eq!(decode(&[0xE2, b'"']), Err(Utf8Error::Invalid));
    }

    #[test]
    fn decode_truncated() {
        assert_eq!(decode(&[]), Err(Utf8Error::Truncated));
        assert_eq!(decode(&[0xE2, 0x82]), Err(Utf8Error::Truncated));
        assert_eq!(decode(&[0xF0, 0x9D, 0x84]), Err(Utf8Error::Truncated));
    }
}
