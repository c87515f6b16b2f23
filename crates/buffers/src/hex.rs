//! Hex digit codec used by `\u` escapes.

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Decodes one hex digit (case-insensitive).
///
/// ```
/// use json_doc_buffers::hex;
///
/// assert_eq!(hex::decode(b'7'), Some(7));
/// assert_eq!(hex::decode(b'b'), Some(11));
/// assert_eq!(hex::decode(b'F'), Some(15));
/// assert_eq!(hex::decode(b'g'), None);
/// ```
#[inline]
pub fn decode(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Encodes a byte as two uppercase hex digits, high nibble first.
#[inline]
pub fn encode(byte: u8) -> [u8; 2] {
    [DIGITS[(byte >> 4) as usize], DIGITS[(byte & 0x0F) as usize]]
}

/// Decodes exactly four hex digits into a UTF-16 code unit.
///
/// Returns `None` if fewer than four bytes are given or any of the first four
/// is not a hex digit. Bytes past the fourth are ignored.
pub fn decode_u16(bytes: &[u8]) -> Option<u16> {
    let digits = bytes.get(..4)?;
    digits.iter().try_fold(0u16, |acc, &b| {
        decode(b).map(|d| (acc << 4) | u16::from(d))
    })
}
