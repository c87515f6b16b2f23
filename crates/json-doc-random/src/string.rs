//! Random strings mixing the character classes a JSON string codec has to
//! get right.

use rand::Rng;

/// Random string of up to `max_len` scalars drawn from printable ASCII
/// (escape-relevant `"`, `\` and `/` included), control characters, the
/// BMP outside the surrogate block and the astral planes.
pub fn random_string<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(random_char(rng));
    }
    out
}

fn random_char<R: Rng>(rng: &mut R) -> char {
    let code = match rng.gen_range(0..20) {
        0..=11 => rng.gen_range(0x20..=0x7E),
        12 => [0x22, 0x5C, 0x2F][rng.gen_range(0..3)],
        13..=14 => {
            if rng.gen_bool(0.9) {
                rng.gen_range(0x00..=0x1F)
            } else {
                0x7F
            }
        }
        15..=17 => {
            if rng.gen_bool(0.5) {
                rng.gen_range(0x80..0xD800)
            } else {
                rng.gen_range(0xE000..=0xFFFF)
            }
        }
        _ => rng.gen_range(0x1_0000..=0x10_FFFF),
    };
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}
