//! Number lexing state machine.
//!
//! ```text
//! number = [ minus ] int [ frac ] [ exp ]
//! int    = zero / ( digit1-9 *DIGIT )
//! frac   = "." 1*DIGIT
//! exp    = ( "e" / "E" ) [ "-" / "+" ] 1*DIGIT
//! ```
//!
//! Negative zero is only accepted with a fraction or exponent: `-0` alone
//! has no `i64` representation and is rejected.

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SignOrInt,
    /// After `-`.
    Int,
    Zero,
    NegativeZero,
    IntDigits,
    FracStart,
    FracDigits,
    ExpSign,
    ExpStart,
    ExpDigits,
}

impl State {
    fn is_terminal(self) -> bool {
        matches!(
            self,
            State::Zero | State::IntDigits | State::FracDigits | State::ExpDigits
        )
    }
}

/// Scans a number starting at `start`.
///
/// On success returns the value and the offset one past its last byte. On
/// failure returns the offset to report: the offending byte, or `start` when
/// the text is well formed but does not convert.
pub(crate) fn scan(bytes: &[u8], start: usize) -> Result<(Value, usize), usize> {
    let mut state = State::SignOrInt;
    let mut integral = true;
    let mut x = start;

    while let Some(&b) = bytes.get(x) {
        state = match (state, b) {
            (State::SignOrInt, b'-') => State::Int,
            (State::SignOrInt, b'0') => State::Zero,
            (State::SignOrInt | State::Int, b'1'..=b'9') => State::IntDigits,
            (State::Int, b'0') => State::NegativeZero,
            (State::IntDigits, b'0'..=b'9') => State::IntDigits,
            (State::Zero | State::NegativeZero | State::IntDigits, b'.') => {
                integral = false;
                State::FracStart
            }
            (State::FracStart | State::FracDigits, b'0'..=b'9') => State::FracDigits,
            (
                State::Zero | State::NegativeZero | State::IntDigits | State::FracDigits,
                b'e' | b'E',
            ) => {
                integral = false;
                State::ExpSign
            }
            (State::ExpSign, b'+' | b'-') => State::ExpStart,
            (State::ExpSign | State::ExpStart | State::ExpDigits, b'0'..=b'9') => {
                State::ExpDigits
            }
            (_, b',' | b']' | b'}' | b' ' | b'\t' | b'\n' | b'\r') => break,
            _ => return Err(x),
        };
        x += 1;
    }

    if !state.is_terminal() {
        return Err(x);
    }

    // The scanned range is ASCII by construction.
    let text = std::str::from_utf8(&bytes[start..x]).map_err(|_| start)?;
    let value = if integral {
        Value::Int(text.parse::<i64>().map_err(|_| start)?)
    } else {
        let d = text.parse::<f64>().map_err(|_| start)?;
        if !d.is_finite() {
            return Err(start);
        }
        Value::Double(d)
    };
    Ok((value, x))
}
