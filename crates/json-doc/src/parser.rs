//! Iterative JSON parser over a borrowed byte slice.
//!
//! The parser is strict RFC 8259: no comments, no trailing commas, no
//! escapes beyond the nine standard ones, raw UTF-8 in strings is validated
//! and `\u` surrogate pairs are recombined into one scalar.
//!
//! Line and column are tracked only for error reporting: every line feed
//! skipped as whitespace bumps the line and moves the column origin.

use json_doc_buffers::{hex, utf8, Utf8Error, Writer};
use tracing::{debug, trace};

use crate::error::{ParseError, Position};
use crate::number;
use crate::value::{Map, Value};

/// Parses a JSON document from raw bytes.
///
/// # Example
///
/// ```
/// use json_doc::{parse, Value};
///
/// let doc = parse(b"{\"a\": [1, 2.5, \"x\"]}").unwrap();
/// assert_eq!(doc["a"][0], Value::Int(1));
/// assert_eq!(doc["a"][1].as_f64(), Some(2.5));
/// ```
pub fn parse(bytes: &[u8]) -> Result<Value, ParseError> {
    Parser::new(bytes).parse()
}

/// Parses a JSON document from text, using its UTF-8 bytes.
pub fn parse_str(text: &str) -> Result<Value, ParseError> {
    parse(text.as_bytes())
}

// A container whose closing bracket has not been read yet.
enum Frame {
    Array(Vec<Value>),
    // Members so far and the key of the member being read.
    Object(Map, String),
}

// A `\u` high surrogate waiting for its low half.
#[derive(Debug, Clone, Copy)]
struct PendingSurrogate {
    code: u16,
    offset: usize,
}

/// Single-use parser state for one document.
pub struct Parser<'a> {
    data: &'a [u8],
    x: usize,
    line: usize,
    line_start: usize,
    high_surrogate: Option<PendingSurrogate>,
    buf: Writer,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            line: 0,
            line_start: 0,
            high_surrogate: None,
            buf: Writer::with_alloc_size(256),
        }
    }

    /// Parses the whole input as exactly one value surrounded by optional
    /// whitespace.
    pub fn parse(mut self) -> Result<Value, ParseError> {
        trace!(len = self.data.len(), "parsing JSON document");
        let result = self.read_document();
        if let Err(err) = &result {
            debug!(%err, "JSON parse failed");
        }
        result
    }

    fn read_document(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        if self.x >= self.data.len() {
            return Err(ParseError::EmptyDocument);
        }
        let value = self.read_any()?;
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(ParseError::UnexpectedToken(self.position(self.x)));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' => self.x += 1,
                b'\n' => {
                    self.x += 1;
                    self.line += 1;
                    self.line_start = self.x;
                }
                _ => break,
            }
        }
    }

    /// 1-based position of offset `x`. Offsets at or past the end map to the
    /// last byte.
    fn position(&self, x: usize) -> Position {
        let x = x.min(self.data.len().saturating_sub(1));
        Position::new(self.line + 1, x.saturating_sub(self.line_start) + 1)
    }

    /// Reads one value. Containers are tracked on an explicit stack of open
    /// frames, so nesting depth is bounded by memory rather than the call
    /// stack.
    ///
    /// Callers guarantee `self.x` is in bounds and not whitespace.
    fn read_any(&mut self) -> Result<Value, ParseError> {
        let mut stack: Vec<Frame> = Vec::new();
        loop {
            let mut value = match self.data[self.x] {
                b'-' | b'0'..=b'9' => self.read_num()?,
                b'"' => Value::String(self.read_str()?),
                b'[' => {
                    self.x += 1;
                    self.skip_whitespace();
                    match self.peek() {
                        None => return Err(ParseError::UnclosedArray),
                        Some(b']') => {
                            self.x += 1;
                            Value::Array(Vec::new())
                        }
                        Some(_) => {
                            stack.push(Frame::Array(Vec::new()));
                            continue;
                        }
                    }
                }
                b'{' => {
                    self.x += 1;
                    self.skip_whitespace();
                    if self.peek() == Some(b'}') {
                        self.x += 1;
                        Value::Object(Map::new())
                    } else {
                        let key = self.read_key()?;
                        stack.push(Frame::Object(Map::new(), key));
                        continue;
                    }
                }
                _ => self.read_literal()?,
            };

            // Fold the finished value into its parents until one of them
            // expects another element.
            loop {
                let Some(frame) = stack.pop() else {
                    return Ok(value);
                };
                self.skip_whitespace();
                match frame {
                    Frame::Array(mut arr) => {
                        arr.push(value);
                        match self.peek() {
                            None => return Err(ParseError::UnclosedArray),
                            Some(b',') => {
                                self.x += 1;
                                self.skip_whitespace();
                                if self.x >= self.data.len() {
                                    return Err(ParseError::UnclosedArray);
                                }
                                stack.push(Frame::Array(arr));
                                break;
                            }
                            Some(b']') => {
                                self.x += 1;
                                value = Value::Array(arr);
                            }
                            Some(_) => {
                                return Err(ParseError::UnexpectedToken(self.position(self.x)))
                            }
                        }
                    }
                    Frame::Object(mut obj, key) => {
                        // Duplicate keys: the last occurrence wins.
                        obj.insert(key, value);
                        match self.peek() {
                            None => return Err(ParseError::UnclosedObject),
                            Some(b',') => {
                                self.x += 1;
                                self.skip_whitespace();
                                let key = self.read_key()?;
                                stack.push(Frame::Object(obj, key));
                                break;
                            }
                            Some(b'}') => {
                                self.x += 1;
                                value = Value::Object(obj);
                            }
                            Some(_) => {
                                return Err(ParseError::UnexpectedToken(self.position(self.x)))
                            }
                        }
                    }
                }
            }
        }
    }

    /// Reads `"key":` and the whitespace after the colon, leaving the cursor
    /// on the member value.
    fn read_key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            None => return Err(ParseError::UnclosedObject),
            Some(b'"') => {}
            Some(_) => return Err(ParseError::UnexpectedToken(self.position(self.x))),
        }
        let key = self.read_str()?;
        self.skip_whitespace();
        match self.peek() {
            None => return Err(ParseError::UnclosedObject),
            Some(b':') => self.x += 1,
            Some(_) => return Err(ParseError::UnexpectedToken(self.position(self.x))),
        }
        self.skip_whitespace();
        if self.x >= self.data.len() {
            return Err(ParseError::UnclosedObject);
        }
        Ok(key)
    }

    fn read_literal(&mut self) -> Result<Value, ParseError> {
        let rest = &self.data[self.x..];
        let (value, len) = if rest.starts_with(b"true") {
            (Value::Bool(true), 4)
        } else if rest.starts_with(b"false") {
            (Value::Bool(false), 5)
        } else if rest.starts_with(b"null") {
            (Value::Null, 4)
        } else {
            return Err(ParseError::UnexpectedToken(self.position(self.x)));
        };
        self.x += len;
        match self.peek() {
            None | Some(b',' | b']' | b'}' | b' ' | b'\t' | b'\n' | b'\r') => Ok(value),
            Some(_) => Err(ParseError::UnexpectedToken(self.position(self.x))),
        }
    }

    fn read_num(&mut self) -> Result<Value, ParseError> {
        match number::scan(self.data, self.x) {
            Ok((value, end)) => {
                self.x = end;
                Ok(value)
            }
            Err(at) => Err(ParseError::NumberSyntax(self.position(at))),
        }
    }

    /// Reads a quoted string starting at the opening `"`.
    fn read_str(&mut self) -> Result<String, ParseError> {
        self.x += 1; // "
        self.buf.clear();
        self.high_surrogate = None;

        while let Some(b) = self.peek() {
            if b == b'\\' {
                self.read_escape()?;
                continue;
            }
            self.check_unpaired()?;
            match b {
                b'"' => {
                    self.x += 1;
                    let bytes = self.buf.flush();
                    // Every byte pushed was validated or produced by the UTF-8 encoder.
                    return String::from_utf8(bytes)
                        .map_err(|_| ParseError::InvalidCharacter(self.position(self.x - 1)));
                }
                0x00..=0x1F => return Err(ParseError::InvalidCharacter(self.position(self.x))),
                0x20..=0x7F => {
                    self.buf.u8(b);
                    self.x += 1;
                }
                _ => match utf8::decode(&self.data[self.x..]) {
                    Ok((_, len)) => {
                        self.buf.buf(&self.data[self.x..self.x + len]);
                        self.x += len;
                    }
                    Err(Utf8Error::Truncated) => return Err(ParseError::UnclosedString),
                    Err(Utf8Error::Invalid) => {
                        return Err(ParseError::InvalidCharacter(self.position(self.x)))
                    }
                },
            }
        }

        self.check_unpaired()?;
        Err(ParseError::UnclosedString)
    }

    /// Reads one escape sequence starting at the backslash.
    fn read_escape(&mut self) -> Result<(), ParseError> {
        self.x += 1; // \
        let Some(b) = self.peek() else {
            // The caller reports the unterminated string.
            return Ok(());
        };

        if b != b'u' {
            self.check_unpaired()?;
            let unescaped = match b {
                b'"' | b'\\' | b'/' => b,
                b'b' => 0x08,
                b'f' => 0x0C,
                b'n' => b'\n',
                b'r' => b'\r',
                b't' => b'\t',
                _ => return Err(ParseError::EscapeSyntax(self.position(self.x))),
            };
            self.buf.u8(unescaped);
            self.x += 1;
            return Ok(());
        }

        self.x += 1; // u
        // Surrogate errors point at the first hex digit.
        let digits = self.x;
        let code = hex::decode_u16(&self.data[digits..])
            .ok_or_else(|| ParseError::EscapeSyntax(self.position(digits)))?;
        match code {
            0xD800..=0xDBFF => {
                self.check_unpaired()?;
                self.high_surrogate = Some(PendingSurrogate {
                    code,
                    offset: digits,
                });
            }
            0xDC00..=0xDFFF => {
                let Some(high) = self.high_surrogate.take() else {
                    return Err(ParseError::UnpairedSurrogate(self.position(digits)));
                };
                let scalar = 0x1_0000
                    + ((u32::from(high.code) & 0x3FF) << 10)
                    + (u32::from(code) & 0x3FF);
                utf8::write_scalar(&mut self.buf, scalar);
            }
            _ => {
                self.check_unpaired()?;
                utf8::write_scalar(&mut self.buf, u32::from(code));
            }
        }
        self.x += 4;
        Ok(())
    }

    fn check_unpaired(&self) -> Result<(), ParseError> {
        match self.high_surrogate {
            Some(high) => Err(ParseError::UnpairedSurrogate(self.position(high.offset))),
            None => Ok(()),
        }
    }
}
