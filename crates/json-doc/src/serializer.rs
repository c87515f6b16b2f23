//! JSON serializer with canonical key order.
//!
//! Object members are emitted in byte-wise lexicographic key order, so two
//! objects with the same members always produce the same bytes. Pretty mode
//! puts every element on its own CRLF-terminated line indented with one tab
//! per nesting level and writes `": "` between key and value; compact mode
//! adds no whitespace. Empty containers are `[]` and `{}` in both modes.

use json_doc_buffers::{hex, Writer};
use tracing::{debug, trace};

use std::collections::btree_map;
use std::slice;

use crate::error::SerializeError;
use crate::value::Value;

// Remaining children of an open container.
enum Children<'v> {
    Array(slice::Iter<'v, Value>),
    Object(btree_map::Iter<'v, String, Value>),
}

struct Frame<'v> {
    children: Children<'v>,
    // At least one child has been written.
    started: bool,
}

/// Serializes `value` to bytes.
///
/// # Example
///
/// ```
/// use json_doc::{serialize, Value};
///
/// let doc = Value::from_iter([("b", Value::from(1)), ("a", Value::from("x"))]);
/// assert_eq!(serialize(&doc, false).unwrap(), br#"{"a":"x","b":1}"#);
/// assert_eq!(
///     serialize(&doc, true).unwrap(),
///     b"{\r\n\t\"a\": \"x\",\r\n\t\"b\": 1\r\n}"
/// );
/// ```
pub fn serialize(value: &Value, pretty: bool) -> Result<Vec<u8>, SerializeError> {
    Serializer::new(pretty).serialize(value)
}

/// Serializes `value` to text.
pub fn stringify(value: &Value, pretty: bool) -> Result<String, SerializeError> {
    let bytes = serialize(value, pretty)?;
    String::from_utf8(bytes).map_err(|_| SerializeError::invalid("output is not UTF-8"))
}

/// Single-use serializer state for one value tree.
pub struct Serializer {
    writer: Writer,
    pretty: bool,
    level: usize,
}

impl Serializer {
    pub fn new(pretty: bool) -> Self {
        Self {
            writer: Writer::new(),
            pretty,
            level: 0,
        }
    }

    /// Renders the whole tree. On error nothing is returned.
    pub fn serialize(mut self, value: &Value) -> Result<Vec<u8>, SerializeError> {
        trace!(pretty = self.pretty, "serializing JSON value");
        match self.write_any(value) {
            Ok(()) => Ok(self.writer.flush()),
            Err(err) => {
                debug!(%err, "JSON serialize failed");
                Err(err)
            }
        }
    }

    /// Writes `root` with an explicit stack of open containers, so nesting
    /// depth is bounded by memory rather than the call stack.
    fn write_any(&mut self, root: &Value) -> Result<(), SerializeError> {
        let mut stack: Vec<Frame<'_>> = Vec::new();
        let mut next = Some(root);
        loop {
            if let Some(value) = next.take() {
                if let Some(children) = self.write_open(value)? {
                    stack.push(Frame {
                        children,
                        started: false,
                    });
                }
            }
            let Some(frame) = stack.last_mut() else {
                return Ok(());
            };
            let item = match &mut frame.children {
                Children::Array(items) => items.next().map(|item| (None, item)),
                Children::Object(members) => members.next().map(|(k, v)| (Some(k), v)),
            };
            match item {
                Some((key, child)) => {
                    if frame.started {
                        self.writer.u8(b',');
                    }
                    frame.started = true;
                    self.write_indent();
                    if let Some(key) = key {
                        self.write_str(key);
                        self.writer.u8(b':');
                        if self.pretty {
                            self.writer.u8(b' ');
                        }
                    }
                    next = Some(child);
                }
                None => {
                    let close = match frame.children {
                        Children::Array(_) => b']',
                        Children::Object(_) => b'}',
                    };
                    stack.pop();
                    self.level -= 1;
                    self.write_indent();
                    self.writer.u8(close);
                }
            }
        }
    }

    /// Writes a scalar or an empty container in full. For a non-empty
    /// container only the opening bracket is written and its children are
    /// returned.
    fn write_open<'v>(
        &mut self,
        value: &'v Value,
    ) -> Result<Option<Children<'v>>, SerializeError> {
        match value {
            Value::Null => self.writer.ascii("null"),
            Value::Bool(true) => self.writer.ascii("true"),
            Value::Bool(false) => self.writer.ascii("false"),
            Value::Int(i) => self.write_integer(*i),
            Value::Double(d) => self.write_double(*d)?,
            Value::String(s) => self.write_str(s),
            Value::Array(arr) if arr.is_empty() => self.writer.ascii("[]"),
            Value::Object(obj) if obj.is_empty() => self.writer.ascii("{}"),
            Value::Array(arr) => {
                self.writer.u8(b'[');
                self.level += 1;
                return Ok(Some(Children::Array(arr.iter())));
            }
            // `Map` iterates in byte-wise key order, which is the canonical order.
            Value::Object(obj) => {
                self.writer.u8(b'{');
                self.level += 1;
                return Ok(Some(Children::Object(obj.iter())));
            }
        }
        Ok(None)
    }

    fn write_integer(&mut self, int: i64) {
        self.writer.ascii(&int.to_string());
    }

    /// Shortest round-trip text. The `Debug` form always keeps a `.` or an
    /// exponent, so the text parses back as a double.
    fn write_double(&mut self, double: f64) -> Result<(), SerializeError> {
        if !double.is_finite() {
            return Err(SerializeError::invalid(format!(
                "non-finite number {double}"
            )));
        }
        self.writer.ascii(&format!("{double:?}"));
        Ok(())
    }

    fn write_str(&mut self, s: &str) {
        self.writer.ensure_capacity(s.len() + 2);
        self.writer.u8(b'"');
        for &b in s.as_bytes() {
            match b {
                b'"' => self.writer.buf(b"\\\""),
                b'\\' => self.writer.buf(b"\\\\"),
                b'/' => self.writer.buf(b"\\/"),
                0x08 => self.writer.buf(b"\\b"),
                0x0C => self.writer.buf(b"\\f"),
                b'\n' => self.writer.buf(b"\\n"),
                b'\r' => self.writer.buf(b"\\r"),
                b'\t' => self.writer.buf(b"\\t"),
                0x00..=0x1F => {
                    self.writer.buf(b"\\u00");
                    self.writer.buf(&hex::encode(b));
                }
                _ => self.writer.u8(b),
            }
        }
        self.writer.u8(b'"');
    }

    fn write_indent(&mut self) {
        if self.pretty {
            self.writer.buf(b"\r\n");
            self.writer.repeat(b'\t', self.level);
        }
    }
}
