//! Core logic behind the `json-fmt` binary.
//!
//! The binary only handles arguments and I/O; everything that touches a
//! document lives here so it can be tested without spawning a process.

use json_doc::{parse, serialize, ParseError, SerializeError, Value};
use thiserror::Error;
use tracing::debug;

pub mod logging;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Follows `path` from `root` with total lookups.
///
/// A segment that parses as an index selects an array element when the
/// current node is an array; every other segment is an object key. A miss
/// anywhere yields `null`.
pub fn navigate<'v, S: AsRef<str>>(root: &'v Value, path: &[S]) -> &'v Value {
    path.iter().fold(root, |node, segment| {
        let segment = segment.as_ref();
        match (node, segment.parse::<usize>()) {
            (Value::Array(_), Ok(index)) => node.at(index),
            _ => node.get(segment),
        }
    })
}

/// Parses `input`, selects the node at `path` and renders it followed by a
/// newline.
pub fn format<S: AsRef<str>>(input: &[u8], path: &[S], pretty: bool) -> Result<Vec<u8>, CliError> {
    let doc = parse(input)?;
    let node = navigate(&doc, path);
    debug!(kind = %node.kind(), segments = path.len(), "selected node");
    let mut out = serialize(node, pretty)?;
    out.push(b'\n');
    Ok(out)
}
