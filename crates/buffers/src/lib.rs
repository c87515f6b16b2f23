//! Byte and Unicode utilities for json-doc.
//!
//! # Overview
//!
//! - [`Writer`] - Writes bytes to an auto-growing buffer
//! - [`hex`] - Hex digit decoding and uppercase encoding
//! - [`utf8`] - UTF-8 sequence validation and scalar encoding
//!
//! # Example
//!
//! ```
//! use json_doc_buffers::{hex, utf8, Writer};
//!
//! let code = hex::decode_u16(b"00A9").unwrap();
//! let mut writer = Writer::new();
//! utf8::write_scalar(&mut writer, u32::from(code));
//! assert_eq!(writer.flush(), "©".as_bytes());
//! ```

pub mod hex;
pub mod utf8;
mod writer;

pub use utf8::Utf8Error;
pub use writer::Writer;
