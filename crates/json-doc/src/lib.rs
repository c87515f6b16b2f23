//! Strict RFC 8259 JSON documents.
//!
//! - [`Value`]: dynamic value tree with total navigation and typed
//!   projections. Objects are keyed in byte order.
//! - [`parse`] / [`Parser`]: byte-level parser reporting errors with a
//!   1-based `(line,column)` [`Position`].
//! - [`serialize`] / [`Serializer`]: canonical compact or pretty text.
//! - [`to_value`] and the `serde_json` conversions: interop with host data.
//!
//! ```
//! use json_doc::{parse_str, stringify, Value};
//!
//! let doc = parse_str(r#"{"b":[1,2.5],"a":"é"}"#).unwrap();
//! assert_eq!(doc["a"].as_str(), Some("é"));
//! assert_eq!(doc["b"][1], Value::Double(2.5));
//! assert!(doc["missing"][7].is_null());
//! assert_eq!(stringify(&doc, false).unwrap(), r#"{"a":"é","b":[1,2.5]}"#);
//! ```

mod convert;
pub mod error;
mod number;
pub mod parser;
pub mod serializer;
pub mod value;

pub use convert::{to_value, ValueSerializer};
pub use error::{ParseError, Position, SerializeError};
pub use parser::{parse, parse_str, Parser};
pub use serializer::{serialize, stringify, Serializer};
pub use value::{Map, Value, ValueKind};
