//! Dynamic JSON value tree.
//!
//! [`Value`] is a closed set of the seven JSON data kinds. Every tree is
//! acyclic and owns its children; a parsed tree does not borrow the input.
//!
//! Read access is total: the `as_*` projections return `None` on a kind
//! mismatch or lossy numeric conversion, and [`Value::at`] / [`Value::get`]
//! (also available as `value[0]` and `value["key"]`) return a `Null` on a
//! miss, so chained lookups need no intermediate error handling.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::ParseError;

/// Object storage. Keys are unique; iteration is in byte order.
pub type Map = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

// 2^63 as f64; the first value not representable as i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// The kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// A reference to the shared `Null` returned by missed lookups.
    pub fn null_ref() -> &'static Value {
        &NULL
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view. A `Double` qualifies only when it has no fractional part
    /// and lies within the `i64` range.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            Value::Double(d) if d.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&d) => {
                Some(d as i64)
            }
            _ => None,
        }
    }

    /// Floating-point view. An `Int` qualifies only when `f64` holds it
    /// exactly.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Double(d) => Some(d),
            Value::Int(i) => {
                let d = i as f64;
                (d < I64_BOUND && d as i64 == i).then_some(d)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Array element at `index`, or `Null` when out of range or not an array.
    pub fn at(&self, index: usize) -> &Value {
        match self {
            Value::Array(a) => a.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Object member `key`, or `Null` when missing or not an object.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Object(o) => o.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    pub fn as_bool_array(&self) -> Option<Vec<bool>> {
        self.project_array(Value::as_bool)
    }

    pub fn as_i64_array(&self) -> Option<Vec<i64>> {
        self.project_array(Value::as_i64)
    }

    pub fn as_f64_array(&self) -> Option<Vec<f64>> {
        self.project_array(Value::as_f64)
    }

    pub fn as_str_array(&self) -> Option<Vec<&str>> {
        self.project_array(Value::as_str)
    }

    pub fn as_bool_map(&self) -> Option<BTreeMap<&str, bool>> {
        self.project_object(Value::as_bool)
    }

    pub fn as_i64_map(&self) -> Option<BTreeMap<&str, i64>> {
        self.project_object(Value::as_i64)
    }

    pub fn as_f64_map(&self) -> Option<BTreeMap<&str, f64>> {
        self.project_object(Value::as_f64)
    }

    pub fn as_str_map(&self) -> Option<BTreeMap<&str, &str>> {
        self.project_object(Value::as_str)
    }

    // All-or-nothing: a single element failing `f` rejects the whole array.
    fn project_array<'a, T>(&'a self, f: impl Fn(&'a Value) -> Option<T>) -> Option<Vec<T>> {
        self.as_array()?.iter().map(f).collect()
    }

    fn project_object<'a, T>(
        &'a self,
        f: impl Fn(&'a Value) -> Option<T>,
    ) -> Option<BTreeMap<&'a str, T>> {
        self.as_object()?
            .iter()
            .map(|(k, v)| f(v).map(|t| (k.as_str(), t)))
            .collect()
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.at(index)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key)
    }
}

/// Children are released from an explicit stack, so dropping a deeply
/// nested tree does not recurse.
impl Drop for Value {
    fn drop(&mut self) {
        let mut stack = match self {
            Value::Array(arr) if !arr.is_empty() => std::mem::take(arr),
            Value::Object(obj) if !obj.is_empty() => std::mem::take(obj).into_values().collect(),
            _ => return,
        };
        while let Some(mut value) = stack.pop() {
            match &mut value {
                Value::Array(arr) => stack.append(arr),
                Value::Object(obj) => stack.extend(std::mem::take(obj).into_values()),
                _ => {}
            }
        }
    }
}

/// Compact text; `{:#}` renders the pretty layout.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::serializer::stringify(self, f.alternate()) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("error: invalid JSON value"),
        }
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<Map> for Value {
    fn from(o: Map) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Later pairs overwrite earlier ones with the same key.
impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::from_iter([
            ("flags", Value::from_iter([Value::from(true), Value::from(false)])),
            ("ints", Value::from_iter([Value::from(1), Value::from(2.0), Value::from(-3)])),
            ("name", Value::from("doc")),
            ("ratio", Value::from(0.5)),
        ])
    }

    #[test]
    fn kind_tags() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(1).kind(), ValueKind::Int);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Double);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::Array(vec![]).kind(), ValueKind::Array);
        assert_eq!(Value::Object(Map::new()).kind(), ValueKind::Object);
        assert_eq!(ValueKind::Double.to_string(), "double");
    }

    #[test]
    fn scalar_projections_reject_other_kinds() {
        assert_eq!(Value::from("true").as_bool(), None);
        assert_eq!(Value::from(true).as_i64(), None);
        assert_eq!(Value::from(1).as_str(), None);
        assert!(Value::Null.as_array().is_none());
        assert!(Value::from_iter([Value::Null]).as_object().is_none());
    }

    #[test]
    fn double_exposed_as_integer_only_when_whole() {
        assert_eq!(Value::Double(3.0).as_i64(), Some(3));
        assert_eq!(Value::Double(-0.0).as_i64(), Some(0));
        assert_eq!(Value::Double(3.5).as_i64(), None);
        assert_eq!(Value::Double(f64::NAN).as_i64(), None);
        assert_eq!(Value::Double(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::Double(9.3e18).as_i64(), None);
        assert_eq!(Value::Double(-9_223_372_036_854_775_808.0).as_i64(), Some(i64::MIN));
    }

    #[test]
    fn int_exposed_as_double_only_when_exact() {
        assert_eq!(Value::Int(42).as_f64(), Some(42.0));
        assert_eq!(Value::Int(-(1 << 53)).as_f64(), Some(-9_007_199_254_740_992.0));
        assert_eq!(Value::Int((1 << 53) + 1).as_f64(), None);
        assert_eq!(Value::Int(i64::MAX).as_f64(), None);
        assert_eq!(Value::Int(i64::MIN).as_f64(), Some(-I64_BOUND));
    }

    #[test]
    fn total_navigation() {
        let doc = sample();
        assert_eq!(doc["name"].as_str(), Some("doc"));
        assert_eq!(doc["flags"][1], Value::Bool(false));
        assert!(doc["missing"]["deeper"][7].is_null());
        assert!(doc.at(0).is_null());
        assert!(doc["flags"].get("x").is_null());
        assert!(std::ptr::eq(doc.get("nope"), Value::null_ref()));
    }

    #[test]
    fn typed_array_projections() {
        let doc = sample();
        assert_eq!(doc["flags"].as_bool_array(), Some(vec![true, false]));
        assert_eq!(doc["ints"].as_i64_array(), Some(vec![1, 2, -3]));
        assert_eq!(doc["ints"].as_f64_array(), Some(vec![1.0, 2.0, -3.0]));
        assert_eq!(doc["ints"].as_bool_array(), None);
        assert_eq!(doc["name"].as_str_array(), None);

        let mixed = Value::from_iter([Value::from(1), Value::from(1.5)]);
        assert_eq!(mixed.as_i64_array(), None);
        assert_eq!(mixed.as_f64_array(), Some(vec![1.0, 1.5]));
    }

    #[test]
    fn typed_map_projections() {
        let doc = Value::from_iter([("a", Value::from("x")), ("b", Value::from("y"))]);
        let map = doc.as_str_map().unwrap();
        assert_eq!(map.get("a"), Some(&"x"));
        assert_eq!(map.len(), 2);
        assert_eq!(doc.as_i64_map(), None);

        let nums = Value::from_iter([("n", Value::from(4.0)), ("m", Value::from(2))]);
        assert_eq!(nums.as_i64_map().unwrap().get("n"), Some(&4));
        assert_eq!(nums.as_f64_map().unwrap().get("m"), Some(&2.0));
        assert_eq!(Value::from_iter([("t", Value::from(true))]).as_bool_map().unwrap()["t"], true);
    }

    #[test]
    fn literal_construction() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
        assert_eq!(Value::from(7u32), Value::Int(7));

        let obj = Value::from_iter([("k", Value::from(1)), ("k", Value::from(2))]);
        assert_eq!(obj["k"], Value::Int(2));
    }

    #[test]
    fn mutable_access_for_hand_built_trees() {
        let mut doc = Value::Array(vec![]);
        doc.as_array_mut().unwrap().push(Value::from(1));
        assert_eq!(doc[0], Value::Int(1));

        let mut obj = Value::Object(Map::new());
        obj.as_object_mut().unwrap().insert("a".into(), Value::Null);
        assert!(obj.as_object().unwrap().contains_key("a"));
    }
}
