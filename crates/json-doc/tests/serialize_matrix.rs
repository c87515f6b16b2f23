use json_doc::{serialize, stringify, to_value, Map, SerializeError, Serializer, Value};

fn compact(value: &Value) -> String {
    stringify(value, false).unwrap()
}

fn pretty(value: &Value) -> String {
    stringify(value, true).unwrap()
}

#[test]
fn hand_built_tree() {
    let mut root = Value::Object(Map::new());
    if let Some(obj) = root.as_object_mut() {
        obj.insert("z".into(), Value::from(vec![Value::from(1), Value::Null]));
        obj.insert("a".into(), Value::from("tab\there"));
        obj.insert("m".into(), Value::from(Some(2.5)));
        obj.insert("n".into(), Value::from(None::<bool>));
    }
    assert_eq!(
        compact(&root),
        r#"{"a":"tab\there","m":2.5,"n":null,"z":[1,null]}"#
    );
    assert_eq!(
        pretty(&root),
        "{\r\n\t\"a\": \"tab\\there\",\r\n\t\"m\": 2.5,\r\n\t\"n\": null,\r\n\t\"z\": [\r\n\t\t1,\r\n\t\tnull\r\n\t]\r\n}"
    );
}

#[test]
fn insertion_order_is_irrelevant() {
    let forward = Value::from_iter([("b", Value::from(2)), ("a", Value::from(1)), ("c", Value::Null)]);
    let backward = Value::from_iter([("c", Value::Null), ("a", Value::from(1)), ("b", Value::from(2))]);
    for mode in [false, true] {
        assert_eq!(serialize(&forward, mode).unwrap(), serialize(&backward, mode).unwrap());
    }
}

#[test]
fn failure_is_all_or_nothing() {
    let tree = Value::from_iter([
        ("ok", Value::from_iter([Value::from(1), Value::from("x")])),
        ("zz", Value::from_iter([Value::Double(f64::INFINITY)])),
    ]);
    let err = serialize(&tree, true).unwrap_err();
    assert!(matches!(err, SerializeError::InvalidValue(_)));
    assert_eq!(err.to_string(), "Invalid JSON value: non-finite number inf");
    assert_eq!(tree.to_string(), "error: invalid JSON value");
}

#[test]
fn serializer_is_single_use() {
    let doc = Value::from_iter([Value::from(true)]);
    assert_eq!(Serializer::new(false).serialize(&doc).unwrap(), b"[true]");
    assert_eq!(
        Serializer::new(true).serialize(&doc).unwrap(),
        b"[\r\n\ttrue\r\n]"
    );
}

#[test]
fn raw_utf8_passes_through() {
    let doc = json_doc::parse(b"[\"\xE2\x82\xAC\",\"\\u20ac\"]").unwrap();
    assert_eq!(serialize(&doc, false).unwrap(), b"[\"\xE2\x82\xAC\",\"\xE2\x82\xAC\"]");
}

#[test]
fn host_values_serialize_canonically() {
    #[derive(serde::Serialize)]
    struct Release<'a> {
        version: &'a str,
        yanked: bool,
        downloads: u64,
        checksum: Option<&'a str>,
    }

    let value = to_value(&Release {
        version: "1.0.0",
        yanked: false,
        downloads: 42,
        checksum: None,
    })
    .unwrap();
    assert_eq!(
        compact(&value),
        r#"{"checksum":null,"downloads":42,"version":"1.0.0","yanked":false}"#
    );
}
