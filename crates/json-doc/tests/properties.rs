use json_doc::{parse, serialize, Map, Value};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite", |d| d.is_finite())
            .prop_map(Value::Double),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(any::<String>(), inner, 0..8).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn round_trip(value in arb_value(), pretty in any::<bool>()) {
        let bytes = serialize(&value, pretty).unwrap();
        prop_assert_eq!(parse(&bytes).unwrap(), value);
    }

    #[test]
    fn reserialization_is_stable(value in arb_value(), pretty in any::<bool>()) {
        let first = serialize(&value, pretty).unwrap();
        let second = serialize(&parse(&first).unwrap(), pretty).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn insertion_order_does_not_change_output(
        entries in prop::collection::vec((any::<String>(), any::<i64>()), 0..16),
        pretty in any::<bool>(),
    ) {
        let forward: Map = entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::Int(*v)))
            .collect();
        let mut backward = Map::new();
        for (k, v) in entries.iter().rev() {
            // Keep the value the forward pass ends with for duplicate keys.
            backward.entry(k.clone()).or_insert(Value::Int(*v));
        }
        prop_assert_eq!(
            serialize(&Value::Object(forward), pretty).unwrap(),
            serialize(&Value::Object(backward), pretty).unwrap()
        );
    }

    #[test]
    fn integers_parse_exactly(i in any::<i64>()) {
        prop_assert_eq!(parse(i.to_string().as_bytes()).unwrap(), Value::Int(i));
    }

    #[test]
    fn doubles_parse_to_the_same_bits(d in any::<f64>().prop_filter("finite", |d| d.is_finite())) {
        let bytes = serialize(&Value::Double(d), false).unwrap();
        match parse(&bytes).unwrap() {
            Value::Double(back) => prop_assert_eq!(back.to_bits(), d.to_bits()),
            other => prop_assert!(false, "{:?} parsed as {:?}", d, other),
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Err(err) = parse(&bytes) {
            if let Some(pos) = err.position() {
                prop_assert!(pos.line >= 1 && pos.column >= 1);
                prop_assert!(pos.column <= bytes.len());
            }
        }
    }

    #[test]
    fn text_input_matches_byte_input(text in "[ -~]{0,32}") {
        prop_assert_eq!(json_doc::parse_str(&text), parse(text.as_bytes()));
    }
}
