use jpath::{marshal, to_value, EntriesBuilder, FlatValue};
use serde_json::{json, Value};
use std::collections::HashMap;

// Helper function
fn assert_marshals_to(input: HashMap<&str, &str>, expected: &str) {
    let actual = marshal(input.clone()).unwrap_or_else(|e| panic!("{input:?}: {e}"));
    assert_eq!(
        String::from_utf8(actual).unwrap(),
        expected,
        "{input:?}: output mismatch"
    );
}

mod objects {
    use super::*;

    #[test]
    fn test_simple_key_value() {
        assert_marshals_to(HashMap::from([("key", "value")]), r#"{"key":"value"}"#);
    }

    #[test]
    fn test_embedded_key_value() {
        assert_marshals_to(
            HashMap::from([("price.value", "100.00")]),
            r#"{"price":{"value":"100.00"}}"#,
        );
    }

    #[test]
    fn test_long_embedded_key_value() {
        assert_marshals_to(
            HashMap::from([("price.value1.value2", "100.00")]),
            r#"{"price":{"value1":{"value2":"100.00"}}}"#,
        );
    }

    #[test]
    fn test_shared_prefix_merges_alphabetically() {
        assert_marshals_to(
            HashMap::from([("price.value", "100.00"), ("price.currency", "EU")]),
            r#"{"price":{"currency":"EU","value":"100.00"}}"#,
        );
    }

    #[test]
    fn test_several_objects() {
        assert_marshals_to(
            HashMap::from([
                ("price.value", "100.00"),
                ("price.currency", "EU"),
                ("shipping.value", "99.00"),
                ("shipping.currency", "UA"),
            ]),
            r#"{"price":{"currency":"EU","value":"100.00"},"shipping":{"currency":"UA","value":"99.00"}}"#,
        );
    }

    #[test]
    fn test_empty_input() {
        assert_marshals_to(HashMap::new(), "{}");
    }
}

mod arrays {
    use super::*;

    #[test]
    fn test_single_element() {
        assert_marshals_to(
            HashMap::from([("prices.0", "100.00")]),
            r#"{"prices":["100.00"]}"#,
        );
    }

    #[test]
    fn test_two_elements() {
        assert_marshals_to(
            HashMap::from([("prices.1", "100.00"), ("prices.0", "10.00")]),
            r#"{"prices":["10.00","100.00"]}"#,
        );
    }

    #[test]
    fn test_gap_is_null() {
        assert_marshals_to(
            HashMap::from([("prices.2", "100.00"), ("prices.0", "10.00")]),
            r#"{"prices":["10.00",null,"100.00"]}"#,
        );
    }

    #[test]
    fn test_objects_inside_array() {
        assert_marshals_to(
            HashMap::from([
                ("price.value", "100.00"),
                ("price.currency", "EU"),
                ("shipping.0.country", "GB"),
                ("shipping.0.service", "Standart shipping"),
                ("shipping.0.price.value", "33"),
                ("shipping.0.price.curency", "GBP"),
            ]),
            r#"{"price":{"currency":"EU","value":"100.00"},"shipping":[{"country":"GB","price":{"curency":"GBP","value":"33"},"service":"Standart shipping"}]}"#,
        );
    }

    #[test]
    fn test_array_root() {
        assert_marshals_to(
            HashMap::from([("0.value", "100.00")]),
            r#"[{"value":"100.00"}]"#,
        );
    }

    #[test]
    fn test_nested_arrays() {
        assert_marshals_to(
            HashMap::from([("grid.1.1", "x"), ("grid.0.0", "o")]),
            r#"{"grid":[["o"],[null,"x"]]}"#,
        );
    }

    #[test]
    fn test_complex_object_with_nested_values() {
        let input = EntriesBuilder::default()
            .entry("people.0.name", "John")
            .entry("people.0.age", 20)
            .nested(
                "people.0.address",
                [
                    ("line1", json!("10 Downing Street")),
                    ("city", json!("London")),
                ],
            )
            .entry("people.1.name", "Bob")
            .entry("people.1.age", 24)
            .nested(
                "people.1.address",
                [
                    ("line1", json!("33 Oxford Street")),
                    ("city", json!("London")),
                ],
            )
            .build();

        let actual: Value = serde_json::from_slice(&marshal(input).unwrap()).unwrap();
        let expected = json!({"people": [
            {
                "name": "John",
                "age": 20,
                "address": {"line1": "10 Downing Street", "city": "London"}
            },
            {
                "name": "Bob",
                "age": 24,
                "address": {"line1": "33 Oxford Street", "city": "London"}
            }
        ]});
        assert_eq!(actual, expected);
    }
}

mod directives {
    use super::*;

    #[test]
    fn test_split_csv() {
        assert_marshals_to(
            HashMap::from([("0.value.[]", "1,2,3,4")]),
            r#"[{"value":["1","2","3","4"]}]"#,
        );
        assert_marshals_to(
            HashMap::from([("value.[]", "1,2,3,4,5,6")]),
            r#"{"value":["1","2","3","4","5","6"]}"#,
        );
    }

    #[test]
    fn test_number_integer() {
        assert_marshals_to(
            HashMap::from([("0.value.num()", "100")]),
            r#"[{"value":100}]"#,
        );
    }

    #[test]
    fn test_number_fraction() {
        assert_marshals_to(
            HashMap::from([("0.value.num()", "100.12")]),
            r#"[{"value":100.12}]"#,
        );
        assert_marshals_to(
            HashMap::from([("0.value.num()", "100.00")]),
            r#"[{"value":100.0}]"#,
        );
    }

    #[test]
    fn test_bool() {
        for (raw, expected) in [
            ("true", r#"[{"value":true}]"#),
            ("false", r#"[{"value":false}]"#),
            ("", r#"[{"value":false}]"#),
            ("1234", r#"[{"value":false}]"#),
        ] {
            assert_marshals_to(HashMap::from([("0.value.bool()", raw)]), expected);
        }
    }

    #[test]
    fn test_directives_mixed_with_plain_keys() {
        assert_marshals_to(
            HashMap::from([
                ("item.tags.[]", "new,sale"),
                ("item.price.num()", "9.5"),
                ("item.stock.num()", "3"),
                ("item.active.bool()", "true"),
                ("item.name", "lamp"),
            ]),
            r#"{"item":{"active":true,"name":"lamp","price":9.5,"stock":3,"tags":["new","sale"]}}"#,
        );
    }

    #[test]
    fn test_unparseable_number() {
        let err = marshal([("0.value.num()", "one hundred")]).unwrap_err();
        assert!(err.is_coercion_error());
    }
}

mod properties {
    use super::*;

    fn shipping() -> Vec<(&'static str, &'static str)> {
        vec![
            ("price.value", "100.00"),
            ("price.currency", "EU"),
            ("shipping.0.country", "GB"),
            ("shipping.0.service", "Standart shipping"),
            ("shipping.0.price.value", "33"),
            ("shipping.0.price.curency", "GBP"),
            ("shipping.2.country", "UA"),
        ]
    }

    #[test]
    fn test_idempotent() {
        let first = marshal(shipping()).unwrap();
        let second = marshal(shipping()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_independent() {
        let forward = marshal(shipping()).unwrap();
        let backward = marshal(shipping().into_iter().rev()).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_values_readable_at_flat_paths() {
        let document: Value = serde_json::from_slice(&marshal(shipping()).unwrap()).unwrap();
        for (key, value) in shipping() {
            let pointer = format!("/{}", key.replace('.', "/"));
            assert_eq!(
                document.pointer(&pointer),
                Some(&Value::String(value.to_string())),
                "value at {key}"
            );
        }
        assert_eq!(document.pointer("/shipping/1"), Some(&Value::Null));
    }

    #[test]
    fn test_to_value_matches_marshal() {
        let value = to_value(shipping()).unwrap();
        let bytes = marshal(shipping()).unwrap();
        assert_eq!(serde_json::to_vec(&value).unwrap(), bytes);
    }

    #[test]
    fn test_accepts_flat_value_map() {
        let input: Vec<(String, FlatValue)> = vec![
            ("a.b".to_string(), FlatValue::from(true)),
            ("a.c".to_string(), FlatValue::from(-3)),
        ];
        assert_eq!(marshal(input).unwrap(), br#"{"a":{"b":true,"c":-3}}"#);
    }
}
