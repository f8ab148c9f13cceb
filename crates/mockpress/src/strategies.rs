//! Proptest Strategies for Store Values
//!
//! Generators for the free-form values tests put into options, meta and
//! fixture slots. Floats are left out on purpose: JSON text does not carry
//! every `f64` bit pattern back intact.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Plain scalar that is never a codec encoding
pub fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
    ]
}

/// Any value: scalars, sequences and records nested up to three levels
pub fn any_value() -> impl Strategy<Value = Value> {
    scalar_value().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4).prop_map(|entries| {
                Value::Object(entries.into_iter().collect::<Map<String, Value>>())
            }),
        ]
    })
}

/// Sequence or record at the top level
pub fn composite_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(any_value(), 0..4).prop_map(Value::Array),
        prop::collection::btree_map("[a-z_]{1,8}", any_value(), 0..4)
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
    ]
}

/// Query-options record like the ones fixtures key children by
pub fn query_options() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(
        prop_oneof![
            Just("post_type".to_string()),
            Just("post_parent".to_string()),
            Just("numberposts".to_string()),
            Just("orderby".to_string()),
        ],
        scalar_value(),
        1..4,
    )
    .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}
