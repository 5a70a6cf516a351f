//! Untyped JSON view of attribute values.
//!
//! The tree is the wire JSON of [`AttributeValue`] (`{"S": "x"}`, `{"M": {...}}`) with one
//! difference: `NULL` values are bare JSON `null` instead of `{"NULL": true}`. That lets null
//! attributes be removed with a plain tree walk that knows nothing about attribute types.

use super::attribute_value::AttributeValue;
use serde_json::{Map, Value};

const NULL_TAG: &str = "NULL";
const LIST_TAG: &str = "L";
const MAP_TAG: &str = "M";

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("malformed attribute tree: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Encodes an attribute value as a tree.
pub fn to_tree(value: &AttributeValue) -> Result<Value, TreeError> {
    Ok(null_tags_to_nulls(serde_json::to_value(value)?))
}

/// Re-derives an attribute value from a tree produced by [`to_tree`].
///
/// Bare `null` and `{"NULL": true}` both decode to [`AttributeValue::Null`].
pub fn from_tree(tree: Value) -> Result<AttributeValue, TreeError> {
    Ok(serde_json::from_value(nulls_to_null_tags(tree))?)
}

/// Removes every object entry whose value is `null`, recursing into nested objects and into
/// objects that are elements of arrays. Other array elements, a `null` included, are kept as
/// they are, and a `null` root is returned unchanged.
pub fn strip_null_values(tree: Value) -> Value {
    match tree {
        Value::Object(object) => Value::Object(strip_null_entries(object)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(object) => Value::Object(strip_null_entries(object)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

pub(crate) fn strip_null_entries(object: Map<String, Value>) -> Map<String, Value> {
    object
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key, strip_null_values(value)))
        .collect()
}

// Both walks only descend through `L` and `M` payloads, the positions that hold attribute values.

fn null_tags_to_nulls(value: Value) -> Value {
    match value {
        Value::Object(object) if object.len() == 1 && object.contains_key(NULL_TAG) => Value::Null,
        Value::Object(object) => Value::Object(map_nested(object, null_tags_to_nulls)),
        other => other,
    }
}

fn nulls_to_null_tags(value: Value) -> Value {
    match value {
        Value::Null => {
            let mut object = Map::new();
            object.insert(NULL_TAG.to_owned(), Value::Bool(true));
            Value::Object(object)
        }
        Value::Object(object) => Value::Object(map_nested(object, nulls_to_null_tags)),
        other => other,
    }
}

fn map_nested(object: Map<String, Value>, f: fn(Value) -> Value) -> Map<String, Value> {
    if object.len() != 1 {
        return object;
    }

    object
        .into_iter()
        .map(|(tag, payload)| {
            let payload = match (tag.as_str(), payload) {
                (LIST_TAG, Value::Array(items)) => Value::Array(items.into_iter().map(f).collect()),
                (MAP_TAG, Value::Object(entries)) => {
                    Value::Object(entries.into_iter().map(|(k, v)| (k, f(v))).collect())
                }
                (_, payload) => payload,
            };
            (tag, payload)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn null_becomes_bare_json_null() {
        assert_eq!(to_tree(&AttributeValue::Null).unwrap(), Value::Null);
        assert_eq!(
            to_tree(&AttributeValue::List(vec![AttributeValue::Null])).unwrap(),
            json!({ "L": [null] })
        );
    }

    #[test]
    fn nested_values_are_tagged() {
        let value = AttributeValue::Map(HashMap::from([
            (
                "stuff".to_owned(),
                AttributeValue::String("y".to_owned()),
            ),
            (
                "bytes".to_owned(),
                AttributeValue::BinarySet(vec![b"a".to_vec()]),
            ),
            ("gone".to_owned(), AttributeValue::Null),
        ]));

        assert_eq!(
            to_tree(&value).unwrap(),
            json!({ "M": {
                "stuff": { "S": "y" },
                "bytes": { "BS": ["YQ=="] },
                "gone": null
            }})
        );
    }

    #[test]
    fn tree_differs_from_wire_json_only_in_nulls() {
        let value = AttributeValue::List(vec![
            AttributeValue::Number("1".to_owned()),
            AttributeValue::Null,
        ]);

        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({ "L": [{ "N": "1" }, { "NULL": true }] })
        );
        assert_eq!(to_tree(&value).unwrap(), json!({ "L": [{ "N": "1" }, null] }));
    }

    #[rstest]
    #[case(AttributeValue::String("x".to_owned()))]
    #[case(AttributeValue::Number("-12.5".to_owned()))]
    #[case(AttributeValue::Boolean(false))]
    #[case(AttributeValue::Null)]
    #[case(AttributeValue::Binary(vec![0, 255, 7]))]
    #[case(AttributeValue::StringSet(vec!["a".to_owned()]))]
    #[case(AttributeValue::NumberSet(vec!["1".to_owned(), "2e3".to_owned()]))]
    #[case(AttributeValue::BinarySet(vec![vec![1], vec![2, 3]]))]
    #[case(AttributeValue::List(vec![AttributeValue::Null, AttributeValue::Boolean(true)]))]
    fn every_variant_survives_the_tree(#[case] value: AttributeValue) {
        assert_eq!(from_tree(to_tree(&value).unwrap()).unwrap(), value);
    }

    #[test]
    fn explicit_null_tag_is_accepted() {
        assert_eq!(
            from_tree(json!({ "NULL": true })).unwrap(),
            AttributeValue::Null
        );
        assert_eq!(
            from_tree(json!({ "M": { "a": { "NULL": true }, "b": null } })).unwrap(),
            AttributeValue::Map(HashMap::from([
                ("a".to_owned(), AttributeValue::Null),
                ("b".to_owned(), AttributeValue::Null),
            ]))
        );
    }

    #[rstest]
    #[case(json!("bare string"))]
    #[case(json!({}))]
    #[case(json!({ "S": "a", "N": "1" }))]
    #[case(json!({ "X": "a" }))]
    #[case(json!({ "S": 1 }))]
    #[case(json!({ "BOOL": "true" }))]
    #[case(json!({ "SS": ["a", 1] }))]
    #[case(json!({ "M": [] }))]
    #[case(json!({ "B": "%%%" }))]
    fn malformed_trees_are_rejected(#[case] tree: Value) {
        assert!(matches!(from_tree(tree), Err(TreeError::Malformed(_))));
    }

    #[test]
    fn strips_nulls_from_nested_objects() {
        let tree = json!({
            "id": { "S": "abc" },
            "parent": null,
            "nested": { "M": { "stuff": { "S": "y" }, "missing": null } }
        });

        assert_eq!(
            strip_null_values(tree),
            json!({
                "id": { "S": "abc" },
                "nested": { "M": { "stuff": { "S": "y" } } }
            })
        );
    }

    #[test]
    fn strips_nulls_from_objects_inside_arrays() {
        let tree = json!([
            { "a": null, "b": 1 },
            { "c": { "d": null } },
            "scalar",
            null
        ]);

        assert_eq!(
            strip_null_values(tree),
            json!([{ "b": 1 }, { "c": {} }, "scalar", null])
        );
    }

    #[test]
    fn nested_arrays_are_not_entered() {
        let tree = json!([[{ "a": null }]]);
        assert_eq!(strip_null_values(tree.clone()), tree);
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(json!(["a", 1, true]))]
    #[case(json!("scalar"))]
    fn scalars_and_null_roots_are_untouched(#[case] tree: Value) {
        assert_eq!(strip_null_values(tree.clone()), tree);
    }

    #[test]
    fn stripping_is_idempotent() {
        let tree = json!({
            "l": { "L": [{ "M": { "x": null, "y": { "N": "1" } } }, null] },
            "n": null
        });

        let once = strip_null_values(tree);
        let twice = strip_null_values(once.clone());

        assert_eq!(once, twice);
    }
}
