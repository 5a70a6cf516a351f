//! Conversion between native records and DynamoDB stream images.
//!
//! Records are mapped to attributes with `serde_dynamo`, so the wire contract follows the
//! record's serde shape:
//!
//! - field names (after `#[serde(rename)]`) become attribute names;
//! - strings map to `S`, integers and floats to `N` with their decimal text, booleans to `BOOL`;
//! - nested structs and maps map to `M`, sequences to `L`;
//! - `None` maps to `NULL`, which [`marshal_stream_image`] drops from every map, so absent
//!   optional fields never reach the wire and decode back to `None`.
//!
//! Neither direction logs; failures are returned to the caller.

mod attribute_value;
pub mod tree;

pub use attribute_value::AttributeValue;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tree::TreeError;

/// One row snapshot (before- or after-image) of a change stream.
pub type StreamImage = HashMap<String, AttributeValue>;

#[derive(Debug, thiserror::Error)]
pub enum StreamImageError {
    #[error("unable to encode stream image: {0}")]
    Encoding(#[source] CodecFailure),
    #[error("unable to decode stream image: {0}")]
    Decoding(#[source] CodecFailure),
}

#[derive(Debug, thiserror::Error)]
pub enum CodecFailure {
    #[error(transparent)]
    Attributes(#[from] serde_dynamo::Error),
    #[error("attribute \"{attribute}\": {source}")]
    Tree {
        attribute: String,
        #[source]
        source: TreeError,
    },
}

impl CodecFailure {
    fn tree(attribute: &str, source: TreeError) -> Self {
        Self::Tree {
            attribute: attribute.to_owned(),
            source,
        }
    }
}

/// Converts a record into a stream image, dropping every `NULL` attribute on the way.
///
/// Fails with [`StreamImageError::Encoding`] when the record does not serialize to a map or
/// contains a value `serde_dynamo` cannot represent. Nothing is returned on failure.
pub fn marshal_stream_image<T>(record: &T) -> Result<StreamImage, StreamImageError>
where
    T: Serialize + ?Sized,
{
    let item: HashMap<String, serde_dynamo::AttributeValue> =
        serde_dynamo::to_item(record).map_err(|e| StreamImageError::Encoding(e.into()))?;

    let tree: Map<String, Value> = item
        .into_iter()
        .map(|(name, value)| {
            tree::to_tree(&AttributeValue::from(value))
                .map(|node| (name.clone(), node))
                .map_err(|e| StreamImageError::Encoding(CodecFailure::tree(&name, e)))
        })
        .collect::<Result<_, StreamImageError>>()?;

    tree::strip_null_entries(tree)
        .into_iter()
        .map(|(name, node)| {
            tree::from_tree(node)
                .map(|value| (name.clone(), value))
                .map_err(|e| StreamImageError::Encoding(CodecFailure::tree(&name, e)))
        })
        .collect()
}

/// Decodes a stream image into a record.
///
/// Decoding is all-or-nothing: the first attribute that fails aborts the call and no partial
/// record is produced. Fails with [`StreamImageError::Decoding`] on malformed attributes, type
/// mismatches, missing required fields or unparsable number text.
pub fn unmarshal_stream_image<T>(image: &StreamImage) -> Result<T, StreamImageError>
where
    T: DeserializeOwned,
{
    let item = image
        .iter()
        .map(|(name, value)| {
            tree::to_tree(value)
                .and_then(tree::from_tree)
                .map(|value| (name.clone(), serde_dynamo::AttributeValue::from(value)))
                .map_err(|e| StreamImageError::Decoding(CodecFailure::tree(name, e)))
        })
        .collect::<Result<HashMap<_, _>, _>>()?;

    serde_dynamo::from_item(item).map_err(|e| StreamImageError::Decoding(e.into()))
}

/// Renders an image as its untyped tree, `{ name: {"S": ...}, ... }`. Handy for logging.
pub fn stream_image_to_tree(image: &StreamImage) -> Result<Value, StreamImageError> {
    image
        .iter()
        .map(|(name, value)| {
            tree::to_tree(value)
                .map(|node| (name.clone(), node))
                .map_err(|e| StreamImageError::Encoding(CodecFailure::tree(name, e)))
        })
        .collect::<Result<_, _>>()
        .map(Value::Object)
}
