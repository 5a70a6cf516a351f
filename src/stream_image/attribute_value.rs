use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One wire-typed value of a DynamoDB stream image.
///
/// Serialized with the tags of the stream notification format (`S`, `N`, `BOOL`, `NULL`, `B`,
/// `L`, `M`, `SS`, `NS`, `BS`). Binary payloads are base64 text on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaggedValue", into = "TaggedValue")]
pub enum AttributeValue {
    String(String),
    /// Decimal text, kept verbatim so no precision is lost.
    Number(String),
    Boolean(bool),
    Null,
    Binary(Vec<u8>),
    List(Vec<AttributeValue>),
    Map(HashMap<String, AttributeValue>),
    StringSet(Vec<String>),
    NumberSet(Vec<String>),
    BinarySet(Vec<Vec<u8>>),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl From<serde_dynamo::AttributeValue> for AttributeValue {
    fn from(value: serde_dynamo::AttributeValue) -> Self {
        use serde_dynamo::AttributeValue as Dynamo;

        match value {
            Dynamo::S(s) => AttributeValue::String(s),
            Dynamo::N(n) => AttributeValue::Number(n),
            Dynamo::Bool(b) => AttributeValue::Boolean(b),
            Dynamo::Null(_) => AttributeValue::Null,
            Dynamo::B(b) => AttributeValue::Binary(b),
            Dynamo::L(l) => AttributeValue::List(l.into_iter().map(Into::into).collect()),
            Dynamo::M(m) => {
                AttributeValue::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Dynamo::Ss(ss) => AttributeValue::StringSet(ss),
            Dynamo::Ns(ns) => AttributeValue::NumberSet(ns),
            Dynamo::Bs(bs) => AttributeValue::BinarySet(bs),
        }
    }
}

impl From<AttributeValue> for serde_dynamo::AttributeValue {
    fn from(value: AttributeValue) -> Self {
        use serde_dynamo::AttributeValue as Dynamo;

        match value {
            AttributeValue::String(s) => Dynamo::S(s),
            AttributeValue::Number(n) => Dynamo::N(n),
            AttributeValue::Boolean(b) => Dynamo::Bool(b),
            AttributeValue::Null => Dynamo::Null(true),
            AttributeValue::Binary(b) => Dynamo::B(b),
            AttributeValue::List(l) => Dynamo::L(l.into_iter().map(Into::into).collect()),
            AttributeValue::Map(m) => {
                Dynamo::M(m.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            AttributeValue::StringSet(ss) => Dynamo::Ss(ss),
            AttributeValue::NumberSet(ns) => Dynamo::Ns(ns),
            AttributeValue::BinarySet(bs) => Dynamo::Bs(bs),
        }
    }
}

// Serde shape of the wire format. `NULL` carries a `true` flag on the wire only.
#[derive(Serialize, Deserialize)]
enum TaggedValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "B")]
    B(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(#[serde(with = "base64_bytes_set")] Vec<Vec<u8>>),
}

impl From<TaggedValue> for AttributeValue {
    fn from(value: TaggedValue) -> Self {
        match value {
            TaggedValue::S(s) => AttributeValue::String(s),
            TaggedValue::N(n) => AttributeValue::Number(n),
            TaggedValue::Bool(b) => AttributeValue::Boolean(b),
            TaggedValue::Null(_) => AttributeValue::Null,
            TaggedValue::B(b) => AttributeValue::Binary(b),
            TaggedValue::L(l) => AttributeValue::List(l),
            TaggedValue::M(m) => AttributeValue::Map(m),
            TaggedValue::Ss(ss) => AttributeValue::StringSet(ss),
            TaggedValue::Ns(ns) => AttributeValue::NumberSet(ns),
            TaggedValue::Bs(bs) => AttributeValue::BinarySet(bs),
        }
    }
}

impl From<AttributeValue> for TaggedValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(s) => TaggedValue::S(s),
            AttributeValue::Number(n) => TaggedValue::N(n),
            AttributeValue::Boolean(b) => TaggedValue::Bool(b),
            AttributeValue::Null => TaggedValue::Null(true),
            AttributeValue::Binary(b) => TaggedValue::B(b),
            AttributeValue::List(l) => TaggedValue::L(l),
            AttributeValue::Map(m) => TaggedValue::M(m),
            AttributeValue::StringSet(ss) => TaggedValue::Ss(ss),
            AttributeValue::NumberSet(ns) => TaggedValue::Ns(ns),
            AttributeValue::BinarySet(bs) => TaggedValue::Bs(bs),
        }
    }
}

pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}

pub(crate) mod base64_bytes_set {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(set: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(set.len()))?;
        for bytes in set {
            seq.serialize_element(&STANDARD.encode(bytes))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|encoded| STANDARD.decode(encoded).map_err(de::Error::custom))
            .collect()
    }
}
