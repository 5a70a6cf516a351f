use crate::stream_image::{unmarshal_stream_image, StreamImage, StreamImageError};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lambda payload delivered by a DynamoDB stream trigger.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DynamoDbStreamEvent {
    pub records: Vec<DynamoDbStreamRecord>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamEventName {
    Insert,
    Modify,
    Remove,
}

impl fmt::Display for StreamEventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamEventName::Insert => "INSERT",
            StreamEventName::Modify => "MODIFY",
            StreamEventName::Remove => "REMOVE",
        };
        f.write_str(name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamViewType {
    KeysOnly,
    NewImage,
    OldImage,
    NewAndOldImages,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DynamoDbStreamRecord {
    #[serde(rename = "eventID")]
    pub event_id: String,
    pub event_name: StreamEventName,
    #[serde(default)]
    pub event_version: Option<String>,
    #[serde(default)]
    pub event_source: Option<String>,
    #[serde(default)]
    pub aws_region: Option<String>,
    #[serde(rename = "eventSourceARN", default)]
    pub event_source_arn: Option<String>,
    pub dynamodb: StreamRecord,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct StreamRecord {
    /// Seconds since the epoch, possibly fractional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_creation_date_time: Option<f64>,
    #[serde(default)]
    pub keys: StreamImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<StreamImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_image: Option<StreamImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_view_type: Option<StreamViewType>,
}

impl StreamRecord {
    /// Creation time rounded to the millisecond.
    pub fn approximate_creation_time(&self) -> Option<DateTime<Utc>> {
        let seconds = self.approximate_creation_date_time?;
        if !seconds.is_finite() {
            return None;
        }
        Utc.timestamp_millis_opt((seconds * 1000.0).round() as i64).single()
    }
}

impl DynamoDbStreamRecord {
    /// Decodes the key attributes of the changed row.
    pub fn keys<K: DeserializeOwned>(&self) -> Result<K, StreamImageError> {
        unmarshal_stream_image(&self.dynamodb.keys)
    }

    /// Decodes the after-image, when the stream carries one.
    pub fn new_record<T: DeserializeOwned>(&self) -> Result<Option<T>, StreamImageError> {
        self.dynamodb
            .new_image
            .as_ref()
            .map(unmarshal_stream_image)
            .transpose()
    }

    /// Decodes the before-image, when the stream carries one.
    pub fn old_record<T: DeserializeOwned>(&self) -> Result<Option<T>, StreamImageError> {
        self.dynamodb
            .old_image
            .as_ref()
            .map(unmarshal_stream_image)
            .transpose()
    }

    /// The image describing the row after this change: the old image for removals, the new
    /// one otherwise.
    pub fn current_image(&self) -> Option<&StreamImage> {
        match self.event_name {
            StreamEventName::Remove => self.dynamodb.old_image.as_ref(),
            StreamEventName::Insert | StreamEventName::Modify => {
                self.dynamodb.new_image.as_ref()
            }
        }
    }
}
