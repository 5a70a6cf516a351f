use async_trait::async_trait;
use kws::{
    lambda_main,
    lambda_structure::lambda_trait::Lambda,
    result::{error::LambdaError, Result},
    stream_event::{DynamoDbStreamEvent, DynamoDbStreamRecord, StreamEventName},
    stream_image::{stream_image_to_tree, unmarshal_stream_image},
};
use serde::Serialize;
use serde_json::Value;

/// One stream record decoded into plain JSON.
#[derive(Serialize, Debug, PartialEq)]
pub struct ChangeDocument {
    pub event_id: String,
    pub event_name: StreamEventName,
    pub keys: Value,
    /// The row after the change, or before it for removals. `None` for keys-only streams.
    pub document: Option<Value>,
}

pub struct ProcessStreamImages;

#[async_trait]
impl Lambda for ProcessStreamImages {
    type PersistedMemory = ();
    type InputBody = DynamoDbStreamEvent;
    type Output = Vec<ChangeDocument>;
    type Error = LambdaError;

    async fn bootstrap() -> Result<Self::PersistedMemory> {
        Ok(())
    }

    async fn run(request: Self::InputBody, _state: &Self::PersistedMemory) -> Result<Self::Output> {
        let total = request.records.len();

        let mut documents = Vec::with_capacity(total);
        for record in request.records {
            match to_change_document(&record) {
                Ok(document) => documents.push(document),
                Err(err) => log_skipped_record(&record, &err),
            }
        }

        let skipped = total - documents.len();
        if skipped > 0 {
            tracing::warn!(skipped, total, "Skipped {skipped} of {total} stream records");
        }

        Ok(documents)
    }
}

fn to_change_document(record: &DynamoDbStreamRecord) -> Result<ChangeDocument> {
    let keys: Value = unmarshal_stream_image(&record.dynamodb.keys).map_err(|e| {
        LambdaError::Validation(format!("record {}: keys: {e}", record.event_id))
    })?;

    let document = record
        .current_image()
        .map(unmarshal_stream_image::<Value>)
        .transpose()
        .map_err(|e| LambdaError::Validation(format!("record {}: image: {e}", record.event_id)))?;

    Ok(ChangeDocument {
        event_id: record.event_id.clone(),
        event_name: record.event_name,
        keys,
        document,
    })
}

fn log_skipped_record(record: &DynamoDbStreamRecord, err: &LambdaError) {
    let image = record.current_image().unwrap_or(&record.dynamodb.keys);
    let image = stream_image_to_tree(image).unwrap_or_default();

    match err {
        LambdaError::Validation(message) => tracing::info!(
            event_id = %record.event_id,
            image = %image,
            "unprocessable stream record: {message}"
        ),
        LambdaError::Unknown(_) => tracing::error!(
            event_id = %record.event_id,
            image = %image,
            error = ?err,
            "{err}"
        ),
    }
}

lambda_main!(ProcessStreamImages);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event() -> DynamoDbStreamEvent {
        serde_json::from_value(json!({
            "Records": [
                {
                    "eventID": "1",
                    "eventName": "INSERT",
                    "dynamodb": {
                        "Keys": { "id": { "S": "abc" } },
                        "NewImage": {
                            "id": { "S": "abc" },
                            "nested": { "M": { "stuff": { "S": "y" } } }
                        },
                        "StreamViewType": "NEW_IMAGE"
                    }
                },
                {
                    "eventID": "2",
                    "eventName": "REMOVE",
                    "dynamodb": {
                        "Keys": { "id": { "S": "def" } },
                        "OldImage": { "id": { "S": "def" }, "done": { "BOOL": true } },
                        "StreamViewType": "NEW_AND_OLD_IMAGES"
                    }
                },
                {
                    "eventID": "3",
                    "eventName": "MODIFY",
                    "dynamodb": {
                        "Keys": { "id": { "S": "ghi" } },
                        "StreamViewType": "KEYS_ONLY"
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn process_stream_images_ok() {
        let documents = ProcessStreamImages::run(event(), &()).await.unwrap();

        assert_eq!(
            documents,
            vec![
                ChangeDocument {
                    event_id: "1".to_owned(),
                    event_name: StreamEventName::Insert,
                    keys: json!({ "id": "abc" }),
                    document: Some(json!({ "id": "abc", "nested": { "stuff": "y" } })),
                },
                ChangeDocument {
                    event_id: "2".to_owned(),
                    event_name: StreamEventName::Remove,
                    keys: json!({ "id": "def" }),
                    document: Some(json!({ "id": "def", "done": true })),
                },
                ChangeDocument {
                    event_id: "3".to_owned(),
                    event_name: StreamEventName::Modify,
                    keys: json!({ "id": "ghi" }),
                    document: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn undecodable_records_are_skipped() {
        let mut event = event();
        event.records[0]
            .dynamodb
            .new_image
            .as_mut()
            .unwrap()
            .insert(
                "count".to_owned(),
                kws::stream_image::AttributeValue::Number("not-a-number".to_owned()),
            );

        let documents = ProcessStreamImages::run(event, &()).await.unwrap();

        let ids: Vec<_> = documents.iter().map(|d| d.event_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }
}
