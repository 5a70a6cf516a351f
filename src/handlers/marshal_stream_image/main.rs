use async_trait::async_trait;
use kws::{
    lambda_main,
    lambda_structure::lambda_trait::Lambda,
    result::{error::LambdaError, Result},
    stream_image::{marshal_stream_image, StreamImage},
};
use serde_json::Value;

pub struct MarshalStreamImage;

#[async_trait]
impl Lambda for MarshalStreamImage {
    type PersistedMemory = ();
    type InputBody = Value;
    type Output = StreamImage;
    type Error = LambdaError;

    async fn bootstrap() -> Result<Self::PersistedMemory> {
        Ok(())
    }

    async fn run(request: Self::InputBody, _state: &Self::PersistedMemory) -> Result<Self::Output> {
        if !request.is_object() {
            return Err(LambdaError::Validation(
                "a stream image can only be built from a JSON object".to_owned(),
            ));
        }

        Ok(marshal_stream_image(&request)?)
    }
}

lambda_main!(MarshalStreamImage);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn conversion_to_stream_image_ok() {
        let record = json!({
            "positive_integer": 1,
            "negative_integer": -1,
            "floating_point": 1.15,
            "string": "test",
            "array": [1, 2],
            "map": { "test": 2, "map": "yes", "nothing": null },
            "nothing": null
        });

        let expected: StreamImage = serde_json::from_str(
            r#"{
            "positive_integer": { "N": "1" },
            "negative_integer": { "N": "-1" },
            "floating_point": { "N": "1.15" },
            "string": { "S": "test" },
            "array": { "L": [{ "N": "1" }, { "N": "2" }] },
            "map": { "M": { "test": { "N": "2" }, "map": { "S": "yes" } } }
        }"#,
        )
        .unwrap();

        let image = MarshalStreamImage::run(record, &()).await.unwrap();

        assert_eq!(image, expected);
    }

    #[tokio::test]
    async fn non_object_payloads_are_rejected() {
        let result = MarshalStreamImage::run(json!(["not", "a", "record"]), &()).await;

        assert!(matches!(result, Err(LambdaError::Validation(_))));
    }
}
