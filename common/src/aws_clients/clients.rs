use super::region_for;
use crate::config::aws_client_config::{AwsClientConfig, AwsService};
use rusoto_apigateway::ApiGatewayClient;
use rusoto_cloudwatch::CloudWatchClient;
use rusoto_dynamodb::DynamoDbClient;
use rusoto_ec2::Ec2Client;
use rusoto_glue::GlueClient;
use rusoto_lambda::LambdaClient;
use rusoto_logs::CloudWatchLogsClient;
use rusoto_rds::RdsClient;
use rusoto_s3::S3Client;
use rusoto_sagemaker::SageMakerClient;
use rusoto_secretsmanager::SecretsManagerClient;
use rusoto_sns::SnsClient;
use rusoto_sqs::SqsClient;
use rusoto_ssm::SsmClient;
use rusoto_sts::StsClient;

macro_rules! client_constructor {
    ($(#[$doc:meta])* $name:ident, $client:ty, $service:expr) => {
        $(#[$doc])*
        pub fn $name(config: &AwsClientConfig) -> $client {
            <$client>::new(region_for(config, $service))
        }
    };
}

client_constructor!(get_dynamodb_client, DynamoDbClient, AwsService::DynamoDb);
client_constructor!(
    /// rusoto addresses buckets path-style, so a plain `http://` override is enough for local S3.
    get_s3_client,
    S3Client,
    AwsService::S3
);
client_constructor!(get_lambda_client, LambdaClient, AwsService::Lambda);
client_constructor!(get_sns_client, SnsClient, AwsService::Sns);
client_constructor!(get_sqs_client, SqsClient, AwsService::Sqs);
client_constructor!(get_cloudwatch_client, CloudWatchClient, AwsService::CloudWatch);
client_constructor!(
    get_cloudwatch_logs_client,
    CloudWatchLogsClient,
    AwsService::CloudWatchLogs
);
client_constructor!(get_rds_client, RdsClient, AwsService::Rds);
client_constructor!(get_sagemaker_client, SageMakerClient, AwsService::SageMaker);
client_constructor!(get_ssm_client, SsmClient, AwsService::Ssm);
client_constructor!(get_api_gateway_client, ApiGatewayClient, AwsService::ApiGateway);
client_constructor!(get_ec2_client, Ec2Client, AwsService::Ec2);
client_constructor!(
    get_secrets_manager_client,
    SecretsManagerClient,
    AwsService::SecretsManager
);
client_constructor!(get_sts_client, StsClient, AwsService::Sts);
client_constructor!(get_glue_client, GlueClient, AwsService::Glue);
