use crate::deserializers::aws_region;
use rusoto_core::region::Region;
use serde::Deserialize;
use strum::Display;

/// AWS services a client can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AwsService {
    DynamoDb,
    S3,
    Lambda,
    Sns,
    Sqs,
    CloudWatch,
    CloudWatchLogs,
    Rds,
    SageMaker,
    Ssm,
    ApiGateway,
    Ec2,
    SecretsManager,
    Sts,
    Glue,
}

/// Per-service endpoint overrides, mostly used to point clients at LocalStack.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AwsEndpointSet {
    pub dynamodb_endpoint: Option<String>,
    pub s3_endpoint: Option<String>,
    pub lambda_endpoint: Option<String>,
    pub sns_endpoint: Option<String>,
    pub sqs_endpoint: Option<String>,
    pub cloudwatch_endpoint: Option<String>,
    pub cloudwatch_logs_endpoint: Option<String>,
    pub rds_endpoint: Option<String>,
    pub sagemaker_endpoint: Option<String>,
    pub ssm_endpoint: Option<String>,
    pub api_gateway_endpoint: Option<String>,
    pub ec2_endpoint: Option<String>,
    pub secrets_manager_endpoint: Option<String>,
    pub sts_endpoint: Option<String>,
    pub glue_endpoint: Option<String>,
}

impl AwsEndpointSet {
    pub fn get(&self, service: AwsService) -> Option<&str> {
        let endpoint = match service {
            AwsService::DynamoDb => &self.dynamodb_endpoint,
            AwsService::S3 => &self.s3_endpoint,
            AwsService::Lambda => &self.lambda_endpoint,
            AwsService::Sns => &self.sns_endpoint,
            AwsService::Sqs => &self.sqs_endpoint,
            AwsService::CloudWatch => &self.cloudwatch_endpoint,
            AwsService::CloudWatchLogs => &self.cloudwatch_logs_endpoint,
            AwsService::Rds => &self.rds_endpoint,
            AwsService::SageMaker => &self.sagemaker_endpoint,
            AwsService::Ssm => &self.ssm_endpoint,
            AwsService::ApiGateway => &self.api_gateway_endpoint,
            AwsService::Ec2 => &self.ec2_endpoint,
            AwsService::SecretsManager => &self.secrets_manager_endpoint,
            AwsService::Sts => &self.sts_endpoint,
            AwsService::Glue => &self.glue_endpoint,
        };

        endpoint.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct AwsClientConfig {
    /// Current AWS region.
    #[serde(deserialize_with = "aws_region")]
    aws_region: Region,

    /// Only used for development. LocalStack endpoint shared by every service.
    #[serde(default)]
    pub localstack_test_mode_endpoint: Option<String>,

    #[serde(flatten)]
    pub endpoints: AwsEndpointSet,
}

impl AwsClientConfig {
    pub fn new(aws_region: Region) -> Self {
        Self {
            aws_region,
            localstack_test_mode_endpoint: None,
            endpoints: AwsEndpointSet::default(),
        }
    }

    /// Region every client falls back to when its service has no endpoint override.
    pub fn region(&self) -> Region {
        match self.localstack_test_mode_endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => self.custom_region(endpoint),
            _ => self.aws_region.clone(),
        }
    }

    /// Resolves the region for a service: its own endpoint override first, then LocalStack,
    /// then the configured AWS region.
    pub fn region_for(&self, service: AwsService) -> Region {
        match self.endpoints.get(service) {
            Some(endpoint) => self.custom_region(endpoint),
            None => self.region(),
        }
    }

    /// Same configuration pinned to another region. Endpoint overrides are kept.
    pub fn in_region(&self, aws_region: Region) -> Self {
        Self {
            aws_region,
            ..self.clone()
        }
    }

    fn custom_region(&self, endpoint: &str) -> Region {
        Region::Custom {
            name: self.aws_region.name().to_owned(),
            endpoint: endpoint.to_owned(),
        }
    }
}
