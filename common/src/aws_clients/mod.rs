//! Client constructors for the AWS services used across the workspace.
//!
//! There are no process-wide singletons. The application's composition root owns an
//! [`AwsClients`] and hands references to whoever needs a client; each client is built on first
//! use and every later caller observes that same instance.

mod clients;

pub use clients::*;

use crate::config::aws_client_config::{AwsClientConfig, AwsService};
use crate::ec2::{self, Ec2Error};
use rusoto_apigateway::ApiGatewayClient;
use rusoto_cloudwatch::CloudWatchClient;
use rusoto_core::Region;
use rusoto_dynamodb::DynamoDbClient;
use rusoto_ec2::{Ec2Client, Filter, Volume};
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
use std::sync::OnceLock;

macro_rules! lazy_client_accessor {
    ($accessor:ident, $field:ident, $client:ty, $constructor:ident) => {
        pub fn $accessor(&self) -> &$client {
            self.$field.get_or_init(|| {
                tracing::debug!(client = stringify!($client), "building AWS client");
                $constructor(&self.config)
            })
        }
    };
}

/// Owns one lazily built client per AWS service.
pub struct AwsClients {
    config: AwsClientConfig,
    dynamodb: OnceLock<DynamoDbClient>,
    s3: OnceLock<S3Client>,
    lambda: OnceLock<LambdaClient>,
    sns: OnceLock<SnsClient>,
    sqs: OnceLock<SqsClient>,
    cloudwatch: OnceLock<CloudWatchClient>,
    cloudwatch_logs: OnceLock<CloudWatchLogsClient>,
    rds: OnceLock<RdsClient>,
    sagemaker: OnceLock<SageMakerClient>,
    ssm: OnceLock<SsmClient>,
    api_gateway: OnceLock<ApiGatewayClient>,
    ec2: OnceLock<Ec2Client>,
    secrets_manager: OnceLock<SecretsManagerClient>,
    sts: OnceLock<StsClient>,
    glue: OnceLock<GlueClient>,
}

impl AwsClients {
    pub fn new(config: AwsClientConfig) -> Self {
        Self {
            config,
            dynamodb: OnceLock::new(),
            s3: OnceLock::new(),
            lambda: OnceLock::new(),
            sns: OnceLock::new(),
            sqs: OnceLock::new(),
            cloudwatch: OnceLock::new(),
            cloudwatch_logs: OnceLock::new(),
            rds: OnceLock::new(),
            sagemaker: OnceLock::new(),
            ssm: OnceLock::new(),
            api_gateway: OnceLock::new(),
            ec2: OnceLock::new(),
            secrets_manager: OnceLock::new(),
            sts: OnceLock::new(),
            glue: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &AwsClientConfig {
        &self.config
    }

    lazy_client_accessor!(dynamodb, dynamodb, DynamoDbClient, get_dynamodb_client);
    lazy_client_accessor!(s3, s3, S3Client, get_s3_client);
    lazy_client_accessor!(lambda, lambda, LambdaClient, get_lambda_client);
    lazy_client_accessor!(sns, sns, SnsClient, get_sns_client);
    lazy_client_accessor!(sqs, sqs, SqsClient, get_sqs_client);
    lazy_client_accessor!(cloudwatch, cloudwatch, CloudWatchClient, get_cloudwatch_client);
    lazy_client_accessor!(
        cloudwatch_logs,
        cloudwatch_logs,
        CloudWatchLogsClient,
        get_cloudwatch_logs_client
    );
    lazy_client_accessor!(rds, rds, RdsClient, get_rds_client);
    lazy_client_accessor!(sagemaker, sagemaker, SageMakerClient, get_sagemaker_client);
    lazy_client_accessor!(ssm, ssm, SsmClient, get_ssm_client);
    lazy_client_accessor!(api_gateway, api_gateway, ApiGatewayClient, get_api_gateway_client);
    lazy_client_accessor!(ec2, ec2, Ec2Client, get_ec2_client);
    lazy_client_accessor!(
        secrets_manager,
        secrets_manager,
        SecretsManagerClient,
        get_secrets_manager_client
    );
    lazy_client_accessor!(sts, sts, StsClient, get_sts_client);
    lazy_client_accessor!(glue, glue, GlueClient, get_glue_client);

    /// EC2 client pinned to another region. Not cached: each call builds a new client.
    pub fn ec2_in_region(&self, region: Region) -> Ec2Client {
        get_ec2_client(&self.config.in_region(region))
    }

    /// Every volume matching `filters` across `regions`, one EC2 client per region.
    pub async fn load_all_volumes(
        &self,
        filters: &[Filter],
        regions: &[Region],
    ) -> Result<Vec<Volume>, Ec2Error> {
        ec2::load_all_volumes(|region| self.ec2_in_region(region.clone()), filters, regions).await
    }
}

pub(crate) fn region_for(config: &AwsClientConfig, service: AwsService) -> Region {
    let region = config.region_for(service);
    tracing::trace!(service = %service, region = ?region, "resolved AWS region");
    region
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients() -> AwsClients {
        let mut config = AwsClientConfig::new(Region::UsWest2);
        config.localstack_test_mode_endpoint = Some("http://localhost:4566".to_owned());
        AwsClients::new(config)
    }

    #[tokio::test]
    async fn accessors_return_the_same_instance() {
        let clients = clients();

        let first: *const DynamoDbClient = clients.dynamodb();
        let second: *const DynamoDbClient = clients.dynamodb();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn regional_clients_follow_the_requested_region() {
        let clients = AwsClients::new(AwsClientConfig::new(Region::UsWest2));

        let _client = clients.ec2_in_region(Region::EuWest1);
        let volumes = clients.load_all_volumes(&[], &[]).await.unwrap();

        assert!(volumes.is_empty());
        assert_eq!(clients.config().region(), Region::UsWest2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_observe_one_instance() {
        let clients = std::sync::Arc::new(clients());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clients = clients.clone();
                tokio::spawn(async move { clients.sqs() as *const SqsClient as usize })
            })
            .collect();
        let mut addresses = Vec::new();
        for handle in handles {
            addresses.push(handle.await.unwrap());
        }

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
