use crate::config::GlobalConfig;
use crate::lambda_structure::environment::is_running_in_lambda;
use crate::logging::{init_tracing, LambdaLogger};
use async_trait::async_trait;
use common::config::ConfigLoader;
use lambda_runtime::{Error, LambdaEvent};
use serde::{de::DeserializeOwned, Serialize};
use tracing::Instrument;

#[async_trait]
pub trait Lambda {
    type PersistedMemory: Sync + Send;
    type InputBody: DeserializeOwned + Send + Sync + std::fmt::Debug;
    type Output: Serialize + Send + Sync;
    type Error: Into<Error> + std::error::Error + Sync + Send + 'static;

    /// Builds the state kept between executions (clients, configuration).
    async fn bootstrap() -> Result<Self::PersistedMemory, Self::Error>;

    /// Business logic of the lambda.
    async fn run(
        payload: Self::InputBody,
        connections: &Self::PersistedMemory,
    ) -> Result<Self::Output, Self::Error>;

    /// Installs logging, bootstraps the lambda and starts serving events. Call this from the
    /// binary's `main`.
    async fn main() -> Result<(), Error> {
        let config = ConfigLoader::load_default::<GlobalConfig>()?;
        let _tracing = init_tracing(config.log_level)?;
        tracing::info!(environment = %config.environment, "configuration loaded");

        if !is_running_in_lambda() {
            tracing::warn!("not running inside AWS Lambda");
        }

        // Reference so the closure below does not take ownership of the persisted state.
        let persisted = &Self::bootstrap().await?;

        let service = move |event: LambdaEvent<Self::InputBody>| async move {
            Self::service(event, persisted).await
        };

        lambda_runtime::run(lambda_runtime::service_fn(service)).await
    }

    /// Runs one execution inside a span carrying the AWS request id.
    async fn service(
        event: LambdaEvent<Self::InputBody>,
        connections: &Self::PersistedMemory,
    ) -> Result<Self::Output, Self::Error> {
        let LambdaEvent { payload, context } = event;
        let logger = LambdaLogger::new().with_lambda_context(Some(&context));

        logger
            .span()
            .in_scope(|| tracing::info!(payload = ?payload, "Execution started"));

        let result = Self::run(payload, connections)
            .instrument(logger.span().clone())
            .await;
        logger.check_error(&result, &["Execution failed"]);

        result
    }
}

#[macro_export]
macro_rules! lambda_main {
    ($lambda: ty) => {
        #[tokio::main]
        async fn main() -> $crate::result::error::LambdaRuntimeResult {
            use $crate::lambda_structure::lambda_trait::Lambda;
            <$lambda>::main().await
        }
    };
}
