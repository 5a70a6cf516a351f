/// Environment variable AWS sets inside a Lambda execution environment.
pub const LAMBDA_EXECUTION_ENVIRONMENT: &str = "AWS_EXECUTION_ENV";

/// Whether the process runs inside AWS Lambda rather than locally or in CI.
pub fn is_running_in_lambda() -> bool {
    std::env::var_os(LAMBDA_EXECUTION_ENVIRONMENT).is_some_and(|value| !value.is_empty())
}
