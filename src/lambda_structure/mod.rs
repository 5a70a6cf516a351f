pub mod environment;
pub mod lambda_trait;
