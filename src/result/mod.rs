pub mod error;

pub use error::{LambdaError, Result};
