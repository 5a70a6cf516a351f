pub mod config;
pub mod lambda_structure;
pub mod logging;
pub mod result;
pub mod stream_event;
pub mod stream_image;
