//! Structured logging for the Lambdas.
//!
//! [`init_tracing`] installs the bunyan JSON subscriber. [`LambdaLogger`] binds log lines to the
//! Lambda request being served and offers the error-checking helpers handlers call after a
//! fallible step.

use lambda_runtime::Context;
use std::fmt::Debug;
use tracing::level_filters::LevelFilter;
use tracing::Span;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{prelude::*, reload, Registry};

/// Value logged as `lambda_request_id` when no Lambda context is available.
pub const UNKNOWN_REQUEST_ID: &str = "N/A";

pub type LevelReloadHandle = reload::Handle<LevelFilter, Registry>;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unable to bridge `log` records: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
    #[error("unable to install the tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the subscriber alive. Dropping the guard flushes pending log lines.
pub struct TracingGuard {
    pub reload_handle: LevelReloadHandle,
    _worker_guard: WorkerGuard,
}

/// Installs the global subscriber: `log` bridge, bunyan JSON lines on a non-blocking stdout
/// writer, and a level filter that can be changed at runtime through the returned handle.
pub fn init_tracing(level: LevelFilter) -> Result<TracingGuard, LoggingError> {
    LogTracer::init()?;

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let (non_blocking_writer, worker_guard) = tracing_appender::non_blocking(std::io::stdout());
    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);

    let (filter, reload_handle) = reload::Layer::new(level);
    tracing_subscriber::registry()
        .with(filter)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer)
        .try_init()?;

    Ok(TracingGuard {
        reload_handle,
        _worker_guard: worker_guard,
    })
}

/// Logger bound to one Lambda invocation.
#[derive(Debug, Clone)]
pub struct LambdaLogger {
    span: Span,
}

impl Default for LambdaLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LambdaLogger {
    pub fn new() -> Self {
        Self {
            // Enabled at every level the helpers log at, so the request id is never dropped.
            span: tracing::error_span!("lambda", lambda_request_id = tracing::field::Empty),
        }
    }

    /// Attaches the AWS request id of `context` to every line this logger emits. Without a
    /// context the id is logged as `N/A` and a warning is emitted.
    pub fn with_lambda_context(self, context: Option<&Context>) -> Self {
        let request_id = match context {
            Some(context) => context.request_id.as_str(),
            None => {
                self.span
                    .in_scope(|| tracing::warn!("Fail to extract lambda context"));
                UNKNOWN_REQUEST_ID
            }
        };
        self.span.record("lambda_request_id", request_id);
        self
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Logs every message in `messages` at error level when `result` is an error, or a default
    /// message when `messages` is empty.
    pub fn check_error<T, E: Debug>(&self, result: &Result<T, E>, messages: &[&str]) {
        if let Err(error) = result {
            self.log_error(error, messages, "error is NOT nil in CheckError");
        }
    }

    /// Like [`Self::check_error`] with a single message, but also logs `message_when_ok` at info
    /// level when `result` succeeded.
    pub fn check_error_verbose<T, E: Debug>(
        &self,
        result: &Result<T, E>,
        message_when_err: &str,
        message_when_ok: &str,
    ) {
        match result {
            Err(error) => self.log_error(error, &[message_when_err], message_when_err),
            Ok(_) => self
                .span
                .in_scope(|| tracing::info!("{message_when_ok}")),
        }
    }

    /// Returns whether `result` succeeded, logging `messages` when it did not.
    pub fn is_ok<T, E: Debug>(&self, result: &Result<T, E>, messages: &[&str]) -> bool {
        match result {
            Ok(_) => true,
            Err(error) => {
                self.log_error(error, messages, "error is NOT nil in condition");
                false
            }
        }
    }

    /// Returns whether `result` failed, logging `messages` when it unexpectedly succeeded.
    pub fn is_err<T, E>(&self, result: &Result<T, E>, messages: &[&str]) -> bool {
        if result.is_ok() {
            self.span.in_scope(|| {
                if messages.is_empty() {
                    tracing::error!("error is nil in condition");
                }
                for message in messages {
                    tracing::error!("{message}");
                }
            });
            return false;
        }
        true
    }

    fn log_error<E: Debug>(&self, error: &E, messages: &[&str], default_message: &str) {
        self.span.in_scope(|| {
            if messages.is_empty() {
                tracing::error!(error = ?error, "{default_message}");
            }
            for message in messages {
                tracing::error!(error = ?error, "{message}");
            }
        });
    }
}
