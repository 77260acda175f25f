//! Error kinds surfaced by the orchestrator.
//!
//! Only conditions the caller must branch on are errors. Soft conditions —
//! unknown language, a morphology miss — are values inside the result
//! (`language = "unknown"`, `fallback = true` traces), never `Err`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Input cannot be processed at all (oversize, unrecoverable encoding).
    /// Maps to a 400-class response at the HTTP boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request deadline expired between stages. Maps to a 503-class
    /// response; no partial result is returned.
    #[error("request deadline exceeded after stage `{stage}`")]
    Timeout { stage: &'static str },

    /// A bug: a stage violated its contract. The orchestrator catches this at
    /// the boundary and sanitizes the message.
    #[error("internal failure in stage `{stage}`: {message}")]
    Internal { stage: &'static str, message: String },
}

/// Errors from loading configuration (flag file, dictionary files).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("unknown environment `{0}` (expected development, staging, or production)")]
    UnknownEnvironment(String),
}
