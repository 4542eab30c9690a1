//! Custom error types for the decision pipeline
//!
//! Only configuration, snapshot validation and gateway failures ever leave the
//! pipeline. Malformed completion replies are absorbed by the parser, which
//! uses [`ReplyParseError`] purely as a diagnostic.

use thiserror::Error;

/// Top-level analysis errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    #[error("Completion gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Configuration errors, fatal at construction time
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No API key configured: pass one explicitly or set {primary} (or legacy {legacy})")]
    MissingCredential {
        primary: &'static str,
        legacy: &'static str,
    },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Completion gateway failures, never retried by the pipeline
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("Rate limited: {reason}")]
    RateLimited { reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Completion API error: {0}")]
    Api(String),
}

/// Persona name parsing errors
#[derive(Error, Debug, PartialEq)]
pub enum PersonaError {
    #[error("Unknown persona '{name}' (expected fundamentals or technical)")]
    Unknown { name: String },
}

/// Snapshot validation errors
#[derive(Error, Debug, PartialEq)]
pub enum SnapshotError {
    #[error("Invalid current price {price}: must be a positive finite number")]
    InvalidCurrentPrice { price: f64 },

    #[error("Invalid close {close} for candle #{index}: must be a positive finite number")]
    InvalidClose { index: usize, close: f64 },

    #[error("Invalid volume {volume} for candle #{index}: must be non-negative")]
    InvalidVolume { index: usize, volume: f64 },

    #[error("Malformed OHLC row: expected 5 values, got {len}")]
    MalformedOhlcRow { len: usize },

    #[error("Invalid OHLC timestamp {millis}")]
    InvalidTimestamp { millis: i64 },
}

/// Why a completion reply could not be turned into a decision
#[derive(Error, Debug)]
pub enum ReplyParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field `{field}` is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("field `{field}` is not finite")]
    NonFinite { field: &'static str },
}

impl GatewayError {
    /// Classify a provider error message into the gateway taxonomy.
    pub fn classify(message: String) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("401")
            || lower.contains("403")
            || lower.contains("unauthorized")
            || lower.contains("api key")
            || lower.contains("api_key")
            || lower.contains("authentication")
        {
            GatewayError::Authentication { reason: message }
        } else if lower.contains("429") || lower.contains("rate limit") || lower.contains("rate_limit") {
            GatewayError::RateLimited { reason: message }
        } else {
            GatewayError::Api(message)
        }
    }
}
