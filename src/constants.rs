//! Application-wide constants and magic numbers
//!
//! This module centralizes the thresholds, defaults and environment variable
//! names used by the decision pipeline so they can be tuned in one place.

use std::time::Duration;

/// Minimum-data thresholds for the derived statistics in the prompt
pub mod indicators {
    /// Candles required before a trend line is emitted
    pub const MIN_TREND_CANDLES: usize = 2;

    /// Short simple moving average period
    pub const MA_SHORT_PERIOD: usize = 5;

    /// Long simple moving average period
    pub const MA_LONG_PERIOD: usize = 10;

    /// How many trailing highs/lows are scanned for the recent range
    pub const RECENT_RANGE_WINDOW: usize = 20;

    /// How many trailing volumes feed the average volume
    pub const VOLUME_AVERAGE_WINDOW: usize = 10;

    /// Volume ratio reported when the average volume is zero
    pub const NEUTRAL_VOLUME_RATIO: f64 = 1.0;
}

/// Prompt rendering constants
pub mod prompt {
    /// Most recent candles listed by the fundamentals persona
    pub const FUNDAMENTALS_CANDLE_WINDOW: usize = 20;
}

/// Decision parsing constants
pub mod decision {
    /// Confidence used when the reply omits it
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;

    /// Confidence of the fallback HOLD decision
    pub const FALLBACK_CONFIDENCE: f64 = 0.3;

    /// Reasoning used when the reply omits it or leaves it blank
    pub const DEFAULT_REASONING: &str = "no reason given";

    /// Characters of the raw reply kept in the fallback reasoning
    pub const RAW_REPLY_PREVIEW_CHARS: usize = 200;
}

/// Completion service constants
pub mod llm {
    use super::*;

    /// Default model identifier
    pub const DEFAULT_MODEL: &str = "glm-4";

    /// Default OpenAI-compatible endpoint (Zhipu GLM)
    pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

    /// Sampling temperature sent with every request
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Completion length cap sent with every request
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;

    /// Upper bound on a single completion request
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Primary credential variable
    pub const PRIMARY_API_KEY_ENV: &str = "ZHIPU_API_KEY";

    /// Legacy credential variable, consulted after the primary one
    pub const LEGACY_API_KEY_ENV: &str = "OPENAI_API_KEY";
}

/// Logging event names for structured logging
pub mod events {
    pub const PROMPT_BUILT: &str = "prompt_built";
    pub const COMPLETION_RECEIVED: &str = "completion_received";
    pub const DECISION_PARSED: &str = "decision_parsed";
    pub const DECISION_FALLBACK: &str = "decision_fallback";
    pub const GATEWAY_FAILED: &str = "gateway_failed";
    pub const OHLC_ROW_SKIPPED: &str = "ohlc_row_skipped";
}
