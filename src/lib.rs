//! Trader Town - persona-driven trading decisions
//!
//! This library turns a market snapshot into a validated BUY/SELL/HOLD
//! decision by prompting a text-completion service as a fundamentals or a
//! technical trading persona and parsing its free-form reply.

pub mod agents;
pub mod config;
pub mod constants;
pub mod data;
pub mod decision;
pub mod error;
pub mod indicators;
pub mod llm;
pub mod parser;
pub mod prompt;

// Re-export commonly used types
pub use agents::{Persona, PersonaAnalyzer, PersonaKind};
pub use config::AppConfig;
pub use data::{Candle, Fundamentals, MarketSnapshot};
pub use decision::{Action, Decision};
pub use error::{AnalysisError, ConfigError, GatewayError};
pub use llm::{CompletionGateway, LLMClient};

#[cfg(test)]
mod decision_tests;
#[cfg(test)]
mod indicators_tests;
