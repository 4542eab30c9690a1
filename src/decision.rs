use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::decision::{DEFAULT_REASONING, FALLBACK_CONFIDENCE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Case-insensitive; anything outside BUY/SELL/HOLD is HOLD.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "BUY" => Action::Buy,
            "SELL" => Action::Sell,
            _ => Action::Hold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated trading decision. Fields are normalized at construction, so a
/// `Decision` value always satisfies its range constraints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub confidence: f64,
    pub reasoning: String,
    pub price: f64,
    pub target_price: Option<f64>,
    pub stop_loss: Option<f64>,
}

impl Decision {
    /// Clamps confidence into [0, 1] and substitutes a default for blank
    /// reasoning. A NaN confidence becomes the fallback confidence.
    pub fn new(action: Action, confidence: f64, reasoning: impl Into<String>, price: f64) -> Self {
        let confidence = if confidence.is_nan() {
            FALLBACK_CONFIDENCE
        } else {
            confidence.clamp(0.0, 1.0)
        };
        let reasoning = reasoning.into();
        let reasoning = if reasoning.trim().is_empty() {
            DEFAULT_REASONING.to_string()
        } else {
            reasoning
        };

        Self {
            action,
            confidence,
            reasoning,
            price,
            target_price: None,
            stop_loss: None,
        }
    }

    pub fn with_targets(mut self, target_price: Option<f64>, stop_loss: Option<f64>) -> Self {
        self.target_price = target_price;
        self.stop_loss = stop_loss;
        self
    }

    /// The safe low-confidence HOLD returned when a reply cannot be used.
    pub fn fallback(reasoning: impl Into<String>, price: f64) -> Self {
        Self::new(Action::Hold, FALLBACK_CONFIDENCE, reasoning, price)
    }
}
