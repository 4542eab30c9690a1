use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::events;
use crate::error::SnapshotError;

/// One price bar. Only `close` is required; OHLC consistency is not enforced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(close: f64) -> Self {
        Self {
            close,
            ..Default::default()
        }
    }

    /// Normalize a provider OHLC row `[timestamp_ms, open, high, low, close]`.
    /// The row carries no volume.
    pub fn from_ohlc_row(row: &[f64]) -> Result<Self, SnapshotError> {
        let [ts, open, high, low, close] = row else {
            return Err(SnapshotError::MalformedOhlcRow { len: row.len() });
        };

        let millis = *ts as i64;
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or(SnapshotError::InvalidTimestamp { millis })?
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        Ok(Self {
            close: *close,
            timestamp: Some(timestamp),
            open: Some(*open),
            high: Some(*high),
            low: Some(*low),
            volume: None,
        })
    }
}

/// Optional fundamentals, each field independently present or absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pb_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
}

impl Fundamentals {
    pub fn is_empty(&self) -> bool {
        self.market_cap.is_none()
            && self.pe_ratio.is_none()
            && self.pb_ratio.is_none()
            && self.revenue.is_none()
            && self.profit.is_none()
    }
}

/// Input to one analysis call. Candles are chronological, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, alias = "klines")]
    pub candles: Vec<Candle>,
    #[serde(flatten)]
    pub fundamentals: Fundamentals,
}

impl MarketSnapshot {
    pub fn new(current_price: f64) -> Self {
        Self {
            current_price,
            ..Default::default()
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_company(mut self, company_name: impl Into<String>, industry: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self.industry = Some(industry.into());
        self
    }

    pub fn with_candles(mut self, candles: Vec<Candle>) -> Self {
        self.candles = candles;
        self
    }

    pub fn with_fundamentals(mut self, fundamentals: Fundamentals) -> Self {
        self.fundamentals = fundamentals;
        self
    }

    /// Build a snapshot from a provider OHLC series, skipping malformed rows.
    pub fn from_ohlc_rows(current_price: f64, rows: &[Vec<f64>]) -> Self {
        let candles = rows
            .iter()
            .filter_map(|row| match Candle::from_ohlc_row(row) {
                Ok(candle) => Some(candle),
                Err(e) => {
                    warn!(event = events::OHLC_ROW_SKIPPED, "⚠️ Skipping OHLC row: {}", e);
                    None
                }
            })
            .collect();

        Self::new(current_price).with_candles(candles)
    }

    /// Reject prices the pipeline cannot reason about. High/low consistency is
    /// deliberately not checked: source data may violate it.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !is_positive(self.current_price) {
            return Err(SnapshotError::InvalidCurrentPrice {
                price: self.current_price,
            });
        }

        for (index, candle) in self.candles.iter().enumerate() {
            if !is_positive(candle.close) {
                return Err(SnapshotError::InvalidClose {
                    index,
                    close: candle.close,
                });
            }
            if let Some(volume) = candle.volume {
                if volume.is_nan() || volume < 0.0 {
                    return Err(SnapshotError::InvalidVolume { index, volume });
                }
            }
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
