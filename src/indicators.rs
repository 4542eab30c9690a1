//! Derived statistics over a candle series.
//!
//! Every function guards its own minimum-data threshold and returns `None`
//! when there is not enough input. Zero denominators never divide: they
//! resolve to 0% change or a neutral 1.0x volume ratio.

use crate::constants::indicators::*;
use crate::data::Candle;

/// Volume of the latest bar against the trailing average.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeStats {
    pub current: f64,
    pub average: f64,
    pub ratio: f64,
}

/// Percentage change from `from` to `to`, 0 when `from` is zero.
pub fn pct_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        0.0
    } else {
        (to - from) / from * 100.0
    }
}

/// Intrabar change from open to close, if the bar has an open.
pub fn candle_change_pct(candle: &Candle) -> Option<f64> {
    candle.open.map(|open| pct_change(open, candle.close))
}

/// Overall change from the first to the last close. Needs two candles.
pub fn trend_pct(candles: &[Candle]) -> Option<f64> {
    if candles.len() < MIN_TREND_CANDLES {
        return None;
    }
    let first = candles.first()?.close;
    let last = candles.last()?.close;
    Some(pct_change(first, last))
}

/// Mean of the last `period` closes.
pub fn simple_moving_average(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }
    let window = &candles[candles.len() - period..];
    Some(window.iter().map(|c| c.close).sum::<f64>() / period as f64)
}

/// Highest high among the last [`RECENT_RANGE_WINDOW`] candles that carry one.
pub fn recent_high(candles: &[Candle]) -> Option<f64> {
    trailing(candles.iter().filter_map(|c| c.high), RECENT_RANGE_WINDOW)
        .into_iter()
        .reduce(f64::max)
}

/// Lowest low among the last [`RECENT_RANGE_WINDOW`] candles that carry one.
pub fn recent_low(candles: &[Candle]) -> Option<f64> {
    trailing(candles.iter().filter_map(|c| c.low), RECENT_RANGE_WINDOW)
        .into_iter()
        .reduce(f64::min)
}

/// Latest volume against the mean of up to the last
/// [`VOLUME_AVERAGE_WINDOW`] reported volumes.
pub fn volume_stats(candles: &[Candle]) -> Option<VolumeStats> {
    let volumes = trailing(candles.iter().filter_map(|c| c.volume), VOLUME_AVERAGE_WINDOW);
    let current = *volumes.last()?;
    let average = volumes.iter().sum::<f64>() / volumes.len() as f64;
    let ratio = if average > 0.0 {
        current / average
    } else {
        NEUTRAL_VOLUME_RATIO
    };

    Some(VolumeStats {
        current,
        average,
        ratio,
    })
}

fn trailing(values: impl Iterator<Item = f64>, window: usize) -> Vec<f64> {
    let all: Vec<f64> = values.collect();
    let start = all.len().saturating_sub(window);
    all[start..].to_vec()
}
