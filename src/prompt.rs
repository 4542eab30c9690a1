//! Renders a [`MarketSnapshot`] into the user prompt sent with a persona's
//! system instructions.
//!
//! Output is a pure function of the snapshot and profile. All numbers go
//! through the fixed formatters below, so identical input always yields
//! byte-identical text.

use crate::constants::indicators::{MA_LONG_PERIOD, MA_SHORT_PERIOD};
use crate::data::{Candle, Fundamentals, MarketSnapshot};
use crate::indicators;

/// Which sections a persona's prompt contains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PromptProfile {
    /// Opening line of the request
    pub intro: &'static str,
    /// What the closing instruction asks the decision to be based on
    pub focus: &'static str,
    /// Note emitted when no candles were supplied
    pub no_candles_note: &'static str,
    /// Moving averages, recent range and volume lines
    pub include_indicators: bool,
    /// Fundamentals section (or its "not supplied" note)
    pub include_fundamentals: bool,
    /// Cap on listed candles, most recent kept. Statistics always use all.
    pub candle_window: Option<usize>,
}

pub fn build_prompt(snapshot: &MarketSnapshot, profile: &PromptProfile) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!("{}\n\n", profile.intro));

    if let Some(symbol) = &snapshot.symbol {
        prompt.push_str(&format!("Symbol: {}\n", symbol));
    }
    if let Some(company) = &snapshot.company_name {
        prompt.push_str(&format!("Company: {}\n", company));
    }
    if let Some(industry) = &snapshot.industry {
        prompt.push_str(&format!("Industry: {}\n", industry));
    }
    prompt.push_str(&format!("Current price: {}\n", format_price(snapshot.current_price)));

    if snapshot.candles.is_empty() {
        prompt.push_str(&format!("\nNote: {}\n", profile.no_candles_note));
    } else {
        write_candles(&mut prompt, &snapshot.candles, profile.candle_window);
        write_statistics(&mut prompt, &snapshot.candles, profile.include_indicators);
    }

    if profile.include_fundamentals {
        write_fundamentals(&mut prompt, &snapshot.fundamentals);
    }

    prompt.push_str(&format!(
        "\nBased on {}, decide whether to BUY, SELL or HOLD, give a confidence between 0.0 and 1.0 \
         and explain your reasoning. If the data is sparse, a low-confidence decision is acceptable. \
         State in your reasoning which data were missing.",
        profile.focus
    ));

    prompt
}

fn write_candles(prompt: &mut String, candles: &[Candle], window: Option<usize>) {
    let shown = window.map_or(candles.len(), |w| w.min(candles.len()));
    let start = candles.len() - shown;

    if shown < candles.len() {
        prompt.push_str(&format!("\nCandles (last {} of {}, oldest first):\n", shown, candles.len()));
    } else {
        prompt.push_str(&format!("\nCandles ({}, oldest first):\n", candles.len()));
    }

    for (i, candle) in candles[start..].iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", start + i + 1, format_candle(candle)));
    }
}

fn format_candle(candle: &Candle) -> String {
    let mut line = String::new();
    if let Some(ts) = &candle.timestamp {
        line.push_str(&format!("Time: {}, ", ts));
    }
    line.push_str(&format!("Close: {:.2}", candle.close));

    if let (Some(open), Some(change)) = (candle.open, indicators::candle_change_pct(candle)) {
        let arrow = if candle.close >= open { "↑" } else { "↓" };
        line.push_str(&format!(", Open: {:.2} {} {:.2}%", open, arrow, change.abs()));
    }
    if let Some(high) = candle.high {
        line.push_str(&format!(", High: {:.2}", high));
    }
    if let Some(low) = candle.low {
        line.push_str(&format!(", Low: {:.2}", low));
    }
    if let Some(volume) = candle.volume {
        line.push_str(&format!(", Volume: {:.0}", volume));
    }
    line
}

fn write_statistics(prompt: &mut String, candles: &[Candle], include_indicators: bool) {
    let Some(trend) = indicators::trend_pct(candles) else {
        return;
    };
    let (first, last) = match (candles.first(), candles.last()) {
        (Some(first), Some(last)) => (first.close, last.close),
        _ => return,
    };

    prompt.push_str("\nStatistics:\n");
    prompt.push_str(&format!("- Trend: {:.2} -> {:.2}, change {:+.2}%\n", first, last, trend));

    if !include_indicators {
        return;
    }

    if let Some(ma) = indicators::simple_moving_average(candles, MA_SHORT_PERIOD) {
        prompt.push_str(&format!("- MA{}: {:.2}\n", MA_SHORT_PERIOD, ma));
    }
    if let Some(ma) = indicators::simple_moving_average(candles, MA_LONG_PERIOD) {
        prompt.push_str(&format!("- MA{}: {:.2}\n", MA_LONG_PERIOD, ma));
    }
    if let Some(high) = indicators::recent_high(candles) {
        prompt.push_str(&format!("- Recent high: {:.2}\n", high));
    }
    if let Some(low) = indicators::recent_low(candles) {
        prompt.push_str(&format!("- Recent low: {:.2}\n", low));
    }
    if let Some(volume) = indicators::volume_stats(candles) {
        prompt.push_str(&format!(
            "- Volume: {:.0} (average {:.0}, ratio {:.2}x)\n",
            volume.current, volume.average, volume.ratio
        ));
    }
}

fn write_fundamentals(prompt: &mut String, fundamentals: &Fundamentals) {
    if fundamentals.is_empty() {
        prompt.push_str(
            "\nNote: no fundamentals supplied; the analysis relies on price action and general market behaviour.\n",
        );
        return;
    }

    prompt.push_str("\nFundamentals:\n");
    if let Some(v) = fundamentals.market_cap {
        prompt.push_str(&format!("- Market cap: {}\n", format_grouped(v)));
    }
    if let Some(v) = fundamentals.pe_ratio {
        prompt.push_str(&format!("- P/E ratio: {}\n", format_price(v)));
    }
    if let Some(v) = fundamentals.pb_ratio {
        prompt.push_str(&format!("- P/B ratio: {}\n", format_price(v)));
    }
    if let Some(v) = fundamentals.revenue {
        prompt.push_str(&format!("- Revenue: {}\n", format_grouped(v)));
    }
    if let Some(v) = fundamentals.profit {
        prompt.push_str(&format!("- Profit: {}\n", format_grouped(v)));
    }
}

/// Shortest round-trip form, always with a decimal point (`100.0`).
pub fn format_price(value: f64) -> String {
    format!("{:?}", value)
}

/// Whole number with thousands separators (`3,000,000`).
pub fn format_grouped(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, digit) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}
