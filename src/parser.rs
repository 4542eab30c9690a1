//! Turns untrusted completion text into a [`Decision`].
//!
//! [`parse`] never fails: any reply that cannot be deserialized into the
//! expected shape resolves to [`Decision::fallback`].

use serde::Deserialize;
use tracing::{info, warn};

use crate::constants::decision::{DEFAULT_CONFIDENCE, RAW_REPLY_PREVIEW_CHARS};
use crate::constants::events;
use crate::decision::{Action, Decision};
use crate::error::ReplyParseError;

/// Shape the model is asked to return. Unknown keys (including any `price`
/// the model echoes back) are ignored.
#[derive(Debug, Deserialize)]
struct RawReply {
    action: Option<String>,
    confidence: Option<NumberLike>,
    reasoning: Option<String>,
    target_price: Option<NumberLike>,
    stop_loss: Option<NumberLike>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

/// Parse a completion reply. `price` always comes from `current_price`.
pub fn parse(raw: &str, current_price: f64) -> Decision {
    match try_parse(raw, current_price) {
        Ok(decision) => {
            info!(
                event = events::DECISION_PARSED,
                "📋 Parsed decision: {} (confidence {:.2})", decision.action, decision.confidence
            );
            decision
        }
        Err(e) => {
            let preview: String = raw.chars().take(RAW_REPLY_PREVIEW_CHARS).collect();
            warn!(event = events::DECISION_FALLBACK, "⚠️ Falling back to HOLD: {}", e);
            Decision::fallback(
                format!("failed to parse completion reply: {}. raw reply: {}", e, preview),
                current_price,
            )
        }
    }
}

fn try_parse(raw: &str, current_price: f64) -> Result<Decision, ReplyParseError> {
    let reply: RawReply = serde_json::from_str(extract_payload(raw))?;

    let action = reply
        .action
        .as_deref()
        .map(Action::normalize)
        .unwrap_or(Action::Hold);
    let confidence = coerce("confidence", reply.confidence)?.unwrap_or(DEFAULT_CONFIDENCE);
    let target_price = coerce("target_price", reply.target_price)?;
    let stop_loss = coerce("stop_loss", reply.stop_loss)?;

    Ok(Decision::new(action, confidence, reply.reasoning.unwrap_or_default(), current_price)
        .with_targets(target_price, stop_loss))
}

const JSON_FENCE: &str = "```json";

/// Pick the structured payload out of a reply: a ```json block (tag matched
/// case-insensitively) first, then the first generic fenced block, otherwise
/// the whole text.
pub fn extract_payload(text: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let json_fence = text.to_ascii_lowercase().find(JSON_FENCE);

    let (body, tagged) = if let Some(start) = json_fence {
        (&text[start + JSON_FENCE.len()..], true)
    } else if let Some((_, rest)) = text.split_once("```") {
        (rest, false)
    } else {
        return text.trim();
    };

    let block = body.split("```").next().unwrap_or(body);
    if tagged {
        block.trim()
    } else {
        strip_language_tag(block).trim()
    }
}

/// Drop an info string such as `JSON` or `javascript` after an opening fence.
fn strip_language_tag(block: &str) -> &str {
    match block.split_once('\n') {
        Some((first, rest))
            if !first.trim().is_empty()
                && first.trim().chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            rest
        }
        _ => block,
    }
}

fn coerce(field: &'static str, value: Option<NumberLike>) -> Result<Option<f64>, ReplyParseError> {
    let number = match value {
        None => return Ok(None),
        Some(NumberLike::Number(n)) => n,
        Some(NumberLike::Text(text)) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| ReplyParseError::NotANumber { field, value: text })?
        }
    };

    if number.is_finite() {
        Ok(Some(number))
    } else {
        Err(ReplyParseError::NonFinite { field })
    }
}
