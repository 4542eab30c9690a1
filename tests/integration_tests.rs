//! Integration tests for the decision pipeline.
//! These tests drive both personas end to end against an in-memory gateway.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use trader_town::agents::analyze_all;
use trader_town::error::GatewayError;
use trader_town::{
    Action, AnalysisError, Candle, CompletionGateway, Fundamentals, MarketSnapshot, Persona, PersonaAnalyzer,
    PersonaKind,
};

/// Gateway that returns a canned reply per system prompt and records prompts.
#[derive(Default)]
struct RecordingGateway {
    replies: Vec<(&'static str, String)>,
    prompts: Mutex<Vec<String>>,
    fail_with_timeout: bool,
}

impl RecordingGateway {
    fn with_reply(mut self, persona: &Persona, reply: &str) -> Self {
        self.replies.push((persona.system_prompt, reply.to_string()));
        self
    }
}

#[async_trait]
impl CompletionGateway for RecordingGateway {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        if self.fail_with_timeout {
            return Err(GatewayError::Timeout { timeout_secs: 60 });
        }
        Ok(self
            .replies
            .iter()
            .find(|(system, _)| *system == system_prompt)
            .map(|(_, reply)| reply.clone())
            .unwrap_or_default())
    }
}

fn sample_candles() -> Vec<Candle> {
    let mut candles = Vec::new();
    let mut base = 100.0;
    for i in 0..20 {
        let open = base + i as f64 * 0.5;
        let close = open + 1.0;
        candles.push(Candle {
            close,
            timestamp: Some(format!("2024-01-{:02} 09:30:00", i + 1)),
            open: Some(open),
            high: Some(close + 0.5),
            low: Some(open - 0.3),
            volume: Some(1_000_000.0 + i as f64 * 50_000.0),
        });
        base = close;
    }
    candles
}

/// Price-only technical analysis with a garbage reply yields the fallback HOLD
#[tokio::test]
async fn test_price_only_technical_with_garbage_reply() {
    let technical = Persona::technical();
    let gateway = Arc::new(RecordingGateway::default().with_reply(&technical, "not json"));
    let analyzer = PersonaAnalyzer::new(technical, gateway.clone());

    let decision = analyzer.analyze(&MarketSnapshot::new(100.0)).await.unwrap();

    assert_eq!(decision.action, Action::Hold);
    assert_eq!(decision.confidence, 0.3);
    assert_eq!(decision.price, 100.0);
    assert!(decision.target_price.is_none());

    let prompts = gateway.prompts.lock().unwrap();
    assert!(prompts[0].contains("Current price: 100.0"));
    assert!(prompts[0].contains("no candle data supplied"));
}

/// Fenced JSON reply is normalized and the price comes from the snapshot
#[tokio::test]
async fn test_fenced_buy_reply() {
    let technical = Persona::technical();
    let reply = "Analysis done.\n```json\n{\"action\":\"buy\",\"confidence\":0.8,\"reasoning\":\"x\",\"target_price\":110,\"price\":1}\n```";
    let analyzer = PersonaAnalyzer::new(technical.clone(), RecordingGateway::default().with_reply(&technical, reply));

    let decision = analyzer.analyze(&MarketSnapshot::new(100.0)).await.unwrap();
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "action": "BUY",
            "confidence": 0.8,
            "reasoning": "x",
            "price": 100.0,
            "target_price": 110.0,
            "stop_loss": null
        })
    );
}

/// Both personas run concurrently on a rich snapshot and see different prompts
#[tokio::test]
async fn test_both_personas_on_full_snapshot() {
    let fundamentals = Persona::fundamentals();
    let technical = Persona::technical();
    let gateway = Arc::new(
        RecordingGateway::default()
            .with_reply(&fundamentals, r#"{"action": "HOLD", "confidence": 0.55, "reasoning": "fair value"}"#)
            .with_reply(
                &technical,
                r#"{"action": "BUY", "confidence": 0.72, "reasoning": "uptrend", "target_price": 140, "stop_loss": 125}"#,
            ),
    );

    let candles = sample_candles();
    let current_price = candles[candles.len() - 1].close;
    let snapshot = MarketSnapshot::new(current_price)
        .with_symbol("AAPL")
        .with_candles(candles)
        .with_fundamentals(Fundamentals {
            market_cap: Some(3_000_000_000_000.0),
            pe_ratio: Some(28.5),
            pb_ratio: Some(45.2),
            revenue: Some(394_328_000_000.0),
            profit: Some(99_803_000_000.0),
        });

    let analyzers = vec![
        PersonaAnalyzer::new(fundamentals, gateway.clone()),
        PersonaAnalyzer::new(technical, gateway.clone()),
    ];
    let results = analyze_all(&snapshot, &analyzers).await;

    let (kind, fundamentals_result) = &results[0];
    assert_eq!(*kind, PersonaKind::Fundamentals);
    let fundamentals_decision = fundamentals_result.as_ref().unwrap();
    assert_eq!(fundamentals_decision.action, Action::Hold);
    assert_eq!(fundamentals_decision.price, current_price);

    let (kind, technical_result) = &results[1];
    assert_eq!(*kind, PersonaKind::Technical);
    let technical_decision = technical_result.as_ref().unwrap();
    assert_eq!(technical_decision.action, Action::Buy);
    assert_eq!(technical_decision.target_price, Some(140.0));
    assert_eq!(technical_decision.stop_loss, Some(125.0));

    let prompts = gateway.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    let fundamentals_prompt = prompts.iter().find(|p| p.contains("Fundamentals:")).unwrap();
    let technical_prompt = prompts.iter().find(|p| p.contains("- MA10:")).unwrap();
    assert!(fundamentals_prompt.contains("- P/E ratio: 28.5"));
    assert!(!fundamentals_prompt.contains("- MA5:"));
    assert!(!technical_prompt.contains("P/E"));
    assert!(technical_prompt.contains("- Recent high:"));
}

/// Gateway timeouts surface as analysis failures, not fallback decisions
#[tokio::test]
async fn test_gateway_timeout_propagates() {
    let gateway = RecordingGateway {
        fail_with_timeout: true,
        ..Default::default()
    };
    let analyzer = PersonaAnalyzer::new(Persona::fundamentals(), gateway);

    let result = analyzer.analyze(&MarketSnapshot::new(10.0)).await;

    assert!(matches!(
        result,
        Err(AnalysisError::Gateway(GatewayError::Timeout { timeout_secs: 60 }))
    ));
}

/// An empty reply (e.g. no completion choices) resolves to the fallback
#[tokio::test]
async fn test_empty_reply_falls_back() {
    let analyzer = PersonaAnalyzer::new(Persona::technical(), RecordingGateway::default());

    let decision = analyzer.analyze(&MarketSnapshot::new(42.0)).await.unwrap();

    assert_eq!(decision.action, Action::Hold);
    assert_eq!(decision.confidence, 0.3);
    assert_eq!(decision.price, 42.0);
}

/// Snapshots arriving as JSON from the HTTP layer feed straight in
#[tokio::test]
async fn test_snapshot_from_json() {
    let json = r#"{
        "current_price": 64000.5,
        "symbol": "BTC",
        "klines": [
            {"close": 63000.0, "open": 62500.0, "high": 63200.0, "low": 62400.0, "volume": 1200},
            {"close": 64000.5, "open": 63000.0}
        ]
    }"#;
    let snapshot: MarketSnapshot = serde_json::from_str(json).unwrap();
    let technical = Persona::technical();
    let gateway = Arc::new(
        RecordingGateway::default().with_reply(&technical, r#"{"action": "sell", "confidence": "0.4", "reasoning": "overbought"}"#),
    );
    let analyzer = PersonaAnalyzer::new(technical, gateway.clone());

    let decision = analyzer.analyze(&snapshot).await.unwrap();

    assert_eq!(decision.action, Action::Sell);
    assert_eq!(decision.confidence, 0.4);
    assert_eq!(decision.price, 64000.5);
    assert!(gateway.prompts.lock().unwrap()[0].contains("- Trend: 63000.00 -> 64000.50, change +1.59%"));
}
