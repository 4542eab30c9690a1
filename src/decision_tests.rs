//! Unit tests for the Decision type and its normalization.

#[cfg(test)]
mod decision_tests {
    use crate::decision::*;

    #[test]
    fn test_action_normalize() {
        assert_eq!(Action::normalize("buy"), Action::Buy);
        assert_eq!(Action::normalize(" SELL "), Action::Sell);
        assert_eq!(Action::normalize("Hold"), Action::Hold);
        assert_eq!(Action::normalize("no_trade"), Action::Hold);
    }

    #[test]
    fn test_decision_new_clamps_and_defaults() {
        let decision = Decision::new(Action::Buy, 2.5, "   ", 10.0);
        assert_eq!(decision.confidence, 1.0);
        assert_eq!(decision.reasoning, "no reason given");

        let decision = Decision::new(Action::Sell, f64::NAN, "r", 10.0);
        assert_eq!(decision.confidence, 0.3);
    }

    #[test]
    fn test_fallback_decision() {
        let decision = Decision::fallback("boom", 55.0);

        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.confidence, 0.3);
        assert_eq!(decision.reasoning, "boom");
        assert_eq!(decision.price, 55.0);
        assert!(decision.target_price.is_none());
    }

    #[test]
    fn test_decision_serializes_uppercase_with_nulls() {
        let decision = Decision::new(Action::Buy, 0.8, "x", 100.0).with_targets(Some(110.0), None);
        let json = serde_json::to_value(&decision).unwrap();

        assert_eq!(json["action"], "BUY");
        assert_eq!(json["confidence"], 0.8);
        assert_eq!(json["price"], 100.0);
        assert_eq!(json["target_price"], 110.0);
        assert!(json["stop_loss"].is_null());
    }
}
