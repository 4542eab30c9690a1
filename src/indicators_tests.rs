//! Unit tests for derived statistics - trend, moving averages, range, volume.

#[cfg(test)]
mod indicators_tests {
    use crate::data::Candle;
    use crate::indicators::*;

    fn closes(values: &[f64]) -> Vec<Candle> {
        values.iter().map(|&c| Candle::new(c)).collect()
    }

    // ============= Change Tests =============

    #[test]
    fn test_candle_change_pct() {
        let up = Candle {
            open: Some(100.0),
            ..Candle::new(105.0)
        };
        assert!((candle_change_pct(&up).unwrap() - 5.0).abs() < 1e-9);

        let zero_open = Candle {
            open: Some(0.0),
            ..Candle::new(5.0)
        };
        assert_eq!(candle_change_pct(&zero_open), Some(0.0));

        assert_eq!(candle_change_pct(&Candle::new(5.0)), None);
    }

    #[test]
    fn test_trend_pct_matches_first_to_last() {
        let candles = closes(&[80.0, 120.0, 90.0, 100.0]);
        let expected = (100.0 - 80.0) / 80.0 * 100.0;
        assert!((trend_pct(&candles).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trend_pct_needs_two_candles() {
        assert_eq!(trend_pct(&[]), None);
        assert_eq!(trend_pct(&closes(&[100.0])), None);
    }

    #[test]
    fn test_trend_pct_zero_first_close() {
        assert_eq!(trend_pct(&closes(&[0.0, 50.0])), Some(0.0));
    }

    // ============= Moving Average Tests =============

    #[test]
    fn test_sma_uses_most_recent_closes() {
        let candles = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(simple_moving_average(&candles, 5), Some(5.0));
        assert_eq!(simple_moving_average(&candles, 10), None);
    }

    #[test]
    fn test_sma_exact_period() {
        let candles = closes(&[2.0; 10]);
        assert_eq!(simple_moving_average(&candles, 10), Some(2.0));
        assert_eq!(simple_moving_average(&candles, 0), None);
    }

    // ============= Range Tests =============

    #[test]
    fn test_recent_high_low_skip_missing() {
        let mut candles = closes(&[10.0, 11.0, 12.0]);
        candles[0].high = Some(15.0);
        candles[2].high = Some(13.0);
        candles[1].low = Some(9.5);

        assert_eq!(recent_high(&candles), Some(15.0));
        assert_eq!(recent_low(&candles), Some(9.5));
        assert_eq!(recent_high(&closes(&[1.0])), None);
    }

    #[test]
    fn test_recent_high_window_is_twenty() {
        let mut candles = closes(&[10.0; 25]);
        for (i, candle) in candles.iter_mut().enumerate() {
            candle.high = Some(if i == 0 { 999.0 } else { 20.0 + i as f64 });
        }
        // the 999 spike falls outside the trailing window
        assert_eq!(recent_high(&candles), Some(44.0));
    }

    // ============= Volume Tests =============

    #[test]
    fn test_volume_stats_ratio() {
        let mut candles = closes(&[1.0, 1.0, 1.0]);
        candles[0].volume = Some(100.0);
        candles[1].volume = Some(100.0);
        candles[2].volume = Some(400.0);

        let stats = volume_stats(&candles).unwrap();
        assert_eq!(stats.current, 400.0);
        assert_eq!(stats.average, 200.0);
        assert_eq!(stats.ratio, 2.0);
    }

    #[test]
    fn test_volume_stats_zero_average_is_neutral() {
        let mut candles = closes(&[1.0, 1.0]);
        candles[0].volume = Some(0.0);
        candles[1].volume = Some(0.0);

        assert_eq!(volume_stats(&candles).unwrap().ratio, 1.0);
        assert_eq!(volume_stats(&closes(&[1.0])), None);
    }

    #[test]
    fn test_volume_stats_last_ten_only() {
        let mut candles = closes(&[1.0; 12]);
        for (i, candle) in candles.iter_mut().enumerate() {
            candle.volume = Some(if i < 2 { 1_000_000.0 } else { 10.0 });
        }
        assert_eq!(volume_stats(&candles).unwrap().average, 10.0);
    }
}
