//! Signal derivation for the moving average crossover rule.

use crate::data::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calculates the simple moving average over a trailing window.
///
/// Each output index holds the arithmetic mean of the `window` values
/// ending at that index inclusive, or `None` while fewer than `window`
/// values exist. A window of 0, or one longer than the data, yields
/// `None` at every index rather than an error.
///
/// # Arguments
/// * `data` - A slice of f64 values.
/// * `window` - The trailing window size.
///
/// # Returns
/// A Vec<Option<f64>> with one entry per input value.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || window > data.len() {
        return vec![None; data.len()];
    }

    let mut means = Vec::with_capacity(data.len());
    for _ in 0..window - 1 {
        means.push(None);
    }

    let mut sum: f64 = data.iter().take(window).sum();
    means.push(Some(sum / window as f64));

    for i in window..data.len() {
        sum = sum - data[i - window] + data[i];
        means.push(Some(sum / window as f64));
    }

    means
}

/// One derived day: the crossover state and the return it implies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price on this date
    pub close: f64,
    /// Short-window average ending here, if enough history exists
    pub short_avg: Option<f64>,
    /// Long-window average ending here, if enough history exists
    pub long_avg: Option<f64>,
    /// Keep the asset through the next day: short average strictly above long
    pub hold: bool,
    /// Next close minus this close; None on the last date
    pub next_day_delta: Option<f64>,
    /// next_day_delta when holding, otherwise 0
    pub strategy_return: f64,
}

/// Full derived series for one window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSeries {
    /// Short trailing window in trading days
    pub short_window: usize,
    /// Long trailing window in trading days
    pub long_window: usize,
    /// One point per input date, in series order
    pub points: Vec<SignalPoint>,
}

/// Derives hold signals and per-day returns from a price series.
///
/// The engine borrows the series read-only and produces a fresh
/// `SignalSeries` per call; the input is never mutated.
#[derive(Debug, Clone, Copy)]
pub struct SignalEngine {
    short_window: usize,
    long_window: usize,
}

impl SignalEngine {
    pub const DEFAULT_SHORT_WINDOW: usize = 10;
    pub const DEFAULT_LONG_WINDOW: usize = 30;

    /// Create an engine with the given trailing window sizes.
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    /// Compute the derived signal series for every date.
    ///
    /// The hold decision is a strict greater-than on the two averages:
    /// false when either average is undefined, and false on equality.
    /// A held final day has no next-day delta and contributes a zero
    /// strategy return.
    pub fn derive_signals(&self, series: &PriceSeries) -> SignalSeries {
        let closes = series.closes();
        let short = rolling_mean(&closes, self.short_window);
        let long = rolling_mean(&closes, self.long_window);

        let mut points = Vec::with_capacity(series.len());
        for (i, bar) in series.points().iter().enumerate() {
            let hold = match (short[i], long[i]) {
                (Some(s), Some(l)) => s > l,
                _ => false,
            };
            let next_day_delta = closes.get(i + 1).map(|next| next - bar.close);
            let strategy_return = if hold {
                next_day_delta.unwrap_or(0.0)
            } else {
                0.0
            };

            points.push(SignalPoint {
                date: bar.date,
                close: bar.close,
                short_avg: short[i],
                long_avg: long[i],
                hold,
                next_day_delta,
                strategy_return,
            });
        }

        SignalSeries {
            short_window: self.short_window,
            long_window: self.long_window,
            points,
        }
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SHORT_WINDOW, Self::DEFAULT_LONG_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PricePoint, PriceSeries};
    use chrono::NaiveDate;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2017, 1, 2).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn test_rolling_mean() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let means = rolling_mean(&data, 3);

        assert_eq!(means.len(), 5);
        assert!(means[0].is_none());
        assert!(means[1].is_none());
        assert!((means[2].unwrap() - 2.0).abs() < 1e-10);
        assert!((means[3].unwrap() - 3.0).abs() < 1e-10);
        assert!((means[4].unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_rolling_mean_edge_cases() {
        let data = vec![1.0, 2.0];

        // Window longer than the data: all undefined, no error
        let means = rolling_mean(&data, 3);
        assert_eq!(means, vec![None, None]);

        // Zero window: all undefined
        let means = rolling_mean(&data, 0);
        assert_eq!(means, vec![None, None]);

        let means = rolling_mean(&[], 3);
        assert!(means.is_empty());
    }

    #[test]
    fn test_constant_prices_never_hold() {
        let series = series_from_closes(&[50.0; 40]);
        let signals = SignalEngine::new(5, 20).derive_signals(&series);

        for point in &signals.points {
            assert!(!point.hold);
            assert_eq!(point.strategy_return, 0.0);
        }
        // Both averages equal the constant price where defined
        let last = signals.points.last().unwrap();
        assert!((last.short_avg.unwrap() - 50.0).abs() < 1e-10);
        assert!((last.long_avg.unwrap() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_equal_windows_never_hold() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64) * 1.5).collect();
        let series = series_from_closes(&closes);
        let signals = SignalEngine::new(7, 7).derive_signals(&series);

        // Equal averages fail the strict comparison everywhere
        for point in &signals.points {
            assert!(!point.hold);
        }
    }

    #[test]
    fn test_concrete_four_day_scenario() {
        // closes [10, 12, 9, 15], windows (1, 2)
        let series = series_from_closes(&[10.0, 12.0, 9.0, 15.0]);
        let signals = SignalEngine::new(1, 2).derive_signals(&series);
        let p = &signals.points;

        // Day 1: long average undefined, no hold
        assert!(p[0].long_avg.is_none());
        assert!(!p[0].hold);
        assert!((p[0].next_day_delta.unwrap() - 2.0).abs() < 1e-10);
        assert_eq!(p[0].strategy_return, 0.0);

        // Day 2: short 12 > long 11, hold through the drop to 9
        assert!((p[1].short_avg.unwrap() - 12.0).abs() < 1e-10);
        assert!((p[1].long_avg.unwrap() - 11.0).abs() < 1e-10);
        assert!(p[1].hold);
        assert!((p[1].strategy_return - (-3.0)).abs() < 1e-10);

        // Day 3: short 9 < long 10.5, sit out the rise to 15
        assert!((p[2].short_avg.unwrap() - 9.0).abs() < 1e-10);
        assert!((p[2].long_avg.unwrap() - 10.5).abs() < 1e-10);
        assert!(!p[2].hold);
        assert!((p[2].next_day_delta.unwrap() - 6.0).abs() < 1e-10);
        assert_eq!(p[2].strategy_return, 0.0);

        // Day 4: held, but no next day exists
        assert!(p[3].hold);
        assert!(p[3].next_day_delta.is_none());
        assert_eq!(p[3].strategy_return, 0.0);
    }

    #[test]
    fn test_derive_signals_is_idempotent() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0)
            .collect();
        let series = series_from_closes(&closes);
        let engine = SignalEngine::new(4, 12);

        let first = engine.derive_signals(&series);
        let second = engine.derive_signals(&series);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_windows() {
        let engine = SignalEngine::default();
        assert_eq!(engine.short_window(), 10);
        assert_eq!(engine.long_window(), 30);
    }

    #[test]
    fn test_window_exceeding_series_is_not_an_error() {
        let series = series_from_closes(&[10.0, 11.0, 12.0]);
        let signals = SignalEngine::new(10, 30).derive_signals(&series);

        assert_eq!(signals.points.len(), 3);
        for point in &signals.points {
            assert!(point.short_avg.is_none());
            assert!(point.long_avg.is_none());
            assert!(!point.hold);
        }
    }
}
