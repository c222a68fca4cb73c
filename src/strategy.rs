//! Profit computation under the two named strategies.

use crate::signals::SignalSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a profit query names a strategy outside {"hold", "trade"}.
///
/// Recoverable: callers report it and carry on, so a zero profit is
/// distinguishable from an invalid request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("unknown strategy '{0}': expected one of \"hold\", \"trade\"")]
    Unknown(String),
}

/// How profit over a date range is attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Buy and hold for the entire range regardless of signal
    Hold,
    /// Hold only on days where the short average is above the long
    Trade,
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hold" => Ok(Strategy::Hold),
            "trade" => Ok(Strategy::Trade),
            other => Err(StrategyError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Hold => write!(f, "hold"),
            Strategy::Trade => write!(f, "trade"),
        }
    }
}

impl SignalSeries {
    /// Total profit over `start..=end` under the given strategy.
    ///
    /// Both endpoints are inclusive. Hold sums the next-day deltas of the
    /// selected dates, skipping the final date's undefined delta rather
    /// than counting it as zero. Trade sums the per-day strategy returns.
    /// An empty or inverted range yields 0.
    ///
    /// The result is unrounded; apply [`round2`] for display.
    pub fn profit(&self, strategy: Strategy, start: NaiveDate, end: NaiveDate) -> f64 {
        let selected = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end);

        match strategy {
            Strategy::Hold => selected.filter_map(|p| p.next_day_delta).sum(),
            Strategy::Trade => selected.map(|p| p.strategy_return).sum(),
        }
    }

    /// String-keyed profit query for callers holding a strategy name.
    ///
    /// An unrecognized name is a `StrategyError`, never a crash.
    pub fn profit_named(
        &self,
        strategy: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, StrategyError> {
        Ok(self.profit(strategy.parse()?, start, end))
    }
}

/// Round to 2 decimal places, for display only.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
