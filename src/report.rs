//! Rendering and persistence of profit comparison results.

use crate::signals::SignalSeries;
use crate::strategy::round2;
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Summary figures for one profit comparison run.
///
/// This is the only computed output that gets persisted; the derived
/// signal series itself is always discarded with the run.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitReport {
    /// Source data file
    pub data_file: String,
    /// Short signal window in trading days
    pub short_window: usize,
    /// Long signal window in trading days
    pub long_window: usize,
    /// First date of the queried range
    pub start_date: NaiveDate,
    /// Last date of the queried range
    pub end_date: NaiveDate,
    /// Buy-and-hold profit over the range (unrounded)
    pub hold_profit: f64,
    /// Crossover strategy profit over the range (unrounded)
    pub trade_profit: f64,
    /// trade_profit - hold_profit (unrounded)
    pub gains: f64,
}

impl ProfitReport {
    pub fn new(
        data_file: String,
        short_window: usize,
        long_window: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
        hold_profit: f64,
        trade_profit: f64,
    ) -> Self {
        Self {
            data_file,
            short_window,
            long_window,
            start_date,
            end_date,
            hold_profit,
            trade_profit,
            gains: trade_profit - hold_profit,
        }
    }
}

/// Write the profit comparison to a human-readable text file.
pub fn write_profit_report<P: AsRef<Path>>(path: P, report: &ProfitReport) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path.as_ref())?;

    writeln!(file, "Moving Average Crossover Results")?;
    writeln!(file, "{}", "=".repeat(60))?;
    writeln!(file)?;
    writeln!(file, "Data file:      {}", report.data_file)?;
    writeln!(file, "Short window:   {} days", report.short_window)?;
    writeln!(file, "Long window:    {} days", report.long_window)?;
    writeln!(
        file,
        "Date range:     {} to {}",
        report.start_date, report.end_date
    )?;
    writeln!(file)?;
    writeln!(file, "Profit by trading:  {:.2}", round2(report.trade_profit))?;
    writeln!(file, "Profit by holding:  {:.2}", round2(report.hold_profit))?;
    writeln!(file, "Strategy gains:     {:.2}", round2(report.gains))?;

    Ok(())
}

/// Write the profit comparison as JSON for downstream tooling.
pub fn write_profit_report_json<P: AsRef<Path>>(path: P, report: &ProfitReport) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Render the first `nrows` derived rows as an aligned table.
///
/// Undefined averages and the final date's missing delta print as "-".
pub fn format_signal_head(signals: &SignalSeries, nrows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>10} {:>12} {:>12} {:>6} {:>10} {:>10}\n",
        "Date", "Close", "Short MA", "Long MA", "Hold", "Diff", "Return"
    ));
    out.push_str(&format!("{}\n", "-".repeat(78)));

    for point in signals.points.iter().take(nrows) {
        let short = match point.short_avg {
            Some(v) => format!("{v:.4}"),
            None => "-".to_string(),
        };
        let long = match point.long_avg {
            Some(v) => format!("{v:.4}"),
            None => "-".to_string(),
        };
        let diff = match point.next_day_delta {
            Some(v) => format!("{v:.4}"),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<12} {:>10.4} {:>12} {:>12} {:>6} {:>10} {:>10.4}\n",
            point.date.to_string(),
            point.close,
            short,
            long,
            if point.hold { "yes" } else { "no" },
            diff,
            point.strategy_return,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PricePoint, PriceSeries};
    use crate::signals::SignalEngine;

    fn sample_report() -> ProfitReport {
        ProfitReport::new(
            "data/apple.csv".to_string(),
            10,
            30,
            NaiveDate::from_ymd_opt(2006, 10, 2).unwrap(),
            NaiveDate::from_ymd_opt(2017, 12, 29).unwrap(),
            131.208,
            97.665,
        )
    }

    #[test]
    fn test_write_profit_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profit_report.txt");

        write_profit_report(&path, &sample_report()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Profit by trading:  97.67"));
        assert!(content.contains("Profit by holding:  131.21"));
        assert!(content.contains("Strategy gains:     -33.54"));
        assert!(content.contains("2006-10-02 to 2017-12-29"));
    }

    #[test]
    fn test_write_profit_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profit_report.json");

        write_profit_report_json(&path, &sample_report()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["short_window"], 10);
        assert_eq!(parsed["start_date"], "2006-10-02");
        // Unrounded figures survive in the JSON artifact
        assert!((parsed["gains"].as_f64().unwrap() - (-33.543)).abs() < 1e-9);
    }

    #[test]
    fn test_format_signal_head() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 2).unwrap();
        let points = [10.0, 12.0, 9.0, 15.0]
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
        let series = PriceSeries::new(points).unwrap();
        let signals = SignalEngine::new(1, 2).derive_signals(&series);

        let table = format_signal_head(&signals, 2);
        let lines: Vec<&str> = table.lines().collect();
        // Header + separator + 2 rows
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Short MA"));
        assert!(lines[2].contains("2017-01-02"));
        // First row has no long average yet
        assert!(lines[2].contains('-'));
        assert!(lines[3].contains("yes"));

        // Asking for more rows than exist is fine
        let table = format_signal_head(&signals, 100);
        assert_eq!(table.lines().count(), 6);
    }
}
