use crate::data::PriceSeries;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use serde::Deserialize;

/// Configuration for the crossover analysis
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "ma_crossover")]
#[command(about = "Moving Average Crossover vs Buy-and-Hold Profit Comparison")]
pub struct Config {
    /// Path to OHLCV csv file (Date,Open,High,Low,Close,Volume header)
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Short signal window: trailing moving-average length in trading days
    #[arg(long, default_value_t = 10)]
    pub short_window: usize,

    /// Long signal window: trailing moving-average length in trading days
    #[arg(long, default_value_t = 30)]
    pub long_window: usize,

    /// First date of the profit range, YYYY-MM-DD (default: first date in file)
    #[arg(long)]
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last date of the profit range, YYYY-MM-DD (default: last date in file)
    #[arg(long)]
    #[serde(default)]
    pub end_date: Option<String>,

    /// Print the first N derived rows for inspection
    #[arg(long, default_value_t = 0)]
    pub show_rows: usize,

    /// Render a chart of the close and both averages
    #[arg(long)]
    #[serde(default)]
    pub chart: bool,

    /// Path to output results directory
    #[arg(long, default_value = "results/")]
    pub output_path: String,

    /// Enable verbose output
    #[arg(long)]
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.short_window == 0 {
            anyhow::bail!("short_window must be greater than 0");
        }

        if self.long_window == 0 {
            anyhow::bail!("long_window must be greater than 0");
        }

        if let Some(ref raw) = self.start_date {
            parse_date(raw)?;
        }

        if let Some(ref raw) = self.end_date {
            parse_date(raw)?;
        }

        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the queried date range, defaulting to the series bounds.
    ///
    /// An inverted range is left as-is: profit over it is simply zero.
    pub fn resolve_range(&self, series: &PriceSeries) -> Result<(NaiveDate, NaiveDate)> {
        let start = match self.start_date {
            Some(ref raw) => parse_date(raw)?,
            None => series.first_date(),
        };
        let end = match self.end_date {
            Some(ref raw) => parse_date(raw)?,
            None => series.last_date(),
        };
        Ok((start, end))
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid date '{}': expected YYYY-MM-DD", raw))
}
