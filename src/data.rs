//! Price series data model and CSV loading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or constructing a price series.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open price file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("date failed to increase at line {line}")]
    OutOfOrder { line: usize },

    #[error("date failed to increase at point {index}")]
    NotChronological { index: usize },

    #[error("no price data found in file")]
    Empty,
}

/// One traded day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date, unique within a series
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Number of shares traded
    pub volume: u64,
}

/// Chronologically ordered series of daily price points.
///
/// Invariant: dates are strictly increasing. Non-trading days are simply
/// absent; no gap-filling is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points, validating the date ordering.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DataError> {
        if points.is_empty() {
            return Err(DataError::Empty);
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(DataError::NotChronological { index: i + 1 });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First trading date in the series.
    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// Last trading date in the series.
    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// Closing prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}

/// Column layout discovered from the header row.
struct ColumnIndex {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl ColumnIndex {
    /// Locate required columns by name. An `Adj Close` column may be
    /// present and is ignored.
    fn from_header(header: &str) -> Result<Self, DataError> {
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let find = |name: &'static str| -> Result<usize, DataError> {
            names
                .iter()
                .position(|&n| n == name)
                .ok_or(DataError::MissingColumn(name))
        };
        Ok(Self {
            date: find("Date")?,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            close: find("Close")?,
            volume: find("Volume")?,
        })
    }
}

/// Load a daily price series from a CSV file.
///
/// Expected format: a header row containing at least
/// `Date,Open,High,Low,Close,Volume` (any order, extra columns ignored),
/// then one row per trading day with `YYYY-MM-DD` dates in strictly
/// increasing order.
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// PriceSeries, or a `DataError` naming the offending line
pub fn load_price_series<P: AsRef<Path>>(path: P) -> Result<PriceSeries, DataError> {
    let file = File::open(path.as_ref()).map_err(|e| DataError::Io {
        path: path.as_ref().display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut columns: Option<ColumnIndex> = None;
    let mut points: Vec<PricePoint> = Vec::new();
    let mut prior_date: Option<NaiveDate> = None;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| DataError::MalformedRow {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let cols = match columns {
            Some(ref cols) => cols,
            None => {
                columns = Some(ColumnIndex::from_header(trimmed)?);
                continue;
            }
        };

        let point = parse_row(trimmed, cols).map_err(|reason| DataError::MalformedRow {
            line: line_num + 1,
            reason,
        })?;

        if prior_date.is_some_and(|prior| point.date <= prior) {
            return Err(DataError::OutOfOrder { line: line_num + 1 });
        }
        prior_date = Some(point.date);
        points.push(point);
    }

    if columns.is_none() || points.is_empty() {
        return Err(DataError::Empty);
    }

    Ok(PriceSeries { points })
}

fn parse_row(line: &str, cols: &ColumnIndex) -> Result<PricePoint, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let field = |idx: usize| -> Result<&str, String> {
        fields
            .get(idx)
            .copied()
            .ok_or_else(|| format!("expected at least {} columns, found {}", idx + 1, fields.len()))
    };
    let price = |idx: usize| -> Result<f64, String> {
        let raw = field(idx)?;
        raw.parse::<f64>()
            .map_err(|_| format!("unparseable price '{raw}'"))
    };

    let raw_date = field(cols.date)?;
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| format!("unparseable date '{raw_date}'"))?;
    let raw_volume = field(cols.volume)?;
    let volume = raw_volume
        .parse::<u64>()
        .map_err(|_| format!("unparseable volume '{raw_volume}'"))?;

    Ok(PricePoint {
        date,
        open: price(cols.open)?,
        high: price(cols.high)?,
        low: price(cols.low)?,
        close: price(cols.close)?,
        volume,
    })
}
