pub mod config;
pub mod data;
pub mod report;
pub mod signals;
pub mod strategy;
pub mod visualization;

pub use config::Config;
pub use data::{DataError, PricePoint, PriceSeries, load_price_series};
pub use report::{
    ProfitReport, format_signal_head, write_profit_report, write_profit_report_json,
};
pub use signals::{SignalEngine, SignalPoint, SignalSeries, rolling_mean};
pub use strategy::{Strategy, StrategyError, round2};
pub use visualization::visualise_signals;
