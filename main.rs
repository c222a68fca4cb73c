use anyhow::Result;
use clap::Parser;
use ma_crossover::*;

fn main() -> Result<()> {
    println!("MA Crossover - Trading Rule vs Buy-and-Hold\n");

    // Load configuration
    let config = Config::parse();
    config.validate()?;

    // Load market data
    println!("Loading market data...");
    let series = load_price_series(&config.data_file)?;
    println!(
        "Loaded {} trading days ({} to {})",
        series.len(),
        series.first_date(),
        series.last_date()
    );

    // Derive crossover signals
    let engine = SignalEngine::new(config.short_window, config.long_window);
    if config.verbose {
        println!(
            "Windows: short = {} days, long = {} days",
            engine.short_window(),
            engine.long_window()
        );
    }
    let signals = engine.derive_signals(&series);

    if config.show_rows > 0 {
        println!("\nFirst {} derived rows:", config.show_rows.min(series.len()));
        print!("{}", format_signal_head(&signals, config.show_rows));
    }

    // Compute profit under both strategies over the queried range
    let (start, end) = config.resolve_range(&series)?;
    let hold_profit = signals.profit(Strategy::Hold, start, end);
    let trade_profit = signals.profit(Strategy::Trade, start, end);

    println!("\n{}", "=".repeat(60));
    println!("Profit Comparison");
    println!("{}", "=".repeat(60));
    println!("Date range: {} to {}", start, end);
    println!("Profit by trading:      {:.2}", round2(trade_profit));
    println!("Profit by holding:      {:.2}", round2(hold_profit));
    println!(
        "Trading strategy gains: {:.2}",
        round2(trade_profit - hold_profit)
    );

    // Write report artifacts
    let report = ProfitReport::new(
        config.data_file.clone(),
        config.short_window,
        config.long_window,
        start,
        end,
        hold_profit,
        trade_profit,
    );

    let output_dir = std::path::Path::new(&config.output_path);
    let report_path = output_dir.join("profit_report.txt");
    write_profit_report(&report_path, &report)?;
    println!("\n✓ Report saved to: {}", report_path.display());

    let json_path = output_dir.join("profit_report.json");
    write_profit_report_json(&json_path, &report)?;
    if config.verbose {
        println!("✓ JSON report saved to: {}", json_path.display());
    }

    // Chart is a secondary artifact: warn on failure, don't abort
    if config.chart {
        let chart_path = output_dir.join("signal_chart.png");
        if let Err(e) = visualise_signals(&signals, &chart_path) {
            eprintln!("Failed to create chart: {}", e);
        } else {
            println!("✓ Chart saved to: {}", chart_path.display());
        }
    }

    Ok(())
}
