//! Visualization module for plotting the close against its moving averages.

use crate::signals::SignalSeries;
use plotters::prelude::*;
use std::path::Path;

/// Visualise the closing price together with both moving averages.
///
/// The function writes a PNG file to the specified output path. The close
/// is drawn in blue, the short average in green, the long average in red;
/// leading dates without enough history simply leave gaps in the average
/// lines.
///
/// # Arguments
/// * `signals` - Derived signal series to plot
/// * `output_path` - Path where the chart PNG will be saved
pub fn visualise_signals<P: AsRef<Path>>(
    signals: &SignalSeries,
    output_path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path.as_ref(), (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let closes: Vec<f64> = signals.points.iter().map(|p| p.close).collect();
    let min_price = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_price = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let caption = format!(
        "Close with {}-day and {}-day moving averages",
        signals.short_window, signals.long_window
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..signals.points.len(), min_price..max_price)?;

    chart.configure_mesh().disable_mesh().draw()?;

    // Plot the close line.
    chart
        .draw_series(LineSeries::new(
            closes.iter().enumerate().map(|(i, c)| (i, *c)),
            &BLUE,
        ))?
        .label("Close")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    // Plot the short average, skipping undefined leading values.
    chart
        .draw_series(LineSeries::new(
            signals
                .points
                .iter()
                .enumerate()
                .filter_map(|(i, p)| p.short_avg.map(|v| (i, v))),
            &GREEN,
        ))?
        .label(format!("Short MA ({})", signals.short_window))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));

    // Plot the long average.
    chart
        .draw_series(LineSeries::new(
            signals
                .points
                .iter()
                .enumerate()
                .filter_map(|(i, p)| p.long_avg.map(|v| (i, v))),
            &RED,
        ))?
        .label(format!("Long MA ({})", signals.long_window))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart.configure_series_labels().border_style(&BLACK).draw()?;
    Ok(())
}
