use crate::cycle::QuoteReport;
use crate::error::{QuoteError, Result};
use crate::expiration::format_expiration;
use crate::models::EnrichedContract;
use crate::settings::{CALL_RANGE_BOUNDS, PUT_RANGE_BOUNDS};
use plotters::backend::BitMapBackend;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

/// Title in the form `AAPL 2025-01-10 (Put Option Quotes)`.
pub fn chart_title(report: &QuoteReport, plot_puts: bool, plot_calls: bool) -> String {
    let sides = match (plot_puts, plot_calls) {
        (true, true) => "Put & Call",
        (false, true) => "Call",
        _ => "Put",
    };
    format!(
        "{} {} ({} Option Quotes)",
        report.symbol,
        format_expiration(report.expiration),
        sides
    )
}

/// Padded x (offset %) and y (premium/strike %) ranges covering `rows`.
fn axis_bounds<'a, I>(rows: I) -> Option<(Range<f64>, Range<f64>)>
where
    I: IntoIterator<Item = &'a EnrichedContract>,
{
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for row in rows {
        x = (x.0.min(row.incremental_percentage), x.1.max(row.incremental_percentage));
        let lo = row.bid_ratio.min(row.ask_ratio);
        let hi = row.bid_ratio.max(row.ask_ratio);
        y = (y.0.min(lo), y.1.max(hi));
    }
    if !x.0.is_finite() || !y.0.is_finite() {
        return None;
    }

    let pad = |(lo, hi): (f64, f64), frac: f64| {
        let span = hi - lo;
        let margin = if span > 0.0 { span * frac } else { 1.0 };
        lo - margin..hi + margin
    };
    let x_range = pad(x, 0.05);
    let y_range = pad(y, 0.1);
    Some((x_range, y_range.start.max(0.0)..y_range.end))
}

/// Axes for the selected sides. With no rows left after filtering the chart
/// still spans the slider bounds of the selected sides over a 0..1 premium
/// axis, so an empty selection renders a titled, empty mesh.
fn plot_ranges(
    report: &QuoteReport,
    plot_puts: bool,
    plot_calls: bool,
) -> Result<(Range<f64>, Range<f64>)> {
    if !plot_puts && !plot_calls {
        return Err(QuoteError::PlotError("no option side selected".to_string()));
    }
    let puts: &[EnrichedContract] = if plot_puts { &report.puts } else { &[] };
    let calls: &[EnrichedContract] = if plot_calls { &report.calls } else { &[] };

    Ok(axis_bounds(puts.iter().chain(calls.iter())).unwrap_or_else(|| {
        let x = match (plot_puts, plot_calls) {
            (true, false) => PUT_RANGE_BOUNDS.min..PUT_RANGE_BOUNDS.max,
            (false, true) => CALL_RANGE_BOUNDS.min..CALL_RANGE_BOUNDS.max,
            _ => PUT_RANGE_BOUNDS.min..CALL_RANGE_BOUNDS.max,
        };
        (x, 0.0..1.0)
    }))
}

/// Two-line axis annotation: offset to one decimal over the whole-dollar strike.
fn strike_label(row: &EnrichedContract) -> String {
    format!("{:.1}\n({})", row.incremental_percentage, row.strike().trunc() as i64)
}

fn series_points(rows: &[EnrichedContract], ratio: fn(&EnrichedContract) -> f64) -> Vec<(f64, f64)> {
    rows.iter().map(|r| (r.incremental_percentage, ratio(r))).collect()
}

/// Render bid and ask ratios against strike offset as a PNG.
pub fn plot_option_quotes<P: AsRef<Path>>(
    report: &QuoteReport,
    plot_puts: bool,
    plot_calls: bool,
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();

    let puts: &[EnrichedContract] = if plot_puts { &report.puts } else { &[] };
    let calls: &[EnrichedContract] = if plot_calls { &report.calls } else { &[] };

    let (x_range, y_range) = plot_ranges(report, plot_puts, plot_calls)?;
    debug!("Plot ranges x={:?} y={:?}", x_range, y_range);

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| QuoteError::PlotError(e.to_string()))?;

    let y_floor = y_range.start;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            chart_title(report, plot_puts, plot_calls),
            ("sans-serif", 30).into_font(),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| QuoteError::PlotError(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("(Strike Price - Stock Price) / Stock Price (%)")
        .y_desc("Premium / Strike (%)")
        .axis_desc_style(("sans-serif", 16))
        .label_style(("sans-serif", 13))
        .x_label_formatter(&|x| format!("{:.1}", x))
        .draw()
        .map_err(|e| QuoteError::PlotError(e.to_string()))?;

    let series: [(&str, &[EnrichedContract], fn(&EnrichedContract) -> f64, RGBColor, bool); 4] = [
        ("Put Bid", puts, |r| r.bid_ratio, BLUE, false),
        ("Put Ask", puts, |r| r.ask_ratio, ORANGE, false),
        ("Call Bid", calls, |r| r.bid_ratio, GREEN, true),
        ("Call Ask", calls, |r| r.ask_ratio, RED, true),
    ];

    for (label, rows, ratio, color, cross) in series {
        if rows.is_empty() {
            continue;
        }
        let points = series_points(rows, ratio);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| QuoteError::PlotError(e.to_string()))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        if cross {
            chart
                .draw_series(points.iter().map(|&p| Cross::new(p, 5, color.stroke_width(2))))
                .map_err(|e| QuoteError::PlotError(e.to_string()))?;
        } else {
            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))
                .map_err(|e| QuoteError::PlotError(e.to_string()))?;
        }
    }

    // Strike annotations along the floor, for whichever side leads the chart
    let annotated = if !puts.is_empty() { puts } else { calls };
    chart
        .draw_series(annotated.iter().map(|r| {
            let mut text = MultiLineText::<_, String>::new(
                (r.incremental_percentage, y_floor),
                TextStyle::from(("sans-serif", 11)).color(&BLACK),
            );
            for line in strike_label(r).lines() {
                text.push_line(line.to_string());
            }
            text
        }))
        .map_err(|e| QuoteError::PlotError(e.to_string()))?;

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 14))
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| QuoteError::PlotError(e.to_string()))?;

    root.present()
        .map_err(|e| QuoteError::PlotError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionContract, OptionType};
    use chrono::NaiveDate;

    fn row(pct: f64, bid: f64, ask: f64) -> EnrichedContract {
        EnrichedContract {
            contract: OptionContract::new("X".into(), OptionType::Put, 100.0, bid, ask),
            incremental_percentage: pct,
            bid_ratio: bid,
            ask_ratio: ask,
        }
    }

    fn report() -> QuoteReport {
        QuoteReport {
            symbol: "AAPL".into(),
            expiration: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            spot_price: 100.0,
            puts: vec![row(-10.0, 0.5, 0.7), row(0.0, 2.0, 2.4)],
            calls: vec![],
        }
    }

    #[test]
    fn title_names_plotted_sides() {
        let r = report();
        assert_eq!(chart_title(&r, true, false), "AAPL 2025-01-10 (Put Option Quotes)");
        assert_eq!(chart_title(&r, false, true), "AAPL 2025-01-10 (Call Option Quotes)");
        assert_eq!(chart_title(&r, true, true), "AAPL 2025-01-10 (Put & Call Option Quotes)");
    }

    #[test]
    fn bounds_cover_every_point() {
        let r = report();
        let (x, y) = axis_bounds(r.puts.iter()).unwrap();
        assert!(x.start < -10.0 && x.end > 0.0);
        assert!(y.start >= 0.0 && y.start < 0.5 && y.end > 2.4);
    }

    #[test]
    fn single_point_gets_non_empty_bounds() {
        let rows = vec![row(3.0, 1.0, 1.0)];
        let (x, y) = axis_bounds(rows.iter()).unwrap();
        assert!(x.start < x.end);
        assert!(y.start < y.end);
    }

    #[test]
    fn empty_selected_side_gets_default_axes() {
        let r = QuoteReport {
            puts: vec![],
            ..report()
        };
        let (x, y) = plot_ranges(&r, true, false).unwrap();
        assert_eq!(x, -50.0..10.0);
        assert_eq!(y, 0.0..1.0);

        // calls selected but filtered to nothing
        let (x, _) = plot_ranges(&report(), false, true).unwrap();
        assert_eq!(x, -10.0..50.0);
        let (x, _) = plot_ranges(&r, true, true).unwrap();
        assert_eq!(x, -50.0..50.0);
    }

    #[test]
    fn rows_drive_axes_when_present() {
        let r = report();
        assert_eq!(plot_ranges(&r, true, false).unwrap(), axis_bounds(r.puts.iter()).unwrap());
    }

    #[test]
    fn strike_label_shows_offset_over_whole_strike() {
        let mut r = row(-5.263157894736842, 1.0, 1.2);
        r.contract.strike = 592.5;
        assert_eq!(strike_label(&r), "-5.3\n(592)");
        assert_eq!(strike_label(&r).lines().count(), 2);
    }

    #[test]
    fn nothing_selected_is_a_plot_error() {
        let path = std::env::temp_dir().join("options-quote-never-written.png");
        let err = plot_option_quotes(&report(), false, false, &path).unwrap_err();
        assert!(matches!(err, QuoteError::PlotError(_)));
        assert!(!path.exists());
    }
}
