//! SVG line charts of indicator columns.

use std::path::Path;

use plotters::prelude::*;

use crate::{
    error::IndicatorError,
    indicator::{axes::Spine, Axes, IndicatorTable},
};

const SIZE: (u32, u32) = (1024, 480);
const MARGIN: u32 = 12;
const LABEL_AREA: u32 = 40;

/// Draws `column` against the table index. The frame follows `axes`: sides with a
/// hidden spine get no axis, outward spines widen their label area.
pub fn render_svg(table: &IndicatorTable, column: &str, axes: &Axes, path: &Path) -> Result<(), IndicatorError> {
    let values = table
        .column(column)
        .ok_or_else(|| IndicatorError::ColumnNotFound(column.to_string()))?;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let (y_min, y_max) = y_range(&points);
    let x_max = values.len().saturating_sub(1).max(1) as f64;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .caption(column, ("sans-serif", 20))
        .set_label_area_size(LabelAreaPosition::Left, label_area(&axes.left, axes.ticks_left()))
        .set_label_area_size(LabelAreaPosition::Bottom, label_area(&axes.bottom, axes.ticks_bottom()))
        .set_label_area_size(LabelAreaPosition::Right, label_area(&axes.right, axes.ticks_right()))
        .set_label_area_size(LabelAreaPosition::Top, label_area(&axes.top, axes.ticks_top()));

    let mut chart = builder
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(plot_error)?;

    let index = table.index();
    let date_label = |x: &f64| {
        index
            .get(x.round().max(0.0) as usize)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(6)
        .x_label_formatter(&date_label)
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;

    Ok(())
}

fn label_area(spine: &Spine, ticks: bool) -> u32 {
    match (spine.visible, ticks) {
        (false, _) => 0,
        (true, true) => LABEL_AREA + spine.offset(),
        (true, false) => spine.offset().max(1),
    }
}

fn y_range(points: &[(f64, f64)]) -> (f64, f64) {
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if min == max {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn plot_error<E: std::fmt::Display>(e: E) -> IndicatorError {
    IndicatorError::Plot(e.to_string())
}

// -- Tests -------------------------------------------------------------------
