//! Rendering adapter: consumes assembled matrices or series plus bounds and
//! axis indices, and draws SVG charts. Pure presentation, never mutates its
//! inputs.

use crate::bounds::Bounds;
use crate::color::{get_color_from_label, heat_color, FONT_SIZE};
use crate::env::Env;
use crate::error::Error;
use crate::key::fmt_axis_value;
use crate::matrix::{AxisIndex, DenseMatrix};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log,
}

/// One heatmap panel; several panels share axes and bounds when rendered
/// side by side.
pub struct HeatmapPanel<'a> {
    pub matrix: &'a DenseMatrix,
    pub title: Option<&'a str>,
}

pub struct HeatmapOptions<'a> {
    pub bounds: Bounds,
    pub scale: ScaleKind,
    pub show_colorbar: bool,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub value_label: &'a str,
}

const PANEL_WIDTH: i32 = 360;
const PANEL_HEIGHT: i32 = 340;
const COLORBAR_WIDTH: i32 = 90;

/// Sweep axes are powers of two in practice, so ticks render as `2^k` where
/// they are, and as plain numbers where they are not.
fn axis_tick_label(value: f64) -> String {
    if value >= 1.0 && value.log2().fract() == 0.0 {
        format!("2^{}", value.log2() as u32)
    } else {
        fmt_axis_value(value)
    }
}

fn fmt_metric(value: f64) -> String {
    if value != 0.0 && (value.abs() < 0.01 || value.abs() >= 10_000.0) {
        format!("{value:.1e}")
    } else {
        format!("{value:.2}")
    }
}

/// Draw one or more heatmap panels into a single SVG, with an optional
/// shared colorbar on the right.
pub fn render_heatmaps(
    path: &Path,
    panels: &[HeatmapPanel],
    axis1: &AxisIndex,
    axis2: &AxisIndex,
    opts: &HeatmapOptions,
) -> Result<()> {
    let log = opts.scale == ScaleKind::Log;
    if log && !opts.bounds.log_safe() {
        return Err(Error::LogScale(opts.bounds.min()).into());
    }

    let bar_width = if opts.show_colorbar { COLORBAR_WIDTH } else { 0 };
    let width = PANEL_WIDTH * panels.len() as i32 + bar_width;

    let root =
        SVGBackend::new(path, (width as u32, PANEL_HEIGHT as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    let (panel_root, bar_root) = root.split_horizontally(width - bar_width);
    let areas = panel_root.split_evenly((1, panels.len()));

    for (panel, area) in panels.iter().zip(areas.iter()) {
        let mut builder = ChartBuilder::on(area);
        builder
            .x_label_area_size(40)
            .y_label_area_size(55)
            .margin(10);
        if let Some(title) = panel.title {
            builder.caption(title, ("sans-serif", FONT_SIZE + 2).into_font());
        }
        let mut chart =
            builder.build_cartesian_2d(0..axis1.len() as i32, 0..axis2.len() as i32)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(axis1.len().min(8))
            .y_labels(axis2.len().min(8))
            .x_label_style(("sans-serif", FONT_SIZE).into_font())
            .y_label_style(("sans-serif", FONT_SIZE).into_font())
            .x_desc(opts.x_label)
            .y_desc(opts.y_label)
            .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
            .x_label_formatter(&|x| {
                axis1
                    .values()
                    .get(*x as usize)
                    .map(|v| axis_tick_label(*v))
                    .unwrap_or_default()
            })
            .y_label_formatter(&|y| {
                axis2
                    .values()
                    .get(*y as usize)
                    .map(|v| axis_tick_label(*v))
                    .unwrap_or_default()
            })
            .draw()?;

        let matrix = panel.matrix;
        chart.draw_series((0..matrix.rows()).flat_map(|row| {
            (0..matrix.cols()).map(move |col| {
                let t = opts.bounds.normalize(matrix.get(row, col), log);
                Rectangle::new(
                    [
                        (row as i32, col as i32),
                        (row as i32 + 1, col as i32 + 1),
                    ],
                    heat_color(t).filled(),
                )
            })
        }))?;
    }

    if opts.show_colorbar {
        draw_colorbar(&bar_root, &opts.bounds, opts.value_label)?;
    }

    root.present()?;
    Ok(())
}

/// A vertical gradient strip with min/max labels, drawn in pixel
/// coordinates next to the panels.
fn draw_colorbar(
    area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    bounds: &Bounds,
    value_label: &str,
) -> Result<()> {
    const STEPS: i32 = 64;
    let top = 30;
    let bottom = PANEL_HEIGHT - 50;
    let span = bottom - top;

    for step in 0..STEPS {
        let t = 1.0 - step as f64 / (STEPS - 1) as f64;
        let y0 = top + step * span / STEPS;
        let y1 = top + (step + 1) * span / STEPS;
        area.draw(&Rectangle::new(
            [(10, y0), (30, y1)],
            heat_color(t).filled(),
        ))?;
    }

    area.draw(&Text::new(
        fmt_metric(bounds.max()),
        (34, top - 6),
        ("sans-serif", FONT_SIZE - 2).into_font(),
    ))?;
    area.draw(&Text::new(
        fmt_metric(bounds.min()),
        (34, bottom - 6),
        ("sans-serif", FONT_SIZE - 2).into_font(),
    ))?;

    area.draw(&Text::new(
        value_label.to_string(),
        (60, PANEL_HEIGHT / 2 + 60),
        ("sans-serif", FONT_SIZE)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK),
    ))?;

    Ok(())
}

pub struct ScalingOptions<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub value_label: &'a str,
    pub color_label: &'a str,
}

/// Draw a scaling curve on log-log axes: one line with point markers.
pub fn render_scaling(path: &Path, series: &[(f64, f64)], opts: &ScalingOptions) -> Result<()> {
    if series.is_empty() {
        return Err(Error::EmptyResultSet.into());
    }

    let x_bounds = Bounds::from_values(series.iter().map(|(x, _)| *x))?;
    let y_bounds = Bounds::from_values(series.iter().map(|(_, y)| *y))?;
    if !x_bounds.log_safe() {
        return Err(Error::LogScale(x_bounds.min()).into());
    }
    if !y_bounds.log_safe() {
        return Err(Error::LogScale(y_bounds.min()).into());
    }

    // Widen degenerate single-point ranges so the log axes stay valid.
    let (x_min, x_max) = padded_range(&x_bounds);
    let (y_min, y_max) = padded_range(&y_bounds);

    let root = SVGBackend::new(path, (640, 420)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(opts.title, ("sans-serif", FONT_SIZE + 4).into_font())
        .x_label_area_size(45)
        .y_label_area_size(65)
        .margin(15)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_labels(8)
        .x_label_style(("sans-serif", FONT_SIZE).into_font())
        .y_label_style(("sans-serif", FONT_SIZE).into_font())
        .x_desc(opts.x_label)
        .y_desc(opts.value_label)
        .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
        .x_label_formatter(&|x| axis_tick_label(*x))
        .y_label_formatter(&|y| fmt_metric(*y))
        .draw()?;

    let color = get_color_from_label(opts.color_label);
    chart.draw_series(LineSeries::new(
        series.iter().copied(),
        color.stroke_width(3),
    ))?;
    chart.draw_series(
        series
            .iter()
            .map(|(x, y)| Circle::new((*x, *y), 4, color.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn padded_range(bounds: &Bounds) -> (f64, f64) {
    if bounds.min() == bounds.max() {
        (bounds.min() / 2.0, bounds.max() * 2.0)
    } else {
        (bounds.min(), bounds.max())
    }
}

pub fn report_plot_written(path: &Path) {
    println!("{}: generated plot at: {}", Env::SYS_NAME, path.display());
}
