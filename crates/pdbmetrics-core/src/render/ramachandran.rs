use super::{marker_radius, plot_error, prepare_output};
use crate::analysis::config::PlotConfig;
use crate::analysis::error::MetricError;
use crate::analysis::ramachandran::{DENSITY_RADIUS_DEGREES, point_densities};
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, instrument};

const ANGLE_RANGE: std::ops::Range<f64> = -180.0..180.0;
const GRID_STEP_DEGREES: usize = 45;
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);
const AXIS_COLOR: RGBColor = RGBColor(120, 120, 120);

/// Draws a phi/psi scatter plot to `output`, colouring each point by local density.
///
/// Denser points are drawn last so clusters stay visible.
#[instrument(skip(points, config), fields(points = points.len()))]
pub fn render_ramachandran(
    points: &[(f64, f64)],
    output: &Path,
    config: &PlotConfig,
) -> Result<(), MetricError> {
    if points.is_empty() {
        return Err(MetricError::NoDihedrals);
    }
    prepare_output(output)?;

    let densities = point_densities(points, DENSITY_RADIUS_DEGREES);
    let mut ordered: Vec<((f64, f64), f64)> =
        points.iter().copied().zip(densities).collect();
    ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

    let root = BitMapBackend::new(output, config.pixel_size()).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let margin = (config.dpi / 5).max(4);
    let mut chart = ChartBuilder::on(&root)
        .margin(margin)
        .build_cartesian_2d(ANGLE_RANGE, ANGLE_RANGE)
        .map_err(plot_error)?;

    for step in (-180..=180).step_by(GRID_STEP_DEGREES) {
        let v = step as f64;
        let color = if step == 0 { AXIS_COLOR } else { GRID_COLOR };
        chart
            .draw_series(LineSeries::new([(v, -180.0), (v, 180.0)], &color))
            .map_err(plot_error)?;
        chart
            .draw_series(LineSeries::new([(-180.0, v), (180.0, v)], &color))
            .map_err(plot_error)?;
    }
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(-180.0, -180.0), (180.0, 180.0)],
            BLACK.stroke_width(1),
        )))
        .map_err(plot_error)?;

    let radius = marker_radius(config.dpi);
    chart
        .draw_series(ordered.iter().map(|&((phi, psi), density)| {
            let color = config.colormap.color(density);
            Circle::new((phi, psi), radius, color.mix(config.alpha).filled())
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    debug!(path = %output.display(), "Ramachandran plot written.");
    Ok(())
}
