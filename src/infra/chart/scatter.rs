use anyhow::{anyhow, Result};
use plotters::prelude::*;

use crate::domain::entities::dataset::Record;
use crate::domain::query::filter::parse_number;

#[derive(Clone, Debug)]
pub struct ScatterOptions {
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl ScatterOptions {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            width: 640,
            height: 400,
        }
    }
}

/// `(x, y)` pairs for rows where both cells are numeric.
pub fn scatter_points<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    x_column: &str,
    y_column: &str,
) -> Vec<(f64, f64)> {
    records
        .into_iter()
        .filter_map(|record| {
            Some((
                parse_number(record.value(x_column))?,
                parse_number(record.value(y_column))?,
            ))
        })
        .collect()
}

// Pads degenerate ranges so single points and constant columns still plot.
fn axis_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad)..(max + pad)
}

/// Renders a scatter plot of `points` as SVG markup.
pub fn render_scatter_svg(points: &[(f64, f64)], options: &ScatterOptions) -> Result<String> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|err| anyhow!("failed to clear chart: {err}"))?;

        let x_range = axis_range(points.iter().map(|(x, _)| *x));
        let y_range = axis_range(points.iter().map(|(_, y)| *y));

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|err| anyhow!("failed to build chart: {err}"))?;

        chart
            .configure_mesh()
            .x_desc(options.x_label.as_str())
            .y_desc(options.y_label.as_str())
            .draw()
            .map_err(|err| anyhow!("failed to draw chart axes: {err}"))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, BLUE.mix(0.7).filled())),
            )
            .map_err(|err| anyhow!("failed to draw chart points: {err}"))?;

        root.present()
            .map_err(|err| anyhow!("failed to finish chart: {err}"))?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_rows_with_non_numeric_cells() {
        let records: Vec<Record> = vec![
            [("x", "1"), ("y", "2.5")].into_iter().collect(),
            [("x", "oops"), ("y", "3")].into_iter().collect(),
            [("x", "4"), ("y", "")].into_iter().collect(),
        ];

        assert_eq!(scatter_points(&records, "x", "y"), vec![(1.0, 2.5)]);
    }

    #[test]
    fn constant_values_get_a_padded_range() {
        let range = axis_range([3.0, 3.0].into_iter());
        assert!(range.start < 3.0 && range.end > 3.0);
        assert_eq!(axis_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn renders_one_marker_per_point() {
        let svg = render_scatter_svg(
            &[(1.0, 2.0), (2.0, 4.0), (3.0, 1.0)],
            &ScatterOptions::new("age", "score"),
        )
        .expect("chart should render");

        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 3);
    }
}
