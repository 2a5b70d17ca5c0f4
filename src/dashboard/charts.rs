//! SVG geometry for the dashboard sparklines and donuts

use std::f64::consts::PI;

/// SVG path through `values`, scaled into a `width` x `height` box.
///
/// Points are spaced evenly on x by their position in `values`; y is
/// linearly interpolated between the series minimum (bottom) and maximum
/// (top). Non-finite values are skipped without shifting the points after
/// them. A flat series is drawn at mid-height and a single value as a
/// horizontal line.
pub fn sparkline_path(values: &[f64], width: f64, height: f64) -> String {
    let points: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .collect();
    if points.is_empty() {
        return String::new();
    }

    let min = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let y_of = |value: f64| {
        if range == 0.0 {
            height / 2.0
        } else {
            height - (value - min) / range * height
        }
    };

    if points.len() == 1 {
        let y = y_of(points[0].1);
        return format!("M0.00,{:.2} L{:.2},{:.2}", y, width, y);
    }

    let step = width / (values.len() - 1) as f64;
    points
        .iter()
        .enumerate()
        .map(|(n, (index, value))| {
            let command = if n == 0 { 'M' } else { 'L' };
            format!("{}{:.2},{:.2}", command, *index as f64 * step, y_of(*value))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One arc of a donut chart drawn with `stroke-dasharray`
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub label: String,
    pub value: u64,
    /// Share of the total in `0.0..=1.0`
    pub fraction: f64,
    /// `"<arc> <rest>"` for `stroke-dasharray`
    pub dash_array: String,
    /// Negative cumulative arc length for `stroke-dashoffset`
    pub dash_offset: f64,
}

/// Segments for a donut of `radius`; empty when the total is zero
pub fn donut_segments(parts: &[(&str, u64)], radius: f64) -> Vec<DonutSegment> {
    let total: u64 = parts.iter().map(|(_, value)| *value).sum();
    if total == 0 {
        return Vec::new();
    }

    let circumference = 2.0 * PI * radius;
    let mut consumed = 0.0;

    parts
        .iter()
        .map(|(label, value)| {
            let fraction = *value as f64 / total as f64;
            let arc = fraction * circumference;
            let segment = DonutSegment {
                label: label.to_string(),
                value: *value,
                fraction,
                dash_array: format!("{:.2} {:.2}", arc, circumference - arc),
                dash_offset: -consumed,
            };
            consumed += arc;
            segment
        })
        .collect()
}
