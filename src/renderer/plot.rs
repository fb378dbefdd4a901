//! Plot geometry generation
//!
//! Builds vertex lists in data coordinates: `x` over `[-X, X]`, `y`
//! normalized intensity over `[0, 1]`. The pipeline maps data
//! coordinates to NDC with fixed margins. Every redraw rebuilds the
//! traces from scratch; there is no incremental update path.

use super::vertex::{PlotVertex, colors};
use crate::consts::SCREEN_HALF_WIDTH;

/// Curve line half-thickness in data units
const CURVE_HALF_WIDTH: f32 = 0.03;
/// Axis baseline half-thickness in data units
const AXIS_HALF_WIDTH: f32 = 0.006;
/// Gap between adjacent histogram bars, as a fraction of bin width
const BAR_GAP: f32 = 0.15;

fn push_quad(x0: f32, x1: f32, y0: f32, y1: f32, color: [f32; 4], out: &mut Vec<PlotVertex>) {
    out.push(PlotVertex::new(x0, y0, color));
    out.push(PlotVertex::new(x1, y0, color));
    out.push(PlotVertex::new(x1, y1, color));

    out.push(PlotVertex::new(x1, y1, color));
    out.push(PlotVertex::new(x0, y1, color));
    out.push(PlotVertex::new(x0, y0, color));
}

/// Bar trace for the histogram, heights normalized to the tallest bin
///
/// Empty histograms (all-zero counts) produce no bars, leaving only the
/// axis baseline on screen.
pub fn histogram_bars(counts: &[u32], centers: &[f32]) -> Vec<PlotVertex> {
    debug_assert_eq!(counts.len(), centers.len());
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    let bin_width = 2.0 * SCREEN_HALF_WIDTH / counts.len() as f32;
    let half = bin_width * (1.0 - BAR_GAP) / 2.0;
    let mut vertices = Vec::new();
    for (&count, &center) in counts.iter().zip(centers) {
        if count == 0 {
            continue;
        }
        let height = count as f32 / max as f32;
        push_quad(
            center - half,
            center + half,
            0.0,
            height,
            colors::BAR,
            &mut vertices,
        );
    }
    vertices
}

/// Line trace for the theoretical curve as a thick polyline
pub fn curve_polyline(points: &[(f32, f32)]) -> Vec<PlotVertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        // segment as a quad offset vertically; fine for a plot whose
        // slope is bounded by the sample density
        vertices.push(PlotVertex::new(x0, y0 - CURVE_HALF_WIDTH, colors::CURVE));
        vertices.push(PlotVertex::new(x1, y1 - CURVE_HALF_WIDTH, colors::CURVE));
        vertices.push(PlotVertex::new(x1, y1 + CURVE_HALF_WIDTH, colors::CURVE));

        vertices.push(PlotVertex::new(x1, y1 + CURVE_HALF_WIDTH, colors::CURVE));
        vertices.push(PlotVertex::new(x0, y0 + CURVE_HALF_WIDTH, colors::CURVE));
        vertices.push(PlotVertex::new(x0, y0 - CURVE_HALF_WIDTH, colors::CURVE));
    }
    vertices
}

/// Horizontal axis baseline at `y = 0`
pub fn axis_baseline() -> Vec<PlotVertex> {
    let mut vertices = Vec::new();
    push_quad(
        -SCREEN_HALF_WIDTH,
        SCREEN_HALF_WIDTH,
        -AXIS_HALF_WIDTH,
        AXIS_HALF_WIDTH,
        colors::AXIS,
        &mut vertices,
    );
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram_yields_no_bars() {
        let counts = vec![0u32; 100];
        let centers: Vec<f32> = (0..100).map(|i| i as f32 * 0.1 - 4.95).collect();
        assert!(histogram_bars(&counts, &centers).is_empty());
    }

    #[test]
    fn test_bars_normalized_to_tallest_bin() {
        let mut counts = vec![0u32; 4];
        counts[1] = 10;
        counts[2] = 5;
        let centers = vec![-3.75, -1.25, 1.25, 3.75];
        let vertices = histogram_bars(&counts, &centers);
        // two nonzero bins, six vertices each
        assert_eq!(vertices.len(), 12);
        let max_y = vertices.iter().map(|v| v.position[1]).fold(0.0, f32::max);
        assert!((max_y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_curve_polyline_vertex_count() {
        let points: Vec<(f32, f32)> = (0..10).map(|i| (i as f32, 0.5)).collect();
        assert_eq!(curve_polyline(&points).len(), 9 * 6);
        assert!(curve_polyline(&points[..1]).is_empty());
    }
}
