use crate::numerical::app_survey::SampleSet;
use nalgebra::DVector;

/// number of points used to draw one Simpson parabola
pub const PARABOLA_RESOLUTION: usize = 50;

/// Lagrange interpolating polynomial through (x_vals, y_vals) evaluated at x
pub fn lagrange_interpolate(x: f64, x_vals: &[f64], y_vals: &[f64]) -> f64 {
    let n = x_vals.len();
    let mut result = 0.0;
    for i in 0..n {
        let mut term = y_vals[i];
        for j in 0..n {
            if i != j {
                term *= (x - x_vals[j]) / (x_vals[i] - x_vals[j]);
            }
        }
        result += term;
    }
    result
}

/// n equally spaced points from start to end inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Parabola through three consecutive stations, sampled at `n` points
pub fn parabola_points(x: [f64; 3], y: [f64; 3], n: usize) -> Vec<(f64, f64)> {
    linspace(x[0], x[2], n)
        .into_iter()
        .map(|xi| (xi, lagrange_interpolate(xi, &x, &y)))
        .collect()
}

/// Trapezoids of the composite trapezoidal rule, one per interval:
/// (x_i, 0), (x_i, y_i), (x_i+1, y_i+1), (x_i+1, 0).
/// With `mirror` the ordinates are drawn below the axis.
pub fn trapezoid_panels(x: &DVector<f64>, y: &DVector<f64>, mirror: bool) -> Vec<Vec<(f64, f64)>> {
    let sign = if mirror { -1.0 } else { 1.0 };
    (0..x.len().saturating_sub(1))
        .map(|i| {
            vec![
                (x[i], 0.0),
                (x[i], sign * y[i]),
                (x[i + 1], sign * y[i + 1]),
                (x[i + 1], 0.0),
            ]
        })
        .collect()
}

/// One closed polygon per pair of intervals: the upper parabola left to right, then the
/// lower parabola back. Trailing odd interval (if any) is skipped.
pub fn simpson_bands(samples: &SampleSet, resolution: usize) -> Vec<Vec<(f64, f64)>> {
    let x = &samples.x;
    let up = &samples.y_upper;
    let low = &samples.y_lower;
    let mut bands = Vec::new();
    let mut i = 0;
    while i + 2 < x.len() {
        let xs = [x[i], x[i + 1], x[i + 2]];
        let mut band = parabola_points(xs, [up[i], up[i + 1], up[i + 2]], resolution);
        let lower = parabola_points(xs, [low[i], low[i + 1], low[i + 2]], resolution);
        band.extend(lower.into_iter().rev());
        bands.push(band);
        i += 2;
    }
    bands
}
