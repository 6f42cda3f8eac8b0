// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Building a single grid axis (min, max, resolution) from a collection of
//! per-ping `(min, max, res)` observations, NaN-aware throughout.

use crate::constants::{DEFAULT_MAX_GRID_STEPS, IQR_OUTLIER_FACTOR};

/// `compute_resampled_coordinates` input overrides. Leave a field as `None`
/// to fall back to the IQR heuristic derived from the data.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResampleBounds {
    pub grid_min: Option<f32>,
    pub grid_max: Option<f32>,
    pub max_steps: Option<usize>,
}

/// Build a 1-D axis of coordinates spanning `values_min`/`values_max` at a
/// resolution derived from `values_res`, all NaN-aware and outlier-trimmed
/// via the median/IQR heuristic below.
///
/// Falls back to a `max_steps`-point `linspace` if the natural step size
/// would produce more than `max_steps` coordinates.
pub fn compute_resampled_coordinates(
    values_min: &[f32],
    values_max: &[f32],
    values_res: &[f32],
    bounds: ResampleBounds,
) -> Vec<f32> {
    let max_steps = bounds.max_steps.unwrap_or(DEFAULT_MAX_GRID_STEPS);

    let heuristic_min = bounds
        .grid_min
        .filter(|v| v.is_finite())
        .unwrap_or_else(|| median(values_min) - IQR_OUTLIER_FACTOR * iqr(values_min));
    let heuristic_max = bounds
        .grid_max
        .filter(|v| v.is_finite())
        .unwrap_or_else(|| median(values_max) + IQR_OUTLIER_FACTOR * iqr(values_max));
    let heuristic_res = median(values_res) - IQR_OUTLIER_FACTOR * iqr(values_res);

    let res = finite_min(values_res).max(heuristic_res);
    let y_min = finite_min(values_min).max(heuristic_min);
    let y_max = finite_max(values_max).min(heuristic_max);

    if !(res.is_finite() && res > 0.0) || !(y_min.is_finite() && y_max.is_finite()) || y_min > y_max {
        return Vec::new();
    }

    let n = (((y_max - y_min) / res).floor() as usize) + 2;
    if n > max_steps {
        return linspace(y_min, y_max, max_steps);
    }

    let mut coords = Vec::with_capacity(n);
    let mut v = y_min;
    while v <= y_max + res {
        coords.push(v);
        v += res;
    }
    coords
}

fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f32;
    (0..n).map(|i| start + step * i as f32).collect()
}

fn finite(values: &[f32]) -> Vec<f32> {
    let mut v: Vec<f32> = values.iter().copied().filter(|x| x.is_finite()).collect();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v
}

fn finite_min(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f32::INFINITY, f32::min)
}

fn finite_max(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f32::NEG_INFINITY, f32::max)
}

/// NaN-aware median via the "linear" quantile convention at `p = 0.5`.
fn median(values: &[f32]) -> f32 {
    quantile(values, 0.5)
}

/// NaN-aware interquartile range, `Q75 - Q25`, "linear" convention.
fn iqr(values: &[f32]) -> f32 {
    quantile(values, 0.75) - quantile(values, 0.25)
}

/// NaN-aware quantile, "linear" convention (numpy's default): linear
/// interpolation between the two bracketing order statistics.
fn quantile(values: &[f32], q: f32) -> f32 {
    let sorted = finite(values);
    if sorted.is_empty() {
        return f32::NAN;
    }
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = q * (n - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_uniform_inputs() {
        let coords = compute_resampled_coordinates(
            &[0.0, 0.0, 0.0],
            &[4.0, 4.0, 4.0],
            &[1.0, 1.0, 1.0],
            ResampleBounds::default(),
        );
        assert_abs_diff_eq!(*coords.first().unwrap(), 0.0);
        assert_abs_diff_eq!(*coords.last().unwrap(), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn respects_explicit_grid_bounds() {
        let coords = compute_resampled_coordinates(
            &[0.0, 0.0],
            &[4.0, 4.0],
            &[1.0, 1.0],
            ResampleBounds {
                grid_min: Some(-10.0),
                grid_max: Some(10.0),
                max_steps: None,
            },
        );
        // min(values_min)=0 wins over the heuristic_min=-10 via the max().
        assert_abs_diff_eq!(*coords.first().unwrap(), 0.0);
    }

    #[test]
    fn heuristic_max_adds_the_iqr_margin() {
        let coords = compute_resampled_coordinates(
            &[0.0, 0.0, 0.0, 0.0, 0.0],
            &[10.0, 20.0, 30.0, 40.0, 1000.0],
            &[1.0, 1.0, 1.0, 1.0, 1.0],
            ResampleBounds::default(),
        );
        // median(values_max)=30, iqr=Q75-Q25=40-20=20, so heuristic_max =
        // 30 + 1.5*20 = 60, which binds against the 1000 outlier. A minus
        // sign here would instead clamp heuristic_max to 0 and discard
        // almost the entire data range.
        assert!(*coords.last().unwrap() > 50.0);
    }

    #[test]
    fn falls_back_to_linspace_past_max_steps() {
        let coords = compute_resampled_coordinates(
            &[0.0, 0.0],
            &[1000.0, 1000.0],
            &[0.01, 0.01],
            ResampleBounds {
                grid_min: None,
                grid_max: None,
                max_steps: Some(10),
            },
        );
        assert_eq!(coords.len(), 10);
    }

    #[test]
    fn nan_entries_are_ignored() {
        let coords = compute_resampled_coordinates(
            &[0.0, f32::NAN],
            &[4.0, f32::NAN],
            &[1.0, f32::NAN],
            ResampleBounds::default(),
        );
        assert!(!coords.is_empty());
        assert!(coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn quantile_matches_linear_convention() {
        assert_abs_diff_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), 2.5);
    }
}
