// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pure, binary-search-based interpolators. Neither type holds any interior
//! mutable state, so both are safe to share across threads during lookup.

/// Nearest-neighbour lookup from a value to one of `n` labels, valid only
/// inside `[min, max]` (extended by half the mean spacing between the
/// sorted input values on each side).
pub struct NearestInterpolator {
    xs: Vec<f32>,
    labels: Vec<usize>,
    min: f32,
    max: f32,
}

impl NearestInterpolator {
    /// `xs` must already be sorted ascending; `labels[i]` is the label
    /// returned for `xs[i]`.
    pub fn new(xs: Vec<f32>, labels: Vec<usize>) -> Self {
        let half_spacing = if xs.len() > 1 {
            let span = xs[xs.len() - 1] - xs[0];
            span / (xs.len() - 1) as f32 / 2.0
        } else {
            0.0
        };
        let min = xs.first().copied().unwrap_or(f32::NAN) - half_spacing;
        let max = xs.last().copied().unwrap_or(f32::NAN) + half_spacing;
        Self {
            xs,
            labels,
            min,
            max,
        }
    }

    pub fn lookup(&self, x: f32) -> Option<usize> {
        if self.xs.is_empty() || x < self.min || x > self.max {
            return None;
        }
        let idx = self.xs.partition_point(|&v| v < x);
        let best = if idx == 0 {
            0
        } else if idx >= self.xs.len() {
            self.xs.len() - 1
        } else {
            let before = idx - 1;
            if (self.xs[idx] - x).abs() < (x - self.xs[before]).abs() {
                idx
            } else {
                before
            }
        };
        Some(self.labels[best])
    }
}

/// Piecewise-linear interpolation over sorted `(xs, ys)` pairs, extrapolated
/// linearly from the nearest segment outside the data's range.
pub struct LinearInterpolator {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl LinearInterpolator {
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Self { xs, ys }
    }

    pub fn lookup(&self, x: f32) -> f32 {
        let n = self.xs.len();
        if n == 0 {
            return f32::NAN;
        }
        if n == 1 {
            return self.ys[0];
        }
        let idx = self.xs.partition_point(|&v| v < x);
        let (lo, hi) = if idx == 0 {
            (0, 1)
        } else if idx >= n {
            (n - 2, n - 1)
        } else {
            (idx - 1, idx)
        };
        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (y0, y1) = (self.ys[lo], self.ys[hi]);
        if x1 == x0 {
            return y0;
        }
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn nearest_picks_closest() {
        let interp = NearestInterpolator::new(vec![-10.0, 0.0, 10.0], vec![0, 1, 2]);
        assert_eq!(interp.lookup(-11.0), None);
        assert_eq!(interp.lookup(-6.0), Some(0));
        assert_eq!(interp.lookup(4.0), Some(1));
        assert_eq!(interp.lookup(9.0), Some(2));
        assert_eq!(interp.lookup(16.0), None);
    }

    #[test]
    fn linear_interpolates_between_anchors() {
        let interp = LinearInterpolator::new(vec![0.0, 10.0], vec![0.0, 100.0]);
        assert_abs_diff_eq!(interp.lookup(5.0), 50.0);
        assert_abs_diff_eq!(interp.lookup(0.0), 0.0);
        assert_abs_diff_eq!(interp.lookup(10.0), 100.0);
    }

    #[test]
    fn linear_extrapolates_past_the_last_anchor() {
        let interp = LinearInterpolator::new(vec![0.0, 10.0], vec![0.0, 100.0]);
        assert_abs_diff_eq!(interp.lookup(20.0), 200.0);
    }
}
