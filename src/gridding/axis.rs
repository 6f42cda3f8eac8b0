// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A single regular axis of a grid: resolution, extent, and the four
//! coordinate helpers every gridder builds on (`index`, `index_fraction`,
//! `value`, `grd_value`).

use crate::error::{Error, Result};

/// One axis of a [`super::ForwardGridder1D`]/2D/3D grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridAxis {
    res: f32,
    min: f32,
    max: f32,
    n: usize,
    border_min: f32,
    border_max: f32,
}

impl GridAxis {
    /// Build an axis covering `[min_raw, max_raw]` at resolution `res`,
    /// snapping the bounds to the cell centres that contain them, with the
    /// snapping grid anchored at `base = 0.0`. See [`Self::from_res_with_base`]
    /// for an axis anchored elsewhere.
    pub fn from_res(min_raw: f32, max_raw: f32, res: f32) -> Result<Self> {
        Self::from_res_with_base(min_raw, max_raw, res, 0.0)
    }

    /// Build an axis covering `[min_raw, max_raw]` at resolution `res`,
    /// snapping the bounds to the cell centres of a grid anchored at `base`
    /// (`min = base + res * round((min_raw - base) / res)`, likewise for
    /// `max`), so that grids built from different data extents but the same
    /// `(res, base)` always align on shared cell boundaries.
    pub fn from_res_with_base(min_raw: f32, max_raw: f32, res: f32, base: f32) -> Result<Self> {
        if !(res.is_finite() && res > 0.0) {
            return Err(Error::InvalidArgument {
                message: format!("grid resolution must be finite and positive, got {res}"),
            });
        }
        if !(min_raw.is_finite() && max_raw.is_finite() && base.is_finite()) {
            return Err(Error::InvalidArgument {
                message: "grid extent must be finite".to_string(),
            });
        }
        let min = base + res * ((min_raw - base) / res).round();
        let max = base + res * ((max_raw - base) / res).round();
        let n = (((max - min) / res).round() as i64 + 1).max(1) as usize;
        Ok(Self {
            res,
            min,
            max,
            n,
            border_min: min - res / 2.0,
            border_max: max + res / 2.0,
        })
    }

    /// Build an axis from raw data, picking `min`/`max` from the data's
    /// extremes, anchored at `base = 0.0`.
    pub fn from_data(values: &[f32], res: f32) -> Result<Self> {
        Self::from_data_with_base(values, res, 0.0)
    }

    /// Build an axis from raw data, picking `min`/`max` from the data's
    /// extremes, anchored at `base`.
    pub fn from_data_with_base(values: &[f32], res: f32, base: f32) -> Result<Self> {
        let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(Error::EmptyInput {
                context: "GridAxis::from_data",
            });
        }
        let min_raw = finite.iter().copied().fold(f32::INFINITY, f32::min);
        let max_raw = finite.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Self::from_res_with_base(min_raw, max_raw, res, base)
    }

    pub fn res(&self) -> f32 {
        self.res
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// The extent of the outermost grid cells: `min - res/2`.
    pub fn border_min(&self) -> f32 {
        self.border_min
    }

    /// The extent of the outermost grid cells: `max + res/2`.
    pub fn border_max(&self) -> f32 {
        self.border_max
    }

    /// The nearest cell index for `v`, rounding half away from zero. May be
    /// negative or `>= n`; callers are responsible for bounds-checking.
    pub fn index(&self, v: f32) -> i64 {
        round_half_away_from_zero((v - self.min) / self.res) as i64
    }

    /// The real-valued cell coordinate of `v`.
    pub fn index_fraction(&self, v: f32) -> f32 {
        (v - self.min) / self.res
    }

    /// The coordinate of cell `i`.
    pub fn value(&self, i: i64) -> f32 {
        self.min + self.res * i as f32
    }

    /// The coordinate of the cell centre containing `v`.
    pub fn grd_value(&self, v: f32) -> f32 {
        self.value(self.index(v))
    }

    /// All cell-centre coordinates, `value(0)..value(n-1)`.
    pub fn coordinates(&self) -> Vec<f32> {
        (0..self.n as i64).map(|i| self.value(i)).collect()
    }

    pub(crate) fn in_bounds(&self, i: i64) -> bool {
        i >= 0 && (i as usize) < self.n
    }
}

fn round_half_away_from_zero(v: f32) -> f32 {
    if v >= 0.0 {
        (v + 0.5).floor()
    } else {
        (v - 0.5).ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn snaps_bounds_to_cell_centres() {
        let axis = GridAxis::from_res(0.0, 1.0, 1.0).unwrap();
        assert_eq!(axis.n(), 2);
        assert_abs_diff_eq!(axis.min(), 0.0);
        assert_abs_diff_eq!(axis.max(), 1.0);
    }

    /// Unsnapped raw bounds snap to the `base = 0` grid rather than
    /// collapsing to the raw extent: `0.3` rounds down to cell `0`, `2.7`
    /// rounds up to cell `3`.
    #[test]
    fn snaps_to_base_grid_not_raw_extent() {
        let axis = GridAxis::from_res(0.3, 2.7, 1.0).unwrap();
        assert_abs_diff_eq!(axis.min(), 0.0);
        assert_abs_diff_eq!(axis.max(), 3.0);
        assert_eq!(axis.n(), 4);
    }

    #[test]
    fn explicit_base_shifts_the_snapping_grid() {
        let axis = GridAxis::from_res_with_base(0.3, 2.7, 1.0, 0.5).unwrap();
        assert_abs_diff_eq!(axis.min(), 0.5);
        assert_abs_diff_eq!(axis.max(), 2.5);
    }

    #[test]
    fn border_is_half_a_cell_beyond_min_max() {
        let axis = GridAxis::from_res(0.0, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(axis.border_min(), -0.5);
        assert_abs_diff_eq!(axis.border_max(), 1.5);
    }

    #[test]
    fn index_and_value_round_trip_on_centres() {
        let axis = GridAxis::from_res(0.0, 1.0, 1.0).unwrap();
        assert_eq!(axis.index(0.0), 0);
        assert_eq!(axis.index(1.0), 1);
        assert_abs_diff_eq!(axis.value(0), 0.0);
        assert_abs_diff_eq!(axis.value(1), 1.0);
    }

    #[test]
    fn grd_value_snaps_to_nearest_centre() {
        let axis = GridAxis::from_res(0.0, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(axis.grd_value(0.25), 0.0);
        assert_abs_diff_eq!(axis.grd_value(0.8), 1.0);
    }

    #[test]
    fn rejects_non_positive_resolution() {
        assert!(GridAxis::from_res(0.0, 1.0, 0.0).is_err());
        assert!(GridAxis::from_res(0.0, 1.0, -1.0).is_err());
    }
}
