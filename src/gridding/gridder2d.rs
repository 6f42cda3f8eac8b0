// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ndarray::Array2;

use crate::error::{Error, Result};

use super::axis::GridAxis;

/// A 2-D forward gridder: splats scattered `(x, y, v)` measurements onto a
/// regular grid.
#[derive(Clone, Copy, Debug)]
pub struct ForwardGridder2D {
    x: GridAxis,
    y: GridAxis,
}

impl ForwardGridder2D {
    pub fn from_res(x_min: f32, x_max: f32, x_res: f32, y_min: f32, y_max: f32, y_res: f32) -> Result<Self> {
        Ok(Self {
            x: GridAxis::from_res(x_min, x_max, x_res)?,
            y: GridAxis::from_res(y_min, y_max, y_res)?,
        })
    }

    /// Like [`Self::from_res`], but anchors each axis's snapping grid at its
    /// own `base` instead of `0.0`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_res_with_base(
        x_min: f32,
        x_max: f32,
        x_res: f32,
        x_base: f32,
        y_min: f32,
        y_max: f32,
        y_res: f32,
        y_base: f32,
    ) -> Result<Self> {
        Ok(Self {
            x: GridAxis::from_res_with_base(x_min, x_max, x_res, x_base)?,
            y: GridAxis::from_res_with_base(y_min, y_max, y_res, y_base)?,
        })
    }

    pub fn from_data(x: &[f32], x_res: f32, y: &[f32], y_res: f32) -> Result<Self> {
        Ok(Self {
            x: GridAxis::from_data(x, x_res)?,
            y: GridAxis::from_data(y, y_res)?,
        })
    }

    pub fn x_axis(&self) -> &GridAxis {
        &self.x
    }

    pub fn y_axis(&self) -> &GridAxis {
        &self.y
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.x.n(), self.y.n())
    }

    pub fn empty_images(&self) -> (Array2<f32>, Array2<f32>) {
        (Array2::zeros(self.shape()), Array2::zeros(self.shape()))
    }

    pub fn interpolate_block_mean(
        &self,
        x: &[f32],
        y: &[f32],
        v: &[f32],
    ) -> Result<(Array2<f32>, Array2<f32>)> {
        let (mut values, mut weights) = self.empty_images();
        self.interpolate_block_mean_inplace(x, y, v, &mut values, &mut weights)?;
        Ok((values, weights))
    }

    pub fn interpolate_block_mean_inplace(
        &self,
        x: &[f32],
        y: &[f32],
        v: &[f32],
        image_values: &mut Array2<f32>,
        image_weights: &mut Array2<f32>,
    ) -> Result<()> {
        check_lengths(&[x.len(), y.len()], v.len())?;
        check_shape(image_values.dim(), self.shape())?;
        check_shape(image_weights.dim(), self.shape())?;
        for i in 0..v.len() {
            if !v[i].is_finite() {
                log::trace!("block mean: discarding non-finite value at index {i}");
                continue;
            }
            let ix = self.x.index(x[i]);
            let iy = self.y.index(y[i]);
            if !self.x.in_bounds(ix) || !self.y.in_bounds(iy) {
                log::trace!("block mean: discarding out-of-grid point ({}, {})", x[i], y[i]);
                continue;
            }
            image_values[[ix as usize, iy as usize]] += v[i];
            image_weights[[ix as usize, iy as usize]] += 1.0;
        }
        Ok(())
    }

    pub fn interpolate_weighted_mean(
        &self,
        x: &[f32],
        y: &[f32],
        v: &[f32],
    ) -> Result<(Array2<f32>, Array2<f32>)> {
        let (mut values, mut weights) = self.empty_images();
        self.interpolate_weighted_mean_inplace(x, y, v, &mut values, &mut weights)?;
        Ok((values, weights))
    }

    pub fn interpolate_weighted_mean_inplace(
        &self,
        x: &[f32],
        y: &[f32],
        v: &[f32],
        image_values: &mut Array2<f32>,
        image_weights: &mut Array2<f32>,
    ) -> Result<()> {
        check_lengths(&[x.len(), y.len()], v.len())?;
        check_shape(image_values.dim(), self.shape())?;
        check_shape(image_weights.dim(), self.shape())?;
        for i in 0..v.len() {
            if !v[i].is_finite() {
                log::trace!("weighted mean: discarding non-finite value at index {i}");
                continue;
            }
            let fx = self.x.index_fraction(x[i]);
            let fy = self.y.index_fraction(y[i]);
            let (lx, fxr) = (fx.floor(), fx - fx.floor());
            let (ly, fyr) = (fy.floor(), fy - fy.floor());
            let mut any_weight = false;
            for (ix, wx) in [(lx as i64, 1.0 - fxr), (lx as i64 + 1, fxr)] {
                if !self.x.in_bounds(ix) {
                    continue;
                }
                for (iy, wy) in [(ly as i64, 1.0 - fyr), (ly as i64 + 1, fyr)] {
                    if !self.y.in_bounds(iy) {
                        continue;
                    }
                    let w = wx * wy;
                    if w == 0.0 {
                        continue;
                    }
                    any_weight = true;
                    image_values[[ix as usize, iy as usize]] += v[i] * w;
                    image_weights[[ix as usize, iy as usize]] += w;
                }
            }
            if !any_weight {
                log::trace!("weighted mean: discarding out-of-grid point ({}, {})", x[i], y[i]);
            }
        }
        Ok(())
    }
}

fn check_lengths(dims: &[usize], v_len: usize) -> Result<()> {
    for &d in dims {
        if d != v_len {
            return Err(Error::length("ForwardGridder2D input", v_len, d));
        }
    }
    Ok(())
}

fn check_shape(actual: (usize, usize), expected: (usize, usize)) -> Result<()> {
    if actual != expected {
        return Err(Error::shape(
            "ForwardGridder2D image",
            &[expected.0, expected.1],
            &[actual.0, actual.1],
        ));
    }
    Ok(())
}
