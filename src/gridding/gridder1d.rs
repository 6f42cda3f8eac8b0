// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ndarray::Array1;

use crate::error::{Error, Result};

use super::axis::GridAxis;

/// A 1-D forward gridder: splats scattered `(x, v)` measurements onto a
/// regular grid along `x`.
#[derive(Clone, Copy, Debug)]
pub struct ForwardGridder1D {
    x: GridAxis,
}

impl ForwardGridder1D {
    pub fn from_res(x_min: f32, x_max: f32, x_res: f32) -> Result<Self> {
        Ok(Self {
            x: GridAxis::from_res(x_min, x_max, x_res)?,
        })
    }

    /// Like [`Self::from_res`], but anchors the snapping grid at `x_base`
    /// instead of `0.0`.
    pub fn from_res_with_base(x_min: f32, x_max: f32, x_res: f32, x_base: f32) -> Result<Self> {
        Ok(Self {
            x: GridAxis::from_res_with_base(x_min, x_max, x_res, x_base)?,
        })
    }

    pub fn from_data(x: &[f32], x_res: f32) -> Result<Self> {
        Ok(Self {
            x: GridAxis::from_data(x, x_res)?,
        })
    }

    pub fn x_axis(&self) -> &GridAxis {
        &self.x
    }

    pub fn shape(&self) -> usize {
        self.x.n()
    }

    pub fn empty_images(&self) -> (Array1<f32>, Array1<f32>) {
        (Array1::zeros(self.shape()), Array1::zeros(self.shape()))
    }

    pub fn interpolate_block_mean(&self, x: &[f32], v: &[f32]) -> Result<(Array1<f32>, Array1<f32>)> {
        let (mut values, mut weights) = self.empty_images();
        self.interpolate_block_mean_inplace(x, v, &mut values, &mut weights)?;
        Ok((values, weights))
    }

    pub fn interpolate_block_mean_inplace(
        &self,
        x: &[f32],
        v: &[f32],
        image_values: &mut Array1<f32>,
        image_weights: &mut Array1<f32>,
    ) -> Result<()> {
        check_lengths(x, v)?;
        check_shape(image_values, self.shape())?;
        check_shape(image_weights, self.shape())?;
        for (&xi, &vi) in x.iter().zip(v.iter()) {
            if !vi.is_finite() {
                log::trace!("block mean: discarding non-finite value at x={xi}");
                continue;
            }
            let ix = self.x.index(xi);
            if !self.x.in_bounds(ix) {
                log::trace!("block mean: discarding out-of-grid point x={xi} (index {ix})");
                continue;
            }
            image_values[ix as usize] += vi;
            image_weights[ix as usize] += 1.0;
        }
        Ok(())
    }

    pub fn interpolate_weighted_mean(
        &self,
        x: &[f32],
        v: &[f32],
    ) -> Result<(Array1<f32>, Array1<f32>)> {
        let (mut values, mut weights) = self.empty_images();
        self.interpolate_weighted_mean_inplace(x, v, &mut values, &mut weights)?;
        Ok((values, weights))
    }

    pub fn interpolate_weighted_mean_inplace(
        &self,
        x: &[f32],
        v: &[f32],
        image_values: &mut Array1<f32>,
        image_weights: &mut Array1<f32>,
    ) -> Result<()> {
        check_lengths(x, v)?;
        check_shape(image_values, self.shape())?;
        check_shape(image_weights, self.shape())?;
        for (&xi, &vi) in x.iter().zip(v.iter()) {
            if !vi.is_finite() {
                log::trace!("weighted mean: discarding non-finite value at x={xi}");
                continue;
            }
            let f = self.x.index_fraction(xi);
            let lo = f.floor();
            let frac = f - lo;
            let mut any_weight = false;
            for (idx, w) in [(lo as i64, 1.0 - frac), (lo as i64 + 1, frac)] {
                if w == 0.0 || !self.x.in_bounds(idx) {
                    continue;
                }
                any_weight = true;
                image_values[idx as usize] += vi * w;
                image_weights[idx as usize] += w;
            }
            if !any_weight {
                log::trace!("weighted mean: discarding out-of-grid point x={xi}");
            }
        }
        Ok(())
    }
}

fn check_lengths(x: &[f32], v: &[f32]) -> Result<()> {
    if x.len() != v.len() {
        return Err(Error::length("ForwardGridder1D input", x.len(), v.len()));
    }
    Ok(())
}

fn check_shape(image: &Array1<f32>, n: usize) -> Result<()> {
    if image.len() != n {
        return Err(Error::length("ForwardGridder1D image", n, image.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn s5_weighted_mean() {
        let gridder = ForwardGridder1D::from_res(0.0, 1.0, 1.0).unwrap();
        let (values, weights) = gridder.interpolate_weighted_mean(&[0.25], &[10.0]).unwrap();
        assert_abs_diff_eq!(values[0], 7.5, epsilon = 1e-5);
        assert_abs_diff_eq!(weights[0], 0.75, epsilon = 1e-5);
    }

    #[test]
    fn block_mean_conservation() {
        let gridder = ForwardGridder1D::from_res(0.0, 4.0, 1.0).unwrap();
        let x = vec![0.1, 1.9, 2.2, 3.8];
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let (values, weights) = gridder.interpolate_block_mean(&x, &v).unwrap();
        assert_abs_diff_eq!(values.sum(), v.iter().sum::<f32>(), epsilon = 1e-5);
        assert_abs_diff_eq!(weights.sum(), v.len() as f32, epsilon = 1e-5);
    }

    #[test]
    fn weighted_mean_partition_of_unity() {
        let gridder = ForwardGridder1D::from_res(0.0, 4.0, 1.0).unwrap();
        let (_values, weights) = gridder.interpolate_weighted_mean(&[1.3], &[1.0]).unwrap();
        assert_abs_diff_eq!(weights.sum(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn point_on_cell_centre_collapses_to_block_mean() {
        let gridder = ForwardGridder1D::from_res(0.0, 4.0, 1.0).unwrap();
        let (values, weights) = gridder.interpolate_weighted_mean(&[2.0], &[10.0]).unwrap();
        assert_abs_diff_eq!(values[2], 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(weights[2], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn non_finite_values_are_discarded() {
        let gridder = ForwardGridder1D::from_res(0.0, 4.0, 1.0).unwrap();
        let (values, weights) = gridder
            .interpolate_block_mean(&[1.0, 2.0], &[f32::NAN, 5.0])
            .unwrap();
        assert_abs_diff_eq!(values[1], 0.0);
        assert_abs_diff_eq!(weights[1], 0.0);
        assert_abs_diff_eq!(values[2], 5.0);
    }
}
