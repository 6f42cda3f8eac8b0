// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Point clouds (`Xyz`) and the result types raytracers/backtracers hand
//! back.

use nalgebra::UnitQuaternion;
use ndarray::{Array, Array1, Dimension, Ix1, Zip};

use crate::error::{Error, Result};

/// A single traced point: position plus the along-path range that produced
/// it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaytraceResult {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub true_range: f32,
}

/// A tensor of [`RaytraceResult`]s.
#[derive(Clone, Debug)]
pub struct RaytraceResults<D: Dimension> {
    pub xyz: Xyz<D>,
    pub true_range: Array<f32, D>,
}

impl<D: Dimension> RaytraceResults<D> {
    pub fn new(xyz: Xyz<D>, true_range: Array<f32, D>) -> Result<Self> {
        if xyz.shape() != true_range.shape() {
            return Err(Error::shape(
                "RaytraceResults::new",
                xyz.shape(),
                true_range.shape(),
            ));
        }
        Ok(Self { xyz, true_range })
    }
}

/// A tensor of 3-D points, not NaN-aware: NaN in any coordinate propagates
/// through `rotate`/`translate` and the `minmax_*` accessors exactly as
/// ordinary float arithmetic would.
#[derive(Clone, Debug)]
pub struct Xyz<D: Dimension> {
    pub x: Array<f32, D>,
    pub y: Array<f32, D>,
    pub z: Array<f32, D>,
}

impl<D: Dimension> Xyz<D> {
    pub fn new(x: Array<f32, D>, y: Array<f32, D>, z: Array<f32, D>) -> Result<Self> {
        if x.shape() != y.shape() || x.shape() != z.shape() {
            return Err(Error::shape("Xyz::new", x.shape(), y.shape()));
        }
        Ok(Self { x, y, z })
    }

    pub fn shape(&self) -> &[usize] {
        self.x.shape()
    }

    /// Rotate every point in place by a quaternion.
    pub fn rotate(&mut self, q: &UnitQuaternion<f32>) {
        Zip::from(&mut self.x)
            .and(&mut self.y)
            .and(&mut self.z)
            .for_each(|x, y, z| {
                let (rx, ry, rz) = crate::rotation::rotate_point(q, *x, *y, *z);
                *x = rx;
                *y = ry;
                *z = rz;
            });
    }

    /// Rotate every point in place by yaw/pitch/roll, in degrees.
    pub fn rotate_ypr(&mut self, yaw_deg: f32, pitch_deg: f32, roll_deg: f32) {
        let q = crate::rotation::quaternion_from_ypr(yaw_deg, pitch_deg, roll_deg);
        self.rotate(&q);
    }

    /// Translate every point in place.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x.mapv_inplace(|v| v + dx);
        self.y.mapv_inplace(|v| v + dy);
        self.z.mapv_inplace(|v| v + dz);
    }

    /// The (min, max) of the x coordinate. Not NaN-aware: any NaN present
    /// poisons the result, matching ordinary float comparison semantics.
    pub fn minmax_x(&self) -> Result<(f32, f32)> {
        minmax(self.x.iter().copied())
    }

    pub fn minmax_y(&self) -> Result<(f32, f32)> {
        minmax(self.y.iter().copied())
    }

    pub fn minmax_z(&self) -> Result<(f32, f32)> {
        minmax(self.z.iter().copied())
    }

    /// Project every point to geographic coordinates via an external
    /// [`crate::physics::GeoProjector`]: `x`/`y` are read as easting/northing
    /// within `utm_zone`. Returns `{lat, lon}` tensors of the same shape.
    pub fn to_latlon<P: crate::physics::GeoProjector>(
        &self,
        projector: &P,
        utm_zone: u8,
        northern_hemisphere: bool,
    ) -> (Array<f64, D>, Array<f64, D>) {
        let mut lat = Array::<f64, D>::zeros(self.x.raw_dim());
        let mut lon = Array::<f64, D>::zeros(self.x.raw_dim());
        Zip::from(&mut lat)
            .and(&mut lon)
            .and(&self.x)
            .and(&self.y)
            .for_each(|lat, lon, &x, &y| {
                let (la, lo) = projector.reverse(utm_zone, northern_hemisphere, y as f64, x as f64);
                *lat = la;
                *lon = lo;
            });
        (lat, lon)
    }

    /// Flatten a collection of point clouds into a single 1-D point cloud.
    /// Dimensionality is dropped, matching the original's `concat`.
    pub fn concat(parts: &[Xyz<D>]) -> Xyz<Ix1> {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut z = Vec::new();
        for part in parts {
            x.extend(part.x.iter().copied());
            y.extend(part.y.iter().copied());
            z.extend(part.z.iter().copied());
        }
        Xyz {
            x: Array1::from_vec(x),
            y: Array1::from_vec(y),
            z: Array1::from_vec(z),
        }
    }
}

/// Not NaN-aware min/max: a NaN anywhere in `values` poisons the result.
fn minmax(values: impl Iterator<Item = f32>) -> Result<(f32, f32)> {
    let mut iter = values;
    let first = iter
        .next()
        .ok_or(Error::EmptyInput { context: "minmax" })?;
    let (mut mn, mut mx) = (first, first);
    for v in iter {
        mn = prop_extreme(mn, v, f32::lt);
        mx = prop_extreme(mx, v, f32::gt);
    }
    Ok((mn, mx))
}

fn prop_extreme(current: f32, candidate: f32, better: fn(&f32, &f32) -> bool) -> f32 {
    if current.is_nan() || candidate.is_nan() {
        f32::NAN
    } else if better(&candidate, &current) {
        candidate
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn translate_shifts_every_point() {
        let mut xyz = Xyz::new(array![1.0_f32], array![2.0_f32], array![3.0_f32]).unwrap();
        xyz.translate(10.0, 20.0, 30.0);
        assert_abs_diff_eq!(xyz.x[0], 11.0);
        assert_abs_diff_eq!(xyz.y[0], 22.0);
        assert_abs_diff_eq!(xyz.z[0], 33.0);
    }

    #[test]
    fn minmax_propagates_nan() {
        let xyz = Xyz::new(array![1.0_f32, f32::NAN, 3.0], array![0.0; 3], array![0.0; 3]).unwrap();
        let (mn, mx) = xyz.minmax_x().unwrap();
        assert!(mn.is_nan());
        assert!(mx.is_nan());
    }

    #[test]
    fn minmax_without_nan_is_exact() {
        let xyz = Xyz::new(array![3.0_f32, 1.0, 2.0], array![0.0; 3], array![0.0; 3]).unwrap();
        let (mn, mx) = xyz.minmax_x().unwrap();
        assert_abs_diff_eq!(mn, 1.0);
        assert_abs_diff_eq!(mx, 3.0);
    }

    #[test]
    fn minmax_on_empty_is_an_error() {
        let xyz: Xyz<Ix1> =
            Xyz::new(Array1::<f32>::zeros(0), Array1::zeros(0), Array1::zeros(0)).unwrap();
        assert!(xyz.minmax_x().is_err());
    }

    #[test]
    fn concat_flattens_to_1d() {
        let a = Xyz::new(array![1.0_f32, 2.0], array![0.0; 2], array![0.0; 2]).unwrap();
        let b = Xyz::new(array![3.0_f32], array![0.0; 1], array![0.0; 1]).unwrap();
        let combined = Xyz::concat(&[a, b]);
        assert_eq!(combined.x.len(), 3);
        assert_abs_diff_eq!(combined.x[2], 3.0);
    }

    struct FixedOffsetProjector;

    impl crate::physics::GeoProjector for FixedOffsetProjector {
        fn reverse(&self, utm_zone: u8, northern_hemisphere: bool, northing: f64, easting: f64) -> (f64, f64) {
            let hemisphere = if northern_hemisphere { 1.0 } else { -1.0 };
            (northing + utm_zone as f64, easting * hemisphere)
        }
    }

    #[test]
    fn to_latlon_applies_projector_element_wise() {
        let xyz = Xyz::new(array![10.0_f32, 20.0], array![1.0_f32, 2.0], array![0.0; 2]).unwrap();
        let (lat, lon) = xyz.to_latlon(&FixedOffsetProjector, 31, true);
        assert_abs_diff_eq!(lat[0], 1.0 + 31.0);
        assert_abs_diff_eq!(lon[0], 10.0);
        assert_abs_diff_eq!(lat[1], 2.0 + 31.0);
        assert_abs_diff_eq!(lon[1], 20.0);
    }

    #[test]
    fn rotate_by_identity_is_a_noop() {
        let mut xyz = Xyz::new(array![1.0_f32], array![2.0_f32], array![3.0_f32]).unwrap();
        xyz.rotate_ypr(0.0, 0.0, 0.0);
        assert_abs_diff_eq!(xyz.x[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(xyz.y[0], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(xyz.z[0], 3.0, epsilon = 1e-6);
    }
}
