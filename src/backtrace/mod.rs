// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Backtracing: the inverse of raytracing — turning 3-D points into
//! (along/cross angle, range) relative to a sensor.

mod constant_svp;

pub use constant_svp::BtConstantSvp;

use ndarray::{Array1, Ix1, Ix2};

use crate::error::Result;
use crate::geo::SampleDirectionsRange;
use crate::geolocation::GeoLocation;

/// The shape every backtracer implements; mirrors [`crate::raytrace::Raytracer`].
pub trait Backtracer {
    fn sensor_location(&self) -> GeoLocation;
    fn set_sensor_location(&mut self, location: GeoLocation);

    /// Recover (along angle, cross angle, range) for each of the given
    /// points. `x`, `y` and `z` must have equal length.
    fn backtrace_points(
        &self,
        x: &Array1<f32>,
        y: &Array1<f32>,
        z: &Array1<f32>,
        cores: usize,
    ) -> Result<SampleDirectionsRange<Ix1>>;

    /// Backtrace every `(y, z)` pair of a regular grid in one call, with
    /// `x` implicitly `-sensor_x` for every point.
    fn backtrace_image(
        &self,
        y_coords: &Array1<f32>,
        z_coords: &Array1<f32>,
        cores: usize,
    ) -> Result<SampleDirectionsRange<Ix2>>;
}
