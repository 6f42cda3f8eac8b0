// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raytracing: turning (launch angle, travel time) pairs into 3-D points
//! relative to a sensor.

mod constant_svp;

pub use constant_svp::RtConstantSvp;

use ndarray::{Array1, Array2, Ix1, Ix2};

use crate::error::Result;
use crate::geo::{RaytraceResult, RaytraceResults};
use crate::geolocation::GeoLocation;

/// The shape every raytracer implements. A constant sound velocity profile
/// (`RtConstantSvp`) is the only implementation today; the trait exists so a
/// depth-varying profile can be added without touching call sites, the way
/// the original's `I_Raytracer` forwards its per-beam/per-swath methods to
/// a single per-point virtual.
pub trait Raytracer {
    fn sensor_location(&self) -> GeoLocation;
    fn set_sensor_location(&mut self, location: GeoLocation);

    /// Trace a single point.
    fn trace_point(
        &self,
        two_way_travel_time: f32,
        along_angle: f32,
        cross_angle: f32,
    ) -> RaytraceResult;

    /// Trace a tensor of points in one call. `two_way_travel_time`,
    /// `along_angle` and `cross_angle` must have equal length.
    fn trace_points(
        &self,
        two_way_travel_time: &Array1<f32>,
        along_angle: &Array1<f32>,
        cross_angle: &Array1<f32>,
        cores: usize,
    ) -> Result<RaytraceResults<Ix1>>;

    /// Trace every sample of a single beam, linearly interpolating position
    /// along the straight line from the sensor to the beam's last sample.
    fn trace_beam(
        &self,
        sample_numbers: &Array1<f32>,
        dt: f32,
        t0: f32,
        along_angle: f32,
        cross_angle: f32,
    ) -> RaytraceResults<Ix1>;

    /// [`Raytracer::trace_beam`], but `sample_numbers` is built from a
    /// `(first, count, step)` triple instead of being supplied directly.
    fn trace_beam_range(
        &self,
        first_sample_number: f32,
        number_of_samples: usize,
        sample_step: f32,
        dt: f32,
        t0: f32,
        along_angle: f32,
        cross_angle: f32,
    ) -> RaytraceResults<Ix1> {
        let sample_numbers = Array1::from_iter(
            (0..number_of_samples).map(|i| first_sample_number + i as f32 * sample_step),
        );
        self.trace_beam(&sample_numbers, dt, t0, along_angle, cross_angle)
    }

    /// Trace an entire swath: one row of `sample_numbers` per beam, sharing
    /// `dt`/`t0` but with per-beam launch angles.
    fn trace_swath(
        &self,
        sample_numbers: &Array2<f32>,
        dt: f32,
        t0: f32,
        along_per_beam: &Array1<f32>,
        cross_per_beam: &Array1<f32>,
        cores: usize,
    ) -> Result<RaytraceResults<Ix2>>;

    /// [`Raytracer::trace_swath`] with `sample_numbers` built uniformly for
    /// every beam from `(first, count, step)`.
    fn trace_swath_range(
        &self,
        first_sample_number: f32,
        number_of_samples: usize,
        sample_step: f32,
        dt: f32,
        t0: f32,
        along_per_beam: &Array1<f32>,
        cross_per_beam: &Array1<f32>,
        cores: usize,
    ) -> Result<RaytraceResults<Ix2>> {
        let n_beams = along_per_beam.len();
        let row = Array1::from_iter(
            (0..number_of_samples).map(|i| first_sample_number + i as f32 * sample_step),
        );
        let mut sample_numbers = Array2::<f32>::zeros((n_beams, number_of_samples));
        for mut r in sample_numbers.rows_mut() {
            r.assign(&row);
        }
        self.trace_swath(
            &sample_numbers,
            dt,
            t0,
            along_per_beam,
            cross_per_beam,
            cores,
        )
    }
}
