// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ndarray::{parallel::prelude::*, Array1, Array2, Ix1, Ix2, Zip};

use crate::error::{Error, Result};
use crate::geo::{RaytraceResult, RaytraceResults, Xyz};
use crate::geolocation::GeoLocation;

use super::Raytracer;

/// A raytracer assuming a constant sound velocity profile: travel time
/// converts to range by a single scalar `c / 2`, and the launch direction
/// is a direction-cosine construction composed with the sensor's tilt
/// (yaw zeroed — see `GeoLocation::orientation_quat`).
#[derive(Clone, Copy, Debug)]
pub struct RtConstantSvp {
    sensor_location: GeoLocation,
    sound_velocity: f32,
}

impl RtConstantSvp {
    pub fn new(sensor_location: GeoLocation, sound_velocity: f32) -> Self {
        Self {
            sensor_location,
            sound_velocity,
        }
    }

    fn c_half(&self) -> f32 {
        self.sound_velocity / 2.0
    }
}

impl Raytracer for RtConstantSvp {
    fn sensor_location(&self) -> GeoLocation {
        self.sensor_location
    }

    fn set_sensor_location(&mut self, location: GeoLocation) {
        self.sensor_location = location;
    }

    fn trace_point(
        &self,
        two_way_travel_time: f32,
        along_angle: f32,
        cross_angle: f32,
    ) -> RaytraceResult {
        let r = two_way_travel_time * self.c_half();
        let sensor_quat = self.sensor_location.orientation_quat();
        let launch_quat = crate::rotation::quaternion_from_ypr(0.0, along_angle, cross_angle);
        let q = crate::rotation::compose(&sensor_quat, &launch_quat);
        let (x, y, z) = crate::rotation::rotate_point(&q, 0.0, 0.0, r);
        RaytraceResult {
            x,
            y,
            z: self.sensor_location.z + z,
            true_range: r,
        }
    }

    fn trace_points(
        &self,
        two_way_travel_time: &Array1<f32>,
        along_angle: &Array1<f32>,
        cross_angle: &Array1<f32>,
        cores: usize,
    ) -> Result<RaytraceResults<Ix1>> {
        let n = two_way_travel_time.len();
        let along_angle = if along_angle.len() == 1 && n != 1 {
            Array1::from_elem(n, along_angle[0])
        } else {
            along_angle.clone()
        };
        if along_angle.len() != n {
            return Err(Error::length(
                "trace_points along_angle",
                n,
                along_angle.len(),
            ));
        }
        if cross_angle.len() != n {
            return Err(Error::length(
                "trace_points cross_angle",
                n,
                cross_angle.len(),
            ));
        }

        let mut x = Array1::<f32>::zeros(n);
        let mut y = Array1::<f32>::zeros(n);
        let mut z = Array1::<f32>::zeros(n);
        let mut true_range = Array1::<f32>::zeros(n);

        let fill = |x: &mut Array1<f32>,
                    y: &mut Array1<f32>,
                    z: &mut Array1<f32>,
                    true_range: &mut Array1<f32>| {
            Zip::from(x)
                .and(y)
                .and(z)
                .and(true_range)
                .and(two_way_travel_time)
                .and(&along_angle)
                .and(cross_angle)
                .for_each(|x, y, z, tr, &tt, &along, &cross| {
                    let r = self.trace_point(tt, along, cross);
                    *x = r.x;
                    *y = r.y;
                    *z = r.z;
                    *tr = r.true_range;
                });
        };

        crate::parallel::run(cores, || fill(&mut x, &mut y, &mut z, &mut true_range));

        let xyz = Xyz::new(x, y, z)?;
        RaytraceResults::new(xyz, true_range)
    }

    fn trace_beam(
        &self,
        sample_numbers: &Array1<f32>,
        dt: f32,
        t0: f32,
        along_angle: f32,
        cross_angle: f32,
    ) -> RaytraceResults<Ix1> {
        let n = sample_numbers.len();
        let sensor = self.sensor_location;

        if n == 0 {
            return RaytraceResults::new(
                Xyz::new(Array1::zeros(0), Array1::zeros(0), Array1::zeros(0)).unwrap(),
                Array1::zeros(0),
            )
            .unwrap();
        }

        let t_last = sample_numbers[n - 1] * dt + t0;
        let scale = self.trace_point(t_last, along_angle, cross_angle);

        let mut x = Array1::<f32>::zeros(n);
        let mut y = Array1::<f32>::zeros(n);
        let mut z = Array1::<f32>::zeros(n);
        let mut true_range = Array1::<f32>::zeros(n);

        for i in 0..n {
            let t_i = sample_numbers[i] * dt + t0;
            let frac = if t_last == 0.0 { 0.0 } else { t_i / t_last };
            x[i] = frac * scale.x;
            y[i] = frac * scale.y;
            z[i] = sensor.z + frac * (scale.z - sensor.z);
            true_range[i] = frac * scale.true_range;
        }

        RaytraceResults::new(Xyz::new(x, y, z).unwrap(), true_range).unwrap()
    }

    fn trace_swath(
        &self,
        sample_numbers: &Array2<f32>,
        dt: f32,
        t0: f32,
        along_per_beam: &Array1<f32>,
        cross_per_beam: &Array1<f32>,
        cores: usize,
    ) -> Result<RaytraceResults<Ix2>> {
        let n_beams = sample_numbers.shape()[0];
        let n_samples = sample_numbers.shape()[1];
        if along_per_beam.len() != n_beams || cross_per_beam.len() != n_beams {
            return Err(Error::length(
                "trace_swath along/cross_per_beam",
                n_beams,
                along_per_beam.len(),
            ));
        }

        let mut x = Array2::<f32>::zeros((n_beams, n_samples));
        let mut y = Array2::<f32>::zeros((n_beams, n_samples));
        let mut z = Array2::<f32>::zeros((n_beams, n_samples));
        let mut true_range = Array2::<f32>::zeros((n_beams, n_samples));

        let fill = || {
            x.axis_iter_mut(ndarray::Axis(0))
                .into_par_iter()
                .zip(y.axis_iter_mut(ndarray::Axis(0)).into_par_iter())
                .zip(z.axis_iter_mut(ndarray::Axis(0)).into_par_iter())
                .zip(true_range.axis_iter_mut(ndarray::Axis(0)).into_par_iter())
                .zip(sample_numbers.axis_iter(ndarray::Axis(0)).into_par_iter())
                .enumerate()
                .for_each(|(b, ((((mut xr, mut yr), mut zr), mut trr), row))| {
                    let beam = self.trace_beam(
                        &row.to_owned(),
                        dt,
                        t0,
                        along_per_beam[b],
                        cross_per_beam[b],
                    );
                    xr.assign(&beam.xyz.x);
                    yr.assign(&beam.xyz.y);
                    zr.assign(&beam.xyz.z);
                    trr.assign(&beam.true_range);
                });
        };

        crate::parallel::run(cores, fill);

        RaytraceResults::new(Xyz::new(x, y, z)?, true_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sensor() -> GeoLocation {
        GeoLocation::new(0.0, 0.0, 3.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn s1_identity() {
        let rt = RtConstantSvp::new(sensor(), 1450.0);
        let r = rt.trace_point(0.0, 0.0, 0.0);
        assert_abs_diff_eq!(r.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.z, 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.true_range, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn s2_down() {
        let rt = RtConstantSvp::new(sensor(), 1450.0);
        let r = rt.trace_point(-1.0, 0.0, 0.0);
        assert_abs_diff_eq!(r.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.z, 3.0 - 725.0, epsilon = 1e-3);
        assert_abs_diff_eq!(r.true_range, -725.0, epsilon = 1e-3);
    }

    #[test]
    fn s3_forty_five_across() {
        let rt = RtConstantSvp::new(sensor(), 1450.0);
        let r = rt.trace_point(5.0, 45.0, 0.0);
        assert_abs_diff_eq!(r.x, 2563.26221, epsilon = 0.01);
        assert_abs_diff_eq!(r.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.z, 2566.26172, epsilon = 0.01);
        assert_abs_diff_eq!(r.true_range, 3625.0, epsilon = 1e-3);
        let hyp = (r.x * r.x + r.y * r.y + (r.z - 3.0) * (r.z - 3.0)).sqrt();
        assert_abs_diff_eq!(hyp, r.true_range.abs(), epsilon = 0.001);
    }

    #[test]
    fn scale_beam_matches_trace_point_at_endpoints() {
        let rt = RtConstantSvp::new(sensor(), 1450.0);
        let sample_numbers = Array1::from(vec![0.0_f32, 1.0, 2.0, 3.0, 4.0]);
        let dt = 0.5;
        let t0 = 0.1;
        let result = rt.trace_beam(&sample_numbers, dt, t0, 20.0, 10.0);

        let t_last = sample_numbers[4] * dt + t0;
        let expected_last = rt.trace_point(t_last, 20.0, 10.0);
        assert_abs_diff_eq!(result.xyz.x[4], expected_last.x, epsilon = 1e-4);
        assert_abs_diff_eq!(result.xyz.y[4], expected_last.y, epsilon = 1e-4);
        assert_abs_diff_eq!(result.xyz.z[4], expected_last.z, epsilon = 1e-4);
        assert_abs_diff_eq!(result.true_range[4], expected_last.true_range, epsilon = 1e-4);

        assert_abs_diff_eq!(result.xyz.x[0], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.xyz.y[0], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.xyz.z[0], sensor().z, epsilon = 1e-4);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let rt = RtConstantSvp::new(sensor(), 1450.0);
        let empty = Array1::<f32>::zeros(0);
        let result = rt.trace_points(&empty, &empty, &empty, 1).unwrap();
        assert_eq!(result.xyz.x.len(), 0);
    }

    #[test]
    fn trace_swath_matches_trace_beam_per_row() {
        let rt = RtConstantSvp::new(sensor(), 1450.0);
        let sample_numbers =
            Array2::from_shape_fn((2, 3), |(_, j)| j as f32);
        let along = Array1::from(vec![10.0_f32, -5.0]);
        let cross = Array1::from(vec![2.0_f32, 3.0]);
        let swath = rt
            .trace_swath(&sample_numbers, 0.5, 0.0, &along, &cross, 1)
            .unwrap();
        for b in 0..2 {
            let row = sample_numbers.row(b).to_owned();
            let beam = rt.trace_beam(&row, 0.5, 0.0, along[b], cross[b]);
            for i in 0..3 {
                assert_abs_diff_eq!(swath.xyz.x[[b, i]], beam.xyz.x[i], epsilon = 1e-5);
                assert_abs_diff_eq!(swath.xyz.z[[b, i]], beam.xyz.z[i], epsilon = 1e-5);
            }
        }
    }
}
