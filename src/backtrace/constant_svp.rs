// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ndarray::{parallel::prelude::*, Array1, Array2, Ix1, Ix2, Zip};

use crate::error::{Error, Result};
use crate::geo::SampleDirectionsRange;
use crate::geolocation::GeoLocation;

use super::Backtracer;

/// The inverse of [`crate::raytrace::RtConstantSvp`]: turns 3-D points into
/// (along angle, cross angle, range) relative to the sensor.
#[derive(Clone, Copy, Debug)]
pub struct BtConstantSvp {
    sensor_location: GeoLocation,
    sensor_x: f32,
    sensor_y: f32,
}

impl BtConstantSvp {
    pub fn new(sensor_location: GeoLocation, sensor_x: f32, sensor_y: f32) -> Self {
        Self {
            sensor_location,
            sensor_x,
            sensor_y,
        }
    }

    fn backtrace_one(&self, x: f32, y: f32, z: f32, x_offset: f32) -> (f32, f32, f32) {
        let dx = x - x_offset;
        let dy = y - self.sensor_y;
        let dz = z - self.sensor_location.z;
        let r = (dx * dx + dy * dy + dz * dz).sqrt();
        let along_angle = (dx / r).asin().to_degrees() - self.sensor_location.pitch;
        let cross_angle = -(dy / r).asin().to_degrees() - self.sensor_location.roll;
        (along_angle, cross_angle, r)
    }
}

impl Backtracer for BtConstantSvp {
    fn sensor_location(&self) -> GeoLocation {
        self.sensor_location
    }

    fn set_sensor_location(&mut self, location: GeoLocation) {
        self.sensor_location = location;
    }

    fn backtrace_points(
        &self,
        x: &Array1<f32>,
        y: &Array1<f32>,
        z: &Array1<f32>,
        cores: usize,
    ) -> Result<SampleDirectionsRange<Ix1>> {
        let n = x.len();
        if y.len() != n {
            return Err(Error::length("backtrace_points y", n, y.len()));
        }
        if z.len() != n {
            return Err(Error::length("backtrace_points z", n, z.len()));
        }

        let mut along = Array1::<f32>::zeros(n);
        let mut cross = Array1::<f32>::zeros(n);
        let mut range = Array1::<f32>::zeros(n);

        crate::parallel::run(cores, || {
            Zip::from(&mut along)
                .and(&mut cross)
                .and(&mut range)
                .and(x)
                .and(y)
                .and(z)
                .for_each(|a, c, r, &xv, &yv, &zv| {
                    let (av, cv, rv) = self.backtrace_one(xv, yv, zv, self.sensor_x);
                    *a = av;
                    *c = cv;
                    *r = rv;
                });
        });

        SampleDirectionsRange::new(along, cross, range)
    }

    fn backtrace_image(
        &self,
        y_coords: &Array1<f32>,
        z_coords: &Array1<f32>,
        cores: usize,
    ) -> Result<SampleDirectionsRange<Ix2>> {
        let ny = y_coords.len();
        let nz = z_coords.len();

        let mut along = Array2::<f32>::zeros((ny, nz));
        let mut cross = Array2::<f32>::zeros((ny, nz));
        let mut range = Array2::<f32>::zeros((ny, nz));

        crate::parallel::run(cores, || {
            along
                .axis_iter_mut(ndarray::Axis(0))
                .into_par_iter()
                .zip(cross.axis_iter_mut(ndarray::Axis(0)).into_par_iter())
                .zip(range.axis_iter_mut(ndarray::Axis(0)).into_par_iter())
                .enumerate()
                .for_each(|(iy, ((mut a_row, mut c_row), mut r_row))| {
                    for iz in 0..nz {
                        // x-offset is -sensor_x: dx = 0 - sensor_x, computed
                        // via the same x - x_offset formula as backtrace_points.
                        let (a, c, r) =
                            self.backtrace_one(0.0, y_coords[iy], z_coords[iz], self.sensor_x);
                        a_row[iz] = a;
                        c_row[iz] = c;
                        r_row[iz] = r;
                    }
                });
        });

        SampleDirectionsRange::new(along, cross, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sensor() -> GeoLocation {
        GeoLocation::new(0.0, 0.0, 3.0, 0.0, 0.0, 0.0)
    }

    fn check(x: f32, y: f32, z: f32, along: f32, cross: f32, range: f32) {
        let bt = BtConstantSvp::new(sensor(), -2.0, 5.0);
        let xs = Array1::from(vec![x]);
        let ys = Array1::from(vec![y]);
        let zs = Array1::from(vec![z]);
        let result = bt.backtrace_points(&xs, &ys, &zs, 1).unwrap();
        assert_abs_diff_eq!(result.along_angle[0], along, epsilon = 1e-3);
        assert_abs_diff_eq!(result.cross_angle[0], cross, epsilon = 1e-3);
        assert_abs_diff_eq!(result.range[0], range, epsilon = 1e-3);
    }

    #[test]
    fn fixture_0_0_0() {
        check(0.0, 0.0, 0.0, 18.93182, 54.20424, 6.16441);
    }

    #[test]
    fn fixture_1_0_0() {
        check(1.0, 0.0, 0.0, 27.22563, 49.68446, 6.55744);
    }

    #[test]
    fn fixture_1_2_0() {
        check(1.0, 2.0, 0.0, 35.26439, 35.26439, 5.19615);
    }

    #[test]
    fn fixture_1_2_3() {
        check(1.0, 2.0, 3.0, 45.0, 45.0, 4.24264);
    }

    #[test]
    fn fixture_neg1_2_3() {
        check(-1.0, 2.0, 3.0, 18.43495, 71.56504, 3.16228);
    }

    #[test]
    fn fixture_neg1_0_neg3() {
        check(-1.0, 0.0, -3.0, 7.29628, 39.42002, 7.87401);
    }

    #[test]
    fn orientation_quat_yaw_always_zero() {
        let mut loc = sensor();
        loc.yaw = 37.0;
        let bt = BtConstantSvp::new(loc, -2.0, 5.0);
        assert_abs_diff_eq!(bt.sensor_location().orientation_quat().euler_angles().2, 0.0);
    }

    #[test]
    fn backtrace_image_matches_backtrace_points() {
        let bt = BtConstantSvp::new(sensor(), -2.0, 5.0);
        let ys = Array1::from(vec![1.0_f32, 2.0]);
        let zs = Array1::from(vec![0.5_f32, -0.5]);
        let image = bt.backtrace_image(&ys, &zs, 1).unwrap();
        for (iy, &y) in ys.iter().enumerate() {
            for (iz, &z) in zs.iter().enumerate() {
                let xs = Array1::from(vec![0.0_f32]);
                let yy = Array1::from(vec![y]);
                let zz = Array1::from(vec![z]);
                let point = bt.backtrace_points(&xs, &yy, &zz, 1).unwrap();
                assert_abs_diff_eq!(
                    image.along_angle[[iy, iz]],
                    point.along_angle[0],
                    epsilon = 1e-4
                );
            }
        }
    }
}
