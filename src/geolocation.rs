// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A plain sensor pose: position plus orientation, in the vessel/local
//! coordinate frame.

/// The position and orientation of a sensor. Raytracers and backtracers
/// carry one of these to know where the sonar head is and how it's tilted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoLocation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Yaw, in degrees.
    pub yaw: f32,
    /// Pitch, in degrees.
    pub pitch: f32,
    /// Roll, in degrees.
    pub roll: f32,
}

impl GeoLocation {
    pub fn new(x: f32, y: f32, z: f32, yaw: f32, pitch: f32, roll: f32) -> Self {
        Self {
            x,
            y,
            z,
            yaw,
            pitch,
            roll,
        }
    }

    /// A pose at the origin with no tilt.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// The sensor orientation quaternion used by raytracers and
    /// backtracers. Yaw is always zeroed: swath geometry is defined in the
    /// vessel's heading frame, so yaw is applied further up the processing
    /// chain, not here.
    pub fn orientation_quat(&self) -> nalgebra::UnitQuaternion<f32> {
        crate::rotation::quaternion_from_ypr(0.0, self.pitch, self.roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_quat_zeroes_yaw() {
        let loc = GeoLocation::new(0.0, 0.0, 0.0, 90.0, 5.0, -5.0);
        let (x, y, z) = crate::rotation::rotate_point(&loc.orientation_quat(), 0.0, 0.0, 1.0);
        let with_yaw = crate::rotation::quaternion_from_ypr(loc.yaw, loc.pitch, loc.roll);
        let (xw, yw, zw) = crate::rotation::rotate_point(&with_yaw, 0.0, 0.0, 1.0);
        assert!((x - xw).abs() > 1e-6 || (y - yw).abs() > 1e-6 || (z - zw).abs() > 1e-6);
    }
}
