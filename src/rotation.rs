// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rotation capability: composing yaw/pitch/roll into a quaternion and
//! applying it to points. This is the abstract collaborator described by
//! the data model; everything else in this crate treats it as opaque.

use nalgebra::{UnitQuaternion, Vector3};

/// Build a quaternion from yaw/pitch/roll, all in degrees, using the
/// aerospace Z-Y-X (yaw, then pitch, then roll) convention.
pub fn quaternion_from_ypr(yaw_deg: f32, pitch_deg: f32, roll_deg: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_euler_angles(
        roll_deg.to_radians(),
        pitch_deg.to_radians(),
        yaw_deg.to_radians(),
    )
}

/// Compose two quaternions, `outer` applied after `inner`.
pub fn compose(outer: &UnitQuaternion<f32>, inner: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    outer * inner
}

/// Rotate a single point by a quaternion.
pub fn rotate_point(q: &UnitQuaternion<f32>, x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let v = q * Vector3::new(x, y, z);
    (v.x, v.y, v.z)
}
