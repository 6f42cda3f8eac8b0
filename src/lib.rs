// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numerical core for multibeam echosounder (MBES) water-column processing:
//! raytracing and backtracing between a sensor and the water column,
//! amplitude corrections, forward gridding, and the absorption / sound
//! velocity helpers that tie range to two-way travel time.
//!
//! This crate is a typed, in-process numerical library: it has no wire
//! protocol, no persistent file format, and no CLI. It consumes four
//! external collaborators it does not itself implement:
//!
//! - a **geolocation** type (`{x, y, z, yaw, pitch, roll}`), provided here as
//!   [`geolocation::GeoLocation`];
//! - a **rotation** capability (quaternion-from-YPR, composition, 3-vector
//!   rotation), provided here as the [`rotation`] module;
//! - a **UTM projector**, modeled as the [`physics::GeoProjector`] trait with
//!   no bundled implementation;
//! - a **TEOS-10 sound-velocity primitive**, modeled as the
//!   [`physics::SoundVelocityModel`] trait, with [`physics::ChenMillero77`]
//!   offered as a reference stand-in rather than the genuine routine.

pub mod amplitude;
pub mod backtrace;
pub(crate) mod constants;
pub mod error;
pub mod geo;
pub mod geolocation;
pub mod gridding;
pub(crate) mod parallel;
pub mod physics;
pub mod raytrace;
pub mod rotation;
pub mod signal;
pub mod wci;

// Re-exports.
pub use backtrace::{Backtracer, BtConstantSvp};
pub use error::{Error, Result};
pub use geo::{
    BeamSampleParameters, RaytraceResult, RaytraceResults, SampleDirections, SampleDirectionsRange,
    SampleDirectionsTime, SampleIndices, Xyz,
};
pub use geolocation::GeoLocation;
pub use gridding::{compute_resampled_coordinates, ForwardGridder1D, ForwardGridder2D, ForwardGridder3D, GridAxis};
pub use raytrace::{Raytracer, RtConstantSvp};
pub use wci::BacktracedWci;
