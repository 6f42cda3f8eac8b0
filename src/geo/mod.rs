// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Geometric primitives shared by the raytracer, backtracer and gridders:
//! tensors of sample directions, point clouds, and beam/sample bookkeeping.

pub mod beam_sample_parameters;
pub mod sample_directions;
pub mod xyz;

pub use beam_sample_parameters::{BeamSampleParameters, SampleIndices};
pub use sample_directions::{SampleDirections, SampleDirectionsRange, SampleDirectionsTime};
pub use xyz::{RaytraceResult, RaytraceResults, Xyz};
