// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Forward gridders: splatting scattered point measurements onto a regular
//! 1-D/2-D/3-D grid, either by block mean or multilinear weighted mean.

pub mod axis;
mod gridder1d;
mod gridder2d;
mod gridder3d;
pub mod resampling;

pub use axis::GridAxis;
pub use gridder1d::ForwardGridder1D;
pub use gridder2d::ForwardGridder2D;
pub use gridder3d::ForwardGridder3D;
pub use resampling::compute_resampled_coordinates;
