// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.
 */

/// Default pH used by the Francois-Garrison absorption model when the
/// caller doesn't have a measured value handy.
pub const DEFAULT_PH: f32 = 8.0;

/// Default percentile passed to `reference_nanpercentile` by the SRSN
/// sidelobe correction convenience entry points.
pub const DEFAULT_SIDELOBE_PERCENTILE: f32 = 25.0;

/// Ceiling on the number of coordinates `compute_resampled_coordinates` will
/// produce via `arange` before it falls back to an evenly spaced `linspace`
/// of this many steps.
pub const DEFAULT_MAX_GRID_STEPS: usize = 10_000;

/// Multiplier applied to the interquartile range in the min/max and
/// resolution heuristics of `compute_resampled_coordinates`.
pub const IQR_OUTLIER_FACTOR: f32 = 1.5;

/// Below this number of cores, parallel kernels run their sequential path
/// instead of paying for a scoped thread pool.
pub const MIN_CORES_FOR_PARALLEL: usize = 2;
