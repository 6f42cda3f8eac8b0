// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tensors of launch/arrival directions, optionally carrying a range or a
//! two-way travel time alongside the two angles.

use ndarray::{Array, Dimension};

use crate::error::{Error, Result};

/// A tensor of along-track/cross-track angle pairs, in degrees.
///
/// `D` is the rank of the tensor: `Ix1` for a single beam's samples, `Ix2`
/// for a swath of beams, `Ix3` for a sequence of swaths (pings).
#[derive(Clone, Debug)]
pub struct SampleDirections<D: Dimension> {
    pub along_angle: Array<f32, D>,
    pub cross_angle: Array<f32, D>,
}

impl<D: Dimension> SampleDirections<D> {
    pub fn new(along_angle: Array<f32, D>, cross_angle: Array<f32, D>) -> Result<Self> {
        if along_angle.shape() != cross_angle.shape() {
            return Err(Error::shape(
                "SampleDirections::new",
                along_angle.shape(),
                cross_angle.shape(),
            ));
        }
        Ok(Self {
            along_angle,
            cross_angle,
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.along_angle.shape()
    }
}

/// A [`SampleDirections`] with a range (distance from the sensor) attached.
#[derive(Clone, Debug)]
pub struct SampleDirectionsRange<D: Dimension> {
    pub along_angle: Array<f32, D>,
    pub cross_angle: Array<f32, D>,
    pub range: Array<f32, D>,
}

impl<D: Dimension> SampleDirectionsRange<D> {
    pub fn new(
        along_angle: Array<f32, D>,
        cross_angle: Array<f32, D>,
        range: Array<f32, D>,
    ) -> Result<Self> {
        if along_angle.shape() != cross_angle.shape() || along_angle.shape() != range.shape() {
            return Err(Error::shape(
                "SampleDirectionsRange::new",
                along_angle.shape(),
                cross_angle.shape(),
            ));
        }
        Ok(Self {
            along_angle,
            cross_angle,
            range,
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.along_angle.shape()
    }
}

/// A [`SampleDirections`] with a two-way travel time attached, the form a
/// raytracer consumes directly.
#[derive(Clone, Debug)]
pub struct SampleDirectionsTime<D: Dimension> {
    pub along_angle: Array<f32, D>,
    pub cross_angle: Array<f32, D>,
    pub two_way_travel_time: Array<f32, D>,
}

impl<D: Dimension> SampleDirectionsTime<D> {
    pub fn new(
        along_angle: Array<f32, D>,
        cross_angle: Array<f32, D>,
        two_way_travel_time: Array<f32, D>,
    ) -> Result<Self> {
        if along_angle.shape() != cross_angle.shape()
            || along_angle.shape() != two_way_travel_time.shape()
        {
            return Err(Error::shape(
                "SampleDirectionsTime::new",
                along_angle.shape(),
                cross_angle.shape(),
            ));
        }
        Ok(Self {
            along_angle,
            cross_angle,
            two_way_travel_time,
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.along_angle.shape()
    }
}
