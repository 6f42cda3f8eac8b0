// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-swath, per-beam bookkeeping: launch angles, sample timing, and the
//! (beam, sample) index pairs that other components key their lookups by.

use ndarray::{Array, Array1, Dimension};

use crate::error::{Error, Result};

/// One swath's worth of per-beam geometry and sample timing.
#[derive(Clone, Debug)]
pub struct BeamSampleParameters {
    pub along_angle: Array1<f32>,
    pub cross_angle: Array1<f32>,
    /// Two-way travel time of the first sample, per beam, in seconds.
    pub first_sample_offset: Array1<f32>,
    /// Two-way travel time between consecutive samples, per beam, in
    /// seconds.
    pub sample_interval: Array1<f32>,
    pub number_of_samples: Array1<u32>,
}

impl BeamSampleParameters {
    pub fn new(
        along_angle: Array1<f32>,
        cross_angle: Array1<f32>,
        first_sample_offset: Array1<f32>,
        sample_interval: Array1<f32>,
        number_of_samples: Array1<u32>,
    ) -> Result<Self> {
        let n = along_angle.len();
        for (name, len) in [
            ("cross_angle", cross_angle.len()),
            ("first_sample_offset", first_sample_offset.len()),
            ("sample_interval", sample_interval.len()),
            ("number_of_samples", number_of_samples.len()),
        ] {
            if len != n {
                return Err(Error::length(name, n, len));
            }
        }
        Ok(Self {
            along_angle,
            cross_angle,
            first_sample_offset,
            sample_interval,
            number_of_samples,
        })
    }

    pub fn n_beams(&self) -> usize {
        self.along_angle.len()
    }

    /// The two-way travel time of every sample in `beam`, i.e.
    /// `first_sample_offset + i * sample_interval` for `i` in
    /// `0..number_of_samples`.
    pub fn two_way_travel_times(&self, beam: usize) -> Result<Array1<f32>> {
        if beam >= self.n_beams() {
            return Err(Error::InvalidArgument {
                message: format!(
                    "beam index {beam} out of range for {} beams",
                    self.n_beams()
                ),
            });
        }
        let t0 = self.first_sample_offset[beam];
        let dt = self.sample_interval[beam];
        let n = self.number_of_samples[beam];
        Ok(Array1::from_iter((0..n).map(|i| t0 + i as f32 * dt)))
    }
}

/// A tensor of (beam, sample) index pairs, used to key lookups into a
/// `BacktracedWci` or a grid.
#[derive(Clone, Debug)]
pub struct SampleIndices<D: Dimension> {
    pub beam_numbers: Array<u16, D>,
    pub sample_numbers: Array<u16, D>,
}

impl<D: Dimension> SampleIndices<D> {
    pub fn new(beam_numbers: Array<u16, D>, sample_numbers: Array<u16, D>) -> Result<Self> {
        if beam_numbers.shape() != sample_numbers.shape() {
            return Err(Error::shape(
                "SampleIndices::new",
                beam_numbers.shape(),
                sample_numbers.shape(),
            ));
        }
        Ok(Self {
            beam_numbers,
            sample_numbers,
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.beam_numbers.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn rejects_length_mismatch() {
        let along = array![1.0_f32, 2.0];
        let cross = array![1.0_f32, 2.0];
        let offset = array![0.0_f32, 0.0];
        let interval = array![0.1_f32];
        let n = array![10_u32, 10];
        assert!(BeamSampleParameters::new(along, cross, offset, interval, n).is_err());
    }

    #[test]
    fn two_way_travel_times_are_evenly_spaced() {
        let bsp = BeamSampleParameters::new(
            array![0.0_f32],
            array![0.0_f32],
            array![1.0_f32],
            array![0.5_f32],
            array![3_u32],
        )
        .unwrap();
        let times = bsp.two_way_travel_times(0).unwrap();
        assert_abs_diff_eq!(times[0], 1.0);
        assert_abs_diff_eq!(times[1], 1.5);
        assert_abs_diff_eq!(times[2], 2.0);
    }
}
