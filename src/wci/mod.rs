// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interpolated water-column-image (WCI) lookup: given an arrival angle and
//! range, find the backscatter sample that corresponds to them.
//!
//! The reference implementation caches the last-used interpolation segment
//! in mutable state, which makes concurrent lookups unsafe. Here the
//! interpolators are pure functions over pre-sorted slices, found by binary
//! search, so `lookup` is safe to call from any number of threads at once.

mod interpolator;

pub use interpolator::{LinearInterpolator, NearestInterpolator};

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::geo::SampleDirectionsRange;

/// A water-column image plus the per-beam geometry needed to turn an
/// `(angle, range)` query into a `wci[beam, sample]` lookup.
pub struct BacktracedWci {
    wci: Array2<f32>,
    beam_angle_lookup: NearestInterpolator,
    beam_range_interpolators: Vec<LinearInterpolator>,
    n_samples: usize,
}

impl BacktracedWci {
    /// `reference_beams` gives each reference beam's cross-track angle and
    /// range; `reference_sample_numbers[b]` is the sample index `wci[b, ..]`
    /// reaches at that range.
    pub fn new(
        wci: Array2<f32>,
        reference_beams: &SampleDirectionsRange<ndarray::Ix1>,
        reference_sample_numbers: &[usize],
    ) -> Result<Self> {
        let n_beams = reference_beams.shape()[0];
        if n_beams == 0 {
            return Err(Error::EmptyInput {
                context: "BacktracedWci::new reference_beams",
            });
        }
        if reference_sample_numbers.len() != n_beams {
            return Err(Error::length(
                "BacktracedWci::new reference_sample_numbers",
                n_beams,
                reference_sample_numbers.len(),
            ));
        }

        let max_ref_sample = reference_sample_numbers.iter().copied().max().unwrap_or(0);
        let (rows, cols) = wci.dim();
        if rows < n_beams || cols <= max_ref_sample {
            return Err(Error::shape(
                "BacktracedWci::new wci",
                &[n_beams, max_ref_sample + 1],
                &[rows, cols],
            ));
        }

        let mut order: Vec<usize> = (0..n_beams).collect();
        order.sort_by(|&a, &b| {
            reference_beams.cross_angle[a]
                .partial_cmp(&reference_beams.cross_angle[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let sorted_angles: Vec<f32> = order.iter().map(|&i| reference_beams.cross_angle[i]).collect();
        let beam_angle_lookup = NearestInterpolator::new(sorted_angles, order.clone());

        let mut beam_range_interpolators = Vec::with_capacity(n_beams);
        for b in 0..n_beams {
            let ref_range = reference_beams.range[b];
            let ref_sample = reference_sample_numbers[b] as f32;
            beam_range_interpolators.push(LinearInterpolator::new(
                vec![0.0, ref_range],
                vec![0.0, ref_sample],
            ));
        }

        Ok(Self {
            wci,
            beam_angle_lookup,
            beam_range_interpolators,
            n_samples: cols,
        })
    }

    /// Look up the backscatter sample nearest an `(angle, range)` query.
    /// Returns `NaN` for any query that falls outside the beam fan, behind
    /// the sensor, or past the last recorded sample.
    pub fn lookup(&self, angle: f32, range: f32) -> f32 {
        let beam = match self.beam_angle_lookup.lookup(angle) {
            Some(beam) => beam,
            None => {
                log::trace!("wci lookup: angle {angle} outside the beam fan, returning NaN");
                return f32::NAN;
            }
        };
        let s = self.beam_range_interpolators[beam].lookup(range).round();
        if !(0.0..self.n_samples as f32).contains(&s) {
            log::trace!("wci lookup: range {range} resolves to out-of-range sample {s} on beam {beam}, returning NaN");
            return f32::NAN;
        }
        self.wci[[beam, s as usize]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn fixture() -> BacktracedWci {
        let wci = Array2::from_shape_fn((3, 10), |(b, s)| (b * 10 + s) as f32);
        let beams = SampleDirectionsRange::new(
            array![0.0_f32, 0.0, 0.0],
            array![-10.0_f32, 0.0, 10.0],
            array![5.0_f32, 5.0, 5.0],
        )
        .unwrap();
        BacktracedWci::new(wci, &beams, &[9, 9, 9]).unwrap()
    }

    #[test]
    fn lookup_at_known_sample() {
        let wci = fixture();
        let v = wci.lookup(0.0, 0.0);
        assert_eq!(v, 10.0);
    }

    #[test]
    fn lookup_outside_angle_range_is_nan() {
        let wci = fixture();
        assert!(wci.lookup(90.0, 2.0).is_nan());
    }

    #[test]
    fn lookup_past_last_sample_is_nan() {
        let wci = fixture();
        assert!(wci.lookup(0.0, 100.0).is_nan());
    }

    #[test]
    fn rejects_shape_mismatch() {
        let wci = Array2::<f32>::zeros((2, 3));
        let beams = SampleDirectionsRange::new(array![0.0_f32, 0.0], array![-1.0_f32, 1.0], array![5.0_f32, 5.0]).unwrap();
        assert!(BacktracedWci::new(wci, &beams, &[4, 4]).is_err());
    }
}
