// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Amplitude correction kernels: per-beam, per-sample, system, and
//! absorption offsets applied to a water-column image, plus the SRSN
//! sidelobe correction in [`srsn`].

pub mod srsn;

use ndarray::{parallel::prelude::*, Array1, Array2, Axis};

use crate::error::{Error, Result};

fn check_beam_len(wci: &Array2<f32>, per_beam: &Array1<f32>) -> Result<()> {
    let b = wci.shape()[0];
    if per_beam.len() != b {
        return Err(Error::length("amplitude per_beam", b, per_beam.len()));
    }
    Ok(())
}

fn check_sample_len(wci: &Array2<f32>, per_sample: &Array1<f32>, context: &'static str) -> Result<()> {
    let s = wci.shape()[1];
    if per_sample.len() != s {
        return Err(Error::length(context, s, per_sample.len()));
    }
    Ok(())
}

fn beam_range_or_full(wci: &Array2<f32>, beam_range: Option<(usize, usize)>) -> (usize, usize) {
    beam_range.unwrap_or((0, wci.shape()[0]))
}

/// Run `addend(b, s)` over every `(beam, sample)` in `[min_beam, max_beam)`
/// and add it to `wci[b, s]` in place. Each beam's row is a disjoint slice,
/// so beams can run in parallel without synchronization.
fn inplace_with<F>(wci: &mut Array2<f32>, beam_range: (usize, usize), cores: usize, addend: F)
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    let (min_beam, max_beam) = beam_range;
    let n_samples = wci.shape()[1];
    crate::parallel::run(cores, || {
        wci.slice_mut(ndarray::s![min_beam..max_beam, ..])
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut row)| {
                let b = min_beam + i;
                for s in 0..n_samples {
                    row[s] += addend(b, s);
                }
            });
    });
}

macro_rules! apply_from_inplace {
    ($apply_fn:ident, $inplace_fn:ident $(, $arg:ident: $ty:ty)*) => {
        pub fn $apply_fn(wci: &Array2<f32>, $($arg: $ty),*, cores: usize) -> Result<Array2<f32>> {
            let mut out = wci.clone();
            $inplace_fn(&mut out, $($arg),*, None, cores)?;
            Ok(out)
        }
    };
}

pub fn inplace_beam_correction(
    wci: &mut Array2<f32>,
    per_beam: &Array1<f32>,
    beam_range: Option<(usize, usize)>,
    cores: usize,
) -> Result<()> {
    check_beam_len(wci, per_beam)?;
    let range = beam_range_or_full(wci, beam_range);
    inplace_with(wci, range, cores, |b, _s| per_beam[b]);
    Ok(())
}
apply_from_inplace!(apply_beam_correction, inplace_beam_correction, per_beam: &Array1<f32>);

pub fn inplace_sample_correction(
    wci: &mut Array2<f32>,
    per_sample: &Array1<f32>,
    beam_range: Option<(usize, usize)>,
    cores: usize,
) -> Result<()> {
    check_sample_len(wci, per_sample, "sample_correction per_sample")?;
    let range = beam_range_or_full(wci, beam_range);
    inplace_with(wci, range, cores, |_b, s| per_sample[s]);
    Ok(())
}
apply_from_inplace!(apply_sample_correction, inplace_sample_correction, per_sample: &Array1<f32>);

pub fn inplace_beam_sample_correction(
    wci: &mut Array2<f32>,
    per_beam: &Array1<f32>,
    per_sample: &Array1<f32>,
    beam_range: Option<(usize, usize)>,
    cores: usize,
) -> Result<()> {
    check_beam_len(wci, per_beam)?;
    check_sample_len(wci, per_sample, "beam_sample_correction per_sample")?;
    let range = beam_range_or_full(wci, beam_range);
    inplace_with(wci, range, cores, |b, s| per_beam[b] + per_sample[s]);
    Ok(())
}
apply_from_inplace!(
    apply_beam_sample_correction,
    inplace_beam_sample_correction,
    per_beam: &Array1<f32>,
    per_sample: &Array1<f32>
);

pub fn inplace_beam_sample_correction_with_absorption(
    wci: &mut Array2<f32>,
    per_beam: &Array1<f32>,
    per_sample: &Array1<f32>,
    absorption_db_m: &Array1<f32>,
    ranges_m: &Array1<f32>,
    beam_range: Option<(usize, usize)>,
    cores: usize,
) -> Result<()> {
    check_beam_len(wci, per_beam)?;
    check_beam_len(wci, absorption_db_m)?;
    check_sample_len(wci, per_sample, "beam_sample_correction_with_absorption per_sample")?;
    check_sample_len(wci, ranges_m, "beam_sample_correction_with_absorption ranges_m")?;
    let range = beam_range_or_full(wci, beam_range);
    inplace_with(wci, range, cores, |b, s| {
        per_beam[b] + per_sample[s] + 2.0 * absorption_db_m[b] * ranges_m[s]
    });
    Ok(())
}
apply_from_inplace!(
    apply_beam_sample_correction_with_absorption,
    inplace_beam_sample_correction_with_absorption,
    per_beam: &Array1<f32>,
    per_sample: &Array1<f32>,
    absorption_db_m: &Array1<f32>,
    ranges_m: &Array1<f32>
);

pub fn inplace_sample_correction_with_absorption(
    wci: &mut Array2<f32>,
    per_sample: &Array1<f32>,
    absorption_db_m: &Array1<f32>,
    ranges_m: &Array1<f32>,
    beam_range: Option<(usize, usize)>,
    cores: usize,
) -> Result<()> {
    check_beam_len(wci, absorption_db_m)?;
    check_sample_len(wci, per_sample, "sample_correction_with_absorption per_sample")?;
    check_sample_len(wci, ranges_m, "sample_correction_with_absorption ranges_m")?;
    let range = beam_range_or_full(wci, beam_range);
    inplace_with(wci, range, cores, |b, s| {
        per_sample[s] + 2.0 * absorption_db_m[b] * ranges_m[s]
    });
    Ok(())
}
apply_from_inplace!(
    apply_sample_correction_with_absorption,
    inplace_sample_correction_with_absorption,
    per_sample: &Array1<f32>,
    absorption_db_m: &Array1<f32>,
    ranges_m: &Array1<f32>
);

pub fn inplace_system_offset(
    wci: &mut Array2<f32>,
    offset: f32,
    beam_range: Option<(usize, usize)>,
    cores: usize,
) -> Result<()> {
    let range = beam_range_or_full(wci, beam_range);
    inplace_with(wci, range, cores, |_b, _s| offset);
    Ok(())
}

pub fn apply_system_offset(wci: &Array2<f32>, offset: f32, cores: usize) -> Result<Array2<f32>> {
    let mut out = wci.clone();
    inplace_system_offset(&mut out, offset, None, cores)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn beam_correction_adds_per_row() {
        let wci = Array2::<f32>::zeros((2, 3));
        let per_beam = array![1.0_f32, 10.0];
        let out = apply_beam_correction(&wci, &per_beam, 1).unwrap();
        assert_abs_diff_eq!(out[[0, 0]], 1.0);
        assert_abs_diff_eq!(out[[1, 2]], 10.0);
    }

    #[test]
    fn inplace_honours_beam_range() {
        let mut wci = Array2::<f32>::zeros((3, 2));
        let per_beam = array![1.0_f32, 1.0, 1.0];
        inplace_beam_correction(&mut wci, &per_beam, Some((1, 2)), 1).unwrap();
        assert_abs_diff_eq!(wci[[0, 0]], 0.0);
        assert_abs_diff_eq!(wci[[1, 0]], 1.0);
        assert_abs_diff_eq!(wci[[2, 0]], 0.0);
    }

    #[test]
    fn beam_sample_with_absorption_matches_formula() {
        let wci = Array2::<f32>::zeros((1, 1));
        let per_beam = array![1.0_f32];
        let per_sample = array![2.0_f32];
        let absorption = array![0.5_f32];
        let ranges = array![10.0_f32];
        let out = apply_beam_sample_correction_with_absorption(
            &wci, &per_beam, &per_sample, &absorption, &ranges, 1,
        )
        .unwrap();
        assert_abs_diff_eq!(out[[0, 0]], 1.0 + 2.0 + 2.0 * 0.5 * 10.0);
    }

    #[test]
    fn rejects_per_beam_length_mismatch() {
        let wci = Array2::<f32>::zeros((2, 3));
        let per_beam = array![1.0_f32];
        assert!(apply_beam_correction(&wci, &per_beam, 1).is_err());
    }

    #[test]
    fn determinism_across_core_counts() {
        let wci = Array2::<f32>::zeros((8, 4));
        let per_beam = Array1::from_iter((0..8).map(|i| i as f32));
        let reference = apply_beam_correction(&wci, &per_beam, 1).unwrap();
        for cores in [2, 4, 8] {
            let out = apply_beam_correction(&wci, &per_beam, cores).unwrap();
            assert_eq!(out, reference);
        }
    }
}
