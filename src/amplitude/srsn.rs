// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SRSN sidelobe correction: flattens a per-sample statistic (mean or
//! median, both NaN-aware) computed across beams to a caller-chosen
//! reference level.

use ndarray::{parallel::prelude::*, Array1, Array2, Axis};

use crate::error::{Error, Result};

/// NaN-aware mean of `wci[:, s]` for every sample `s`. A column that is all
/// NaN produces NaN.
pub fn nanmean_across_beams(wci: &Array2<f32>) -> Array1<f32> {
    let n_samples = wci.shape()[1];
    Array1::from_iter((0..n_samples).map(|s| nanmean(wci.column(s).iter().copied())))
}

/// NaN-aware median of `wci[:, s]` for every sample `s`, computed with an
/// `O(B)` average-case quickselect per sample, parallel over samples.
pub fn nanmedian_across_beams(wci: &Array2<f32>, cores: usize) -> Array1<f32> {
    let n_samples = wci.shape()[1];
    let mut out = Array1::<f32>::zeros(n_samples);
    crate::parallel::run(cores, || {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(s, mut cell)| {
                cell[()] = nanmedian(wci.column(s).iter().copied());
            });
    });
    out
}

/// NaN-aware mean of every finite value in `region`; typically a clean
/// water-column sub-region supplied by the caller.
pub fn reference_nanmean(region: &Array2<f32>) -> f32 {
    nanmean(region.iter().copied())
}

/// NaN-aware percentile (linear interpolation between the two bracketing
/// order statistics, matching numpy's default "linear" method) of every
/// finite value in `region`. `percentile` must be in `[0, 100]`.
pub fn reference_nanpercentile(region: &Array2<f32>, percentile: f32) -> Result<f32> {
    if !(0.0..=100.0).contains(&percentile) {
        return Err(Error::InvalidArgument {
            message: format!("percentile must be in [0, 100], got {percentile}"),
        });
    }
    let mut values: Vec<f32> = region.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return Ok(f32::NAN);
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    Ok(percentile_of_sorted(&values, percentile))
}

/// Apply the SRSN correction out of place: `corrected[b, s] = wci[b, s] +
/// (reference_level - per_sample_stat[s])`.
pub fn apply_sidelobe_correction(
    wci: &Array2<f32>,
    per_sample_stat: &Array1<f32>,
    reference_level: f32,
    cores: usize,
) -> Result<Array2<f32>> {
    let mut out = wci.clone();
    inplace_sidelobe_correction(&mut out, per_sample_stat, reference_level, cores)?;
    Ok(out)
}

/// [`apply_sidelobe_correction`], mutating `wci` in place.
pub fn inplace_sidelobe_correction(
    wci: &mut Array2<f32>,
    per_sample_stat: &Array1<f32>,
    reference_level: f32,
    cores: usize,
) -> Result<()> {
    let n_samples = wci.shape()[1];
    if per_sample_stat.len() != n_samples {
        return Err(Error::length(
            "inplace_sidelobe_correction per_sample_stat",
            n_samples,
            per_sample_stat.len(),
        ));
    }
    crate::parallel::run(cores, || {
        wci.axis_iter_mut(Axis(0)).into_par_iter().for_each(|mut row| {
            for s in 0..n_samples {
                row[s] += reference_level - per_sample_stat[s];
            }
        });
    });
    Ok(())
}

fn nanmean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0_f32, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f32::NAN
    } else {
        sum / count as f32
    }
}

fn nanmedian(values: impl Iterator<Item = f32>) -> f32 {
    let mut finite: Vec<f32> = values.filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return f32::NAN;
    }
    let n = finite.len();
    let mid = n / 2;
    if n % 2 == 1 {
        *finite.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap()).1
    } else {
        let upper = *finite
            .select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap())
            .1;
        let lower = finite[..mid]
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        (upper + lower) / 2.0
    }
}

/// `sorted` must be ascending and non-empty.
fn percentile_of_sorted(sorted: &[f32], percentile: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = percentile / 100.0 * (n - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
