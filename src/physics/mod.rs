// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Absorption, sound velocity, and the range helpers that sit between a
//! two-way travel time and a correction in dB.

use crate::constants::DEFAULT_PH;

/// Convert a temperature on the ITS-90 scale to the older ITS-68 scale, used
/// internally by the absorption model below.
pub fn its90_to_its68(t90: f32) -> f32 {
    t90 * 1.00024
}

/// Francois-Garrison (1982) absorption coefficient, in dB/m.
///
/// `frequency_hz` is converted to kHz internally; `temperature_c` is ITS-90
/// and converted to ITS-68 before use, matching the reference formula.
pub fn absorption_coefficient_db_per_m(
    frequency_hz: f32,
    depth_m: f32,
    sound_velocity_m_s: f32,
    temperature_c: f32,
    salinity_psu: f32,
    ph: f32,
) -> f32 {
    let frequency_khz = frequency_hz / 1000.0;
    let temperature = its90_to_its68(temperature_c);

    let temperature2 = temperature * temperature;
    let temperature3 = temperature2 * temperature;
    let depth2 = depth_m * depth_m;
    let frequency2 = frequency_khz * frequency_khz;

    let a1 = 8.86 * 10f32.powf(0.78 * ph - 5.0) / sound_velocity_m_s;
    let a2 = 21.44 * salinity_psu * (1.0 + 0.025 * temperature) / sound_velocity_m_s;
    let a3 = if temperature <= 20.0 {
        0.0004937 - 0.0000259 * temperature + 0.000000911 * temperature2 - 0.000000015 * temperature3
    } else {
        0.0003964 - 0.00001146 * temperature + 0.000000145 * temperature2
            - 0.00000000065 * temperature3
    };

    let f1 = 2.8 * (salinity_psu / 35.0).sqrt() * 10f32.powf(4.0 - (1245.0 / (temperature + 273.0)));

    let mut f2 = 8.17 * 10f32.powf(8.0 - (1990.0 / (temperature + 273.0)));
    f2 /= 1.0 + 0.0018 * (salinity_psu - 35.0);

    let p2 = 1.0 - 0.000137 * depth_m + 0.0000000062 * depth2;
    let p3 = 1.0 - 0.0000383 * depth_m + 0.00000000049 * depth2;

    let mut absorption = 0.0;
    absorption += a1 * f1 / (f1 * f1 + frequency2);
    absorption += a2 * p2 * f2 / (f2 * f2 + frequency2);
    absorption += a3 * p3;
    absorption *= frequency2;

    // dB/km to dB/m
    absorption / 1000.0
}

/// [`absorption_coefficient_db_per_m`] with the default pH of 8.
pub fn absorption_coefficient_db_per_m_default_ph(
    frequency_hz: f32,
    depth_m: f32,
    sound_velocity_m_s: f32,
    temperature_c: f32,
    salinity_psu: f32,
) -> f32 {
    absorption_coefficient_db_per_m(
        frequency_hz,
        depth_m,
        sound_velocity_m_s,
        temperature_c,
        salinity_psu,
        DEFAULT_PH,
    )
}

/// Source of sound velocity in seawater, given in-situ conditions. The real
/// TEOS-10 equation of state (`gsw_sound_speed`) is an external collaborator
/// (see [`crate`] docs); this trait lets a caller plug it in without this
/// crate re-deriving it.
pub trait SoundVelocityModel {
    fn sound_velocity(&self, depth_m: f32, temperature_c: f32, salinity_psu: f32) -> f32;
}

/// Chen & Millero (1977) / UNESCO sound-speed polynomial. A reference
/// implementation usable when no TEOS-10 binding is available; it is
/// *not* TEOS-10 and will diverge from it at the margins (high pressure,
/// low salinity). Depth is treated as a proxy for pressure in decibars.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChenMillero77;

impl SoundVelocityModel for ChenMillero77 {
    fn sound_velocity(&self, depth_m: f32, temperature_c: f32, salinity_psu: f32) -> f32 {
        let t = temperature_c;
        let s = salinity_psu;
        let p = depth_m / 10.0; // crude dbar proxy

        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        let p2 = p * p;
        let p3 = p2 * p;

        let cw = 1402.388
            + 5.03830 * t
            - 5.81090e-2 * t2
            + 3.3432e-4 * t3
            - 1.47797e-6 * t4
            + 3.1419e-9 * t4 * t
            + (0.153563 + 6.8999e-4 * t - 8.1829e-6 * t2 + 1.3632e-7 * t3 - 6.1260e-10 * t4) * p
            + (3.1260e-5 - 1.7111e-6 * t + 2.5986e-8 * t2 - 2.5353e-10 * t3 + 1.0415e-12 * t4)
                * p2
            + (-9.7729e-9 + 3.8513e-10 * t - 2.3654e-12 * t2) * p3;

        let a = (1.389 - 1.262e-2 * t + 7.166e-5 * t2 + 2.008e-6 * t3 - 3.21e-8 * t4)
            + (9.4742e-5 - 1.2583e-5 * t - 6.4928e-8 * t2 + 1.0515e-8 * t3 - 2.0142e-10 * t4) * p
            + (-3.9064e-7 + 9.1041e-9 * t - 1.6002e-10 * t2 + 7.988e-12 * t3) * p2
            + (1.100e-10 + 6.649e-12 * t - 3.389e-13 * t2 + 6.48e-15 * t3) * p3;

        let b = -1.922e-2 - 4.42e-5 * t + (7.3637e-5 + 1.7950e-7 * t) * p;
        let d = 1.727e-3 - 7.9836e-6 * p;

        cw + a * s + b * s.max(0.0).sqrt() * s + d * s * s
    }
}

/// `range_factor = dt * c / 2`: converts a two-way travel time step into a
/// one-way range step.
pub fn range_factor(dt: f32, sound_velocity_m_s: f32) -> f32 {
    dt * sound_velocity_m_s / 2.0
}

/// `ranges = (sample_numbers + 0.5) * range_factor`.
pub fn ranges(sample_numbers: &[f32], range_factor: f32) -> Vec<f32> {
    sample_numbers.iter().map(|s| (s + 0.5) * range_factor).collect()
}

/// `2 * alpha * r + tvg * log10(r)`. A zero or non-finite `alpha`/`tvg` drops
/// that term from the sum; if both drop out the result is zero.
pub fn cw_range_correction(r: f32, alpha_db_per_m: f32, tvg: f32) -> f32 {
    let mut correction = 0.0;
    if alpha_db_per_m.is_finite() && alpha_db_per_m != 0.0 {
        correction += 2.0 * alpha_db_per_m * r;
    }
    if tvg.is_finite() && tvg != 0.0 {
        correction += tvg * r.log10();
    }
    correction
}

/// A UTM-to-geographic projector: `(utm_zone, northern_hemisphere, northing,
/// easting) -> (lat, lon)`. Truly external; this crate never bundles a
/// concrete implementation.
pub trait GeoProjector {
    fn reverse(&self, utm_zone: u8, northern_hemisphere: bool, northing: f64, easting: f64) -> (f64, f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn its90_to_its68_known_values() {
        assert_relative_eq!(its90_to_its68(1.0), 1.00024, epsilon = 1e-6);
        assert_relative_eq!(its90_to_its68(10.0), 10.0024, epsilon = 1e-5);
        assert_relative_eq!(its90_to_its68(-100.0), -100.024, epsilon = 1e-4);
    }

    #[test]
    fn s7_absorption_low_frequency() {
        let a = absorption_coefficient_db_per_m(1000.0, 0.0, 1500.0, 10.0, 35.0, 8.0);
        assert_relative_eq!(a, 0.0000595565729641, max_relative = 1e-3);
    }

    #[test]
    fn s7_absorption_high_frequency() {
        let a = absorption_coefficient_db_per_m(1_000_000.0, 100.0, 1500.0, 4.0, 35.0, 8.0);
        assert_relative_eq!(a, 0.43118748483875202, max_relative = 1e-3);
    }

    #[test]
    fn absorption_default_ph_matches_explicit_eight() {
        let a = absorption_coefficient_db_per_m_default_ph(10_000.0, 100.0, 1500.0, 3.0, 35.0);
        let b = absorption_coefficient_db_per_m(10_000.0, 100.0, 1500.0, 3.0, 35.0, 8.0);
        assert_relative_eq!(a, b);
    }

    #[test]
    fn cw_range_correction_drops_zero_terms() {
        assert_eq!(cw_range_correction(100.0, 0.0, 0.0), 0.0);
        let only_tvg = cw_range_correction(100.0, 0.0, 20.0);
        assert_relative_eq!(only_tvg, 20.0 * 100f32.log10());
    }

    #[test]
    fn ranges_matches_formula() {
        let rf = range_factor(0.0001, 1500.0);
        let r = ranges(&[0.0, 1.0], rf);
        assert_relative_eq!(r[0], 0.5 * rf);
        assert_relative_eq!(r[1], 1.5 * rf);
    }

    #[test]
    fn chen_millero_reasonable_at_surface_fresh() {
        let c = ChenMillero77.sound_velocity(0.0, 0.0, 0.0);
        assert!((1400.0..1410.0).contains(&c));
    }
}
