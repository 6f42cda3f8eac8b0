// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Transmit-signal parameter types. These are data-only: a tagged union plus
//! pure projections, with no operations attached.

/// The kind of transmit signal a pulse used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxSignalType {
    Cw,
    FmUpSweep,
    FmDownSweep,
    Unknown,
}

/// A continuous-wave pulse: constant frequency for its whole duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CwSignalParameters {
    pub center_frequency: f32,
    pub bandwidth: f32,
    pub effective_pulse_duration: f32,
}

impl CwSignalParameters {
    pub fn new(center_frequency: f32, bandwidth: f32, effective_pulse_duration: f32) -> Self {
        Self {
            center_frequency,
            bandwidth,
            effective_pulse_duration,
        }
    }

    pub fn get_tx_signal_type(&self) -> TxSignalType {
        TxSignalType::Cw
    }
}

/// A frequency-modulated (chirp) pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FmSignalParameters {
    pub center_frequency: f32,
    pub bandwidth: f32,
    pub effective_pulse_duration: f32,
    pub up_sweep: bool,
}

impl FmSignalParameters {
    pub fn new(center_frequency: f32, bandwidth: f32, effective_pulse_duration: f32, up_sweep: bool) -> Self {
        Self {
            center_frequency,
            bandwidth,
            effective_pulse_duration,
            up_sweep,
        }
    }

    pub fn get_tx_signal_type(&self) -> TxSignalType {
        if self.up_sweep {
            TxSignalType::FmUpSweep
        } else {
            TxSignalType::FmDownSweep
        }
    }
}

/// A signal whose type is caller-supplied rather than derived from shape
/// (`up_sweep`, etc.) — used when the source format only records the
/// enum tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenericSignalParameters {
    pub center_frequency: f32,
    pub bandwidth: f32,
    pub effective_pulse_duration: f32,
    pub signal_type: TxSignalType,
}

impl GenericSignalParameters {
    pub fn new(
        center_frequency: f32,
        bandwidth: f32,
        effective_pulse_duration: f32,
        signal_type: TxSignalType,
    ) -> Self {
        Self {
            center_frequency,
            bandwidth,
            effective_pulse_duration,
            signal_type,
        }
    }

    pub fn get_tx_signal_type(&self) -> TxSignalType {
        self.signal_type
    }
}

/// The tagged union of every signal-parameter variant this crate knows
/// about, for call sites that need to hold "whichever kind this ping used".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TxSignalParameters {
    Cw(CwSignalParameters),
    Fm(FmSignalParameters),
    Generic(GenericSignalParameters),
}

impl TxSignalParameters {
    pub fn get_tx_signal_type(&self) -> TxSignalType {
        match self {
            TxSignalParameters::Cw(p) => p.get_tx_signal_type(),
            TxSignalParameters::Fm(p) => p.get_tx_signal_type(),
            TxSignalParameters::Generic(p) => p.get_tx_signal_type(),
        }
    }

    pub fn center_frequency(&self) -> f32 {
        match self {
            TxSignalParameters::Cw(p) => p.center_frequency,
            TxSignalParameters::Fm(p) => p.center_frequency,
            TxSignalParameters::Generic(p) => p.center_frequency,
        }
    }

    pub fn bandwidth(&self) -> f32 {
        match self {
            TxSignalParameters::Cw(p) => p.bandwidth,
            TxSignalParameters::Fm(p) => p.bandwidth,
            TxSignalParameters::Generic(p) => p.bandwidth,
        }
    }

    pub fn effective_pulse_duration(&self) -> f32 {
        match self {
            TxSignalParameters::Cw(p) => p.effective_pulse_duration,
            TxSignalParameters::Fm(p) => p.effective_pulse_duration,
            TxSignalParameters::Generic(p) => p.effective_pulse_duration,
        }
    }
}
