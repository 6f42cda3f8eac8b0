// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for every fallible operation in this crate. This should be the
//! *only* error enum that is publicly visible.

use thiserror::Error;

/// The *only* publicly visible error from this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Two (or more) array arguments must share a shape but don't.
    #[error("shape mismatch: expected {expected:?}, got {actual:?} ({context})")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: &'static str,
    },

    /// Two (or more) 1-D arguments must share a length but don't.
    #[error("length mismatch: expected {expected}, got {actual} ({context})")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        context: &'static str,
    },

    /// An operation was given a zero-length input where at least one element
    /// is required.
    #[error("empty input where at least one element was required ({context})")]
    EmptyInput { context: &'static str },

    /// An argument's value is outside the range the operation accepts.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A code path exists only to mirror an upstream interface and is not
    /// implemented by this crate.
    #[error("unsupported: {message}")]
    Unsupported { message: String },
}

/// A convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape(context: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            context,
        }
    }

    pub(crate) fn length(context: &'static str, expected: usize, actual: usize) -> Self {
        Error::LengthMismatch {
            expected,
            actual,
            context,
        }
    }
}
