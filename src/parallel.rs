// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Every kernel that can run data-parallel takes `cores: usize` as a plain
//! argument rather than relying on rayon's global pool, so results stay
//! identical whether or not a caller has configured rayon themselves.

use crate::constants::MIN_CORES_FOR_PARALLEL;

/// Run `f` inside a scoped rayon thread pool sized to `cores`, or straight
/// on the calling thread if `cores < MIN_CORES_FOR_PARALLEL`.
pub fn run<R: Send>(cores: usize, f: impl FnOnce() -> R + Send) -> R {
    if cores < MIN_CORES_FOR_PARALLEL {
        return f();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(cores).build() {
        Ok(pool) => pool.install(f),
        Err(err) => {
            log::debug!("falling back to sequential execution: {err}");
            f()
        }
    }
}
