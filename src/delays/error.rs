// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with beamformer delays.

use thiserror::Error;

use super::Polarisation;
use crate::constants::{MAX_DELAY, NUM_DIPOLES};

#[derive(Error, Debug)]
pub enum DelayError {
    #[error("Expected {NUM_DIPOLES} {pol} delays, but got {got}")]
    BadLength { pol: Polarisation, got: usize },

    #[error("{pol} delay for dipole {dipole} is {delay}, but delays must be between 0 and {MAX_DELAY}")]
    OutOfRange {
        pol: Polarisation,
        dipole: usize,
        delay: i64,
    },
}
