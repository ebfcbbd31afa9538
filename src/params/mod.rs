// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that control how the array model is built.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

use indexmap::IndexMap;

use crate::{
    constants::{DEFAULT_STREAM, DIPOLE_SEPARATION_M},
    delays::{DelayPolicy, Polarisation},
    view::{default_key_map, ViewState},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// The distance between neighbouring dipoles \[metres\]. Must be positive.
    pub dipole_separation: f64,

    pub delay_policy: DelayPolicy,

    /// Steering vectors are only made for these polarisations.
    pub steering_polarisations: Vec<Polarisation>,

    /// The key of the observation's RF stream to take pointing and bad
    /// dipoles from.
    pub stream: String,

    /// The view that a [`crate::Session`] first puts the tiles and the ground
    /// in.
    pub initial_view: ViewState,

    pub key_map: IndexMap<char, ViewState>,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams {
            dipole_separation: DIPOLE_SEPARATION_M,
            delay_policy: DelayPolicy::default(),
            steering_polarisations: vec![Polarisation::X],
            stream: DEFAULT_STREAM.to_string(),
            initial_view: ViewState::None,
            key_map: default_key_map(),
        }
    }
}
