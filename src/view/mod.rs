// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Which representation of the array is currently "active".
//!
//! Every tile and the ground are always in exactly one [`ViewState`]. View
//! changes are broadcast to all of them at once; every state accepts every
//! transition, and applying the current state again changes nothing.


use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::array::ArrayModel;

lazy_static::lazy_static! {
    pub static ref VIEW_STATES_COMMA_SEPARATED: String = ViewState::iter().join(", ");
}

/// The representations available for tiles and the ground.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    /// Nothing is visible.
    #[default]
    None,

    /// Ground plates and plain dipole markers.
    Simple,

    /// Ground plates, beamformers, detailed dipoles and steering vectors.
    Complex,
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Key '{key}' isn't bound to a view; bound keys are: {bound}")]
    UnboundKey { key: char, bound: String },
}

/// The default key bindings: 'c' for the complex view, 's' for the simple
/// view and 'n' to hide everything.
pub fn default_key_map() -> IndexMap<char, ViewState> {
    IndexMap::from([
        ('c', ViewState::Complex),
        ('s', ViewState::Simple),
        ('n', ViewState::None),
    ])
}

/// Turns key presses into view changes for a whole [`ArrayModel`].
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    key_map: IndexMap<char, ViewState>,
    state: ViewState,
}

impl Default for ViewStateMachine {
    fn default() -> Self {
        ViewStateMachine::new(default_key_map())
    }
}

impl ViewStateMachine {
    pub fn new(key_map: IndexMap<char, ViewState>) -> ViewStateMachine {
        ViewStateMachine {
            key_map,
            state: ViewState::None,
        }
    }

    /// The last state that was broadcast.
    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn key_map(&self) -> &IndexMap<char, ViewState> {
        &self.key_map
    }

    /// Look up the state bound to `key`.
    pub fn state_for_key(&self, key: char) -> Result<ViewState, ViewError> {
        self.key_map
            .get(&key)
            .copied()
            .ok_or_else(|| ViewError::UnboundKey {
                key,
                bound: self.key_map.keys().join(", "),
            })
    }

    /// Handle a key press by broadcasting its view to every tile and the
    /// ground. On error, nothing changes.
    pub fn on_view_key(&mut self, key: char, array: &mut ArrayModel) -> Result<ViewState, ViewError> {
        let state = self.state_for_key(key)?;
        self.transition(state, array);
        Ok(state)
    }

    /// Broadcast `state` to every tile and the ground.
    pub fn transition(&mut self, state: ViewState, array: &mut ArrayModel) {
        if state == self.state {
            debug!("View is already {state}; reapplying");
        } else {
            debug!("Changing view from {} to {state}", self.state);
        }
        array.set_view_state(state);
        self.state = state;
    }
}
