// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with receiver cabling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CablingError {
    #[error("There is no pad named '{0}'")]
    UnknownPad(String),

    #[error("Pad '{pad}' has no input named '{input}'")]
    UnknownInput { pad: String, input: String },

    #[error("Pad '{pad}' input '{input}' refers to '{key}', which isn't a tile ID")]
    InvalidTileId {
        pad: String,
        input: String,
        key: String,
    },

    #[error("Pad '{pad}' input '{input}' is cabled to tile {tile_id}, but that tile isn't in the array")]
    UnknownTile {
        pad: String,
        input: String,
        tile_id: u32,
    },
}
