// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from building an array model.

use thiserror::Error;

use crate::tile::TileError;

#[derive(Error, Debug)]
pub enum ArrayModelError {
    #[error("Configuration tile ID '{0}' isn't a non-negative integer")]
    InvalidTileId(String),

    #[error("Tile ID {id} appears more than once in the configuration (as '{first}' and '{second}')")]
    DuplicateTile {
        id: u32,
        first: String,
        second: String,
    },

    #[error("Delays for tile {id} should be [x_delays, y_delays], but {num} arrays were given")]
    MalformedDelays { id: u32, num: usize },

    #[error("The dipole separation must be positive, but got {0}")]
    BadDipoleSeparation(f64),

    #[error("Couldn't build tile {id} ({name}): {err}")]
    Tile {
        id: u32,
        name: String,
        err: TileError,
    },
}
