// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The layout of the dipoles on an MWA tile.
//!
//! Dipoles are numbered row by row, starting in the north-west corner and
//! working east, then south:
//!
//! ```text
//!      N
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```

use crate::constants::{DIPOLES_PER_SIDE, NUM_DIPOLES};

/// Get the (east, north) offsets of each dipole from the centre of its tile
/// \[metres\]. `separation` is the distance between neighbouring dipoles and
/// should be positive.
pub fn dipole_offsets(separation: f64) -> [(f64, f64); NUM_DIPOLES] {
    let half_span = (DIPOLES_PER_SIDE - 1) as f64 / 2.0;
    let mut offsets = [(0.0, 0.0); NUM_DIPOLES];
    for (i, offset) in offsets.iter_mut().enumerate() {
        let col = (i % DIPOLES_PER_SIDE) as f64;
        let row = (i / DIPOLES_PER_SIDE) as f64;
        *offset = ((col - half_span) * separation, (half_span - row) * separation);
    }
    offsets
}
