// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::delays::DelayError;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] DelayError),
}
