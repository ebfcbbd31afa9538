// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print neatly-formatted information on which dipoles of each tile are bad.

use clap::Parser;
use log::info;

use super::{common::ArrayArgs, TileviewError};
use crate::delays::Polarisation;

/// Print which dipoles of each tile are bad.
#[derive(Parser, Debug)]
pub(super) struct DipolesArgs {
    #[clap(flatten)]
    array_args: ArrayArgs,
}

impl DipolesArgs {
    pub(super) fn run(self, dry_run: bool) -> Result<(), TileviewError> {
        let (array, _) = self.array_args.parse()?;
        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let (all_good, others): (Vec<_>, Vec<_>) = array.tiles().partition(|t| {
            t.bad_dipoles(Polarisation::X).is_empty() && t.bad_dipoles(Polarisation::Y).is_empty()
        });

        if others.is_empty() {
            info!("All dipoles on all tiles are good!");
            return Ok(());
        }

        info!("Tiles with all dipoles good ({}):", all_good.len());
        for tile in all_good {
            info!("    {:>4}: {:>8}", tile.id, tile.name);
        }
        info!("Other tiles:");
        let mut bad_string = String::new();
        for tile in others {
            let bad_x = tile.bad_dipoles(Polarisation::X);
            let bad_y = tile.bad_dipoles(Polarisation::Y);
            bad_string.push_str(&format!("    {:>4}: {:>8}: ", tile.id, tile.name));
            if !bad_x.is_empty() {
                bad_string.push_str(&format!("X {:?}", &bad_x));
            }
            if !bad_x.is_empty() && !bad_y.is_empty() {
                bad_string.push_str(", ");
            }
            if !bad_y.is_empty() {
                bad_string.push_str(&format!("Y {:?}", &bad_y));
            }
            if tile.fault {
                bad_string.push_str(" (faulty tile)");
            }
            info!("{}", bad_string);
            bad_string.clear();
        }

        Ok(())
    }
}
