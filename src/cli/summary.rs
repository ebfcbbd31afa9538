// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print high-level information on an array.

use clap::Parser;
use itertools::Itertools;
use log::info;

use super::{
    common::{ArrayArgs, InfoPrinter},
    TileviewError,
};
use crate::delays::Polarisation;

/// Print a summary of the array built from an observation and a
/// configuration: its tiles, faults, pointing and delays.
#[derive(Parser, Debug)]
pub(super) struct SummaryArgs {
    #[clap(flatten)]
    array_args: ArrayArgs,
}

impl SummaryArgs {
    pub(super) fn run(self, dry_run: bool) -> Result<(), TileviewError> {
        let (array, _) = self.array_args.parse()?;
        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let mut printer = InfoPrinter::new("Summary".into());
        printer.push_line(format!("Tiles: {}", array.num_tiles()).into());

        let faulty = array.faulty_tiles().map(|t| t.id).collect::<Vec<_>>();
        if faulty.is_empty() {
            printer.push_line("No faulty tiles".into());
        } else {
            printer.push_line(
                format!("Faulty tiles ({}): {}", faulty.len(), faulty.iter().join(", ")).into(),
            );
        }

        let (num_bad_x, num_bad_y) = array.tiles().fold((0, 0), |(x, y), t| {
            (
                x + t.bad_dipoles(Polarisation::X).len(),
                y + t.bad_dipoles(Polarisation::Y).len(),
            )
        });
        printer.push_line(format!("Bad dipoles: {num_bad_x} X, {num_bad_y} Y").into());

        match array.ideal_delays() {
            Some(delays) => printer.push_line(
                format!("Ideal delays: [{}]", delays.iter().join(", ")).into(),
            ),
            None => printer.push_line("Ideal delays: <no delays>".into()),
        }

        let num_vectors: usize = array.tiles().map(|t| t.steering_vectors().count()).sum();
        printer.push_line(format!("Steering vectors: {num_vectors}").into());
        printer.display();

        Ok(())
    }
}
