// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print or write out the cables between receiver pads and tiles.

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use indexmap::IndexMap;
use log::info;
use serde::Serialize;

use super::{common::ArrayArgs, TileviewError};
use crate::{
    cabling::{CableEdge, CablingGraph, RosterDoc},
    coord::ENH,
    geometry::Colour,
    io::{read_document, write_document},
    session::{Event, Session},
};

/// List the trunk and cable edges of every receiver pad in a cabling roster.
#[derive(Parser, Debug)]
pub(super) struct CablingArgs {
    #[clap(flatten)]
    array_args: ArrayArgs,

    /// Path to the cabling roster (json or yaml).
    #[clap(name = "ROSTER", parse(from_os_str))]
    roster: PathBuf,

    /// Emphasise the cables of this pad.
    #[clap(long)]
    pad: Option<String>,

    /// Only emphasise this input of the pad. Requires --pad.
    #[clap(long, requires = "pad")]
    input: Option<String>,

    /// The colour of emphasised cables; a name (e.g. "yellow") or "r,g,b".
    #[clap(long, default_value = "yellow")]
    colour: String,

    /// Fix the emphasis of the cables.
    #[clap(long)]
    fixed: bool,

    /// The file to write the cables to (json or yaml).
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PadDoc<'a> {
    enabled: bool,
    label_position: ENH,
    trunk: CableEdge,
    inputs: &'a IndexMap<String, Vec<CableEdge>>,
}

impl CablingArgs {
    pub(super) fn run(self, dry_run: bool) -> Result<(), TileviewError> {
        let CablingArgs {
            array_args,
            roster,
            pad,
            input,
            colour,
            fixed,
            output,
        } = self;
        let colour = Colour::from_str(&colour)?;
        let (array, params) = array_args.parse()?;
        let roster: RosterDoc = read_document(&roster)?;
        let graph = CablingGraph::new(&roster, &array)?;
        info!("{} pads in the cabling roster", graph.pads().len());

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let mut session = Session::new(array, Some(graph), &params);
        if let Some(pad) = pad {
            // Asking for a pad that doesn't exist is an error here, not just a
            // warning.
            session.dispatch(&Event::CableUpdate {
                pad,
                input,
                colour,
                fixed,
            })?;
        }
        let graph = match session.cabling() {
            Some(g) => g,
            None => return Ok(()),
        };

        let mut doc = IndexMap::with_capacity(graph.pads().len());
        for pad in graph.pads() {
            let trunk = graph.trunk(&pad.name)?;
            let inputs = match graph.edges(&pad.name) {
                Some(i) => i,
                None => continue,
            };
            info!(
                "{}{}: trunk {:.1} m",
                pad.name,
                if pad.enabled { "" } else { " (disabled)" },
                trunk.axis().length()
            );
            for (input, edges) in inputs {
                for edge in edges {
                    info!(
                        "    {input} -> ({:.1}, {:.1}) {:?}",
                        edge.to.e, edge.to.n, edge.emphasis
                    );
                }
            }
            doc.insert(
                pad.name.as_str(),
                PadDoc {
                    enabled: pad.enabled,
                    label_position: pad.label_position(),
                    trunk,
                    inputs,
                },
            );
        }

        if let Some(output) = output {
            write_document(&doc, &output)?;
            info!("Wrote {}", output.display());
        }

        Ok(())
    }
}
