// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Which receiver pads are cabled to which tiles.

A [`Pad`] terminates one or more named inputs, and each input is cabled to one
or more tiles. The [`CablingGraph`] owns the pads and the cable edges derived
from them; edges are recomputed whenever a pad's cable state changes.
 */

mod error;

pub use error::CablingError;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use crate::{
    array::{ArrayModel, TileKey},
    constants::{DEFAULT_CABLE_WIDTH, EMPHASISED_CABLE_WIDTH},
    coord::ENH,
    geometry::Colour,
};

/// A document listing the receiver pads and what they are cabled to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterDoc {
    pub pads: IndexMap<String, PadConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PadConfig {
    /// \[east, north\] \[metres\]
    pub pos: [f64; 2],

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Input names and the tiles cabled to each of them.
    #[serde(default)]
    pub inputs: IndexMap<String, Vec1<TileKey>>,
}

fn enabled_by_default() -> bool {
    true
}

/// The far end of a cable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileEndpoint {
    pub tile_id: u32,
    pub position: ENH,
}

/// A physical receiver bay.
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub name: String,
    pub position: ENH,
    pub enabled: bool,
    pub inputs: IndexMap<String, Vec1<TileEndpoint>>,
}

impl Pad {
    /// The colour of this pad's cables when nothing is emphasised.
    pub fn default_colour(&self) -> Colour {
        if self.enabled {
            Colour::WHITE
        } else {
            Colour::grey(0.5)
        }
    }

    /// Where this pad's name label goes. Even-numbered pads are labelled to
    /// the east and odd-numbered ones to the west; "a" pads are labelled to
    /// the south and the rest to the north. Labels float 10 m up.
    pub fn label_position(&self) -> ENH {
        let digits: String = self.name.chars().filter(|c| c.is_ascii_digit()).collect();
        let num: u64 = digits.parse().unwrap_or(0);
        let east_offset = if num % 2 == 0 { 12.0 } else { -12.0 };
        let north_offset = if self.name.ends_with('a') { -8.0 } else { 8.0 };
        self.position + ENH::new(east_offset, north_offset, 10.0)
    }
}

/// How a cable is currently emphasised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Default,

    /// Emphasised until something else is selected.
    Highlighted,

    /// Emphasised for every input of a pad at once. Resetting the pad without
    /// `fixed` clears it.
    Fixed,
}

/// A directed cable from a pad to a tile (or from the origin to a pad, for a
/// trunk).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableEdge {
    pub from: ENH,
    pub to: ENH,
    pub colour: Colour,
    pub width: f64,
    pub emphasis: Emphasis,
}

impl CableEdge {
    /// The vector from the start of the cable to its end.
    pub fn axis(&self) -> ENH {
        self.to - self.from
    }
}

/// Pads and their current cable edges.
#[derive(Debug, Clone, Default)]
pub struct CablingGraph {
    pads: IndexMap<String, Pad>,
    /// Pad name -> input name -> edges.
    edges: IndexMap<String, IndexMap<String, Vec<CableEdge>>>,
}

impl CablingGraph {
    /// Build pads from a roster, looking up tile positions in `array`. Tiles
    /// that aren't in the array are an error.
    pub fn new(roster: &RosterDoc, array: &ArrayModel) -> Result<CablingGraph, CablingError> {
        let mut pads = Vec::with_capacity(roster.pads.len());
        for (name, pad_config) in &roster.pads {
            let mut inputs = IndexMap::with_capacity(pad_config.inputs.len());
            for (input, keys) in &pad_config.inputs {
                let endpoints = keys.try_mapped_ref(|key| {
                    let tile_id = key.to_id().ok_or_else(|| CablingError::InvalidTileId {
                        pad: name.clone(),
                        input: input.clone(),
                        key: key.to_string(),
                    })?;
                    let tile = array.tile(tile_id).ok_or_else(|| CablingError::UnknownTile {
                        pad: name.clone(),
                        input: input.clone(),
                        tile_id,
                    })?;
                    Ok(TileEndpoint {
                        tile_id,
                        position: tile.position,
                    })
                })?;
                inputs.insert(input.clone(), endpoints);
            }

            let [east, north] = pad_config.pos;
            pads.push(Pad {
                name: name.clone(),
                position: ENH::new(east, north, 0.0),
                enabled: pad_config.enabled,
                inputs,
            });
        }
        Ok(CablingGraph::from_pads(pads))
    }

    /// Build a graph from already-made pads. All edges start in their default
    /// state.
    pub fn from_pads(pads: Vec<Pad>) -> CablingGraph {
        let mut graph = CablingGraph {
            pads: pads.into_iter().map(|p| (p.name.clone(), p)).collect(),
            edges: IndexMap::new(),
        };
        graph.build_edges();
        graph
    }

    /// Recompute every edge of every pad in its default state.
    pub fn build_edges(&mut self) {
        self.edges = self
            .pads
            .values()
            .map(|pad| {
                let edges = pad
                    .inputs
                    .iter()
                    .map(|(input, endpoints)| {
                        (
                            input.clone(),
                            make_edges(pad, endpoints, pad.default_colour(), Emphasis::Default),
                        )
                    })
                    .collect();
                (pad.name.clone(), edges)
            })
            .collect();
        debug!(
            "Built {} cable edges for {} pads",
            self.all_edges().count(),
            self.pads.len()
        );
    }

    pub fn pads(&self) -> impl ExactSizeIterator<Item = &Pad> {
        self.pads.values()
    }

    pub fn pad(&self, name: &str) -> Option<&Pad> {
        self.pads.get(name)
    }

    /// The edges of a pad, keyed by input name.
    pub fn edges(&self, pad: &str) -> Option<&IndexMap<String, Vec<CableEdge>>> {
        self.edges.get(pad)
    }

    /// Every edge with its pad and input names.
    pub fn all_edges(&self) -> impl Iterator<Item = (&str, &str, &CableEdge)> {
        self.edges.iter().flat_map(|(pad, inputs)| {
            inputs.iter().flat_map(move |(input, edges)| {
                edges.iter().map(move |e| (pad.as_str(), input.as_str(), e))
            })
        })
    }

    /// Handle a change of cable state for a pad. If `input` is given, only that
    /// input's edges are recomputed, emphasised with `colour`. Otherwise all of
    /// the pad's edges are reset to their default state, or to a fixed
    /// emphasis with `colour` if `fixed` is set. On error, nothing changes.
    pub fn update(
        &mut self,
        pad: &str,
        input: Option<&str>,
        colour: Colour,
        fixed: bool,
    ) -> Result<(), CablingError> {
        let p = self
            .pads
            .get(pad)
            .ok_or_else(|| CablingError::UnknownPad(pad.to_string()))?;
        let pad_edges = self
            .edges
            .get_mut(pad)
            .ok_or_else(|| CablingError::UnknownPad(pad.to_string()))?;

        let emphasis = if fixed {
            Emphasis::Fixed
        } else {
            Emphasis::Highlighted
        };
        match input {
            Some(input) => {
                let endpoints = p.inputs.get(input).ok_or_else(|| CablingError::UnknownInput {
                    pad: pad.to_string(),
                    input: input.to_string(),
                })?;
                trace!("Emphasising {pad}/{input} ({emphasis:?})");
                pad_edges.insert(input.to_string(), make_edges(p, endpoints, colour, emphasis));
            }

            None => {
                trace!("Resetting all cables of {pad} (fixed: {fixed})");
                for (input, endpoints) in &p.inputs {
                    let edges = if fixed {
                        make_edges(p, endpoints, colour, Emphasis::Fixed)
                    } else {
                        make_edges(p, endpoints, p.default_colour(), Emphasis::Default)
                    };
                    pad_edges.insert(input.clone(), edges);
                }
            }
        }
        Ok(())
    }

    /// The backbone cable from the origin to a pad.
    pub fn trunk(&self, pad: &str) -> Result<CableEdge, CablingError> {
        let p = self
            .pads
            .get(pad)
            .ok_or_else(|| CablingError::UnknownPad(pad.to_string()))?;
        Ok(CableEdge {
            from: ENH::default(),
            to: p.position,
            colour: p.default_colour(),
            width: DEFAULT_CABLE_WIDTH,
            emphasis: Emphasis::Default,
        })
    }
}

fn make_edges(
    pad: &Pad,
    endpoints: &Vec1<TileEndpoint>,
    colour: Colour,
    emphasis: Emphasis,
) -> Vec<CableEdge> {
    let width = match emphasis {
        Emphasis::Default => DEFAULT_CABLE_WIDTH,
        Emphasis::Highlighted | Emphasis::Fixed => EMPHASISED_CABLE_WIDTH,
    };
    endpoints
        .iter()
        .map(|endpoint| CableEdge {
            from: pad.position,
            to: endpoint.position,
            colour,
            width,
            emphasis,
        })
        .collect()
}
