// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Descriptions of the drawing primitives that make up tiles and the ground.
//!
//! Nothing here draws anything; a renderer consumes these descriptions. Boxes
//! are centred on `pos` and their `length` runs along `axis`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{
    constants::*,
    coord::ENH,
    delays::Polarisation,
};

/// An RGB colour. Each component is between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Colour {
    pub const WHITE: Colour = Colour::new(1.0, 1.0, 1.0);
    pub const RED: Colour = Colour::new(1.0, 0.0, 0.0);
    pub const GREEN: Colour = Colour::new(0.0, 1.0, 0.0);
    pub const BLUE: Colour = Colour::new(0.0, 0.0, 1.0);
    pub const YELLOW: Colour = Colour::new(1.0, 1.0, 0.0);
    pub const ORANGE: Colour = Colour::new(1.0, 0.6, 0.0);
    pub const EARTH: Colour = Colour::new(1.0, 0.6, 0.3);

    pub const fn new(r: f64, g: f64, b: f64) -> Colour {
        Colour { r, g, b }
    }

    pub const fn grey(level: f64) -> Colour {
        Colour::new(level, level, level)
    }

    /// The colour of a dipole arm. Dipoles that aren't known to be good or
    /// bad are grey.
    pub fn for_dipole(bad: Option<bool>) -> Colour {
        match bad {
            Some(true) => Colour::RED,
            Some(false) => Colour::GREEN,
            None => Colour::grey(0.5),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("Couldn't parse '{0}' as a colour; expected a name (e.g. 'red') or 'r,g,b' with components between 0 and 1")]
pub struct ParseColourError(String);

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colour = match s.trim().to_lowercase().as_str() {
            "white" => Colour::WHITE,
            "red" => Colour::RED,
            "green" => Colour::GREEN,
            "blue" => Colour::BLUE,
            "yellow" => Colour::YELLOW,
            "orange" => Colour::ORANGE,
            "grey" | "gray" => Colour::grey(0.5),
            other => {
                let components = other
                    .split(',')
                    .map(|c| c.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| ParseColourError(s.to_string()))?;
                match components.as_slice() {
                    &[r, g, b] if [r, g, b].iter().all(|c| (0.0..=1.0).contains(c)) => {
                        Colour::new(r, g, b)
                    }
                    _ => return Err(ParseColourError(s.to_string())),
                }
            }
        };
        Ok(colour)
    }
}

/// A single drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        pos: ENH,
        axis: ENH,
        length: f64,
        height: f64,
        width: f64,
        colour: Colour,
        opacity: f64,
    },

    Cylinder {
        pos: ENH,
        axis: ENH,
        radius: f64,
        colour: Colour,
    },

    /// An arrow from `pos` to `pos + axis`.
    Arrow {
        pos: ENH,
        axis: ENH,
        shaft_width: f64,
        colour: Colour,
        opacity: f64,
    },

    Label {
        pos: ENH,
        text: String,
        colour: Colour,
    },
}

/// The kinds of geometry a tile or the ground can show. A renderer keeps one
/// set of drawables per kind and per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
pub enum Representation {
    /// A tile's ground mesh.
    GroundPlate,

    /// A tile's analogue beamformer.
    Beamformer,

    /// A plain marker for a dipole (zero indexed).
    DipoleMarker(u8),

    /// The bowtie arms and LNA of a dipole (zero indexed).
    DipoleDetail(u8),

    /// The steering vector of a dipole (zero indexed).
    SteeringVector { dipole: u8, pol: Polarisation },

    /// The array's ground plane.
    ArrayPlane,

    EastAxis,

    NorthAxis,
}

/// A box lying flat, `thickness` high.
fn flat_box(pos: ENH, thickness: f64, height: f64, width: f64, colour: Colour) -> Primitive {
    Primitive::Box {
        pos,
        axis: ENH::UP,
        length: thickness,
        height,
        width,
        colour,
        opacity: 1.0,
    }
}

/// A thin box running from `from` to `to`.
fn rod(from: ENH, to: ENH, thickness: f64, colour: Colour) -> Primitive {
    let axis = to - from;
    Primitive::Box {
        pos: from + axis * 0.5,
        axis,
        length: axis.length(),
        height: thickness,
        width: thickness,
        colour,
        opacity: 1.0,
    }
}

/// A tile's ground mesh. Faulty tiles are drawn in red.
pub(crate) fn ground_plate(centre: ENH, fault: bool) -> Primitive {
    flat_box(
        centre,
        GROUND_PLATE_THICKNESS,
        GROUND_PLATE_SIZE,
        GROUND_PLATE_SIZE,
        if fault { Colour::RED } else { Colour::grey(0.5) },
    )
}

pub(crate) fn beamformer(centre: ENH) -> Primitive {
    Primitive::Box {
        pos: centre + ENH::new(0.0, BEAMFORMER_NORTH_OFFSET, BEAMFORMER_HEIGHT),
        axis: ENH::UP,
        length: 0.2,
        height: 0.3,
        width: 0.4,
        colour: Colour::WHITE,
        opacity: 1.0,
    }
}

/// The simple representation of a dipole: one flat pad per polarisation.
pub(crate) fn dipole_markers(pos: ENH, bad_x: Option<bool>, bad_y: Option<bool>) -> Vec<Primitive> {
    let w = DIPOLE_HALF_WIDTH;
    vec![
        flat_box(pos, DIPOLE_STANDOFF, w * 0.75, w * 3.0, Colour::for_dipole(bad_x)),
        flat_box(
            pos + ENH::new(0.0, 0.0, 0.05),
            DIPOLE_STANDOFF,
            w * 3.0,
            w * 0.75,
            Colour::for_dipole(bad_y),
        ),
    ]
}

/// The detailed representation of a dipole: two bowties, the LNA and the wire
/// tube underneath it.
pub(crate) fn dipole_detail(pos: ENH, bad_x: Option<bool>, bad_y: Option<bool>) -> Vec<Primitive> {
    let w = DIPOLE_HALF_WIDTH;
    let top = DIPOLE_HEIGHT;
    let bottom = DIPOLE_STANDOFF;
    let centre_height = DIPOLE_HEIGHT / 2.0 + DIPOLE_STANDOFF;
    let t = DIPOLE_ARM_THICKNESS;

    let mut prims = Vec::with_capacity(10);
    for (dir, colour) in [
        (ENH::EAST, Colour::for_dipole(bad_x)),
        (ENH::NORTH, Colour::for_dipole(bad_y)),
    ] {
        let at = |along: f64, up: f64| pos + dir * along + ENH::UP * up;
        let edge_low = (top + bottom) / 2.0 - (top + t) / 2.0;
        let edge_high = (top + bottom) / 2.0 + (top + t) / 2.0;
        // Vertical edges of the bowtie, then the two crossing arms.
        prims.push(rod(at(-w, edge_low), at(-w, edge_high), t, colour));
        prims.push(rod(at(-w, top), at(w, bottom), t, colour));
        prims.push(rod(at(-w, bottom), at(w, top), t, colour));
        prims.push(rod(at(w, edge_low), at(w, edge_high), t, colour));
    }

    prims.push(Primitive::Cylinder {
        pos: pos + ENH::new(0.0, 0.0, centre_height - LNA_LENGTH / 2.0),
        axis: ENH::new(0.0, 0.0, LNA_LENGTH),
        radius: LNA_DIAMETER / 2.0,
        colour: Colour::WHITE,
    });
    prims.push(Primitive::Cylinder {
        pos: pos + ENH::new(0.0, 0.0, DIPOLE_STANDOFF),
        axis: ENH::new(0.0, 0.0, centre_height - DIPOLE_STANDOFF),
        radius: t / 2.0,
        colour: Colour::WHITE,
    });
    prims
}

pub(crate) fn steering_arrow(pos: ENH, vector: ENH, pol: Polarisation) -> Primitive {
    Primitive::Arrow {
        pos,
        axis: vector,
        shaft_width: STEERING_SHAFT_WIDTH,
        colour: match pol {
            Polarisation::X => Colour::WHITE,
            Polarisation::Y => Colour::YELLOW,
        },
        opacity: 1.0,
    }
}

pub(crate) fn array_plane() -> Primitive {
    Primitive::Box {
        pos: ENH::new(0.0, 0.0, -0.01),
        axis: ENH::UP,
        length: 0.01,
        height: ARRAY_PLANE_SIZE,
        width: ARRAY_PLANE_SIZE,
        colour: Colour::EARTH,
        opacity: 0.8,
    }
}

/// An axis arrow from the origin along `dir` with a label near its tip.
pub(crate) fn axis(dir: ENH, text: &str) -> Vec<Primitive> {
    let label_offset = if dir == ENH::EAST {
        ENH::new(-20.0, 20.0, 0.0)
    } else {
        ENH::new(20.0, -20.0, 0.0)
    };
    vec![
        Primitive::Arrow {
            pos: ENH::default(),
            axis: dir * AXIS_LENGTH,
            shaft_width: AXIS_SHAFT_WIDTH,
            colour: Colour::WHITE,
            opacity: 0.8,
        },
        Primitive::Label {
            pos: dir * AXIS_LENGTH + label_offset,
            text: text.to_string(),
            colour: Colour::WHITE,
        },
    ]
}
