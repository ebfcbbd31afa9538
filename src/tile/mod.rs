// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A single MWA tile: a ground mesh, a beamformer and 16 dual-polarisation
//! dipoles.

mod error;

pub use error::TileError;

use std::collections::BTreeSet;

use crate::{
    constants::NUM_DIPOLES,
    coord::{AzEl, ENH},
    delays::{Polarisation, TileDelays},
    geometry::{self, Primitive, Representation},
    layout::dipole_offsets,
    params::ModelParams,
    view::ViewState,
};

/// The set of representations that should be visible for an entity.
pub type VisibleSet = BTreeSet<Representation>;

/// A single bowtie dipole.
#[derive(Debug, Clone, PartialEq)]
pub struct Dipole {
    /// The (east, north) offset from the tile centre \[metres\].
    pub offset: (f64, f64),

    /// The absolute position of the dipole.
    pub position: ENH,

    pub bad_x: bool,
    pub bad_y: bool,

    /// False if nothing is known about which dipoles are bad.
    pub flags_known: bool,

    steering_x: Option<ENH>,
    steering_y: Option<ENH>,
}

impl Dipole {
    pub fn is_bad(&self, pol: Polarisation) -> bool {
        match pol {
            Polarisation::X => self.bad_x,
            Polarisation::Y => self.bad_y,
        }
    }

    /// Whether this dipole is bad for a polarisation, or `None` if that isn't
    /// known.
    pub fn health(&self, pol: Polarisation) -> Option<bool> {
        self.flags_known.then(|| self.is_bad(pol))
    }

    /// The steering vector of this dipole for a polarisation, if one was made.
    pub fn steering(&self, pol: Polarisation) -> Option<ENH> {
        match pol {
            Polarisation::X => self.steering_x,
            Polarisation::Y => self.steering_y,
        }
    }
}

/// Everything needed to make a [`Tile`].
#[derive(Debug, Clone, Default)]
pub struct TileParams {
    pub id: u32,
    pub name: String,

    /// The position of the tile centre. Tiles are drawn on the ground plane,
    /// so the height should be 0.
    pub position: ENH,

    /// The surveyed altitude of the tile \[metres\]. Kept for information only.
    pub altitude: f64,

    pub receiver: Option<u32>,
    pub slot: Option<u32>,

    /// Where the tile is pointed. Without a pointing, no steering vectors are
    /// made.
    pub pointing: Option<AzEl>,

    /// Bad X dipole numbers (one indexed).
    pub bad_x: Vec<u32>,

    /// Bad Y dipole numbers (one indexed).
    pub bad_y: Vec<u32>,

    /// Set when there is no bad dipole information for this tile at all (not
    /// even an empty list), so dipoles are drawn as neither good nor bad.
    pub bad_dipoles_unknown: bool,

    /// Raw X delays; empty or one per dipole.
    pub x_delays: Vec<i64>,

    /// Raw Y delays; empty or one per dipole.
    pub y_delays: Vec<i64>,

    pub fault: bool,
}

/// Represents a single MWA tile, ground mesh, and beamformer.
#[derive(Debug, Clone)]
pub struct Tile {
    pub id: u32,
    pub name: String,
    pub position: ENH,
    pub altitude: f64,
    pub receiver: Option<u32>,
    pub slot: Option<u32>,
    pub pointing: Option<AzEl>,
    pub delays: TileDelays,

    /// Is the whole tile flagged as faulty? This only affects how the tile is
    /// coloured.
    pub fault: bool,

    dipoles: [Dipole; NUM_DIPOLES],
    view_state: ViewState,
}

impl Tile {
    /// Make a new tile. Fails if the delays are malformed, because the
    /// steering geometry would be undefined.
    pub fn new(params: TileParams, model: &ModelParams) -> Result<Tile, TileError> {
        let TileParams {
            id,
            name,
            position,
            altitude,
            receiver,
            slot,
            pointing,
            bad_x,
            bad_y,
            bad_dipoles_unknown,
            x_delays,
            y_delays,
            fault,
        } = params;

        let delays = TileDelays::new(&x_delays, &y_delays)?;

        let steering = |pol: Polarisation, i: usize| -> Option<ENH> {
            if !model.steering_polarisations.contains(&pol) {
                return None;
            }
            let raw = *delays.get(pol).get(i)?;
            model.delay_policy.steering_vector(pointing?, raw)
        };

        let offsets = dipole_offsets(model.dipole_separation);
        let dipoles = std::array::from_fn(|i| {
            let (de, dn) = offsets[i];
            let number = i as u32 + 1;
            Dipole {
                offset: (de, dn),
                position: position + ENH::new(de, dn, 0.0),
                bad_x: bad_x.contains(&number),
                bad_y: bad_y.contains(&number),
                flags_known: !bad_dipoles_unknown,
                steering_x: steering(Polarisation::X, i),
                steering_y: steering(Polarisation::Y, i),
            }
        });

        Ok(Tile {
            id,
            name,
            position,
            altitude,
            receiver,
            slot,
            pointing,
            delays,
            fault,
            dipoles,
            view_state: ViewState::None,
        })
    }

    /// The dipoles of this tile in their canonical order.
    pub fn dipoles(&self) -> &[Dipole; NUM_DIPOLES] {
        &self.dipoles
    }

    /// The one-indexed numbers of this tile's bad dipoles for a polarisation.
    pub fn bad_dipoles(&self, pol: Polarisation) -> Vec<usize> {
        self.dipoles
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_bad(pol))
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// All steering vectors of this tile, with the (zero-indexed) dipole they
    /// belong to.
    pub fn steering_vectors(&self) -> impl Iterator<Item = (usize, Polarisation, ENH)> + '_ {
        self.dipoles.iter().enumerate().flat_map(|(i, d)| {
            [Polarisation::X, Polarisation::Y]
                .into_iter()
                .filter_map(move |pol| d.steering(pol).map(|v| (i, pol, v)))
        })
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    /// Change the view of this tile, returning what is now visible. Applying
    /// the same state twice gives the same result.
    pub fn set_view_state(&mut self, state: ViewState) -> VisibleSet {
        self.view_state = state;
        self.visible_geometry(state)
    }

    /// The representations that are visible when this tile is in `state`.
    pub fn visible_geometry(&self, state: ViewState) -> VisibleSet {
        let mut set = VisibleSet::new();
        match state {
            ViewState::None => (),

            ViewState::Simple => {
                set.insert(Representation::GroundPlate);
                set.extend((0..NUM_DIPOLES as u8).map(Representation::DipoleMarker));
            }

            ViewState::Complex => {
                set.insert(Representation::GroundPlate);
                set.insert(Representation::Beamformer);
                set.extend((0..NUM_DIPOLES as u8).map(Representation::DipoleDetail));
                set.extend(
                    self.steering_vectors()
                        .map(|(i, pol, _)| Representation::SteeringVector {
                            dipole: i as u8,
                            pol,
                        }),
                );
            }
        }
        set
    }

    /// Every representation this tile can show.
    pub fn representations(&self) -> VisibleSet {
        let mut set = self.visible_geometry(ViewState::Simple);
        set.extend(self.visible_geometry(ViewState::Complex));
        set
    }

    /// The primitives making up a representation. Representations this tile
    /// doesn't have give nothing.
    pub fn primitives(&self, repr: Representation) -> Vec<Primitive> {
        match repr {
            Representation::GroundPlate => vec![geometry::ground_plate(self.position, self.fault)],
            Representation::Beamformer => vec![geometry::beamformer(self.position)],
            Representation::DipoleMarker(i) => self
                .dipoles
                .get(usize::from(i))
                .map(|d| {
                    geometry::dipole_markers(
                        d.position,
                        d.health(Polarisation::X),
                        d.health(Polarisation::Y),
                    )
                })
                .unwrap_or_default(),
            Representation::DipoleDetail(i) => self
                .dipoles
                .get(usize::from(i))
                .map(|d| {
                    geometry::dipole_detail(
                        d.position,
                        d.health(Polarisation::X),
                        d.health(Polarisation::Y),
                    )
                })
                .unwrap_or_default(),
            Representation::SteeringVector { dipole, pol } => self
                .dipoles
                .get(usize::from(dipole))
                .and_then(|d| {
                    d.steering(pol)
                        .map(|v| geometry::steering_arrow(d.position, v, pol))
                })
                .into_iter()
                .collect(),
            Representation::ArrayPlane | Representation::EastAxis | Representation::NorthAxis => {
                vec![]
            }
        }
    }
}
