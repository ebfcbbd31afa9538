// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The whole array: every tile in the configuration plus the shared ground.

The configuration document decides which tiles exist; the observation document
supplies the pointing, delays and fault information for them. Tiles that only
appear in the observation are ignored.
 */

mod documents;
mod error;
#[cfg(test)]
mod tests;

pub use documents::{ConfigurationDoc, ObservationDoc, RfStream, TileConfig, TileKey};
pub use error::ArrayModelError;

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::{
    constants::NUM_DIPOLES,
    coord::{AzEl, ENH},
    delays::{ideal_delays, Polarisation},
    ground::Ground,
    params::ModelParams,
    tile::{Tile, TileParams},
    view::ViewState,
};

/// The tiles of an array and the ground they sit on.
#[derive(Debug, Clone)]
pub struct ArrayModel {
    tiles: IndexMap<u32, Tile>,
    ground: Ground,
    pointing: Option<AzEl>,
}

impl ArrayModel {
    /// Build the array from an observation and a configuration. Any problem
    /// with any tile fails the whole batch.
    pub fn new(
        obs: &ObservationDoc,
        con: &ConfigurationDoc,
        params: &ModelParams,
    ) -> Result<ArrayModel, ArrayModelError> {
        if params.dipole_separation.is_nan() || params.dipole_separation <= 0.0 {
            return Err(ArrayModelError::BadDipoleSeparation(params.dipole_separation));
        }

        let stream = obs.rfstreams.get(&params.stream);
        if stream.is_none() {
            warn!(
                "Observation has no RF stream '{}'; no pointing or bad dipoles are available",
                params.stream
            );
        }
        // The same stream's pointing currently applies to all tiles.
        let pointing = stream.and_then(|s| match (s.azimuth, s.elevation) {
            (Some(az), Some(el)) => Some(AzEl::new_degrees(az, el)),
            _ => None,
        });
        match pointing {
            Some(p) => debug!(
                "Pointing: az {:.2}°, el {:.2}°",
                p.az.to_degrees(),
                p.el.to_degrees()
            ),
            None => debug!("No pointing; steering vectors won't be made"),
        }

        let bad_tiles: HashSet<u32> = obs
            .bad_tiles
            .iter()
            .filter_map(|key| {
                let id = key.to_id();
                if id.is_none() {
                    warn!("Ignoring bad tile '{key}', as it isn't a tile ID");
                }
                id
            })
            .collect();

        // Observation entries are keyed by strings; look them up by ID so that
        // e.g. "011" and "11" are the same tile.
        let bad_dipoles = by_id(stream.map(|s| &s.bad_dipoles), "bad dipoles");
        let all_delays = by_id(Some(&obs.alldelays), "delays");

        let mut keys: IndexMap<u32, &str> = IndexMap::with_capacity(con.len());
        let mut tiles = IndexMap::with_capacity(con.len());
        for (key, tile_con) in con {
            let id: u32 = key
                .trim()
                .parse()
                .map_err(|_| ArrayModelError::InvalidTileId(key.clone()))?;
            if let Some(first) = keys.insert(id, key) {
                return Err(ArrayModelError::DuplicateTile {
                    id,
                    first: first.to_string(),
                    second: key.clone(),
                });
            }

            let (bad_x, bad_y) = match bad_dipoles.get(&id) {
                Some((x, y)) => (
                    dipole_numbers(id, Polarisation::X, x),
                    dipole_numbers(id, Polarisation::Y, y),
                ),
                None => (vec![], vec![]),
            };
            if !bad_x.is_empty() || !bad_y.is_empty() {
                debug!("Tile {id} has bad dipoles: X {bad_x:?}, Y {bad_y:?}");
            }

            let (x_delays, y_delays) = match all_delays.get(&id).map(|d| d.as_slice()) {
                None | Some([]) => {
                    trace!("Tile {id} has no delays");
                    (vec![], vec![])
                }
                Some([x, y]) => (x.clone(), y.clone()),
                Some(other) => {
                    return Err(ArrayModelError::MalformedDelays {
                        id,
                        num: other.len(),
                    })
                }
            };

            let [east, north] = tile_con.pos;
            let tile = Tile::new(
                TileParams {
                    id,
                    name: tile_con.name.clone(),
                    position: ENH::new(east, north, 0.0),
                    altitude: tile_con.altitude.unwrap_or_default(),
                    receiver: tile_con.receiver,
                    slot: tile_con.slot,
                    pointing,
                    bad_x,
                    bad_y,
                    // Without the stream, bad dipoles can't be looked up.
                    bad_dipoles_unknown: stream.is_none(),
                    x_delays,
                    y_delays,
                    fault: bad_tiles.contains(&id),
                },
                params,
            )
            .map_err(|err| ArrayModelError::Tile {
                id,
                name: tile_con.name.clone(),
                err,
            })?;
            trace!("Created tile {id} ({})", tile.name);
            tiles.insert(id, tile);
        }

        let ignored = all_delays.keys().filter(|id| !tiles.contains_key(*id)).count();
        if ignored > 0 {
            debug!("Ignoring delays for {ignored} tiles that aren't in the configuration");
        }

        // Everything starts in `ViewState::None`, like a new `ViewStateMachine`;
        // the machine applies the initial view.
        Ok(ArrayModel {
            tiles,
            ground: Ground::new(),
            pointing,
        })
    }

    /// The tiles in configuration order.
    pub fn tiles(&self) -> impl ExactSizeIterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn pointing(&self) -> Option<AzEl> {
        self.pointing
    }

    pub fn faulty_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|t| t.fault)
    }

    /// See [`crate::delays::ideal_delays`].
    pub fn ideal_delays(&self) -> Option<[u32; NUM_DIPOLES]> {
        ideal_delays(self.tiles.values().map(|t| &t.delays))
    }

    /// Put every tile and the ground into `state`.
    pub fn set_view_state(&mut self, state: ViewState) {
        for tile in self.tiles.values_mut() {
            tile.set_view_state(state);
        }
        self.ground.set_view_state(state);
    }
}

/// Re-key an observation map by tile ID, dropping keys that aren't IDs. When
/// two keys are the same ID, the first entry is used.
fn by_id<'a, T>(map: Option<&'a IndexMap<String, T>>, what: &str) -> IndexMap<u32, &'a T> {
    let mut seen: IndexMap<u32, (&str, &T)> = IndexMap::new();
    for (key, v) in map.into_iter().flatten() {
        let id: u32 = match key.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                warn!("Ignoring observation {what} for '{key}', as it isn't a tile ID");
                continue;
            }
        };
        match seen.get(&id) {
            Some((first, _)) => warn!(
                "Observation {what} for '{key}' and '{first}' are both for tile {id}; ignoring '{key}'"
            ),
            None => {
                seen.insert(id, (key.as_str(), v));
            }
        }
    }
    seen.into_iter().map(|(id, (_, v))| (id, v)).collect()
}

/// Keep only the valid dipole numbers (1 to 16).
fn dipole_numbers(id: u32, pol: Polarisation, numbers: &[i64]) -> Vec<u32> {
    numbers
        .iter()
        .filter_map(|&n| match u32::try_from(n) {
            Ok(n) if (1..=NUM_DIPOLES as u32).contains(&n) => Some(n),
            _ => {
                warn!("Tile {id}: ignoring bad {pol} dipole number {n}");
                None
            }
        })
        .collect()
}
