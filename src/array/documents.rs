// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The input documents describing an observation and the array's
//! configuration.
//!
//! These are loosely structured; only the fields needed to place geometry are
//! read, and anything else in the documents is ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Observation metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationDoc {
    /// RF streams, keyed by stream number (e.g. "0").
    #[serde(default)]
    pub rfstreams: IndexMap<String, RfStream>,

    /// Tiles flagged as faulty.
    #[serde(default)]
    pub bad_tiles: Vec<TileKey>,

    /// Raw beamformer delays, keyed by tile ID. Each entry should be
    /// `[x_delays, y_delays]`.
    #[serde(default)]
    pub alldelays: IndexMap<String, Vec<Vec<i64>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RfStream {
    /// \[degrees\]
    pub azimuth: Option<f64>,

    /// \[degrees\]
    pub elevation: Option<f64>,

    /// Bad dipole numbers (one indexed), keyed by tile ID. Each entry is
    /// `[x_bad, y_bad]`.
    #[serde(default)]
    pub bad_dipoles: IndexMap<String, (Vec<i64>, Vec<i64>)>,
}

/// A tile ID, which may be written as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileKey {
    Int(u64),
    Str(String),
}

impl TileKey {
    pub fn to_id(&self) -> Option<u32> {
        match self {
            TileKey::Int(i) => u32::try_from(*i).ok(),
            TileKey::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for TileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileKey::Int(i) => write!(f, "{i}"),
            TileKey::Str(s) => write!(f, "{s}"),
        }
    }
}

/// The array configuration, keyed by tile ID. The configuration decides which
/// tiles exist.
pub type ConfigurationDoc = IndexMap<String, TileConfig>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileConfig {
    /// \[east, north\] \[metres\]
    pub pos: [f64; 2],

    /// \[metres\]
    #[serde(default)]
    pub altitude: Option<f64>,

    #[serde(default)]
    pub receiver: Option<u32>,

    #[serde(default)]
    pub slot: Option<u32>,

    pub name: String,
}
