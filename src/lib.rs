// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
A geometric model of Murchison Widefield Array (MWA) tiles: where their
dipoles are, which way the analogue beamformer delays steer them, which
dipoles are faulty, and which receiver pads they are cabled to.

Nothing here renders anything. The model produces descriptions of drawables
(see [`geometry::Primitive`]) and tells a renderer which of them to show as
the view changes (see [`session::Session`]).
 */

pub mod array;
pub mod cabling;
mod cli;
pub mod constants;
pub mod coord;
pub mod delays;
pub mod geometry;
pub mod ground;
pub mod io;
pub mod layout;
pub mod params;
pub mod scene;
pub mod session;
pub mod tile;
pub mod view;

// Re-exports.
pub use array::ArrayModel;
pub use cabling::CablingGraph;
pub use cli::{Tileview, TileviewError};
pub use coord::{AzEl, ENH};
pub use delays::{DelayPolicy, Polarisation};
pub use params::ModelParams;
pub use session::{Event, Session};
pub use tile::Tile;
pub use view::{ViewState, ViewStateMachine};
