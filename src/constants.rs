// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Lengths are in metres unless
otherwise stated.
 */

/// The increment of the analogue beamformer's delay line \[picoseconds\].
pub const DELAY_STEP_PS: f64 = 435.0;

/// The speed of light \[metres per picosecond\].
pub const SPEED_OF_LIGHT_M_PER_PS: f64 = 0.000299798;

/// The distance between neighbouring dipoles of a tile.
pub const DIPOLE_SEPARATION_M: f64 = 1.10;

/// The number of dipoles per MWA tile.
pub const NUM_DIPOLES: usize = 16;

/// The number of dipoles along one side of a tile.
pub(crate) const DIPOLES_PER_SIDE: usize = 4;

/// The largest raw delay a beamformer can apply. A delay of 32 means that the
/// dipole is "dead".
pub const MAX_DELAY: u32 = 32;

/// Raw delays that don't steer a dipole unless configured otherwise.
pub const DEFAULT_DELAY_SENTINELS: [u32; 2] = [0, MAX_DELAY];

/// The stream whose pointing and bad dipoles are used if none is specified.
pub const DEFAULT_STREAM: &str = "0";

// Tile furniture.

/// The side length of a tile's ground mesh.
pub(crate) const GROUND_PLATE_SIZE: f64 = 5.0;
pub(crate) const GROUND_PLATE_THICKNESS: f64 = 0.05;
/// The beamformer sits this far south of the tile centre.
pub(crate) const BEAMFORMER_NORTH_OFFSET: f64 = -3.5;
pub(crate) const BEAMFORMER_HEIGHT: f64 = 0.15;

// Bowtie dipole dimensions.

/// Centre to edge of a bat-wing.
pub(crate) const DIPOLE_HALF_WIDTH: f64 = 0.35;
/// Top of a bat-wing corner to the ground.
pub(crate) const DIPOLE_HEIGHT: f64 = 0.4;
/// Ground to the bottom of a bat-wing triangle.
pub(crate) const DIPOLE_STANDOFF: f64 = 0.1;
/// Thickness of the dipole arms.
pub(crate) const DIPOLE_ARM_THICKNESS: f64 = 0.05;
pub(crate) const LNA_LENGTH: f64 = 0.15;
pub(crate) const LNA_DIAMETER: f64 = 0.15;
pub(crate) const STEERING_SHAFT_WIDTH: f64 = 0.4;

// Array furniture.

pub(crate) const ARRAY_PLANE_SIZE: f64 = 3000.0;
pub(crate) const AXIS_LENGTH: f64 = 1600.0;
pub(crate) const AXIS_SHAFT_WIDTH: f64 = 3.0;

// Cabling.

/// The shaft width of a cable that isn't emphasised.
pub const DEFAULT_CABLE_WIDTH: f64 = 1.0;
/// The shaft width of an emphasised cable.
pub const EMPHASISED_CABLE_WIDTH: f64 = 3.0;
