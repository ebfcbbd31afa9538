// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to turn analogue beamformer delays into steering vectors.
//!
//! Each MWA dipole is delayed by an integer number of delay-line steps. A
//! steering vector is a visual aid only: it points from a dipole toward the
//! tile's pointing direction and is as long as the path light travels during
//! the dipole's delay.

mod error;

pub use error::DelayError;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::{
        DEFAULT_DELAY_SENTINELS, DELAY_STEP_PS, MAX_DELAY, NUM_DIPOLES, SPEED_OF_LIGHT_M_PER_PS,
    },
    coord::{AzEl, ENH},
};

/// The polarisations of an MWA dipole.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[derive(Serialize, Deserialize)]
pub enum Polarisation {
    X,
    Y,
}

/// Get the steering vector for a single dipole using the default sentinel
/// delays (0 and 32). See [`DelayPolicy::steering_vector`].
pub fn steering_vector(
    pointing: AzEl,
    raw_delay: u32,
    delay_step_ps: f64,
    speed_of_light: f64,
) -> Option<ENH> {
    if DEFAULT_DELAY_SENTINELS.contains(&raw_delay) {
        return None;
    }
    Some(steering_direction(pointing) * path_length(raw_delay, delay_step_ps, speed_of_light))
}

/// The unit vector toward `pointing`. North is first lifted by the elevation
/// about the East axis, and the result is then turned by the azimuth about the
/// zenith. The order matters; swapping the rotations gives a different vector.
pub fn steering_direction(pointing: AzEl) -> ENH {
    ENH::NORTH
        .rotate(pointing.el, ENH::EAST)
        .rotate(pointing.az, ENH::UP)
}

/// The distance light travels during `raw_delay` delay-line steps \[metres\].
fn path_length(raw_delay: u32, delay_step_ps: f64, speed_of_light: f64) -> f64 {
    raw_delay as f64 * delay_step_ps * speed_of_light
}

/// How raw beamformer delays are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayPolicy {
    /// The increment of the delay line \[picoseconds\].
    pub delay_step_ps: f64,

    /// The speed of light \[metres per picosecond\].
    pub speed_of_light: f64,

    /// Raw delays that mean "this dipole isn't steering". No steering vector is
    /// made for these.
    pub sentinels: Vec<u32>,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        DelayPolicy {
            delay_step_ps: DELAY_STEP_PS,
            speed_of_light: SPEED_OF_LIGHT_M_PER_PS,
            sentinels: DEFAULT_DELAY_SENTINELS.to_vec(),
        }
    }
}

impl DelayPolicy {
    pub fn is_sentinel(&self, raw_delay: u32) -> bool {
        self.sentinels.contains(&raw_delay)
    }

    /// Get the steering vector for a dipole with delay `raw_delay` on a tile
    /// pointed at `pointing`. `None` is returned if the delay is a sentinel.
    pub fn steering_vector(&self, pointing: AzEl, raw_delay: u32) -> Option<ENH> {
        if self.is_sentinel(raw_delay) {
            return None;
        }
        Some(
            steering_direction(pointing)
                * path_length(raw_delay, self.delay_step_ps, self.speed_of_light),
        )
    }
}

/// The raw delays of a single tile, one array per polarisation. Either array
/// may be empty, meaning that no delays are known for that polarisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileDelays {
    x: Vec<u32>,
    y: Vec<u32>,
}

impl TileDelays {
    /// Validate raw delays. Each array must be empty or have exactly
    /// [`NUM_DIPOLES`] elements, and every delay must be within 0 to
    /// [`MAX_DELAY`] (inclusive).
    pub fn new(x: &[i64], y: &[i64]) -> Result<TileDelays, DelayError> {
        Ok(TileDelays {
            x: validate(x, Polarisation::X)?,
            y: validate(y, Polarisation::Y)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    /// Get the delays for a polarisation. The slice is empty if there are
    /// none.
    pub fn get(&self, pol: Polarisation) -> &[u32] {
        match pol {
            Polarisation::X => &self.x,
            Polarisation::Y => &self.y,
        }
    }
}

fn validate(delays: &[i64], pol: Polarisation) -> Result<Vec<u32>, DelayError> {
    if delays.is_empty() {
        return Ok(vec![]);
    }
    if delays.len() != NUM_DIPOLES {
        return Err(DelayError::BadLength {
            pol,
            got: delays.len(),
        });
    }
    delays
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            u32::try_from(d)
                .ok()
                .filter(|&d| d <= MAX_DELAY)
                .ok_or(DelayError::OutOfRange {
                    pol,
                    dipole: i + 1,
                    delay: d,
                })
        })
        .collect()
}

/// Delays of some tiles could contain 32 (which means that that particular
/// dipole is "dead"). It is sometimes useful to get the "ideal" dipole delays;
/// i.e. what the delays for each tile would be if all dipoles were alive. The
/// X delays of all tiles are consulted; the smallest delay per dipole wins,
/// and 32 remains only if every tile has 32 for that dipole.
///
/// `None` is returned if no tile has X delays.
pub fn ideal_delays<'a, I>(all_delays: I) -> Option<[u32; NUM_DIPOLES]>
where
    I: IntoIterator<Item = &'a TileDelays>,
{
    let mut ideal = [MAX_DELAY; NUM_DIPOLES];
    let mut any = false;
    for delays in all_delays {
        let x = delays.get(Polarisation::X);
        if x.is_empty() {
            continue;
        }
        any = true;
        ideal
            .iter_mut()
            .zip(x.iter())
            .for_each(|(ideal, &d)| *ideal = (*ideal).min(d));
        if ideal.iter().all(|&d| d < MAX_DELAY) {
            break;
        }
    }
    any.then_some(ideal)
}
