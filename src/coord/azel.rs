// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle (azimuth, elevation) coordinates.
*/

/// A struct containing an Azimuth and Elevation. All units are in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AzEl {
    /// Azimuth \[radians\]
    pub az: f64,
    /// Elevation \[radians\]
    pub el: f64,
}

impl AzEl {
    /// Make a new `AzEl` struct from values in radians.
    pub fn new(az: f64, el: f64) -> Self {
        Self { az, el }
    }

    /// Make a new `AzEl` struct from values in degrees.
    pub fn new_degrees(az: f64, el: f64) -> Self {
        Self::new(az.to_radians(), el.to_radians())
    }

    /// Get the zenith angle \[radians\].
    pub fn za(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.el
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for AzEl {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.az, &other.az, epsilon)
            && f64::abs_diff_eq(&self.el, &other.el, epsilon)
    }
}
