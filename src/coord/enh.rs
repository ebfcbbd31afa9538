// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle East, North and Height coordinates (typically associated with MWA tiles).

The same type is used for positions and for directions (e.g. steering vectors)
in the local topocentric frame; East is +x, North is +y and Up is +z.
*/

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// East, North and Height coordinates \[metres\].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ENH {
    /// East \[metres\]
    pub e: f64,
    /// North \[metres\]
    pub n: f64,
    /// Height \[metres\]
    pub h: f64,
}

impl ENH {
    /// Unit vector pointing east.
    pub const EAST: ENH = ENH::new(1.0, 0.0, 0.0);
    /// Unit vector pointing north.
    pub const NORTH: ENH = ENH::new(0.0, 1.0, 0.0);
    /// Unit vector pointing to the zenith.
    pub const UP: ENH = ENH::new(0.0, 0.0, 1.0);

    pub const fn new(e: f64, n: f64, h: f64) -> ENH {
        ENH { e, n, h }
    }

    pub fn dot(self, other: ENH) -> f64 {
        self.e * other.e + self.n * other.n + self.h * other.h
    }

    pub fn cross(self, other: ENH) -> ENH {
        ENH {
            e: self.n * other.h - self.h * other.n,
            n: self.h * other.e - self.e * other.h,
            h: self.e * other.n - self.n * other.e,
        }
    }

    /// The Euclidean length of these coordinates treated as a vector.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rotate these coordinates by `angle` \[radians\] about `axis`, which need
    /// not be normalised. Positive angles follow the right-hand rule (i.e.
    /// rotating [`ENH::NORTH`] about [`ENH::EAST`] lifts it toward
    /// [`ENH::UP`]).
    ///
    /// This uses Rodrigues' rotation formula. A zero-length axis leaves the
    /// coordinates unchanged.
    pub fn rotate(self, angle: f64, axis: ENH) -> ENH {
        let axis_len = axis.length();
        if axis_len == 0.0 {
            return self;
        }
        let k = axis * (1.0 / axis_len);
        let (s, c) = angle.sin_cos();
        self * c + k.cross(self) * s + k * (k.dot(self) * (1.0 - c))
    }
}

impl Add for ENH {
    type Output = ENH;

    fn add(self, rhs: ENH) -> ENH {
        ENH {
            e: self.e + rhs.e,
            n: self.n + rhs.n,
            h: self.h + rhs.h,
        }
    }
}

impl Sub for ENH {
    type Output = ENH;

    fn sub(self, rhs: ENH) -> ENH {
        ENH {
            e: self.e - rhs.e,
            n: self.n - rhs.n,
            h: self.h - rhs.h,
        }
    }
}

impl Mul<f64> for ENH {
    type Output = ENH;

    fn mul(self, rhs: f64) -> ENH {
        ENH {
            e: self.e * rhs,
            n: self.n * rhs,
            h: self.h * rhs,
        }
    }
}

impl Neg for ENH {
    type Output = ENH;

    fn neg(self) -> ENH {
        ENH {
            e: -self.e,
            n: -self.n,
            h: -self.h,
        }
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for ENH {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.e, &other.e, epsilon)
            && f64::abs_diff_eq(&self.n, &other.n, epsilon)
            && f64::abs_diff_eq(&self.h, &other.h, epsilon)
    }
}
