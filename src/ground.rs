// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ground plane shared by all tiles, with East and North axis markers.

use crate::{
    coord::ENH,
    geometry::{self, Primitive, Representation},
    tile::VisibleSet,
    view::ViewState,
};

/// The array's ground plane. Its view state is independent of any tile's.
#[derive(Debug, Clone, Default)]
pub struct Ground {
    view_state: ViewState,
}

impl Ground {
    pub fn new() -> Ground {
        Ground::default()
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn set_view_state(&mut self, state: ViewState) -> VisibleSet {
        self.view_state = state;
        self.visible_geometry(state)
    }

    /// The ground has no detailed representation; the simple and complex views
    /// both show the plane and its axes.
    pub fn visible_geometry(&self, state: ViewState) -> VisibleSet {
        match state {
            ViewState::None => VisibleSet::new(),
            ViewState::Simple | ViewState::Complex => self.representations(),
        }
    }

    pub fn representations(&self) -> VisibleSet {
        VisibleSet::from([
            Representation::ArrayPlane,
            Representation::EastAxis,
            Representation::NorthAxis,
        ])
    }

    pub fn primitives(&self, repr: Representation) -> Vec<Primitive> {
        match repr {
            Representation::ArrayPlane => vec![geometry::array_plane()],
            Representation::EastAxis => geometry::axis(ENH::EAST, "East"),
            Representation::NorthAxis => geometry::axis(ENH::NORTH, "North"),
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_starts_hidden() {
        let ground = Ground::new();
        assert_eq!(ground.view_state(), ViewState::None);
        assert!(ground.visible_geometry(ground.view_state()).is_empty());
    }

    #[test]
    fn ground_shows_axes_in_both_views() {
        let mut ground = Ground::new();
        let simple = ground.set_view_state(ViewState::Simple);
        let complex = ground.set_view_state(ViewState::Complex);
        assert_eq!(simple, complex);
        assert_eq!(simple.len(), 3);
        assert_eq!(ground.view_state(), ViewState::Complex);
        assert!(ground.set_view_state(ViewState::None).is_empty());
    }

    #[test]
    fn axes_have_labels() {
        let ground = Ground::new();
        let prims = ground.primitives(Representation::NorthAxis);
        assert!(prims
            .iter()
            .any(|p| matches!(p, Primitive::Label { text, .. } if text == "North")));
        assert!(ground.primitives(Representation::Beamformer).is_empty());
    }
}
