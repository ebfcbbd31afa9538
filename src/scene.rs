// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An index of every drawable in the array, keyed by entity and
//! representation, and the bookkeeping to tell a renderer what changed.
//!
//! The renderer owns the actual drawables. Each tick, it asks for a
//! [`SceneDiff`] and shows or hides the drawables with those keys.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;
use serde::Serialize;

use crate::{
    array::ArrayModel,
    geometry::{Primitive, Representation},
};

/// Something in the scene that has its own view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityId {
    Ground,
    Tile(u32),
}

/// The key of a set of drawables.
pub type DrawableKey = (EntityId, Representation);

/// What a renderer needs to change since the last tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneDiff {
    pub show: Vec<DrawableKey>,
    pub hide: Vec<DrawableKey>,
}

impl SceneDiff {
    pub fn is_empty(&self) -> bool {
        self.show.is_empty() && self.hide.is_empty()
    }
}

/// One visible set of drawables, for serialising.
#[derive(Debug, Clone, Serialize)]
pub struct SceneItem<'a> {
    pub entity: EntityId,
    pub representation: Representation,
    pub primitives: &'a [Primitive],
}

/// Every drawable of an array, and which of them the renderer was last told
/// to show.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    index: BTreeMap<DrawableKey, Vec<Primitive>>,
    shown: BTreeSet<DrawableKey>,
}

impl Scene {
    /// Index all of the drawables of `array`. Nothing is considered shown
    /// until the first [`Scene::tick`].
    pub fn new(array: &ArrayModel) -> Scene {
        let mut index = BTreeMap::new();
        let ground = array.ground();
        for repr in ground.representations() {
            index.insert((EntityId::Ground, repr), ground.primitives(repr));
        }
        for tile in array.tiles() {
            for repr in tile.representations() {
                index.insert((EntityId::Tile(tile.id), repr), tile.primitives(repr));
            }
        }
        trace!("Indexed {} drawable sets", index.len());
        Scene {
            index,
            shown: BTreeSet::new(),
        }
    }

    /// The keys that should be visible given the current view states in
    /// `array`.
    pub fn visible(array: &ArrayModel) -> BTreeSet<DrawableKey> {
        let ground = array.ground();
        let ground_keys = ground
            .visible_geometry(ground.view_state())
            .into_iter()
            .map(|repr| (EntityId::Ground, repr));
        let tile_keys = array.tiles().flat_map(|tile| {
            tile.visible_geometry(tile.view_state())
                .into_iter()
                .map(move |repr| (EntityId::Tile(tile.id), repr))
        });
        ground_keys.chain(tile_keys).collect()
    }

    /// Work out what has to be shown and hidden since the last tick, and
    /// remember the new visible set.
    pub fn tick(&mut self, array: &ArrayModel) -> SceneDiff {
        let visible = Scene::visible(array);
        let diff = SceneDiff {
            show: visible.difference(&self.shown).copied().collect(),
            hide: self.shown.difference(&visible).copied().collect(),
        };
        if !diff.is_empty() {
            trace!(
                "Scene tick: showing {}, hiding {}",
                diff.show.len(),
                diff.hide.len()
            );
        }
        self.shown = visible;
        diff
    }

    pub fn primitives(&self, key: &DrawableKey) -> Option<&[Primitive]> {
        self.index.get(key).map(|p| p.as_slice())
    }

    /// Number of indexed drawable sets.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The drawables shown as of the last tick.
    pub fn shown_items(&self) -> Vec<SceneItem> {
        self.shown
            .iter()
            .filter_map(|key| {
                self.index.get(key).map(|primitives| SceneItem {
                    entity: key.0,
                    representation: key.1,
                    primitives,
                })
            })
            .collect()
    }
}
