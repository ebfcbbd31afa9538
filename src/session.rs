// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
An interactive session: the array, its view, its cabling and its scene.

Input arrives as [`Event`]s. Handling an event never tears down the session;
a bad event is logged and the last valid state is kept.
 */

use log::{debug, warn};
use thiserror::Error;

use crate::{
    array::ArrayModel,
    cabling::{CablingError, CablingGraph},
    geometry::Colour,
    params::ModelParams,
    scene::{Scene, SceneDiff},
    view::{ViewError, ViewState, ViewStateMachine},
};

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key press that may select a view.
    ViewKey(char),

    /// A change to a pad's cables. Without an input, the whole pad is reset
    /// (or fixed, if `fixed` is set).
    CableUpdate {
        pad: String,
        input: Option<String>,
        colour: Colour,
        fixed: bool,
    },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Cabling(#[from] CablingError),

    #[error("Got a cable update, but no cabling roster was loaded")]
    NoCabling,
}

#[derive(Debug)]
pub struct Session {
    array: ArrayModel,
    view: ViewStateMachine,
    cabling: Option<CablingGraph>,
    scene: Scene,
}

impl Session {
    pub fn new(
        mut array: ArrayModel,
        cabling: Option<CablingGraph>,
        params: &ModelParams,
    ) -> Session {
        let mut view = ViewStateMachine::new(params.key_map.clone());
        view.transition(params.initial_view, &mut array);
        let scene = Scene::new(&array);
        Session {
            array,
            view,
            cabling,
            scene,
        }
    }

    pub fn array(&self) -> &ArrayModel {
        &self.array
    }

    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    pub fn cabling(&self) -> Option<&CablingGraph> {
        self.cabling.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Apply an event. On error, nothing changes.
    pub fn dispatch(&mut self, event: &Event) -> Result<(), SessionError> {
        match event {
            Event::ViewKey(key) => {
                self.view.on_view_key(*key, &mut self.array)?;
            }

            Event::CableUpdate {
                pad,
                input,
                colour,
                fixed,
            } => {
                let cabling = self.cabling.as_mut().ok_or(SessionError::NoCabling)?;
                cabling.update(pad, input.as_deref(), *colour, *fixed)?;
            }
        }
        Ok(())
    }

    /// Apply an event, logging (rather than returning) any error.
    pub fn handle(&mut self, event: &Event) {
        debug!("Handling {event:?}");
        if let Err(e) = self.dispatch(event) {
            warn!("{e}");
        }
    }

    /// What the renderer should show and hide since the last tick.
    pub fn tick(&mut self) -> SceneDiff {
        self.scene.tick(&self.array)
    }
}
