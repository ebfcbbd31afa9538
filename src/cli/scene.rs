// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write out the drawables that are visible in a view of the array.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use serde::Serialize;

use super::{common::ArrayArgs, TileviewError};
use crate::{
    io::{write_document, write_document_to, DocumentType, WriteDocumentError},
    scene::SceneItem,
    session::{Event, Session},
    view::{ViewState, VIEW_STATES_COMMA_SEPARATED},
};

lazy_static::lazy_static! {
    static ref VIEW_HELP: String =
        format!("The view to show. Overrides the initial view of the model arguments. Valid views are: {}", *VIEW_STATES_COMMA_SEPARATED);
}

/// Write out the primitives that a renderer would draw for a view of the
/// array.
#[derive(Parser, Debug)]
pub(super) struct SceneArgs {
    #[clap(flatten)]
    array_args: ArrayArgs,

    #[clap(long, help = VIEW_HELP.as_str())]
    view: Option<String>,

    /// Key presses to replay after the view is set, e.g. "sc". Keys that
    /// aren't bound to a view are reported and ignored.
    #[clap(long)]
    keys: Option<String>,

    /// The file to write the scene to (json or yaml). If not given, json is
    /// written to stdout.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SceneDoc<'a> {
    view: ViewState,
    items: Vec<SceneItem<'a>>,
}

impl SceneArgs {
    /// Without an output file, the scene is written as json to stdout.
    pub(super) fn writes_to_stdout(&self) -> bool {
        self.output.is_none()
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), TileviewError> {
        let SceneArgs {
            mut array_args,
            view,
            keys,
            output,
        } = self;
        if view.is_some() {
            array_args.model_args.initial_view = view;
        }
        let (array, params) = array_args.parse()?;

        if let Some(output) = &output {
            if DocumentType::from_path(output).is_none() {
                return Err(WriteDocumentError::UnknownType(output.display().to_string()).into());
            }
        }

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let mut session = Session::new(array, None, &params);
        for key in keys.iter().flat_map(|k| k.chars()) {
            session.handle(&Event::ViewKey(key));
        }
        let diff = session.tick();
        debug!(
            "Showing {} drawable sets, hiding {}",
            diff.show.len(),
            diff.hide.len()
        );

        let doc = SceneDoc {
            view: session.view_state(),
            items: session.scene().shown_items(),
        };
        let num_primitives: usize = doc.items.iter().map(|i| i.primitives.len()).sum();
        info!(
            "View '{}': {} drawable sets, {num_primitives} primitives",
            doc.view,
            doc.items.len()
        );

        match output {
            Some(output) => {
                write_document(&doc, &output)?;
                info!("Wrote {}", output.display());
            }
            None => {
                let stdout = std::io::stdout();
                write_document_to(&doc, DocumentType::Json, &mut stdout.lock())?;
            }
        }

        Ok(())
    }
}
