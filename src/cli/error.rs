// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all tileview-related errors. This should be the *only*
//! error enum that is publicly visible from the command line.

use thiserror::Error;

use super::common::ModelArgsError;
use crate::{
    array::ArrayModelError,
    cabling::CablingError,
    geometry::ParseColourError,
    io::{ReadDocumentError, WriteDocumentError},
    session::SessionError,
    view::ViewError,
};

/// The *only* publicly visible error from tileview.
#[derive(Error, Debug)]
pub enum TileviewError {
    /// An error related to argument files.
    #[error("{0}\n\nArgument files must be toml or json and contain only the model arguments")]
    ArgFile(String),

    /// Invalid model arguments.
    #[error("{0}")]
    ModelArgs(String),

    /// An error reading an observation, configuration or roster document.
    #[error("{0}")]
    ReadDocument(String),

    /// An error writing a document.
    #[error("{0}")]
    WriteDocument(String),

    /// The documents couldn't be turned into an array.
    #[error("{0}\n\nTiles are built from the configuration document; check it against the observation")]
    ArrayModel(String),

    /// An error related to the cabling roster.
    #[error("{0}")]
    Cabling(String),

    /// An error related to views.
    #[error("{0}")]
    View(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<ModelArgsError> for TileviewError {
    fn from(e: ModelArgsError) -> Self {
        Self::ModelArgs(e.to_string())
    }
}

impl From<ReadDocumentError> for TileviewError {
    fn from(e: ReadDocumentError) -> Self {
        let s = e.to_string();
        match e {
            ReadDocumentError::FailedToDeserialise { .. }
            | ReadDocumentError::Json(_)
            | ReadDocumentError::Yaml(_) => Self::ReadDocument(s),
            ReadDocumentError::IO(e) => Self::from(e),
        }
    }
}

impl From<WriteDocumentError> for TileviewError {
    fn from(e: WriteDocumentError) -> Self {
        let s = e.to_string();
        match e {
            WriteDocumentError::UnknownType(_)
            | WriteDocumentError::Json(_)
            | WriteDocumentError::Yaml(_) => Self::WriteDocument(s),
            WriteDocumentError::IO(e) => Self::from(e),
        }
    }
}

impl From<ArrayModelError> for TileviewError {
    fn from(e: ArrayModelError) -> Self {
        Self::ArrayModel(e.to_string())
    }
}

impl From<CablingError> for TileviewError {
    fn from(e: CablingError) -> Self {
        Self::Cabling(e.to_string())
    }
}

impl From<ViewError> for TileviewError {
    fn from(e: ViewError) -> Self {
        Self::View(e.to_string())
    }
}

impl From<SessionError> for TileviewError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::View(e) => Self::from(e),
            SessionError::Cabling(e) => Self::from(e),
            SessionError::NoCabling => Self::Cabling(e.to_string()),
        }
    }
}

impl From<ParseColourError> for TileviewError {
    fn from(e: ParseColourError) -> Self {
        Self::Cabling(e.to_string())
    }
}

impl From<log::SetLoggerError> for TileviewError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(format!("Failed to initialise logging: {e}"))
    }
}

impl From<std::io::Error> for TileviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
