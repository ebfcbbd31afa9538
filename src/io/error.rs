// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading and writing documents.

use thiserror::Error;

use super::DOCUMENT_TYPES_COMMA_SEPARATED;

#[derive(Error, Debug)]
pub enum ReadDocumentError {
    #[error("Couldn't read the document as json ({json_err}) or yaml ({yaml_err})")]
    FailedToDeserialise { json_err: String, yaml_err: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum WriteDocumentError {
    #[error("Couldn't work out the document type of '{0}'; supported extensions: {}", *DOCUMENT_TYPES_COMMA_SEPARATED)]
    UnknownType(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}
