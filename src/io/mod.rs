// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing documents (observations, configurations, cabling
//! rosters and scene dumps).
//!
//! Fetching documents over the network is left to other tools; everything here
//! works on files.

mod error;

pub use error::{ReadDocumentError, WriteDocumentError};

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, trace};
use serde::{de::DeserializeOwned, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

lazy_static::lazy_static! {
    pub static ref DOCUMENT_TYPES_COMMA_SEPARATED: String = DocumentType::iter().join(", ");
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum DocumentType {
    #[strum(serialize = "json")]
    Json,

    #[strum(serialize = "yaml", serialize = "yml")]
    Yaml,
}

impl DocumentType {
    /// Work out the type of a document from its file extension.
    pub fn from_path(path: &Path) -> Option<DocumentType> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| DocumentType::from_str(&e).ok())
    }
}

/// Read a document. If the file extension doesn't say what kind of document it
/// is, JSON and then YAML are attempted.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ReadDocumentError> {
    debug!("Attempting to read {}", path.display());
    let mut contents = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut contents)?;

    match DocumentType::from_path(path) {
        Some(t) => parse_document(&contents, t),

        None => {
            let json_err = match parse_document(&contents, DocumentType::Json) {
                Ok(doc) => return Ok(doc),
                Err(e) => {
                    trace!("Failed to read {} as json", path.display());
                    e.to_string()
                }
            };
            match parse_document(&contents, DocumentType::Yaml) {
                Ok(doc) => Ok(doc),
                Err(e) => Err(ReadDocumentError::FailedToDeserialise {
                    json_err,
                    yaml_err: e.to_string(),
                }),
            }
        }
    }
}

/// Parse a document from a string.
pub fn parse_document<T: DeserializeOwned>(
    contents: &str,
    doc_type: DocumentType,
) -> Result<T, ReadDocumentError> {
    let doc = match doc_type {
        DocumentType::Json => serde_json::from_str(contents)?,
        DocumentType::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(doc)
}

/// Write a document to a file. The type of the document is decided by the file
/// extension.
pub fn write_document<T: Serialize>(doc: &T, path: &Path) -> Result<(), WriteDocumentError> {
    let doc_type = DocumentType::from_path(path).ok_or_else(|| {
        WriteDocumentError::UnknownType(path.display().to_string())
    })?;
    let mut f = BufWriter::new(File::create(path)?);
    write_document_to(doc, doc_type, &mut f)?;
    f.flush()?;
    Ok(())
}

pub fn write_document_to<T: Serialize, W: Write>(
    doc: &T,
    doc_type: DocumentType,
    buf: &mut W,
) -> Result<(), WriteDocumentError> {
    match doc_type {
        DocumentType::Json => {
            serde_json::to_writer_pretty(&mut *buf, doc)?;
            writeln!(buf)?;
        }
        DocumentType::Yaml => serde_yaml::to_writer(buf, doc)?,
    }
    Ok(())
}
