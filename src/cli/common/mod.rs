// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Every `tileview` subcommand
//! builds an array from an observation and a configuration, so the document
//! and model arguments are shared between them.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::TileviewError;
use crate::{
    array::{ArrayModel, ConfigurationDoc, ObservationDoc},
    constants::{DEFAULT_STREAM, DELAY_STEP_PS, DIPOLE_SEPARATION_M, MAX_DELAY},
    delays::{DelayPolicy, Polarisation},
    io::read_document,
    params::ModelParams,
    view::{ViewState, VIEW_STATES_COMMA_SEPARATED},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All model arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref DIPOLE_SEPARATION_HELP: String =
        format!("The distance between neighbouring dipoles [metres]. Default: {DIPOLE_SEPARATION_M}");

    static ref DELAY_STEP_HELP: String =
        format!("The increment of the beamformer delay line [picoseconds]. Default: {DELAY_STEP_PS}");

    static ref STREAM_HELP: String =
        format!("The observation's RF stream to take the pointing and bad dipoles from. Default: {DEFAULT_STREAM}");

    static ref INITIAL_VIEW_HELP: String =
        format!("The view that tiles and the ground start in. Valid views are: {}. Default: {}", *VIEW_STATES_COMMA_SEPARATED, ViewState::default());
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(TileviewError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(TileviewError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(TileviewError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Arguments that control how the array model is built. These may also come
/// from an argument file.
#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct ModelArgs {
    #[clap(long, help = DIPOLE_SEPARATION_HELP.as_str(), help_heading = "MODEL")]
    pub(super) dipole_separation: Option<f64>,

    #[clap(long, help = DELAY_STEP_HELP.as_str(), help_heading = "MODEL")]
    pub(super) delay_step: Option<f64>,

    /// The speed of light [metres per picosecond]. Default: 0.000299798
    #[clap(long, help_heading = "MODEL")]
    pub(super) speed_of_light: Option<f64>,

    /// Raw delays that don't steer a dipole. Default: 0 32
    #[clap(long, multiple_values(true), help_heading = "MODEL")]
    pub(super) delay_sentinels: Option<Vec<u32>>,

    #[clap(long, help = STREAM_HELP.as_str(), help_heading = "MODEL")]
    pub(super) stream: Option<String>,

    /// The polarisations to make steering vectors for. Default: X
    #[clap(long, multiple_values(true), help_heading = "MODEL")]
    pub(super) steering_pols: Option<Vec<String>>,

    #[clap(long, help = INITIAL_VIEW_HELP.as_str(), help_heading = "MODEL")]
    pub(super) initial_view: Option<String>,
}

impl ModelArgs {
    /// Merge two sets of arguments, preferring `self`.
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            dipole_separation: self.dipole_separation.or(other.dipole_separation),
            delay_step: self.delay_step.or(other.delay_step),
            speed_of_light: self.speed_of_light.or(other.speed_of_light),
            delay_sentinels: self.delay_sentinels.or(other.delay_sentinels),
            stream: self.stream.or(other.stream),
            steering_pols: self.steering_pols.or(other.steering_pols),
            initial_view: self.initial_view.or(other.initial_view),
        }
    }

    pub(super) fn parse(self) -> Result<ModelParams, ModelArgsError> {
        let ModelArgs {
            dipole_separation,
            delay_step,
            speed_of_light,
            delay_sentinels,
            stream,
            steering_pols,
            initial_view,
        } = self;
        let defaults = ModelParams::default();

        let dipole_separation = dipole_separation.unwrap_or(defaults.dipole_separation);
        if !dipole_separation.is_finite() || dipole_separation <= 0.0 {
            return Err(ModelArgsError::NotPositive {
                name: "dipole separation",
                value: dipole_separation,
            });
        }

        let delay_step_ps = delay_step.unwrap_or(defaults.delay_policy.delay_step_ps);
        if !delay_step_ps.is_finite() || delay_step_ps <= 0.0 {
            return Err(ModelArgsError::NotPositive {
                name: "delay step",
                value: delay_step_ps,
            });
        }

        let speed_of_light = speed_of_light.unwrap_or(defaults.delay_policy.speed_of_light);
        if !speed_of_light.is_finite() || speed_of_light <= 0.0 {
            return Err(ModelArgsError::NotPositive {
                name: "speed of light",
                value: speed_of_light,
            });
        }

        let sentinels = match delay_sentinels {
            Some(sentinels) => {
                if let Some(&bad) = sentinels.iter().find(|&&s| s > MAX_DELAY) {
                    return Err(ModelArgsError::SentinelOutOfRange(bad));
                }
                if sentinels.is_empty() {
                    "No delay sentinels; every delay will make a steering vector".warn();
                }
                sentinels.into_iter().unique().collect()
            }
            None => defaults.delay_policy.sentinels,
        };

        let steering_polarisations = match steering_pols {
            Some(pols) => {
                let mut parsed = Vec::with_capacity(pols.len());
                for pol in pols {
                    let p = Polarisation::from_str(&pol.trim().to_uppercase())
                        .map_err(|_| ModelArgsError::BadPolarisation(pol.clone()))?;
                    if parsed.contains(&p) {
                        format!("Polarisation {p} was given more than once").warn();
                    } else {
                        parsed.push(p);
                    }
                }
                parsed
            }
            None => defaults.steering_polarisations,
        };

        let initial_view = match initial_view {
            Some(v) => ViewState::from_str(&v.trim().to_lowercase())
                .map_err(|_| ModelArgsError::BadView(v))?,
            None => defaults.initial_view,
        };

        let params = ModelParams {
            dipole_separation,
            delay_policy: DelayPolicy {
                delay_step_ps,
                speed_of_light,
                sentinels,
            },
            steering_polarisations,
            stream: stream.unwrap_or(defaults.stream),
            initial_view,
            key_map: defaults.key_map,
        };
        trace!("{params:#?}");
        Ok(params)
    }
}

#[derive(Error, Debug)]
pub(super) enum ModelArgsError {
    #[error("The {name} must be positive, but got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Delay sentinel {0} is bigger than the largest delay ({MAX_DELAY})")]
    SentinelOutOfRange(u32),

    #[error("Couldn't parse '{0}' as a polarisation; expected X or Y")]
    BadPolarisation(String),

    #[error("Couldn't parse '{0}' as a view; valid views are: {}", *VIEW_STATES_COMMA_SEPARATED)]
    BadView(String),
}

/// The documents an array is built from, and how to build it.
#[derive(Parser, Debug, Clone, Default)]
pub(super) struct ArrayArgs {
    /// Path to the observation document (json or yaml).
    #[clap(name = "OBSERVATION", parse(from_os_str))]
    pub(super) observation: PathBuf,

    /// Path to the array configuration document (json or yaml).
    #[clap(name = "CONFIGURATION", parse(from_os_str))]
    pub(super) configuration: PathBuf,

    #[clap(long = "params", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    pub(super) model_args: ModelArgs,
}

impl ArrayArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct, preferring CLI arguments over those in the file.
    pub(super) fn merge(self) -> Result<ArrayArgs, TileviewError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;
        if let Some(arg_file) = cli_args.args_file {
            let file_args: ModelArgs = unpack_arg_file!(arg_file);
            Ok(ArrayArgs {
                observation: cli_args.observation,
                configuration: cli_args.configuration,
                args_file: None,
                model_args: cli_args.model_args.merge(file_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Read the documents and build the array.
    pub(super) fn parse(self) -> Result<(ArrayModel, ModelParams), TileviewError> {
        let ArrayArgs {
            observation,
            configuration,
            args_file: _,
            model_args,
        } = self.merge()?;
        let params = model_args.parse()?;

        let obs: ObservationDoc = read_document(&observation)?;
        let con: ConfigurationDoc = read_document(&configuration)?;

        let mut printer = InfoPrinter::new("Array info".into());
        printer.push_block(vec![
            format!("Observation:   {}", observation.display()).into(),
            format!("Configuration: {}", configuration.display()).into(),
        ]);
        printer.push_block(vec![
            format!("Dipole separation: {} m", params.dipole_separation).into(),
            format!(
                "Delay step: {} ps, sentinels: [{}]",
                params.delay_policy.delay_step_ps,
                params.delay_policy.sentinels.iter().join(", ")
            )
            .into(),
            format!(
                "Steering polarisations: {}",
                params.steering_polarisations.iter().join(", ")
            )
            .into(),
        ]);

        let array = ArrayModel::new(&obs, &con, &params)?;
        printer.push_line(format!("RF stream '{}'", params.stream).into());
        match array.pointing() {
            Some(p) => printer.push_line(
                format!(
                    "Pointing: az {:.2}°, el {:.2}°",
                    p.az.to_degrees(),
                    p.el.to_degrees()
                )
                .into(),
            ),
            None => "The observation has no pointing; no steering vectors were made".warn(),
        }
        printer.push_line(format!("{} tiles", array.num_tiles()).into());
        printer.display();
        display_warnings();

        Ok((array, params))
    }
}
