// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `tileview`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `Tileview`, `Tileview::run`,
//! and `TileviewError`.

#[macro_use]
mod common;
mod cabling;
mod dipoles;
mod error;
mod scene;
mod summary;

pub use error::TileviewError;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Geometric model of Murchison Widefield Array (MWA) tiles, dipoles and cabling
Source: https://github.com/MWATelescope/mwa_tileview"#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Tileview {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    Summary(summary::SummaryArgs),

    Dipoles(dipoles::DipolesArgs),

    Scene(scene::SceneArgs),

    Cabling(cabling::CablingArgs),
}

impl Tileview {
    pub fn run(self) -> Result<(), TileviewError> {
        // Set up logging.
        let GlobalArgs { verbosity, dry_run } = self.global_opts;
        // A scene written to stdout must be the only thing there.
        let log_target = match &self.command {
            Command::Scene(args) if args.writes_to_stdout() => env_logger::Target::Stderr,
            _ => env_logger::Target::Stdout,
        };
        setup_logging(verbosity, log_target)?;

        // Print the version of tileview and its build-time information.
        let sub_command = match &self.command {
            Command::Summary(_) => "summary",
            Command::Dipoles(_) => "dipoles",
            Command::Scene(_) => "scene",
            Command::Cabling(_) => "cabling",
        };
        info!("tileview {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        match self.command {
            Command::Summary(args) => args.run(dry_run)?,
            Command::Dipoles(args) => args.run(dry_run)?,
            Command::Scene(args) => args.run(dry_run)?,
            Command::Cabling(args) => args.run(dry_run)?,
        }

        info!("tileview {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `target`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8, target: env_logger::Target) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(target);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
