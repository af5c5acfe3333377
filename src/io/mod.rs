/*
    ultracam-timing, readout cadence and sensitivity of a frame-transfer CCD camera
    Copyright (C) 2023-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::instrument::ApplicationMode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use snafu::prelude::*;
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Handles the scenario files read by the command line tool
pub mod scenario;
pub use scenario::{ResolvedScenario, Scenario};

/// Configuration errors are fatal: they mean that a catalogue or a scenario does not match what the engine knows.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file: {source}"))]
    ReadError { source: std::io::Error },
    #[snafu(display("failed to parse YAML configuration: {source}"))]
    ParseError { source: serde_yaml::Error },
    #[snafu(display("application `{name}` is unrecognised"))]
    UnknownMode { name: String },
    #[snafu(display("readout speed `{name}` is unrecognised, expected Turbo, Fast or Slow"))]
    UnknownSpeed { name: String },
    #[snafu(display("filter `{name}` is unrecognised, expected one of u, g, r, i, z"))]
    UnknownBand { name: String },
    #[snafu(display("sky brightness `{name}` is unrecognised, expected dark, grey or bright"))]
    UnknownSkyBrightness { name: String },
    #[snafu(display("template `{label}` is not in the catalogue, known templates: {known}"))]
    UnknownTemplate { label: String, known: String },
    #[snafu(display("telescope `{name}` was not found amongst the supported telescopes: {known}"))]
    UnknownTelescope { name: String, known: String },
    #[snafu(display(
        "template `{label}` declares {declared} window pairs but {mode} reads {required}"
    ))]
    TemplatePairMismatch {
        label: String,
        mode: ApplicationMode,
        declared: u8,
        required: u8,
    },
    #[snafu(display("{kind} `{name}` is defined more than once"))]
    DuplicateEntry { kind: &'static str, name: String },
    #[snafu(display("invalid configuration: {msg}"))]
    InvalidConfig { msg: String },
}

impl PartialEq for ConfigError {
    /// No two configuration errors match
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

pub trait ConfigRepr: Debug + Sized + Serialize + DeserializeOwned {
    /// Builds the configuration representation from the path to a yaml
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadSnafu)?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).context(ParseSnafu)
    }

    /// Builds a sequence of "Selves" from the provided path to a yaml
    fn load_many<P>(path: P) -> Result<Vec<Self>, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadSnafu)?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).context(ParseSnafu)
    }

    /// Builds "Self" from the provided string of a yaml
    fn loads(data: &str) -> Result<Self, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseSnafu)
    }

    /// Builds a sequence of "Selves" from the provided string of a yaml
    fn loads_many(data: &str) -> Result<Vec<Self>, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseSnafu)
    }
}
