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

use crate::geometry::GeometryError;
use crate::io::ConfigError;
use snafu::prelude::Snafu;

/// Errors returned by the engine.
///
/// Equality is only meaningful for [`EngineError::Geometry`]: a [`ConfigError`] never equals
/// anything, itself included, so match on the variant to check for a configuration error.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EngineError {
    /// The windows or binning cannot be read out; fix the setup and try again.
    #[snafu(display("cannot compute timing: {source}"))]
    Geometry { source: GeometryError },
    /// The configuration or one of the catalogues is inconsistent with the known modes, speeds or telescopes.
    #[snafu(display("instrument configuration is broken: {source}"))]
    Config { source: ConfigError },
}

impl EngineError {
    /// Returns true if the host must abort rather than carry on with its previous state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<GeometryError> for EngineError {
    fn from(source: GeometryError) -> Self {
        Self::Geometry { source }
    }
}

impl From<ConfigError> for EngineError {
    fn from(source: ConfigError) -> Self {
        Self::Config { source }
    }
}
