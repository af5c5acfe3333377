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

/*! # ultracam-timing

Cycle time and signal-to-noise of a frame-transfer CCD camera with a split serial register.

Given an [`InstrumentConfiguration`](instrument::InstrumentConfiguration) (windows, binning, readout speed,
exposure delay and application mode), the [`InstrumentEngine`] validates the window geometry, computes the
exact cycle time decomposition and, for a target on a given telescope, the expected counts and signal-to-noise.

The engine holds no state: every call works on an immutable configuration snapshot.
*/

/// Readout speeds, application modes, windows and the configuration snapshot fed to the engine.
pub mod instrument;

/// Telescope profiles (zero points, plate scale, pointing offsets) and the built-in catalogue.
pub mod telescope;

/// Window geometry validation and synchronisation of window starts onto the binning phase.
pub mod geometry;

/// Cycle time, exposure time and dead time of each readout mode.
pub mod timing;

/// Expected counts and signal-to-noise of a point source.
pub mod photometry;

/// Loading of catalogues and scenarios from YAML files.
pub mod io;

mod engine;
pub use self::engine::{EngineReport, InstrumentEngine};

mod errors;
/// Errors are split between geometry (recoverable) and configuration (fatal), cf. [`EngineError::is_fatal`].
pub use self::errors::EngineError;

#[macro_use]
extern crate log;

/// Re-export of everything needed to set up and run a computation
pub mod prelude {
    pub use crate::geometry::{
        config_is_synchronized, is_synchronized, synchronize, validate, GeometryError,
    };
    pub use crate::instrument::{
        ApplicationMode, InstrumentConfiguration, MultiWindowCount, ReadoutSpeed, Template,
        TemplateCatalogue, Window, WindowSet,
    };
    pub use crate::io::{ConfigError, ConfigRepr, Scenario};
    pub use crate::photometry::{
        estimate_sensitivity, Band, PeakSeverity, SensitivityError, SensitivityReport,
        SkyBrightness, TargetContext,
    };
    pub use crate::telescope::{TelescopeCatalogue, TelescopeProfile};
    pub use crate::timing::{compute_timing, DriftFigures, TimingReport};
    pub use crate::{EngineError, EngineReport, InstrumentEngine};
}
