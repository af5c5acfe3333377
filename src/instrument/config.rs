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

use super::{ApplicationMode, ReadoutSpeed, WindowSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

/// Snapshot of the instrument setup, the sole input of the engine.
///
/// The exposure delay is counted in units of 0.1 ms, as sent to the controller.
#[derive(Clone, Debug, PartialEq, TypedBuilder, Serialize, Deserialize)]
pub struct InstrumentConfiguration {
    pub mode: ApplicationMode,
    #[builder(default = ReadoutSpeed::Slow)]
    pub speed: ReadoutSpeed,
    #[builder(default = 1)]
    pub xbin: u32,
    #[builder(default = 1)]
    pub ybin: u32,
    #[builder(default = 0)]
    pub exposure: u32,
    #[builder(default, setter(into))]
    pub windows: WindowSet,
}

impl InstrumentConfiguration {
    /// Exposure delay in microseconds
    pub fn exposure_us(&self) -> f64 {
        100.0 * f64::from(self.exposure)
    }

    /// Exposure delay in seconds
    pub fn exposure_s(&self) -> f64 {
        f64::from(self.exposure) / 10_000.0
    }

    /// Returns a copy of this configuration in another mode, with the windows resized for it.
    pub fn with_mode(&self, mode: ApplicationMode) -> Self {
        let mut me = self.clone();
        me.windows = self.windows.resized_for(mode);
        me.mode = mode;
        me
    }

    /// Returns a copy of this configuration with the provided windows.
    pub fn with_windows(&self, windows: WindowSet) -> Self {
        let mut me = self.clone();
        me.windows = windows;
        me
    }

    /// Returns a copy of this configuration with the provided exposure delay (0.1 ms units).
    pub fn with_exposure(&self, exposure: u32) -> Self {
        let mut me = self.clone();
        me.exposure = exposure;
        me
    }
}

impl fmt::Display for InstrumentConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at {} speed, binned {}x{}, exposure delay {} s, {} window pair(s)",
            self.mode,
            self.speed,
            self.xbin,
            self.ybin,
            self.exposure_s(),
            self.windows.len()
        )
    }
}
