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

use crate::instrument::{ApplicationMode, InstrumentConfiguration};
use serde::{Deserialize, Serialize};
use std::fmt;

mod drift;
mod fullframe;
mod windows;

pub use drift::{nearest_special_ny, pipe_shift, SPECIAL_NY};

/// Delay between the end of an exposure and the start of the frame transfer (µs)
pub const INVERSION_DELAY: f64 = 110.0;
/// Time to shift one row of the image area (µs)
pub const VCLOCK_FRAME: f64 = 23.3;
/// Time to shift one row of the storage area (µs)
pub const VCLOCK_STORAGE: f64 = 23.3;
/// Time to shift one pixel along the serial register (µs)
pub const HCLOCK: f64 = 0.48;
/// Time for the video chain to switch between two pixels (µs)
pub const SWITCH_TIME: f64 = 1.2;
/// Rows shifted by a frame transfer, image area and guard rows
pub const FRAME_TRANSFER_ROWS: u32 = 1033;

/// Storage geometry of drift mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftFigures {
    /// Extra rows shifted on each cycle, in unbinned pixels
    pub pipe_shift: u32,
    /// Number of windows stacked in the storage area
    pub storage_windows: u32,
}

/// Cycle decomposition of one readout mode, all in seconds except where noted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    pub mode: ApplicationMode,
    /// in Hz
    pub frame_rate: f64,
    pub cycle_time: f64,
    pub exposure_time: f64,
    pub dead_time: f64,
    pub readout_time: f64,
    pub frame_transfer_time: f64,
    pub clear_time: f64,
    /// Percentage of the cycle spent exposing
    pub duty_cycle: f64,
    /// Only set in drift mode and its timing test
    pub drift: Option<DriftFigures>,
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: cycle {:.6} s ({:.3} Hz), exposure {:.6} s, dead {:.6} s, duty cycle {:.1} %",
            self.mode,
            self.cycle_time,
            self.frame_rate,
            self.exposure_time,
            self.dead_time,
            self.duty_cycle
        )
    }
}

/// Intermediate timing figures, in microseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct CycleBudget {
    pub cycle: f64,
    pub exposure: f64,
    pub readout: f64,
    pub frame_transfer: f64,
    pub clear: f64,
    pub drift: Option<DriftFigures>,
}

impl CycleBudget {
    fn into_report(self, mode: ApplicationMode) -> TimingReport {
        let cycle_time = self.cycle / 1e6;
        let exposure_time = self.exposure / 1e6;
        TimingReport {
            mode,
            frame_rate: 1.0 / cycle_time,
            cycle_time,
            exposure_time,
            dead_time: cycle_time - exposure_time,
            readout_time: self.readout / 1e6,
            frame_transfer_time: self.frame_transfer / 1e6,
            clear_time: self.clear / 1e6,
            duty_cycle: 100.0 * exposure_time / cycle_time,
            drift: self.drift,
        }
    }
}

/// Time to digitise one pixel at the configured speed (µs)
pub(crate) fn video_time(config: &InstrumentConfiguration) -> f64 {
    config.speed.cds_us() + SWITCH_TIME
}

/// Computes the cycle time decomposition of the provided configuration.
///
/// The configuration is expected to have passed the geometry validation: the timing of an
/// invalid setup is meaningless, although this function never fails.
pub fn compute_timing(config: &InstrumentConfiguration) -> TimingReport {
    let budget = match config.mode {
        ApplicationMode::FullframeClear => fullframe::with_clear(config),
        ApplicationMode::FullframeNoClear => fullframe::without_clear(config),
        ApplicationMode::FullframeOverscan => fullframe::overscan(config),
        ApplicationMode::MultiWindow(_) => windows::multi_window(config, false),
        ApplicationMode::MultiWindowClear => windows::multi_window(config, true),
        ApplicationMode::DriftMode => drift::drift(config, false),
        ApplicationMode::TimingTest => drift::drift(config, true),
    };

    let report = budget.into_report(config.mode);
    debug!("{report}");
    report
}
