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

use super::{
    video_time, CycleBudget, FRAME_TRANSFER_ROWS, HCLOCK, INVERSION_DELAY, VCLOCK_FRAME,
    VCLOCK_STORAGE,
};
use crate::geometry::{OVERSCAN_COLUMNS, OVERSCAN_ROWS};
use crate::instrument::{InstrumentConfiguration, CHIP_ROWS, HALF_COLUMNS};

/// Rows shifted to clear the chip before a full frame exposure
const CLEAR_ROWS: f64 = 1033.0 + 1027.0;
/// Rows shifted to clear the chip before an overscan exposure
const OVERSCAN_CLEAR_ROWS: f64 = 1033.0 + 1032.0;
/// Serial register length read for each row of a full frame
const FULLFRAME_HCLOCKS: f64 = 536.0;

fn frame_transfer() -> f64 {
    f64::from(FRAME_TRANSFER_ROWS) * VCLOCK_FRAME
}

/// Readout of the whole image area
fn fullframe_readout(config: &InstrumentConfiguration) -> f64 {
    let xbin = f64::from(config.xbin.max(1));
    let ybin = f64::from(config.ybin.max(1));
    let line = VCLOCK_STORAGE * ybin
        + FULLFRAME_HCLOCKS * HCLOCK
        + (f64::from(HALF_COLUMNS) / xbin + 2.0) * video_time(config);
    line * (f64::from(CHIP_ROWS) / ybin)
}

pub(crate) fn with_clear(config: &InstrumentConfiguration) -> CycleBudget {
    let frame_transfer = frame_transfer();
    let readout = fullframe_readout(config);
    let clear = CLEAR_ROWS * VCLOCK_FRAME;
    let exposure = config.exposure_us();

    CycleBudget {
        cycle: INVERSION_DELAY + exposure + clear + frame_transfer + readout,
        exposure,
        readout,
        frame_transfer,
        clear,
        drift: None,
    }
}

/// The readout of a frame happens during the next exposure.
pub(crate) fn without_clear(config: &InstrumentConfiguration) -> CycleBudget {
    let frame_transfer = frame_transfer();
    let readout = fullframe_readout(config);
    let cycle = INVERSION_DELAY + config.exposure_us() + frame_transfer + readout;

    CycleBudget {
        cycle,
        exposure: cycle - frame_transfer,
        readout,
        frame_transfer,
        clear: 0.0,
        drift: None,
    }
}

pub(crate) fn overscan(config: &InstrumentConfiguration) -> CycleBudget {
    let xbin = config.xbin.max(1);
    let ybin = config.ybin.max(1);
    let frame_transfer = frame_transfer();
    let clear = OVERSCAN_CLEAR_ROWS * VCLOCK_FRAME;
    let line = VCLOCK_STORAGE * f64::from(ybin)
        + f64::from(OVERSCAN_COLUMNS) * HCLOCK
        + (f64::from(OVERSCAN_COLUMNS) / f64::from(xbin) + 2.0) * video_time(config);
    // Only complete binned rows are read
    let readout = line * f64::from(OVERSCAN_ROWS / ybin);
    let exposure = config.exposure_us();

    CycleBudget {
        cycle: INVERSION_DELAY + exposure + clear + frame_transfer + readout,
        exposure,
        readout,
        frame_transfer,
        clear,
        drift: None,
    }
}
