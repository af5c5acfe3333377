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

use super::windows::window_read;
use super::{
    CycleBudget, DriftFigures, FRAME_TRANSFER_ROWS, INVERSION_DELAY, VCLOCK_FRAME, VCLOCK_STORAGE,
};
use crate::instrument::{InstrumentConfiguration, Window};

/// Window heights for which the storage area is filled with no pipe shift left over.
pub const SPECIAL_NY: [u32; 19] = [
    8, 10, 13, 18, 21, 24, 31, 38, 41, 49, 54, 60, 68, 79, 93, 114, 147, 206, 344,
];

/// Number of windows of height `ny` stacked in the storage area and the rows left over.
pub fn pipe_shift(ny: u32) -> DriftFigures {
    let ny = ny.clamp(1, FRAME_TRANSFER_ROWS);
    // Rounds 1033 / (2 ny) + 1/2 down
    let storage_windows = (FRAME_TRANSFER_ROWS + ny) / (2 * ny);
    DriftFigures {
        pipe_shift: FRAME_TRANSFER_ROWS - (2 * storage_windows - 1) * ny,
        storage_windows,
    }
}

/// Returns the entry of [`SPECIAL_NY`] closest to `ny`, the smaller one on ties.
pub fn nearest_special_ny(ny: u32) -> u32 {
    SPECIAL_NY
        .iter()
        .copied()
        .min_by_key(|special| special.abs_diff(ny))
        .unwrap_or(ny)
}

/// Drift mode: the windows drift down the storage area, only the first window pair is used.
///
/// In the timing test, the pipe shift is spread over all the stacked windows.
pub(crate) fn drift(config: &InstrumentConfiguration, timing_test: bool) -> CycleBudget {
    let window = match config.windows.first() {
        Some(window) => *window,
        None => {
            warn!("{} configured without a window, using the default one", config.mode);
            Window::default_pair(0)
        }
    };

    let figures = pipe_shift(window.ny);
    let frame_transfer =
        f64::from(window.yend().saturating_sub(1)) * VCLOCK_FRAME;
    let read = window_read(config, &window);
    let mut pipe_delay = f64::from(figures.pipe_shift) * VCLOCK_STORAGE;
    if timing_test {
        pipe_delay /= f64::from(figures.storage_windows);
    }

    let cycle = INVERSION_DELAY + pipe_delay + config.exposure_us() + frame_transfer + read;

    CycleBudget {
        cycle,
        exposure: cycle - frame_transfer,
        readout: read + pipe_delay,
        frame_transfer,
        clear: 0.0,
        drift: Some(figures),
    }
}
