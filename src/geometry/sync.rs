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

use super::frame_extent;
use crate::instrument::{
    InstrumentConfiguration, Window, WindowSet, CHIP_COLUMNS, CHIP_ROWS, SYNC_REFERENCE,
};

/// Moves a start coordinate onto the closest binning phase of the reference pixel, staying
/// within `[min, max]`.
///
/// Ties go to the lower start.
pub fn sync_start(start: u32, bin: u32, min: u32, max: u32) -> u32 {
    let bin = i64::from(bin.max(1));
    let reference = i64::from(SYNC_REFERENCE);
    let offset = reference - i64::from(start);
    // floor(offset / bin + 1/2), exactly
    let steps = (2 * offset + bin).div_euclid(2 * bin);
    let mut synced = reference - bin * steps;
    if synced < i64::from(min) {
        synced += bin;
    }
    if synced > i64::from(max) {
        synced -= bin;
    }
    synced.clamp(0, i64::from(u32::MAX)) as u32
}

/// Returns a copy of the windows with all their starts synchronised to the binning.
pub fn synchronize(windows: &WindowSet, xbin: u32, ybin: u32) -> WindowSet {
    windows
        .iter()
        .map(|window| Window {
            ystart: sync_start(window.ystart, ybin, 1, CHIP_ROWS),
            xleft: sync_start(window.xleft, xbin, 1, SYNC_REFERENCE - 1),
            xright: sync_start(window.xright, xbin, SYNC_REFERENCE, CHIP_COLUMNS),
            ..*window
        })
        .collect()
}

fn in_phase(start: u32, bin: u32) -> bool {
    (i64::from(SYNC_REFERENCE) - i64::from(start)) % i64::from(bin.max(1)) == 0
}

/// Returns true if binned pixels of every window line up with those of a full frame.
pub fn is_synchronized(windows: &WindowSet, xbin: u32, ybin: u32) -> bool {
    windows.iter().all(|window| {
        in_phase(window.ystart, ybin) && in_phase(window.xleft, xbin) && in_phase(window.xright, xbin)
    })
}

/// Returns true if there is nothing left to synchronise in this configuration.
///
/// Full frame modes cannot be synchronised: they only require the binning to divide the frame.
pub fn config_is_synchronized(config: &InstrumentConfiguration) -> bool {
    match frame_extent(config.mode) {
        Some((columns, rows)) => {
            config.xbin > 0
                && config.ybin > 0
                && columns % config.xbin == 0
                && rows % config.ybin == 0
        }
        None => is_synchronized(&config.windows, config.xbin, config.ybin),
    }
}
