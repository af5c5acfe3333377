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

use crate::instrument::{ApplicationMode, CHIP_ROWS, HALF_COLUMNS};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;

mod sync;
mod validator;

pub use sync::{config_is_synchronized, is_synchronized, sync_start, synchronize};
pub use validator::validate;

/// Columns read by each half of the serial register in overscan mode
pub const OVERSCAN_COLUMNS: u32 = 540;
/// Rows read in overscan mode
pub const OVERSCAN_ROWS: u32 = 1032;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Columns (per readout half) and rows read by a full frame mode, `None` for windowed modes.
pub const fn frame_extent(mode: ApplicationMode) -> Option<(u32, u32)> {
    match mode {
        ApplicationMode::FullframeClear | ApplicationMode::FullframeNoClear => {
            Some((HALF_COLUMNS, CHIP_ROWS))
        }
        ApplicationMode::FullframeOverscan => Some((OVERSCAN_COLUMNS, OVERSCAN_ROWS)),
        _ => None,
    }
}

/// A setup that the controller cannot read out. Windows are numbered from 1.
///
/// These errors are recoverable: the previous setup remains valid.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GeometryError {
    #[snafu(display("{axis} binning must be between 1 and 8, got {bin}"))]
    BinningOutOfRange { axis: Axis, bin: u32 },
    #[snafu(display("{mode} reads {expected} window pair(s) but {found} were provided"))]
    WindowCount {
        mode: ApplicationMode,
        expected: usize,
        found: usize,
    },
    #[snafu(display("window {window}: {field} must be positive"))]
    ZeroExtent { window: usize, field: &'static str },
    #[snafu(display(
        "window {window}: {side} spans {start} to {end}, outside of {min} to {max}"
    ))]
    OutOfBounds {
        window: usize,
        side: &'static str,
        start: u32,
        end: u32,
        min: u32,
        max: u32,
    },
    #[snafu(display("window {window}: {axis} size {extent} is not a multiple of the binning {bin}"))]
    Unbinnable {
        window: usize,
        axis: Axis,
        extent: u32,
        bin: u32,
    },
    #[snafu(display(
        "window {window} starts at row {ystart}, overlapping the previous window which ends before row {previous_end}"
    ))]
    Overlap {
        window: usize,
        ystart: u32,
        previous_end: u32,
    },
    #[snafu(display("{mode} reads {extent} pixels along {axis}, which {bin} does not divide"))]
    FrameBinning {
        mode: ApplicationMode,
        axis: Axis,
        extent: u32,
        bin: u32,
    },
}
