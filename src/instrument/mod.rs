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

mod config;
mod mode;
mod readout;
mod template;
mod window;

pub use config::InstrumentConfiguration;
pub use mode::{ApplicationMode, MultiWindowCount};
pub use readout::ReadoutSpeed;
pub use template::{Template, TemplateCatalogue};
pub use window::{Window, WindowSet};

/// Number of columns of the chip
pub const CHIP_COLUMNS: u32 = 1024;
/// Number of rows of the image area
pub const CHIP_ROWS: u32 = 1024;
/// Columns read out by each half of the serial register
pub const HALF_COLUMNS: u32 = 512;
/// Window starts are synchronised with respect to this pixel, the first column of the right half.
pub const SYNC_REFERENCE: u32 = 513;
pub const MAX_BIN: u32 = 8;
pub const MAX_WINDOW_PAIRS: usize = 3;
