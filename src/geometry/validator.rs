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

use super::*;
use crate::instrument::{InstrumentConfiguration, Window, CHIP_COLUMNS, MAX_BIN, SYNC_REFERENCE};
use snafu::ensure;

/// Checks that the controller can read out this configuration. Never modifies it.
pub fn validate(config: &InstrumentConfiguration) -> Result<(), GeometryError> {
    let (xbin, ybin) = (config.xbin, config.ybin);
    ensure!(
        (1..=MAX_BIN).contains(&xbin),
        BinningOutOfRangeSnafu {
            axis: Axis::X,
            bin: xbin
        }
    );
    ensure!(
        (1..=MAX_BIN).contains(&ybin),
        BinningOutOfRangeSnafu {
            axis: Axis::Y,
            bin: ybin
        }
    );

    let expected = usize::from(config.mode.window_pairs());
    ensure!(
        config.windows.len() == expected,
        WindowCountSnafu {
            mode: config.mode,
            expected,
            found: config.windows.len()
        }
    );

    if let Some((columns, rows)) = frame_extent(config.mode) {
        ensure!(
            columns % xbin == 0,
            FrameBinningSnafu {
                mode: config.mode,
                axis: Axis::X,
                extent: columns,
                bin: xbin
            }
        );
        ensure!(
            rows % ybin == 0,
            FrameBinningSnafu {
                mode: config.mode,
                axis: Axis::Y,
                extent: rows,
                bin: ybin
            }
        );
        return Ok(());
    }

    let mut previous: Option<&Window> = None;
    for (idx, window) in config.windows.iter().enumerate() {
        let number = idx + 1;
        check_window(number, window, xbin, ybin)?;
        if let Some(prev) = previous {
            ensure!(
                window.ystart >= prev.yend(),
                OverlapSnafu {
                    window: number,
                    ystart: window.ystart,
                    previous_end: prev.yend()
                }
            );
        }
        previous = Some(window);
    }

    Ok(())
}

fn check_window(number: usize, window: &Window, xbin: u32, ybin: u32) -> Result<(), GeometryError> {
    for (field, value) in [
        ("ystart", window.ystart),
        ("xleft", window.xleft),
        ("xright", window.xright),
        ("nx", window.nx),
        ("ny", window.ny),
    ] {
        ensure!(
            value > 0,
            ZeroExtentSnafu {
                window: number,
                field
            }
        );
    }

    let bounds = [
        ("rows", window.ystart, window.yend() - 1, 1, CHIP_ROWS),
        (
            "left window",
            window.xleft,
            window.xleft_end(),
            1,
            SYNC_REFERENCE - 1,
        ),
        (
            "right window",
            window.xright,
            window.xright_end(),
            SYNC_REFERENCE,
            CHIP_COLUMNS,
        ),
    ];
    for (side, start, end, min, max) in bounds {
        ensure!(
            start >= min && end <= max,
            OutOfBoundsSnafu {
                window: number,
                side,
                start,
                end,
                min,
                max
            }
        );
    }

    ensure!(
        window.nx % xbin == 0,
        UnbinnableSnafu {
            window: number,
            axis: Axis::X,
            extent: window.nx,
            bin: xbin
        }
    );
    ensure!(
        window.ny % ybin == 0,
        UnbinnableSnafu {
            window: number,
            axis: Axis::Y,
            extent: window.ny,
            bin: ybin
        }
    );
    Ok(())
}
