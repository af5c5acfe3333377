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
use crate::instrument::{InstrumentConfiguration, Window, CHIP_COLUMNS};

const CLEAR_ROWS: f64 = 1033.0 + 1027.0;
/// Extra serial clocks on each line, to flush the register
const SERIAL_OVERHEAD: u32 = 8;

/// Serial clocks needed to read one line of a window pair.
///
/// Both halves of the register shift together, so the window closest to its output is
/// shifted until the other one reaches its own output.
pub(crate) fn horizontal_clocks(window: &Window) -> u32 {
    let left_gap = i64::from(window.xleft) - 1;
    let right_gap =
        i64::from(CHIP_COLUMNS) - i64::from(window.xright) - i64::from(window.nx) + 1;
    let diff_shift = (left_gap - right_gap).abs();
    let near_gap = if left_gap > right_gap {
        right_gap
    } else {
        left_gap
    };
    let clocks = i64::from(window.nx) + diff_shift + near_gap + i64::from(SERIAL_OVERHEAD);
    u32::try_from(clocks.max(0)).unwrap_or(u32::MAX)
}

/// Time to read all the binned lines of a window pair (µs)
pub(crate) fn window_read(config: &InstrumentConfiguration, window: &Window) -> f64 {
    let xbin = config.xbin.max(1);
    let ybin = config.ybin.max(1);
    let line_read = VCLOCK_STORAGE * f64::from(ybin)
        + f64::from(horizontal_clocks(window)) * HCLOCK
        + f64::from(window.nx / xbin + 2) * video_time(config);
    f64::from(window.ny / ybin) * line_read
}

/// Multi-window readout, optionally clearing the chip before each exposure.
///
/// Without the clear, the windows are read out during the following exposure.
pub(crate) fn multi_window(config: &InstrumentConfiguration, clear_first: bool) -> CycleBudget {
    let clear = if clear_first {
        CLEAR_ROWS * VCLOCK_FRAME
    } else {
        0.0
    };
    let frame_transfer = f64::from(FRAME_TRANSFER_ROWS) * VCLOCK_FRAME;
    let exposure_us = config.exposure_us();

    let mut cycle = INVERSION_DELAY + exposure_us + frame_transfer + clear;
    let mut readout = 0.0;
    // Rows are shifted from the end of the previous window up to the start of the next one
    let mut previous_end = 1_i64;
    for window in &config.windows {
        let y_shift = (i64::from(window.ystart) - previous_end) as f64 * VCLOCK_STORAGE;
        let read = window_read(config, window);
        trace!(
            "window at row {}: shift {y_shift:.2} µs, read {read:.2} µs",
            window.ystart
        );
        cycle += y_shift + read;
        readout += y_shift + read;
        previous_end = i64::from(window.yend());
    }

    let exposure = if clear_first {
        exposure_us
    } else {
        cycle - frame_transfer
    };

    CycleBudget {
        cycle,
        exposure,
        readout,
        frame_transfer,
        clear,
        drift: None,
    }
}

#[cfg(test)]
mod ut_windows {
    use super::*;
    use crate::instrument::{ApplicationMode, MultiWindowCount, ReadoutSpeed};
    use approx::assert_abs_diff_eq;

    #[test]
    fn serial_clocks() {
        assert_eq!(horizontal_clocks(&Window::new(1, 101, 613, 100, 100)), 420);
        assert_eq!(horizontal_clocks(&Window::new(201, 1, 825, 200, 50)), 208);
        // Symmetric windows need no extra shift
        assert_eq!(horizontal_clocks(&Window::new(1, 1, 1015, 10, 10)), 18);
    }

    #[test]
    fn two_windows_fast() {
        let cfg = InstrumentConfiguration::builder()
            .mode(ApplicationMode::MultiWindow(MultiWindowCount::Two))
            .speed(ReadoutSpeed::Fast)
            .exposure(50)
            .windows(vec![Window::new(1, 101, 613, 100, 100)])
            .build();
        let b = multi_window(&cfg, false);
        assert_abs_diff_eq!(b.cycle, 108_788.9, epsilon = 1e-6);
        assert_abs_diff_eq!(b.exposure, 84_720.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.readout, 79_610.0, epsilon = 1e-6);
        assert_eq!(b.clear, 0.0);
    }

    #[test]
    fn clear_variant_exposes_the_delay_only() {
        let cfg = InstrumentConfiguration::builder()
            .mode(ApplicationMode::MultiWindowClear)
            .speed(ReadoutSpeed::Turbo)
            .exposure(10)
            .windows(vec![Window::new(1, 101, 613, 100, 100)])
            .build();
        let b = multi_window(&cfg, true);
        assert_eq!(b.exposure, 1000.0);
        assert_abs_diff_eq!(b.cycle, 126_674.9, epsilon = 1e-6);
        assert_abs_diff_eq!(b.readout, 53_498.0, epsilon = 1e-6);
    }
}
