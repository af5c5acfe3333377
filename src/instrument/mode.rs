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

use crate::io::ConfigError;
use core::fmt;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of windows read in the plain multi-window modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence)]
pub enum MultiWindowCount {
    Two,
    Four,
    Six,
}

impl MultiWindowCount {
    pub const fn windows(&self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Six => 6,
        }
    }

    /// A window pair is one left and one right window on the same rows.
    pub const fn pairs(&self) -> u8 {
        self.windows() / 2
    }
}

/// Readout application of the camera
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ApplicationMode {
    /// Full frame, the chip is cleared before each exposure
    FullframeClear,
    /// Full frame, the readout of a frame overlaps the next exposure
    FullframeNoClear,
    /// Full frame including the overscan columns and rows
    FullframeOverscan,
    MultiWindow(MultiWindowCount),
    /// Single window pair with a clear before each exposure
    MultiWindowClear,
    /// Single window pair stacked in the storage area
    DriftMode,
    TimingTest,
}

impl ApplicationMode {
    /// Number of window pairs that this mode reads out.
    pub const fn window_pairs(&self) -> u8 {
        match self {
            Self::FullframeClear | Self::FullframeNoClear | Self::FullframeOverscan => 0,
            Self::MultiWindow(count) => count.pairs(),
            Self::MultiWindowClear | Self::DriftMode | Self::TimingTest => 1,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::FullframeClear => "Fullframe + clear",
            Self::FullframeNoClear => "Fullframe, no clear",
            Self::FullframeOverscan => "Fullframe with overscan",
            Self::MultiWindow(MultiWindowCount::Two) => "2 windows",
            Self::MultiWindow(MultiWindowCount::Four) => "4 windows",
            Self::MultiWindow(MultiWindowCount::Six) => "6 windows",
            Self::MultiWindowClear => "2 windows + clear",
            Self::DriftMode => "Drift mode",
            Self::TimingTest => "Timing test",
        }
    }

    /// Short identifier used for the hardware templates
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::FullframeClear => "ccd201_ff_clear",
            Self::FullframeNoClear => "ccd201_ff_noclear",
            Self::FullframeOverscan => "ccd201_ff_overscan",
            Self::MultiWindow(MultiWindowCount::Two) => "ccd201_2win",
            Self::MultiWindow(MultiWindowCount::Four) => "ccd201_4win",
            Self::MultiWindow(MultiWindowCount::Six) => "ccd201_6win",
            Self::MultiWindowClear => "ccd201_2win_clear",
            Self::DriftMode => "ccd201_drift",
            Self::TimingTest => "ccd201_timing",
        }
    }

    /// Returns true if the whole chip is read out, i.e. no window is used.
    pub const fn is_fullframe(&self) -> bool {
        self.window_pairs() == 0
    }

    /// Returns true if the chip is cleared before each exposure.
    pub const fn has_clear(&self) -> bool {
        matches!(
            self,
            Self::FullframeClear | Self::FullframeOverscan | Self::MultiWindowClear
        )
    }

    pub const fn is_drift(&self) -> bool {
        matches!(self, Self::DriftMode | Self::TimingTest)
    }
}

impl fmt::Display for ApplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ApplicationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        enum_iterator::all::<Self>()
            .find(|mode| mode.label().to_lowercase() == wanted || mode.slug() == wanted)
            .ok_or_else(|| ConfigError::UnknownMode {
                name: s.trim().to_string(),
            })
    }
}

impl TryFrom<String> for ApplicationMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApplicationMode> for String {
    fn from(mode: ApplicationMode) -> Self {
        mode.label().to_string()
    }
}
