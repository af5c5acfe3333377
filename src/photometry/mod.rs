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
use typed_builder::TypedBuilder;

mod sensitivity;
pub use sensitivity::{estimate_sensitivity, PeakSeverity, SensitivityError, SensitivityReport};

/// Atmospheric extinction in magnitudes per airmass, in the u, g, r, i, z order
pub const EXTINCTION: [f64; 5] = [0.50, 0.19, 0.09, 0.05, 0.04];

/// Dark current, in counts per second per unbinned pixel
pub const DARK_RATE: f64 = 0.1;

/// Radius of the photometric aperture, in units of the seeing FWHM
pub const AP_SCALE: f64 = 1.5;

/// Sloan filter used for the observation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Band {
    U,
    G,
    R,
    I,
    Z,
}

impl Band {
    /// Index of this band in the per-band tables
    pub const fn index(&self) -> usize {
        match self {
            Self::U => 0,
            Self::G => 1,
            Self::R => 2,
            Self::I => 3,
            Self::Z => 4,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::U => "u",
            Self::G => "g",
            Self::R => "r",
            Self::I => "i",
            Self::Z => "z",
        }
    }

    pub const fn extinction(&self) -> f64 {
        EXTINCTION[self.index()]
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}'", self.name())
    }
}

impl FromStr for Band {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the primed Sloan notation, e.g. g'
        let wanted = s.trim().trim_end_matches('\'').to_lowercase();
        enum_iterator::all::<Self>()
            .find(|band| band.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownBand {
                name: s.trim().to_string(),
            })
    }
}

impl TryFrom<String> for Band {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Band> for String {
    fn from(band: Band) -> Self {
        band.name().to_string()
    }
}

/// Moon phase dependent sky brightness
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkyBrightness {
    Dark,
    Grey,
    Bright,
}

impl SkyBrightness {
    /// Sky surface brightness in magnitudes per square arcsecond, in the u, g, r, i, z order
    pub const fn magnitudes(&self) -> [f64; 5] {
        match self {
            Self::Dark => [22.4, 22.2, 21.4, 20.7, 20.3],
            Self::Grey => [21.4, 21.2, 20.4, 20.1, 19.9],
            Self::Bright => [18.4, 18.2, 17.4, 17.9, 18.3],
        }
    }

    pub const fn magnitude(&self, band: Band) -> f64 {
        self.magnitudes()[band.index()]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Grey => "grey",
            Self::Bright => "bright",
        }
    }
}

impl fmt::Display for SkyBrightness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SkyBrightness {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "grey" | "gray" => Ok(Self::Grey),
            "bright" => Ok(Self::Bright),
            _ => Err(ConfigError::UnknownSkyBrightness {
                name: s.trim().to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SkyBrightness {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SkyBrightness> for String {
    fn from(sky: SkyBrightness) -> Self {
        sky.name().to_string()
    }
}

/// Target and observing conditions used to estimate the signal-to-noise.
#[derive(Copy, Clone, Debug, PartialEq, TypedBuilder, Serialize, Deserialize)]
pub struct TargetContext {
    pub magnitude: f64,
    /// Seeing FWHM, in arcseconds
    #[builder(default = 1.0)]
    #[serde(default = "default_seeing")]
    pub seeing: f64,
    #[builder(default = 1.5)]
    #[serde(default = "default_airmass")]
    pub airmass: f64,
    #[builder(default = Band::G)]
    #[serde(default = "default_band")]
    pub band: Band,
    #[builder(default = SkyBrightness::Grey)]
    #[serde(default = "default_sky")]
    pub sky: SkyBrightness,
}

fn default_seeing() -> f64 {
    1.0
}

fn default_airmass() -> f64 {
    1.5
}

fn default_band() -> Band {
    Band::G
}

fn default_sky() -> SkyBrightness {
    SkyBrightness::Grey
}
