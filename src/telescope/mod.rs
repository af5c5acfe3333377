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

use crate::io::{ConfigError, ConfigRepr, DuplicateEntrySnafu, InvalidConfigSnafu};
use crate::photometry::Band;
use serde_derive::{Deserialize, Serialize};
use snafu::ensure;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub mod builtin;

/// Optical and photometric constants of a telescope the camera is mounted on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelescopeProfile {
    pub name: String,
    /// Magnitude giving one count per second at zero airmass, in the u, g, r, i, z order
    pub zero_points: [f64; 5],
    /// in arcseconds per unbinned pixel
    pub plate_scale: f64,
    /// Whether the image is flipped along the x axis
    #[serde(default)]
    pub flipped: bool,
    /// Rotator offset, in degrees
    #[serde(default)]
    pub delta_pa: f64,
    /// Pointing alignment offset along x, in arcseconds
    #[serde(default)]
    pub delta_x: f64,
    /// Pointing alignment offset along y, in arcseconds
    #[serde(default)]
    pub delta_y: f64,
}

impl ConfigRepr for TelescopeProfile {}

impl TelescopeProfile {
    pub fn zero_point(&self, band: Band) -> f64 {
        self.zero_points[band.index()]
    }

    /// Plate scale of a binned pixel along x and y, in arcseconds
    pub fn binned_scale(&self, xbin: u32, ybin: u32) -> (f64, f64) {
        (
            self.plate_scale * f64::from(xbin),
            self.plate_scale * f64::from(ybin),
        )
    }
}

impl fmt::Display for TelescopeProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} arcsec/pixel)", self.name, self.plate_scale)
    }
}

/// Ordered collection of telescope profiles with unique names.
#[derive(Clone, Debug, PartialEq)]
pub struct TelescopeCatalogue {
    profiles: Vec<TelescopeProfile>,
}

impl TelescopeCatalogue {
    pub fn new(profiles: Vec<TelescopeProfile>) -> Result<Self, ConfigError> {
        let mut names = HashSet::new();
        for profile in &profiles {
            ensure!(
                names.insert(profile.name.as_str()),
                DuplicateEntrySnafu {
                    kind: "telescope",
                    name: profile.name.clone(),
                }
            );
            ensure!(
                profile.plate_scale > 0.0 && profile.plate_scale.is_finite(),
                InvalidConfigSnafu {
                    msg: format!(
                        "plate scale of {} must be positive, got {}",
                        profile.name, profile.plate_scale
                    ),
                }
            );
        }
        Ok(Self { profiles })
    }

    /// The telescopes the camera is used on
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                TelescopeProfile::ntt(),
                TelescopeProfile::vlt(),
                TelescopeProfile::wht(),
            ],
        }
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let profiles = TelescopeProfile::load_many(path)?;
        debug!("loaded {} telescope profiles", profiles.len());
        Self::new(profiles)
    }

    pub fn find(&self, name: &str) -> Result<&TelescopeProfile, ConfigError> {
        self.profiles
            .iter()
            .find(|profile| profile.name == name.trim())
            .ok_or_else(|| ConfigError::UnknownTelescope {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelescopeProfile> {
        self.profiles.iter()
    }
}
