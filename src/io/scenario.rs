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

use super::{ConfigError, ConfigRepr};
use crate::instrument::{InstrumentConfiguration, ReadoutSpeed, TemplateCatalogue, WindowSet};
use crate::photometry::TargetContext;
use crate::telescope::{TelescopeCatalogue, TelescopeProfile};
use serde_derive::{Deserialize, Serialize};

fn unbinned() -> u32 {
    1
}

/// An observation setup as written by an observer: the template and telescope are referred
/// to by name and resolved against the catalogues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Label of the hardware template
    pub template: String,
    pub speed: ReadoutSpeed,
    #[serde(default = "unbinned")]
    pub xbin: u32,
    #[serde(default = "unbinned")]
    pub ybin: u32,
    /// Exposure delay, in units of 0.1 ms
    #[serde(default)]
    pub exposure: u32,
    #[serde(default)]
    pub windows: WindowSet,
    pub telescope: String,
    #[serde(default)]
    pub target: Option<TargetContext>,
}

impl ConfigRepr for Scenario {}

/// A scenario whose names were all found in the catalogues.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedScenario {
    pub config: InstrumentConfiguration,
    pub telescope: TelescopeProfile,
    pub target: Option<TargetContext>,
}

impl Scenario {
    /// Looks up the template and the telescope of this scenario.
    pub fn resolve(
        &self,
        templates: &TemplateCatalogue,
        telescopes: &TelescopeCatalogue,
    ) -> Result<ResolvedScenario, ConfigError> {
        let template = templates.resolve(&self.template)?;
        let telescope = telescopes.find(&self.telescope)?.clone();
        debug!(
            "template `{}` uses {} ({})",
            template.label, template.mode, template.id
        );

        let config = InstrumentConfiguration::builder()
            .mode(template.mode)
            .speed(self.speed)
            .xbin(self.xbin)
            .ybin(self.ybin)
            .exposure(self.exposure)
            .windows(self.windows.clone())
            .build();

        Ok(ResolvedScenario {
            config,
            telescope,
            target: self.target,
        })
    }
}
