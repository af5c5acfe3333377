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

use crate::errors::EngineError;
use crate::geometry::{synchronize, validate, GeometryError};
use crate::instrument::{InstrumentConfiguration, TemplateCatalogue, WindowSet};
use crate::io::Scenario;
use crate::photometry::{estimate_sensitivity, SensitivityError, SensitivityReport, TargetContext};
use crate::telescope::{TelescopeCatalogue, TelescopeProfile};
use crate::timing::{compute_timing, TimingReport};

/// Timing of a configuration and, if a target was provided, its sensitivity.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineReport {
    pub timing: TimingReport,
    /// A failed sensitivity estimate never hides the timing
    pub sensitivity: Option<Result<SensitivityReport, SensitivityError>>,
}

impl EngineReport {
    /// Signal-to-noise of a single frame, if it could be estimated
    pub fn signal_to_noise(&self) -> Option<f64> {
        match &self.sensitivity {
            Some(Ok(rpt)) => Some(rpt.signal_to_noise_single),
            _ => None,
        }
    }
}

/// Stateless engine tying together the geometry checks, the timing and the sensitivity.
#[derive(Copy, Clone, Debug, Default)]
pub struct InstrumentEngine;

impl InstrumentEngine {
    /// Synchronises the windows of this configuration to its binning and checks the result.
    pub fn validate_and_synchronize(
        &self,
        config: &InstrumentConfiguration,
    ) -> Result<WindowSet, GeometryError> {
        let windows = synchronize(&config.windows, config.xbin, config.ybin);
        validate(&config.with_windows(windows.clone()))?;
        Ok(windows)
    }

    /// Computes the timing of a valid configuration, and the sensitivity if a target is given.
    pub fn compute(
        &self,
        config: &InstrumentConfiguration,
        telescope: &TelescopeProfile,
        target: Option<&TargetContext>,
    ) -> Result<EngineReport, EngineError> {
        if let Err(source) = validate(config) {
            warn!("{config} rejected: {source}");
            return Err(EngineError::Geometry { source });
        }

        let timing = compute_timing(config);

        let sensitivity = target.map(|target| {
            let estimate = estimate_sensitivity(&timing, config, target, telescope);
            if let Err(e) = &estimate {
                warn!("sensitivity unavailable on {}: {e}", telescope.name);
            }
            estimate
        });

        Ok(EngineReport {
            timing,
            sensitivity,
        })
    }

    /// Resolves a scenario against the catalogues and computes it.
    pub fn compute_scenario(
        &self,
        scenario: &Scenario,
        templates: &TemplateCatalogue,
        telescopes: &TelescopeCatalogue,
    ) -> Result<EngineReport, EngineError> {
        let resolved = scenario.resolve(templates, telescopes)?;
        self.compute(
            &resolved.config,
            &resolved.telescope,
            resolved.target.as_ref(),
        )
    }
}
