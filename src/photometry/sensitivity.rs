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

use super::{TargetContext, AP_SCALE, DARK_RATE};
use crate::instrument::InstrumentConfiguration;
use crate::telescope::TelescopeProfile;
use crate::timing::TimingReport;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::f64::consts::PI;
use std::fmt;

/// Ratio between the FWHM and the standard deviation of a gaussian profile
const FWHM_TO_SIGMA: f64 = 2.3548;

/// Peak counts above which the pixel saturates
pub const SATURATION_LEVEL: f64 = 60_000.0;
/// Peak counts above which the response is no longer linear
pub const NON_LINEAR_LEVEL: f64 = 25_000.0;

/// Duration of the reference run used for the three hour signal-to-noise, in seconds
const THREE_HOURS_S: f64 = 3.0 * 3600.0;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SensitivityError {
    #[snafu(display("target magnitude must be finite, got {magnitude}"))]
    InvalidMagnitude { magnitude: f64 },
    #[snafu(display("seeing must be a positive number of arcseconds, got {seeing}"))]
    InvalidSeeing { seeing: f64 },
    #[snafu(display("airmass must be at least 1, got {airmass}"))]
    InvalidAirmass { airmass: f64 },
    #[snafu(display("plate scale of {telescope} must be positive, got {plate_scale}"))]
    InvalidPlateScale { telescope: String, plate_scale: f64 },
}

/// How close the brightest pixel gets to the full well.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeakSeverity {
    Ok,
    /// Beyond the linear regime of the detector
    Warning,
    Saturated,
}

impl PeakSeverity {
    pub fn from_peak(peak: f64) -> Self {
        if peak > SATURATION_LEVEL {
            Self::Saturated
        } else if peak > NON_LINEAR_LEVEL {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for PeakSeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "non-linear"),
            Self::Saturated => write!(f, "saturated"),
        }
    }
}

/// Expected counts and signal-to-noise for a point source.
///
/// Counts are in detector counts, per frame. Pixel quantities refer to binned pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub total_counts: f64,
    pub peak_counts: f64,
    pub peak_severity: PeakSeverity,
    pub aperture_counts: f64,
    pub sky_counts_in_aperture: f64,
    pub dark_counts_in_aperture: f64,
    pub read_noise_counts_in_aperture: f64,
    pub signal_to_noise_single: f64,
    pub signal_to_noise_three_hour: f64,
    pub zero_point: f64,
    /// counts RMS
    pub read_noise: f64,
    /// electrons per count
    pub gain: f64,
    /// in arcseconds
    pub aperture_diameter: f64,
    /// in binned pixels
    pub aperture_area: f64,
    /// in magnitudes per square arcsecond
    pub sky_brightness: f64,
    pub sky_counts_per_pixel: f64,
}

/// Estimates the counts and signal-to-noise of a star observed with the provided timing.
///
/// The star is modelled as a gaussian of the seeing FWHM, measured in a circular aperture of
/// radius `AP_SCALE` times the seeing.
pub fn estimate_sensitivity(
    timing: &TimingReport,
    config: &InstrumentConfiguration,
    target: &TargetContext,
    telescope: &TelescopeProfile,
) -> Result<SensitivityReport, SensitivityError> {
    ensure!(
        target.magnitude.is_finite(),
        InvalidMagnitudeSnafu {
            magnitude: target.magnitude
        }
    );
    ensure!(
        target.seeing.is_finite() && target.seeing > 0.0,
        InvalidSeeingSnafu {
            seeing: target.seeing
        }
    );
    ensure!(
        target.airmass.is_finite() && target.airmass >= 1.0,
        InvalidAirmassSnafu {
            airmass: target.airmass
        }
    );
    ensure!(
        telescope.plate_scale.is_finite() && telescope.plate_scale > 0.0,
        InvalidPlateScaleSnafu {
            telescope: telescope.name.clone(),
            plate_scale: telescope.plate_scale
        }
    );

    let xbin = f64::from(config.xbin.max(1));
    let ybin = f64::from(config.ybin.max(1));
    let scale = telescope.plate_scale;
    let seeing = target.seeing;
    let exposure = timing.exposure_time;

    let zero_point = telescope.zero_point(target.band);
    let gain = config.speed.gain();
    let read_noise = config.speed.read_noise(config.xbin, config.ybin);

    let total = 10_f64.powf(
        (zero_point - target.magnitude - target.airmass * target.band.extinction()) / 2.5,
    ) * exposure;
    let peak = total * xbin * ybin * (scale / (seeing / FWHM_TO_SIGMA)).powi(2) / (2.0 * PI);

    // Fraction of a gaussian profile inside the aperture
    let correct = 1.0 - (-(FWHM_TO_SIGMA * AP_SCALE).powi(2) / 2.0).exp();

    let sky_brightness = target.sky.magnitude(target.band);
    let sky_per_arcsec = 10_f64.powf((zero_point - sky_brightness) / 2.5) * exposure;
    let sky_per_pixel = sky_per_arcsec * scale.powi(2) * xbin * ybin;
    let sky_total = sky_per_arcsec * PI * (AP_SCALE * seeing).powi(2);

    let npix = PI * (AP_SCALE * seeing / scale).powi(2) / xbin / ybin;
    let signal = correct * total;
    let dark = npix * DARK_RATE * exposure;
    let read_total = npix * read_noise.powi(2) / gain;

    let noise = ((read_total + dark + sky_total + signal) / gain).sqrt();
    let snr = signal / noise;
    let snr_three_hours = snr * (THREE_HOURS_S / timing.cycle_time).sqrt();

    debug!(
        "{} = {:.2} ({}) in {:.4} s: {signal:.1} counts, peak {peak:.1}, S/N {snr:.2}",
        target.band, target.magnitude, telescope.name, exposure
    );

    Ok(SensitivityReport {
        total_counts: total,
        peak_counts: peak,
        peak_severity: PeakSeverity::from_peak(peak),
        aperture_counts: signal,
        sky_counts_in_aperture: sky_total,
        dark_counts_in_aperture: dark,
        read_noise_counts_in_aperture: read_total,
        signal_to_noise_single: snr,
        signal_to_noise_three_hour: snr_three_hours,
        zero_point,
        read_noise,
        gain,
        aperture_diameter: 2.0 * AP_SCALE * seeing,
        aperture_area: npix,
        sky_brightness,
        sky_counts_per_pixel: sky_per_pixel,
    })
}
