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

extern crate log;
extern crate pretty_env_logger;
extern crate ultracam_timing as ucam;

use clap::Parser;
use log::{error, info, warn};
use std::env::{set_var, var};
use std::path::PathBuf;
use ucam::prelude::*;

const LOG_VAR: &str = "UCAM_LOG";

/// Cycle time and signal-to-noise of a camera setup
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Telescope profiles (YAML list), replaces the built-in telescopes
    #[arg(long, value_name = "FILE")]
    telescopes: Option<PathBuf>,

    /// Hardware templates (YAML list), replaces the built-in templates
    #[arg(long, value_name = "FILE")]
    templates: Option<PathBuf>,

    /// Synchronise the window starts to the binning before computing
    #[arg(short, long)]
    sync: bool,
}

fn row(name: &str, value: String, unit: &str) {
    println!("{name:<18} = {value:>12} {unit}");
}

fn print_timing(timing: &TimingReport) {
    row("Frame rate", format!("{:.3}", timing.frame_rate), "Hz");
    row("Cycle time", format!("{:.4}", timing.cycle_time), "sec");
    row("Exposure time", format!("{:.4}", timing.exposure_time), "sec");
    row("Dead time", format!("{:.4}", timing.dead_time), "sec");
    row("Readout time", format!("{:.4}", timing.readout_time), "sec");
    row(
        "Frame transfer",
        format!("{:.4}", timing.frame_transfer_time),
        "sec",
    );
    row("Duty cycle", format!("{:.2}", timing.duty_cycle), "%");
    match timing.drift {
        Some(drift) => {
            row("Pipe shift", drift.pipe_shift.to_string(), "pixels");
            row("nwin", drift.storage_windows.to_string(), "windows");
        }
        None => {
            row("Pipe shift", "UNDEFINED".to_string(), "pixels");
            row("nwin", "UNDEFINED".to_string(), "windows");
        }
    }
}

fn print_sensitivity(rpt: &SensitivityReport) {
    row("Zeropoint", format!("{:.2}", rpt.zero_point), "mags");
    row("Read noise", format!("{:.2}", rpt.read_noise), "counts RMS");
    row("Gain", format!("{:.2}", rpt.gain), "electrons/count");
    row(
        "Aperture diameter",
        format!("{:.1}", rpt.aperture_diameter),
        "arcseconds",
    );
    row("Aperture area", format!("{:.1}", rpt.aperture_area), "binned pixels");
    row("Signal", format!("{:.1}", rpt.total_counts), "total counts");
    row("Signal", format!("{:.1}", rpt.aperture_counts), "counts in aperture");
    row("Peak", format!("{:.0}", rpt.peak_counts), "counts/binned pixel");
    row(
        "Sky background",
        format!("{:.2}", rpt.sky_brightness),
        "mags/arcsec**2",
    );
    row(
        "Sky background",
        format!("{:.2}", rpt.sky_counts_per_pixel),
        "counts/binned pixel",
    );
    row(
        "Sky background",
        format!("{:.1}", rpt.sky_counts_in_aperture),
        "counts in aperture",
    );
    row(
        "Dark",
        format!("{:.1}", rpt.dark_counts_in_aperture),
        "counts in aperture",
    );
    row(
        "Read noise",
        format!("{:.0}", rpt.read_noise_counts_in_aperture),
        "effective counts in aperture",
    );
    row(
        "Signal-to-noise",
        format!("{:.2}", rpt.signal_to_noise_single),
        "in single exposure",
    );
    row(
        "Signal-to-noise",
        format!("{:.1}", rpt.signal_to_noise_three_hour),
        "in 3 hour run",
    );
    match rpt.peak_severity {
        PeakSeverity::Ok => {}
        PeakSeverity::Warning => warn!("peak counts beyond the linear regime"),
        PeakSeverity::Saturated => warn!("peak counts saturate the detector"),
    }
}

fn main() -> Result<(), EngineError> {
    let args = Args::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let telescopes = match &args.telescopes {
        Some(path) => TelescopeCatalogue::from_yaml(path)?,
        None => TelescopeCatalogue::builtin(),
    };
    let templates = match &args.templates {
        Some(path) => TemplateCatalogue::from_yaml(path)?,
        None => TemplateCatalogue::builtin(),
    };

    let scenario = Scenario::load(&args.scenario)?;
    info!("Loaded scenario `{}`", args.scenario.display());

    let resolved = scenario.resolve(&templates, &telescopes)?;
    let engine = InstrumentEngine;
    let mut config = resolved.config;

    if args.sync {
        let windows = engine.validate_and_synchronize(&config)?;
        if windows != config.windows {
            info!("window starts synchronised to the {}x{} binning", config.xbin, config.ybin);
        }
        config = config.with_windows(windows);
    } else if !config_is_synchronized(&config) {
        warn!("windows are not synchronised with the binning, binned pixels will not line up with a full frame");
    }

    info!("{config} on {}", resolved.telescope);

    let report = match engine.compute(&config, &resolved.telescope, resolved.target.as_ref()) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return Err(e);
        }
    };

    print_timing(&report.timing);
    match &report.sensitivity {
        Some(Ok(rpt)) => print_sensitivity(rpt),
        Some(Err(e)) => error!("{e}"),
        None => info!("no target provided, skipping the signal-to-noise estimate"),
    }

    Ok(())
}
