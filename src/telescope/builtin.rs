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

impl TelescopeProfile {
    /// ESO New Technology Telescope, La Silla
    pub fn ntt() -> Self {
        Self {
            name: "NTT".to_string(),
            zero_points: [24.62, 26.43, 25.77, 25.63, 24.79],
            plate_scale: 0.35,
            flipped: true,
            delta_pa: 0.0,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }

    /// ESO Very Large Telescope, Paranal
    pub fn vlt() -> Self {
        Self {
            name: "VLT".to_string(),
            zero_points: [26.54, 28.35, 27.69, 27.55, 26.71],
            plate_scale: 0.1557,
            flipped: true,
            delta_pa: 0.0,
            delta_x: -1.4402,
            delta_y: -3.1856,
        }
    }

    /// William Herschel Telescope, La Palma
    pub fn wht() -> Self {
        Self {
            name: "WHT".to_string(),
            zero_points: [25.11, 26.92, 26.26, 26.12, 25.28],
            plate_scale: 0.30,
            flipped: false,
            delta_pa: 0.0,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }
}
