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

use super::{ApplicationMode, MAX_WINDOW_PAIRS};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One window pair, symmetric about the vertical centre line of the chip.
///
/// All coordinates are in unbinned pixels and 1-based: `xleft` is the first column of the
/// left window (read by the left half of the serial register), `xright` the first column of
/// the right window. Both windows share `ystart`, `nx` and `ny`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub ystart: u32,
    pub xleft: u32,
    pub xright: u32,
    pub nx: u32,
    pub ny: u32,
}

impl Window {
    pub const fn new(ystart: u32, xleft: u32, xright: u32, nx: u32, ny: u32) -> Self {
        Self {
            ystart,
            xleft,
            xright,
            nx,
            ny,
        }
    }

    /// Default window of the provided (zero-based) pair index, none of them overlap.
    pub const fn default_pair(index: u32) -> Self {
        Self::new(129 + 192 * index, 321, 609, 96, 96)
    }

    /// First row after this window
    pub const fn yend(&self) -> u32 {
        self.ystart.saturating_add(self.ny)
    }

    /// Last column of the left window
    pub const fn xleft_end(&self) -> u32 {
        self.xleft.saturating_add(self.nx).saturating_sub(1)
    }

    /// Last column of the right window
    pub const fn xright_end(&self) -> u32 {
        self.xright.saturating_add(self.nx).saturating_sub(1)
    }
}

/// Ordered set of window pairs, by increasing `ystart`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowSet(Vec<Window>);

impl WindowSet {
    /// Builds a window set from the provided windows, which must be given in increasing `ystart`.
    pub fn new(windows: Vec<Window>) -> Self {
        Self(windows)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Default window set, of the size read out by this mode.
    pub fn for_mode(mode: ApplicationMode) -> Self {
        Self(
            (0..u32::from(mode.window_pairs()))
                .map(Window::default_pair)
                .collect(),
        )
    }

    /// Keeps the existing windows and truncates or extends the set with default windows to
    /// match the number of pairs read by this mode.
    pub fn resized_for(&self, mode: ApplicationMode) -> Self {
        let wanted = usize::from(mode.window_pairs()).min(MAX_WINDOW_PAIRS);
        let mut windows: Vec<Window> = self.0.iter().take(wanted).copied().collect();
        while windows.len() < wanted {
            let idx = windows.len() as u32;
            let mut next = Window::default_pair(idx);
            if let Some(prev) = windows.last() {
                // Keep the new window clear of whatever the user already placed
                next.ystart = next.ystart.max(prev.yend());
            }
            windows.push(next);
        }
        Self(windows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Window> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Window> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Window] {
        &self.0
    }
}

impl Index<usize> for WindowSet {
    type Output = Window;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Window>> for WindowSet {
    fn from(windows: Vec<Window>) -> Self {
        Self(windows)
    }
}

impl FromIterator<Window> for WindowSet {
    fn from_iter<T: IntoIterator<Item = Window>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WindowSet {
    type Item = &'a Window;
    type IntoIter = std::slice::Iter<'a, Window>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
