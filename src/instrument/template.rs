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

use super::ApplicationMode;
use crate::io::{ConfigError, ConfigRepr, DuplicateEntrySnafu, TemplatePairMismatchSnafu};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::collections::HashSet;
use std::path::Path;

/// Hardware template: a human readable label tied to a readout mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub label: String,
    pub mode: ApplicationMode,
    /// Number of window pairs enabled by this template
    pub pairs: u8,
    /// Identifier of the template file loaded by the controller
    pub id: String,
}

impl ConfigRepr for Template {}

impl Template {
    /// Builds the template of this mode as shipped with the instrument.
    pub fn for_mode(mode: ApplicationMode) -> Self {
        Self {
            label: mode.label().to_string(),
            mode,
            pairs: mode.window_pairs(),
            id: mode.slug().to_string(),
        }
    }
}

/// Catalogue of the templates a host may pick from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateCatalogue {
    templates: Vec<Template>,
}

impl TemplateCatalogue {
    /// Builds a catalogue, ensuring that each template enables as many pairs as its mode reads
    /// and that no label is repeated.
    pub fn new(templates: Vec<Template>) -> Result<Self, ConfigError> {
        let mut labels = HashSet::new();
        for template in &templates {
            ensure!(
                template.pairs == template.mode.window_pairs(),
                TemplatePairMismatchSnafu {
                    label: template.label.clone(),
                    mode: template.mode,
                    declared: template.pairs,
                    required: template.mode.window_pairs(),
                }
            );
            ensure!(
                labels.insert(template.label.as_str()),
                DuplicateEntrySnafu {
                    kind: "template",
                    name: template.label.clone(),
                }
            );
        }
        Ok(Self { templates })
    }

    /// One template per application mode
    pub fn builtin() -> Self {
        Self {
            templates: enum_iterator::all::<ApplicationMode>()
                .map(Template::for_mode)
                .collect(),
        }
    }

    /// Loads a catalogue from a YAML list of templates.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let templates = Template::load_many(path)?;
        debug!("loaded {} templates", templates.len());
        Self::new(templates)
    }

    /// Returns the template with this label.
    pub fn resolve(&self, label: &str) -> Result<&Template, ConfigError> {
        self.templates
            .iter()
            .find(|template| template.label == label.trim())
            .ok_or_else(|| ConfigError::UnknownTemplate {
                label: label.to_string(),
                known: self.labels().join(", "),
            })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
