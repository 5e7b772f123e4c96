// fuel_notifier - Tankerkoenig fuel prices delivered to Telegram
//
// Copyright 2024 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::slice;

/// A gas station known to the Tankerkoenig API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Tankerkoenig station ID, usually a UUID
    pub id: String,
    /// Name used for the station in reports
    pub name: String,
}

impl Station {
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Station {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct StationFile {
    #[serde(default, rename = "station")]
    stations: Vec<Station>,
}

/// Ordered, validated set of stations to report prices for.
///
/// Stations are kept in the order they were defined. Every station has a non-blank
/// ID and name and no two stations share an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Result<Self, ConfigError> {
        if stations.is_empty() {
            return Err(ConfigError::NoStations);
        }

        let mut seen = HashSet::with_capacity(stations.len());
        for station in stations.iter() {
            if station.id.trim().is_empty() {
                return Err(ConfigError::InvalidStation(format!("blank ID for {:?}", station.name)));
            }

            if station.name.trim().is_empty() {
                return Err(ConfigError::InvalidStation(format!("blank name for {}", station.id)));
            }

            if !seen.insert(station.id.as_str()) {
                return Err(ConfigError::DuplicateStation(station.id.clone()));
            }
        }

        Ok(StationRegistry { stations })
    }

    /// Parse stations from TOML containing a `[[station]]` table for each station.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: StationFile = toml::from_str(content).map_err(ConfigError::Parse)?;
        Self::new(file.stations)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&content)
    }

    pub fn iter(&self) -> slice::Iter<'_, Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }
}

impl<'a> IntoIterator for &'a StationRegistry {
    type Item = &'a Station;
    type IntoIter = slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
