// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Configuration is created by the host and handed to the [`Locator`](crate::Locator). It holds
//! the handful of world-wide settings that affect matching.

use std::path::Path;

use eyre::eyre;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use locus_var::DbRef;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// The room whose exits are reachable from everywhere. `None` disables global exits.
    pub master_room: Option<DbRef>,
    /// How many locations `room_of` will walk through before giving up.
    pub max_containment_depth: usize,
    /// The lock consulted when breaking ties by lock passing.
    pub lock_name: String,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            master_room: Some(DbRef::mk_id(2)),
            max_containment_depth: 100,
            lock_name: "Basic".to_string(),
        }
    }
}

impl LocateConfig {
    /// Defaults, overridden by the YAML file if one is given, overridden in turn by
    /// `LOCUS_`-prefixed environment variables.
    pub fn load(config_path: Option<&Path>) -> Result<Self, eyre::Report> {
        let mut figment = Figment::new().merge(Serialized::defaults(LocateConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("LOCUS_"))
            .extract::<LocateConfig>()
            .map_err(|e| eyre!("Failed to parse configuration from {:?}: {}", config_path, e))
    }
}
