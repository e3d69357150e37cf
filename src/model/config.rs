// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Realm configuration

use serde::{Deserialize, Serialize};

/// Default limit on the number of links above any object
pub const DEFAULT_MAX_PROTOTYPE_DEPTH: usize = 1024;

/// Configuration applied when a realm is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Longest prototype chain a realm will build, counted in links
    pub max_prototype_depth: usize,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            max_prototype_depth: DEFAULT_MAX_PROTOTYPE_DEPTH,
        }
    }
}

impl RealmConfig {
    /// Override the prototype depth limit
    pub fn with_max_prototype_depth(mut self, depth: usize) -> Self {
        self.max_prototype_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RealmConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RealmConfig::default());
    }

    #[test]
    fn test_depth_override() {
        let config: RealmConfig = serde_json::from_str(r#"{"max_prototype_depth": 3}"#).unwrap();
        assert_eq!(config.max_prototype_depth, 3);
        assert_eq!(RealmConfig::default().with_max_prototype_depth(3), config);
    }
}
