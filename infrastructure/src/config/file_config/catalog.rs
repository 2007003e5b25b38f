//! Catalog configuration from TOML (`[catalog]` section)

use serde::{Deserialize, Serialize};

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// Catalog file to load instead of the bundled one
    pub path: Option<String>,
}
