use crate::catalog::DEFAULT_BASE_URL;
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub chart: ChartConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ApiConfig {
    pub base_url: String,
    /// Unset means requests wait as long as the server takes.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ChartConfig {
    pub point_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            point_color: "rgba(59, 130, 246, 0.7)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub background: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            background: "#111827".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DashboardError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading dashboard config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| DashboardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
