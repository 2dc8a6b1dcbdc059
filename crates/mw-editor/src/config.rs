use std::path::{Path, PathBuf};
use std::time::Duration;

use mw_core::Extent;
use mw_document::FALLBACK_START;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// Editor settings, loadable from a TOML file.
///
/// Every field has a default, so a file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas geometry.
    pub canvas: CanvasConfig,
    /// Status line behaviour.
    pub status: StatusConfig,
    /// Document generation.
    pub document: DocumentConfig,
    /// Module export.
    pub export: ExportConfig,
}

/// Size of the location boxes drawn on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Box width.
    pub room_width: f64,
    /// Box height.
    pub room_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let extent = Extent::default();
        Self {
            room_width: extent.width,
            room_height: extent.height,
        }
    }
}

/// How long status messages stay up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Milliseconds before a message clears itself.
    pub clear_after_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: 3000,
        }
    }
}

/// Document generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Start location id written when the map is empty.
    pub fallback_start: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            fallback_start: FALLBACK_START.to_string(),
        }
    }
}

/// Where exported modules go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory module files are written to.
    pub modules_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from("modules"),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Write the configuration to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Location box size.
    pub fn extent(&self) -> Extent {
        Extent::new(self.canvas.room_width, self.canvas.room_height)
    }

    /// Status auto-clear delay.
    pub fn status_delay(&self) -> Duration {
        Duration::from_millis(self.status.clear_after_ms)
    }

    /// Set the location box size.
    pub fn with_room_size(mut self, width: f64, height: f64) -> Self {
        self.canvas.room_width = width;
        self.canvas.room_height = height;
        self
    }

    /// Set the status auto-clear delay in milliseconds.
    pub fn with_clear_after_ms(mut self, ms: u64) -> Self {
        self.status.clear_after_ms = ms;
        self
    }

    /// Set the start id used for empty maps.
    pub fn with_fallback_start(mut self, id: impl Into<String>) -> Self {
        self.document.fallback_start = id.into();
        self
    }

    /// Set the export directory.
    pub fn with_modules_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export.modules_dir = dir.into();
        self
    }
}
