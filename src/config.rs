//! Configuration handling for mask-painter
//!
//! Where the picture lands on the target surface, how dark a pixel must be to
//! count as ink, and how fast the pen is allowed to move. Everything has a
//! default, so a missing file is never an error.

use crate::drag::DEFAULT_MAX_STEPS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Luminance below this is ink.
    pub threshold: u8,
    /// Device position of the top-left mask cell.
    pub start_x: i32,
    pub start_y: i32,
    /// Device pixels per mask cell.
    pub pixel_size: i32,
    /// Pictures larger than this are shrunk before thresholding.
    pub max_width: u32,
    pub max_height: u32,
    pub gesture_delay_ms: u64,
    pub settle_delay_ms: u64,
    pub max_drag_steps: u32,
    /// Size of the preview canvas window.
    pub canvas_width: usize,
    pub canvas_height: usize,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            threshold: 150,
            start_x: 15,
            start_y: 150,
            pixel_size: 1,
            max_width: 168,
            max_height: 67,
            gesture_delay_ms: 10,
            settle_delay_ms: 100,
            max_drag_steps: DEFAULT_MAX_STEPS,
            canvas_width: 800,
            canvas_height: 600,
        }
    }
}

impl PainterConfig {
    /// Get the path to the configuration file
    pub fn default_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("mask-painter")
        } else {
            PathBuf::from(".config/mask-painter")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from `path`, returning defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Config(format!("{}: {e}", path.display()))),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Config(format!("{}: {e}", parent.display())))?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        Ok(())
    }
}
