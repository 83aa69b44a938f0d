use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::tool::{InkColor, StrokeWidth};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "INKFLOW_CONFIG";

/// File name used when saving the practice sheet
pub const EXPORT_FILE_NAME: &str = "my-practice.png";

/// Allowed practice sheet heights in points
pub const MIN_CANVAS_HEIGHT: f32 = 100.0;
pub const MAX_CANVAS_HEIGHT: f32 = 4000.0;
const DEFAULT_CANVAS_HEIGHT: f32 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys keep their defaults
pub struct AppConfig {
    /// Height of the practice sheet in points
    pub canvas_height: f32,
    pub default_stroke_width: StrokeWidth,
    pub default_ink: InkColor,
    /// Directory the Save action writes into
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            default_stroke_width: StrokeWidth::default(),
            default_ink: InkColor::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `INKFLOW_CONFIG`, or use defaults when
    /// the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Bring out-of-range values back to something the sheet can allocate
    pub fn sanitized(mut self) -> Self {
        if !self.canvas_height.is_finite() {
            log::warn!("Canvas height {} is not finite, using {}", self.canvas_height, DEFAULT_CANVAS_HEIGHT);
            self.canvas_height = DEFAULT_CANVAS_HEIGHT;
        } else if !(MIN_CANVAS_HEIGHT..=MAX_CANVAS_HEIGHT).contains(&self.canvas_height) {
            let clamped = self.canvas_height.clamp(MIN_CANVAS_HEIGHT, MAX_CANVAS_HEIGHT);
            log::warn!("Canvas height {} out of range, using {}", self.canvas_height, clamped);
            self.canvas_height = clamped;
        }
        self
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(EXPORT_FILE_NAME)
    }
}
