//! User preferences persistence for steelboard
//!
//! Stores sparkline rendering defaults in `<config_dir>/steelboard/preferences.json`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::render::RenderSpec;
use crate::trend::DEFAULT_STABLE_THRESHOLD_PCT;

const PREFERENCES_FILE: &str = "preferences.json";

/// steelboard-specific user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardPreferences {
    /// Default sparkline size, colors and fill
    pub sparkline: RenderSpec,
    /// Changes smaller than this (in percent) are shown as stable
    pub stable_threshold_pct: f64,
}

impl Default for DashboardPreferences {
    fn default() -> Self {
        Self {
            sparkline: RenderSpec::default(),
            stable_threshold_pct: DEFAULT_STABLE_THRESHOLD_PCT,
        }
    }
}

impl DashboardPreferences {
    /// `<config_dir>/steelboard/preferences.json`, if a config dir exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("steelboard").join(PREFERENCES_FILE))
    }

    /// Load preferences from `path`.
    /// Returns defaults on any I/O, parse or validation error (graceful degradation).
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        let prefs: Self = match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring malformed preferences {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match prefs.validate() {
            Ok(()) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring preferences {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Persist preferences to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory for preferences")?;
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }

    /// Reject values the renderer cannot draw sensibly
    pub fn validate(&self) -> Result<(), CoreError> {
        let vp = self.sparkline.viewport;
        if !vp.width.is_finite() || !vp.height.is_finite() || vp.width <= 0.0 || vp.height <= 0.0
        {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "sparkline size must be positive, got {}x{}",
                    vp.width, vp.height
                ),
            });
        }

        if !self.sparkline.stroke_width.is_finite() || self.sparkline.stroke_width < 0.0 {
            return Err(CoreError::InvalidConfig {
                message: format!("stroke_width must be >= 0, got {}", self.sparkline.stroke_width),
            });
        }

        if !self.stable_threshold_pct.is_finite() || self.stable_threshold_pct < 0.0 {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "stable_threshold_pct must be >= 0, got {}",
                    self.stable_threshold_pct
                ),
            });
        }

        Ok(())
    }
}
