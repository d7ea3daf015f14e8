use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use juliabrot_core::ViewState;
use juliabrot_render::RenderSettings;

/// User-tunable settings persisted between sessions.
///
/// Only configuration lives here; the explored view always starts from the
/// default framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Zoom factor per wheel notch.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_show_hud")]
    pub show_hud: bool,
    #[serde(default)]
    pub render: RenderSettings,
}

const fn default_window_width() -> f32 {
    1280.0
}

const fn default_window_height() -> f32 {
    720.0
}

const fn default_zoom_step() -> f64 {
    ViewState::ZOOM_STEP
}

const fn default_show_hud() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            zoom_step: default_zoom_step(),
            show_hud: default_show_hud(),
            render: RenderSettings::default(),
        }
    }
}

#[derive(Debug, Error)]
enum PreferencesError {
    #[error("i/o on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed preferences: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppPreferences {
    /// Stored preferences, or defaults when there are none or they are unusable.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    fn load_from(path: &Path) -> Self {
        if !path.is_file() {
            debug!(path = %path.display(), "No stored preferences");
            return Self::default();
        }
        match Self::read(path) {
            Ok(prefs) => {
                info!(path = %path.display(), "Preferences loaded");
                prefs.sanitized()
            }
            Err(e) => {
                error!("Falling back to default preferences: {e}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, PreferencesError> {
        let text = fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self) {
        self.save_to(&config_path());
    }

    fn save_to(&self, path: &Path) {
        match self.write(path) {
            Ok(()) => debug!(path = %path.display(), "Preferences saved"),
            Err(e) => error!("Preferences not saved: {e}"),
        }
    }

    fn write(&self, path: &Path) -> Result<(), PreferencesError> {
        let io_err = |source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// Replace values that would make the window or zoom unusable.
    fn sanitized(mut self) -> Self {
        if !(self.zoom_step > 1.0) || !self.zoom_step.is_finite() {
            warn!(zoom_step = self.zoom_step, "Ignoring invalid zoom step");
            self.zoom_step = default_zoom_step();
        }
        if !(self.window_width >= 1.0) || !(self.window_height >= 1.0) {
            warn!("Ignoring invalid window size");
            self.window_width = default_window_width();
            self.window_height = default_window_height();
        }
        self
    }
}

/// `preferences.json` in the per-user config directory, or next to the
/// executable when the platform reports no home directory.
fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "Juliabrot")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(portable_dir)
        .join("preferences.json")
}

fn portable_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        Err(_) => PathBuf::from("."),
    }
}
