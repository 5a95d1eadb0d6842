//! Editor settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Normal-camera navigation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Milliseconds per world unit of WASD panning
    pub pan_divisor: f32,
    /// Lowest height the mouse wheel can bring the camera to
    pub min_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pan_divisor: 25.0,
            min_height: 10.0,
        }
    }
}

/// Picking settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickSettings {
    /// Extra margin around an entity's screen-space bounds, in pixels
    pub tolerance_px: f32,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self { tolerance_px: 4.0 }
    }
}

/// How far a pixel of mouse movement carries each edit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditSettings {
    /// World units per pixel (Move)
    pub move_per_pixel: f64,
    /// Degrees per pixel (Rotate)
    pub rotate_degrees_per_pixel: f64,
    /// Relative scale change per pixel (Scale)
    pub scale_per_pixel: f64,
    /// Smallest factor a Scale edit may apply to an axis
    pub min_scale_factor: f64,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            move_per_pixel: 0.1,
            rotate_degrees_per_pixel: 1.0,
            scale_per_pixel: 0.01,
            min_scale_factor: 0.01,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of undoable commands kept
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: 100 }
    }
}

/// Grid display settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in world units
    pub spacing: f64,
    pub min_spacing: f64,
    pub max_spacing: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            spacing: 1.0,
            min_spacing: 0.125,
            max_spacing: 64.0,
        }
    }
}

/// Size and lens of the viewport used for projection and picking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 45.0,
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub picking: PickSettings,
    #[serde(default)]
    pub edit: EditSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

impl EditorSettings {
    /// Load settings from the user config directory, or return default if not found
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring malformed {}: {e}", config_path.display()),
                }
            }
        }
        Self::default()
    }

    /// `settings.json` in the user config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "track-editor", "track-editor")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {e}"))
    }

    /// Save settings to the user config directory
    pub fn save(&self) -> Result<PathBuf, String> {
        let path = Self::config_path().ok_or("No config directory on this platform")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}
