//! Shared configuration for sharedraw
//!
//! This crate is the single source of truth for drawer defaults (ray
//! direction, ray length, initial pen) and for the canvas and session
//! settings used by the demo driver. Every struct deserializes from JSON with
//! missing fields falling back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming a JSON session config file
pub const CONFIG_ENV_VAR: &str = "SHAREDRAW_CONFIG";

/// Default ray length in world units
pub const DEFAULT_RAY_DISTANCE: f32 = 5.0;

/// Default pen width in canvas pixels
pub const DEFAULT_PEN_WIDTH: i32 = 3;

/// Default pen color (cyan)
pub const DEFAULT_PEN_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Default canvas resolution in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 512;

/// Default canvas background (white)
pub const DEFAULT_CANVAS_BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Default driver tick rate
pub const DEFAULT_TICK_HZ: u32 = 60;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Axis of the actor's local frame the paint ray travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayDirection {
    Forward,
    Backward,
    Right,
    Left,
    Up,
    #[default]
    Down,
}

/// Pen state a drawer starts with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenDefaults {
    pub ray_cast_enabled: bool,
    pub color: [f32; 4],
    pub width: i32,
    pub erase: bool,
}

impl Default for PenDefaults {
    fn default() -> Self {
        Self {
            ray_cast_enabled: true,
            color: DEFAULT_PEN_COLOR,
            width: DEFAULT_PEN_WIDTH,
            erase: false,
        }
    }
}

/// Per-drawer sampling configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub ray_direction: RayDirection,
    /// Maximum ray length in world units
    pub ray_distance: f32,
    pub pen: PenDefaults,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            ray_direction: RayDirection::default(),
            ray_distance: DEFAULT_RAY_DISTANCE,
            pen: PenDefaults::default(),
        }
    }
}

/// Shared canvas configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Color the canvas starts with and erases back to
    pub background: [f32; 4],
    /// World-space edge length of the square canvas plane
    pub world_size: f32,
    /// Network identity of the canvas object, or None for a local-only canvas
    pub network_id: Option<i32>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            background: DEFAULT_CANVAS_BACKGROUND,
            world_size: 4.0,
            network_id: Some(1),
        }
    }
}

/// Configuration for a demo session: one authority and several observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub drawer: DrawerConfig,
    pub canvas: CanvasConfig,
    /// Ticks per second driven on every peer
    pub tick_hz: u32,
    /// Number of ticks to run before exporting canvases
    pub ticks: u32,
    /// Number of observer peers
    pub observers: u32,
    /// Directory canvases are written to as PNG; None skips export
    pub output_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            drawer: DrawerConfig::default(),
            canvas: CanvasConfig::default(),
            tick_hz: DEFAULT_TICK_HZ,
            ticks: 600,
            observers: 2,
            output_dir: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from the file named by `SHAREDRAW_CONFIG`, or use defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                info!("Loading session config from {:?}", path);
                Self::load(PathBuf::from(path))
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject values the driver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::Invalid("tick_hz must be positive".into()));
        }
        if !(self.drawer.ray_distance.is_finite() && self.drawer.ray_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ray_distance must be positive, got {}",
                self.drawer.ray_distance
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid("canvas dimensions must be non-zero".into()));
        }
        if !(self.canvas.world_size.is_finite() && self.canvas.world_size > 0.0) {
            return Err(ConfigError::Invalid("canvas world_size must be positive".into()));
        }
        Ok(())
    }
}
