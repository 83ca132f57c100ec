//! Application configuration loaded from a TOML file.
//!
//! Every key is optional; missing tables and keys fall back to the values the
//! game ships with. A few render keys can be overridden from the environment
//! for quick tuning without editing the file.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "RUNNER V2".into(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    #[default]
    HighPerformance,
    LowPower,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Upper bound for the device pixel ratio of the 3D view and the overlay.
    /// The lower bound is 1.
    pub max_pixel_ratio: f32,
    pub power_preference: PowerPreference,
    /// Camera position before the first frame of smoothing.
    pub initial_camera: Vec3,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            max_pixel_ratio: 2.0,
            power_preference: PowerPreference::HighPerformance,
            initial_camera: Vec3::new(0.0, 6.0, 10.0),
        }
    }
}

impl RenderConfig {
    /// Clamp a native scale factor into `[1, max_pixel_ratio]`.
    pub fn pixel_ratio(&self, native: f32) -> f32 {
        native.clamp(1.0, self.max_pixel_ratio.max(1.0))
    }

    /// Overlay zoom that turns a `native` scale factor into [`pixel_ratio`](Self::pixel_ratio).
    pub fn overlay_zoom(&self, native: f32) -> f32 {
        if native > 0.0 {
            self.pixel_ratio(native) / native
        } else {
            1.0
        }
    }

    /// Size of the 3D render target for a surface of `physical` pixels at
    /// scale factor `native`: logical size times the clamped pixel ratio.
    pub fn render_size(&self, physical: (u32, u32), native: f32) -> (u32, u32) {
        let zoom = self.overlay_zoom(native);
        let scale = |px: u32| ((px as f32 * zoom).round() as u32).clamp(1, px.max(1));
        (scale(physical.0), scale(physical.1))
    }
}

/// Follow-camera tuning. The defaults reproduce the shipped framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per second.
    pub smoothing: f32,
    pub look_at: Vec3,
    pub base_height: f32,
    pub base_distance: f32,
    /// Lane count the base framing is tuned for.
    pub base_lanes: u32,
    /// Height and distance added per lane beyond `base_lanes`.
    pub per_lane: f32,
    /// Aspect ratio below which the portrait correction starts.
    pub portrait_pivot: f32,
    pub portrait_gain: f32,
    pub portrait_height: f32,
    pub portrait_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 3.0,
            look_at: Vec3::new(0.0, 0.0, -35.0),
            base_height: 5.5,
            base_distance: 8.0,
            base_lanes: 3,
            per_lane: 0.8,
            portrait_pivot: 1.2,
            portrait_gain: 2.5,
            portrait_height: 2.5,
            portrait_distance: 4.0,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path`, or return defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut cfg = if path.is_file() {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!("loading config from {}", path.display());
            Self::from_toml_str(&text)?
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Self::default()
        };
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `RUNNER_FOV_DEG` and `RUNNER_MAX_PIXEL_RATIO` when set and parseable.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("RUNNER_FOV_DEG").and_then(|s| s.parse().ok()) {
            self.render.fov_deg = v;
        }
        if let Some(v) = lookup("RUNNER_MAX_PIXEL_RATIO").and_then(|s| s.parse().ok()) {
            self.render.max_pixel_ratio = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                key: "window.width/height",
                reason: "must be non-zero".into(),
            });
        }
        if !(1.0..=179.0).contains(&self.render.fov_deg) {
            return Err(ConfigError::Invalid {
                key: "render.fov_deg",
                reason: format!("{} is outside 1..=179", self.render.fov_deg),
            });
        }
        if !self.render.max_pixel_ratio.is_finite() || self.render.max_pixel_ratio < 1.0 {
            return Err(ConfigError::Invalid {
                key: "render.max_pixel_ratio",
                reason: format!("{} must be finite and at least 1", self.render.max_pixel_ratio),
            });
        }
        let cam = &self.camera;
        if !cam.smoothing.is_finite() || cam.smoothing <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "camera.smoothing",
                reason: format!("{} must be finite and positive", cam.smoothing),
            });
        }
        // Negative growth terms would pull the camera down as the view narrows.
        for (key, value) in [
            ("camera.per_lane", cam.per_lane),
            ("camera.portrait_gain", cam.portrait_gain),
            ("camera.portrait_height", cam.portrait_height),
            ("camera.portrait_distance", cam.portrait_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("{value} must be finite and non-negative"),
                });
            }
        }
        Ok(())
    }
}
