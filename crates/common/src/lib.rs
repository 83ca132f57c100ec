//! Shared types for the runner client: session status, upgrade ids, run
//! constants and the TOML application configuration.

pub mod config;
pub mod types;

pub use config::{AppConfig, CameraConfig, ConfigError, PowerPreference, RenderConfig, WindowConfig};
pub use types::{
    BASE_LANES, GameStatus, IMMORTALITY_SECONDS, RUN_SPEED_BASE, RUNNER_COLORS, Rgb,
    STARTING_LIVES, TARGET_WORD, TOTAL_LEVELS, UpgradeId,
};
