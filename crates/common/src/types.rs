use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letters the player collects to clear a sector, in display order.
pub const TARGET_WORD: [char; 6] = ['R', 'U', 'N', 'N', 'E', 'R'];

/// Number of sectors in a full run. Clearing the last one wins the game.
pub const TOTAL_LEVELS: u32 = 3;

/// Forward speed in sector 1, in world units per second.
pub const RUN_SPEED_BASE: f32 = 22.5;

/// Lane count of the first sector.
pub const BASE_LANES: u32 = 3;

/// Lives (and heart slots) at the start of a run.
pub const STARTING_LIVES: u32 = 3;

/// Length of the invincibility window once immortality is triggered.
pub const IMMORTALITY_SECONDS: f32 = 5.0;

/// An sRGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

/// Tile color for each letter of [`TARGET_WORD`], same index.
pub const RUNNER_COLORS: [Rgb; 6] = [
    Rgb::from_hex(0x2979ff),
    Rgb::from_hex(0x00e5ff),
    Rgb::from_hex(0x00e676),
    Rgb::from_hex(0xffea00),
    Rgb::from_hex(0xff9100),
    Rgb::from_hex(0xff1744),
];

/// Top-level session status. Exactly one HUD screen exists per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Shop,
    GameOver,
    Victory,
}

impl GameStatus {
    pub const ALL: [GameStatus; 5] = [
        GameStatus::Menu,
        GameStatus::Playing,
        GameStatus::Shop,
        GameStatus::GameOver,
        GameStatus::Victory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "MENU",
            Self::Playing => "PLAYING",
            Self::Shop => "SHOP",
            Self::GameOver => "GAME_OVER",
            Self::Victory => "VICTORY",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("unknown status '{s}'"))
    }
}

/// Identifier of an upgrade sold in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeId {
    DoubleJump,
    MaxLife,
    Heal,
    Immortal,
}

impl UpgradeId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DoubleJump => "DOUBLE_JUMP",
            Self::MaxLife => "MAX_LIFE",
            Self::Heal => "HEAL",
            Self::Immortal => "IMMORTAL",
        }
    }

    /// One-time upgrades can be owned at most once per run.
    pub fn is_one_time(self) -> bool {
        matches!(self, Self::DoubleJump | Self::Immortal)
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
