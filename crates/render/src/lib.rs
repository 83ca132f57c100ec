//! Rendering Adapter: follow camera, scene composition, renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate game state; frames derive from the store and the camera.
//! - Scene slots compose in a fixed order: environment, player, level, effects.
//! - Camera smoothing is frame-rate independent.

mod camera;
mod renderer;
mod scene;

pub use camera::{FollowCamera, framing_target};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{Instance, LANE_WIDTH, Scene, SceneFrame, SceneLayer, Slot, lane_center};
