//! wgpu render backend for the runner.
//!
//! Draws the track floor as lines and every scene instance as a lit box,
//! both faded into the horizon with distance fog.
//!
//! # Invariants
//! - Renderer never mutates game state.
//! - Instances beyond the buffer capacity are dropped with a warning, not drawn.

mod gpu;
mod shaders;

pub use gpu::{CLEAR_COLOR, WgpuRenderer};
