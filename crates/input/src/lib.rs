//! Input: keyboard keys and touch swipes mapped to one shared action set.
//!
//! # Invariants
//! - Gameplay consumes [`Action`]s, never raw device events.
//! - Keyboard and touch produce the same actions.

pub mod action;
pub mod swipe;

pub use action::{Action, Bindings, Key};
pub use swipe::{SwipeTracker, classify_swipe};
