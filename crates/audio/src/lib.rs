//! Audio gate: sound cues derived from store events, held back until the
//! player has interacted with the game.
//!
//! # Invariants
//! - No cue reaches a sink before [`AudioSystem::init`].
//! - `init` is idempotent.

mod cue;
mod gate;

pub use cue::Cue;
pub use gate::{AudioSink, AudioSystem, LogSink, RecordingSink};
