//! Session Kernel: the single source of truth for one game session.
//!
//! # Invariants
//! - All state mutations flow through explicit operations on [`GameStore`].
//! - `lives <= max_lives` after every operation.
//! - Views never hold state of their own that the store also owns.

pub mod store;

pub use store::{GameStore, StoreError, StoreEvent};
