//! HUD: screen view models derived from the game store, the upgrade shop,
//! and the actions the overlay sends back.
//!
//! # Invariants
//! - Every [`GameStatus`](runner_common::GameStatus) maps to exactly one screen.
//! - Views are plain data; drawing them is the shell's job.
//! - The overlay writes to the store only through [`dispatch`].

mod action;
mod format;
mod shop;
mod view;

pub use action::{HudAction, dispatch};
pub use format::group_thousands;
pub use shop::{CATALOG, MAX_OFFERS, OfferView, ShopItem, ShopScreen, ShopView, select_offers};
pub use view::{
    GameOverView, Hud, HudView, Icon, LetterTile, MenuView, OverlayView, VictoryView, heart_row,
    thrusters_percent,
};
