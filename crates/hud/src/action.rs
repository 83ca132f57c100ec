use runner_audio::{AudioSink, AudioSystem};
use runner_common::UpgradeId;
use runner_kernel::{GameStore, StoreError};

/// User intent coming back out of the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    /// "INITIALIZE RUN" on the menu.
    StartGame,
    /// "TRY AGAIN" / "NEW EXPEDITION".
    RestartGame,
    BuyItem { id: UpgradeId, cost: u64 },
    CloseShop,
}

/// Apply `action` to the store.
///
/// Start and restart come from a button press, which is the user gesture that
/// unlocks audio, so they open the audio gate first.
pub fn dispatch<S: AudioSink>(
    action: HudAction,
    store: &mut GameStore,
    audio: &mut AudioSystem<S>,
) -> Result<(), StoreError> {
    tracing::debug!(?action, status = %store.status(), "hud action");
    match action {
        HudAction::StartGame => {
            audio.init();
            store.start_game();
        }
        HudAction::RestartGame => {
            audio.init();
            store.restart_game();
        }
        HudAction::BuyItem { id, cost } => store.buy_item(id, cost)?,
        HudAction::CloseShop => store.close_shop(),
    }
    Ok(())
}
