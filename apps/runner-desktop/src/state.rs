use crate::hud_ui;
use crate::layers::{PlayerRig, ShieldLayer, TrackLayer};
use egui::Context as EguiContext;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use runner_audio::{AudioSystem, Cue};
use runner_common::{AppConfig, GameStatus};
use runner_hud::{Hud, HudAction, dispatch};
use runner_input::{Action, Bindings, Key, SwipeTracker};
use runner_kernel::GameStore;
use runner_render::{FollowCamera, Scene, SceneFrame, Slot};
use std::time::Instant;
use winit::keyboard::KeyCode;

const DEV_GEM_VALUE: u64 = 250;
/// Shield ring turn rate, radians per second.
const SHIELD_SPIN: f32 = 3.0;

fn input_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::KeyA => Key::KeyA,
        KeyCode::KeyD => Key::KeyD,
        KeyCode::KeyW => Key::KeyW,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        _ => return None,
    })
}

/// Everything the shell owns between frames.
pub struct AppState {
    pub config: AppConfig,
    pub store: GameStore,
    pub audio: AudioSystem,
    pub hud: Hud,
    pub camera: FollowCamera,
    pub bindings: Bindings,
    pub swipe: SwipeTracker,
    pub player: PlayerRig,
    pub cursor: Vec2,
    pub last_frame: Instant,
    rng: StdRng,
    shield_phase: f32,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let camera = FollowCamera::new(&config.camera, &config.render);
        let store = GameStore::new();
        let player = PlayerRig::new(store.lane_count());
        Self {
            config,
            store,
            audio: AudioSystem::default(),
            hud: Hud::new(),
            camera,
            bindings: Bindings::default(),
            swipe: SwipeTracker::default(),
            player,
            cursor: Vec2::ZERO,
            last_frame: Instant::now(),
            rng: StdRng::from_entropy(),
            shield_phase: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let was_playing = self.store.status() == GameStatus::Playing;
        self.store.advance(dt);
        if was_playing {
            self.player.update(dt, self.store.lane_count());
            self.shield_phase += dt * SHIELD_SPIN;
        }
        self.camera.update(self.store.lane_count(), dt);
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        if let Some(action) = input_key(code).and_then(|k| self.bindings.action_for(k)) {
            self.apply(action);
            return;
        }
        self.dev_hotkey(code);
    }

    pub fn pointer_pressed(&mut self) {
        self.swipe.begin(self.cursor);
    }

    pub fn pointer_released(&mut self) {
        if let Some(action) = self.swipe.end(self.cursor) {
            self.apply(action);
        }
    }

    /// Gameplay actions only land while a run is in progress.
    pub fn apply(&mut self, action: Action) {
        if self.store.status() != GameStatus::Playing {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.player.shift(-1);
            }
            Action::MoveRight => {
                self.player.shift(1);
            }
            Action::Jump => {
                if self.player.jump(self.store.has_double_jump()) {
                    self.audio.play(Cue::Jump);
                }
            }
            Action::ActivateImmortality => {
                self.store.activate_immortality();
            }
        }
    }

    /// Keys standing in for level pickups and hazards.
    fn dev_hotkey(&mut self, code: KeyCode) {
        match code {
            KeyCode::KeyG => {
                self.store.collect_gem(DEV_GEM_VALUE);
            }
            KeyCode::KeyL => {
                let next = (0..runner_common::TARGET_WORD.len())
                    .find(|i| !self.store.collected_letters().contains(i));
                let Some(index) = next else {
                    return;
                };
                if let Err(e) = self.store.collect_letter(index) {
                    tracing::warn!("letter pickup rejected: {e}");
                }
            }
            KeyCode::KeyH => {
                self.store.take_damage();
            }
            KeyCode::KeyP => {
                if let Err(e) = self.store.open_shop() {
                    tracing::warn!("{e}");
                }
            }
            _ => {}
        }
    }

    /// Build this frame's scene from the player rig and the store.
    pub fn compose(&self) -> SceneFrame {
        let track = TrackLayer {
            distance: self.store.distance(),
            lane_count: self.store.lane_count(),
        };
        let shield = ShieldLayer {
            center: self.player.position(),
            phase: self.shield_phase,
        };
        let mut scene = Scene::new()
            .with(Slot::Environment, &track)
            .with(Slot::Player, &self.player);
        if self.store.is_immortality_active() {
            scene.mount(Slot::Effects, &shield);
        }
        scene.compose()
    }

    /// Draw the HUD for the current status and apply what it returns.
    pub fn draw_ui(&mut self, ctx: &EguiContext) {
        let view = self.hud.view(&self.store, &mut self.rng);
        for action in hud_ui::draw(ctx, &view) {
            self.handle_hud_action(action);
        }
    }

    pub fn handle_hud_action(&mut self, action: HudAction) {
        let starts_run = matches!(action, HudAction::StartGame | HudAction::RestartGame);
        match dispatch(action, &mut self.store, &mut self.audio) {
            Ok(()) if starts_run => self.player = PlayerRig::new(self.store.lane_count()),
            Ok(()) => {}
            Err(e) => tracing::warn!(?action, "hud action rejected: {e}"),
        }
    }

    /// Hand this frame's store events to the audio gate.
    pub fn flush_events(&mut self) {
        let events = self.store.drain_events();
        if !events.is_empty() {
            self.audio.handle_events(&events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> AppState {
        let mut app = AppState::new(AppConfig::default());
        app.handle_hud_action(HudAction::StartGame);
        app
    }

    #[test]
    fn keys_only_move_the_player_during_a_run() {
        let mut app = AppState::new(AppConfig::default());
        app.handle_key(KeyCode::ArrowLeft, true);
        assert_eq!(app.player.lane(), 1);

        app.handle_hud_action(HudAction::StartGame);
        app.handle_key(KeyCode::KeyA, true);
        assert_eq!(app.player.lane(), 0);
        app.handle_key(KeyCode::KeyD, false);
        assert_eq!(app.player.lane(), 0);
    }

    #[test]
    fn start_opens_the_audio_gate() {
        let app = playing();
        assert!(app.audio.is_initialized());
        assert_eq!(app.store.status(), GameStatus::Playing);
    }

    #[test]
    fn dev_letters_clear_a_sector_into_the_shop() {
        let mut app = playing();
        for _ in 0..runner_common::TARGET_WORD.len() {
            app.handle_key(KeyCode::KeyL, true);
        }
        assert_eq!(app.store.status(), GameStatus::Shop);
        assert_eq!(app.store.level(), 2);
        app.handle_hud_action(HudAction::CloseShop);
        app.update(0.5);
        assert_eq!(app.player.lane(), 2);
    }

    #[test]
    fn failed_purchase_is_logged_not_fatal() {
        let mut app = playing();
        app.handle_key(KeyCode::KeyP, true);
        app.handle_hud_action(HudAction::BuyItem {
            id: runner_common::UpgradeId::Immortal,
            cost: 3000,
        });
        assert!(!app.store.has_immortality());
        assert_eq!(app.store.status(), GameStatus::Shop);
    }

    #[test]
    fn frame_mounts_shield_only_while_immortal() {
        let mut app = playing();
        let plain = app.compose();
        assert_eq!(plain.slot(Slot::Effects).len(), 0);
        assert_eq!(plain.player_instances().len(), 2);

        for _ in 0..12 {
            app.handle_key(KeyCode::KeyG, true);
        }
        app.handle_key(KeyCode::KeyP, true);
        app.handle_hud_action(HudAction::BuyItem {
            id: runner_common::UpgradeId::Immortal,
            cost: 3000,
        });
        app.handle_hud_action(HudAction::CloseShop);
        app.handle_key(KeyCode::ShiftLeft, true);
        assert!(app.store.is_immortality_active());
        assert_eq!(app.compose().slot(Slot::Effects).len(), 4);
    }

    #[test]
    fn swipe_moves_player() {
        let mut app = playing();
        app.cursor = Vec2::new(400.0, 300.0);
        app.pointer_pressed();
        app.cursor = Vec2::new(520.0, 310.0);
        app.pointer_released();
        assert_eq!(app.player.lane(), 2);
    }

    #[test]
    fn jump_cue_is_dropped_until_gate_opens() {
        let mut app = AppState::new(AppConfig::default());
        app.audio.play(Cue::Jump);
        assert_eq!(app.audio.dropped(), 1);
    }
}
