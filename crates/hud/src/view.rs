use crate::format::group_thousands;
use crate::shop::{ShopScreen, ShopView};
use rand::Rng;
use runner_common::{GameStatus, RUN_SPEED_BASE, RUNNER_COLORS, Rgb, TARGET_WORD, TOTAL_LEVELS};
use runner_kernel::GameStore;
use serde::Serialize;

/// Symbolic icons; the shell decides how to draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Icon {
    ArrowUp,
    Pulse,
    Plus,
    Shield,
    Heart,
    Bolt,
    Trophy,
    Pin,
    Diamond,
    Rocket,
    Play,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub title: &'static str,
    pub title_accent: &'static str,
    pub badge: &'static str,
    pub start_label: &'static str,
    pub controls_hint: &'static str,
}

impl Default for MenuView {
    fn default() -> Self {
        Self {
            title: "RUN",
            title_accent: "NER",
            badge: "V2",
            start_label: "INITIALIZE RUN",
            controls_hint: "[ SPACE / ARROWS / WASD / SWIPE ]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverView {
    pub title: &'static str,
    pub level_label: &'static str,
    pub level: u32,
    pub total_levels: u32,
    pub gems_label: &'static str,
    pub gems: u32,
    pub distance_label: &'static str,
    /// Whole distance units travelled, shown as light years.
    pub distance_ly: u64,
    pub score_label: &'static str,
    pub score: u64,
    pub score_text: String,
    pub retry_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VictoryView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub score_label: &'static str,
    pub score: u64,
    pub score_text: String,
    pub gems_label: &'static str,
    pub gems: u32,
    pub distance_label: &'static str,
    pub distance_ly: u64,
    pub restart_label: &'static str,
}

/// One tile of the RUNNER letter row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LetterTile {
    pub letter: char,
    pub collected: bool,
    pub color: Rgb,
}

/// The in-run overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub score: u64,
    pub score_text: String,
    /// One entry per heart slot; `true` is a filled heart.
    pub hearts: Vec<bool>,
    pub sector_label: &'static str,
    pub level: u32,
    pub total_levels: u32,
    pub shield_active: bool,
    /// Banner shown while `shield_active`.
    pub shield_label: &'static str,
    pub letters: Vec<LetterTile>,
    pub thrusters_label: &'static str,
    pub thrusters_percent: u32,
}

/// Exactly one screen per store status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum HudView {
    Menu(MenuView),
    Shop(ShopView),
    GameOver(GameOverView),
    Victory(VictoryView),
    Playing(OverlayView),
}

impl HudView {
    /// The status this screen is shown for.
    pub fn status(&self) -> GameStatus {
        match self {
            Self::Menu(_) => GameStatus::Menu,
            Self::Shop(_) => GameStatus::Shop,
            Self::GameOver(_) => GameStatus::GameOver,
            Self::Victory(_) => GameStatus::Victory,
            Self::Playing(_) => GameStatus::Playing,
        }
    }

    /// Whether the screen captures pointer input (everything but the in-run overlay).
    pub fn is_modal(&self) -> bool {
        !matches!(self, Self::Playing(_))
    }
}

/// Heart slots for `max_lives`, the first `lives` filled. `lives` above the
/// slot count fills every slot and nothing more.
pub fn heart_row(lives: u32, max_lives: u32) -> Vec<bool> {
    let filled = lives.min(max_lives);
    (0..max_lives).map(|i| i < filled).collect()
}

/// Current speed as a percentage of the base run speed.
pub fn thrusters_percent(speed: f32) -> u32 {
    (speed / RUN_SPEED_BASE * 100.0).round().max(0.0) as u32
}

/// HUD state held across frames.
///
/// The shop roll is the only thing kept: every other screen is rebuilt from
/// the store each frame, but the three offers stay fixed while the shop is
/// mounted so they don't reshuffle under the pointer.
#[derive(Debug, Default)]
pub struct Hud {
    shop: ShopScreen,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive this frame's screen from the store.
    ///
    /// Not a pure function of `store`. Entering the shop, or buying a one-time
    /// upgrade there, rolls new offers from `rng` and keeps them in `self`;
    /// leaving the shop drops the roll.
    pub fn view<R: Rng + ?Sized>(&mut self, store: &GameStore, rng: &mut R) -> HudView {
        if store.status() != GameStatus::Shop && self.shop.is_mounted() {
            self.shop.unmount();
        }

        match store.status() {
            GameStatus::Shop => {
                self.shop.sync(store, rng);
                HudView::Shop(self.shop.view(store))
            }
            GameStatus::Menu => HudView::Menu(MenuView::default()),
            GameStatus::GameOver => HudView::GameOver(GameOverView {
                title: "GAME OVER",
                level_label: "LEVEL REACHED",
                level: store.level(),
                total_levels: TOTAL_LEVELS,
                gems_label: "BLUE CRYSTALS",
                gems: store.gems_collected(),
                distance_label: "RANGE",
                distance_ly: store.distance().max(0.0).floor() as u64,
                score_label: "TOTAL SCORE",
                score: store.score(),
                score_text: group_thousands(store.score()),
                retry_label: "TRY AGAIN",
            }),
            GameStatus::Victory => HudView::Victory(VictoryView {
                title: "MISSION ACCOMPLISHED",
                subtitle: "Champion of the Void",
                score_label: "FINAL DATA SCORE",
                score: store.score(),
                score_text: group_thousands(store.score()),
                gems_label: "BLUE CRYSTALS",
                gems: store.gems_collected(),
                distance_label: "TRAVEL DISTANCE",
                distance_ly: store.distance().max(0.0).floor() as u64,
                restart_label: "NEW EXPEDITION",
            }),
            GameStatus::Playing => HudView::Playing(overlay(store)),
        }
    }
}

fn overlay(store: &GameStore) -> OverlayView {
    let collected = store.collected_letters();
    let letters = TARGET_WORD
        .iter()
        .zip(RUNNER_COLORS)
        .enumerate()
        .map(|(i, (&letter, color))| LetterTile {
            letter,
            collected: collected.contains(&i),
            color,
        })
        .collect();

    OverlayView {
        score: store.score(),
        score_text: group_thousands(store.score()),
        hearts: heart_row(store.lives(), store.max_lives()),
        sector_label: "SECTOR",
        level: store.level(),
        total_levels: TOTAL_LEVELS,
        shield_active: store.is_immortality_active(),
        shield_label: "SHIELD ACTIVE",
        letters,
        thrusters_label: "THRUSTERS",
        thrusters_percent: thrusters_percent(store.speed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use runner_common::UpgradeId;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn store_in(status: GameStatus) -> GameStore {
        let mut s = GameStore::new();
        match status {
            GameStatus::Menu => {}
            GameStatus::Playing => s.start_game(),
            GameStatus::Shop => {
                s.start_game();
                s.open_shop().unwrap();
            }
            GameStatus::GameOver => {
                s.start_game();
                while s.take_damage() {}
            }
            GameStatus::Victory => {
                s.start_game();
                for _ in 0..TOTAL_LEVELS {
                    s.close_shop();
                    for i in 0..TARGET_WORD.len() {
                        s.collect_letter(i).unwrap();
                    }
                }
            }
        }
        assert_eq!(s.status(), status);
        s
    }

    #[test]
    fn each_status_maps_to_its_own_screen() {
        let mut hud = Hud::new();
        for status in GameStatus::ALL {
            let view = hud.view(&store_in(status), &mut rng());
            assert_eq!(view.status(), status);
        }
    }

    #[test]
    fn only_the_overlay_is_non_modal() {
        let mut hud = Hud::new();
        for status in GameStatus::ALL {
            let view = hud.view(&store_in(status), &mut rng());
            assert_eq!(view.is_modal(), status != GameStatus::Playing);
        }
    }

    #[test]
    fn hearts_match_slots_and_clamp() {
        assert_eq!(heart_row(2, 3), vec![true, true, false]);
        assert_eq!(heart_row(0, 3), vec![false, false, false]);
        assert_eq!(heart_row(9, 4), vec![true; 4]);
        assert!(heart_row(1, 0).is_empty());
        for max in 0..6 {
            for lives in 0..8 {
                let row = heart_row(lives, max);
                assert_eq!(row.len() as u32, max);
                assert_eq!(row.iter().filter(|h| **h).count() as u32, lives.min(max));
            }
        }
    }

    #[test]
    fn overlay_reflects_store() {
        let mut s = store_in(GameStatus::Playing);
        s.collect_gem(12_500);
        s.collect_letter(0).unwrap();
        s.collect_letter(3).unwrap();
        s.take_damage();

        let HudView::Playing(o) = Hud::new().view(&s, &mut rng()) else {
            panic!("expected overlay");
        };
        assert_eq!(o.score_text, "12,500");
        assert_eq!(o.hearts, vec![true, true, false]);
        assert_eq!(o.level, 1);
        assert_eq!(o.total_levels, 3);
        assert!(!o.shield_active);
        assert_eq!(o.thrusters_percent, 100);
        let collected: Vec<bool> = o.letters.iter().map(|t| t.collected).collect();
        assert_eq!(collected, vec![true, false, false, true, false, false]);
        let word: String = o.letters.iter().map(|t| t.letter).collect();
        assert_eq!(word, "RUNNER");
        assert_eq!(o.letters[5].color, RUNNER_COLORS[5]);
    }

    #[test]
    fn shield_banner_follows_immortality() {
        let mut s = store_in(GameStatus::Playing);
        s.collect_gem(3000);
        s.open_shop().unwrap();
        s.buy_item(UpgradeId::Immortal, 3000).unwrap();
        s.close_shop();
        s.activate_immortality();

        let HudView::Playing(o) = Hud::new().view(&s, &mut rng()) else {
            panic!("expected overlay");
        };
        assert!(o.shield_active);
        assert_eq!(o.shield_label, "SHIELD ACTIVE");
    }

    #[test]
    fn game_over_summary_floors_distance() {
        let mut s = GameStore::new();
        s.start_game();
        s.advance(1.0);
        while s.take_damage() {}

        let HudView::GameOver(g) = Hud::new().view(&s, &mut rng()) else {
            panic!("expected game over");
        };
        assert_eq!(g.distance_ly, RUN_SPEED_BASE.floor() as u64);
        assert_eq!(g.level, 1);
        assert_eq!(g.retry_label, "TRY AGAIN");
    }

    #[test]
    fn summary_screens_carry_their_labels() {
        let mut hud = Hud::new();
        let HudView::GameOver(g) = hud.view(&store_in(GameStatus::GameOver), &mut rng()) else {
            panic!("expected game over");
        };
        assert_eq!(g.title, "GAME OVER");
        assert_eq!(g.level_label, "LEVEL REACHED");
        assert_eq!(g.gems_label, "BLUE CRYSTALS");
        assert_eq!(g.distance_label, "RANGE");
        assert_eq!(g.score_label, "TOTAL SCORE");

        let HudView::Victory(v) = hud.view(&store_in(GameStatus::Victory), &mut rng()) else {
            panic!("expected victory");
        };
        assert_eq!(v.score_label, "FINAL DATA SCORE");
        assert_eq!(v.gems_label, "BLUE CRYSTALS");
        assert_eq!(v.distance_label, "TRAVEL DISTANCE");
    }

    #[test]
    fn shop_roll_is_kept_until_the_shop_closes() {
        let mut hud = Hud::new();
        let mut s = store_in(GameStatus::Shop);
        let HudView::Shop(first) = hud.view(&s, &mut StdRng::seed_from_u64(1)) else {
            panic!("expected shop");
        };
        // A different rng must not reshuffle a mounted shop.
        let HudView::Shop(again) = hud.view(&s, &mut StdRng::seed_from_u64(2)) else {
            panic!("expected shop");
        };
        assert_eq!(first.offers, again.offers);

        s.close_shop();
        hud.view(&s, &mut rng());
        assert!(!hud.shop.is_mounted());
    }

    #[test]
    fn leaving_the_shop_rerolls_on_return() {
        let mut hud = Hud::new();
        let mut s = store_in(GameStatus::Shop);
        let mut r = rng();
        assert!(matches!(hud.view(&s, &mut r), HudView::Shop(_)));
        assert!(hud.shop.is_mounted());

        s.close_shop();
        assert!(matches!(hud.view(&s, &mut r), HudView::Playing(_)));
        assert!(!hud.shop.is_mounted());
    }

    #[test]
    fn thrusters_scale_with_speed() {
        assert_eq!(thrusters_percent(RUN_SPEED_BASE), 100);
        assert_eq!(thrusters_percent(RUN_SPEED_BASE * 1.5), 150);
        assert_eq!(thrusters_percent(0.0), 0);
    }

    #[test]
    fn views_serialize_with_screen_tag() {
        let view = Hud::new().view(&GameStore::new(), &mut rng());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["screen"], "menu");
        assert_eq!(json["start_label"], "INITIALIZE RUN");
    }
}
