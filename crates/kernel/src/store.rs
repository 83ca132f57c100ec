use runner_common::{
    BASE_LANES, GameStatus, IMMORTALITY_SECONDS, RUN_SPEED_BASE, STARTING_LIVES, TARGET_WORD,
    TOTAL_LEVELS, UpgradeId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lanes added to the track each time a sector is cleared.
const LANES_PER_LEVEL: u32 = 2;

/// Speed multiplier added per cleared sector, relative to [`RUN_SPEED_BASE`].
const SPEED_STEP_PER_LEVEL: f32 = 0.25;

/// A record produced by every mutation of the store.
///
/// The shell drains these once per frame; the audio layer turns them into cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    RunStarted { restart: bool },
    GemCollected { value: u64, total: u32 },
    LetterCollected { index: usize },
    LevelCompleted { level: u32 },
    ShopOpened,
    ShopClosed,
    Purchased { item: UpgradeId, cost: u64 },
    Damaged { lives_left: u32 },
    DamageBlocked,
    ImmortalityActivated,
    ImmortalityExpired,
    GameOver,
    Victory,
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("not enough credits: {cost} needed, {score} available")]
    InsufficientCredits { cost: u64, score: u64 },
    #[error("{0} is already owned")]
    AlreadyOwned(UpgradeId),
    #[error("{op} is not allowed while {status}")]
    InvalidStatus { op: &'static str, status: GameStatus },
    #[error("letter index {0} is outside the target word")]
    LetterOutOfRange(usize),
}

/// The authoritative state of one game session.
///
/// Views read it through accessors and write back only through the explicit
/// operations below. Gameplay operations are ignored unless the run is in
/// [`GameStatus::Playing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStore {
    status: GameStatus,
    score: u64,
    lives: u32,
    max_lives: u32,
    collected_letters: BTreeSet<usize>,
    level: u32,
    gems_collected: u32,
    distance: f32,
    speed: f32,
    lane_count: u32,
    has_double_jump: bool,
    has_immortality: bool,
    is_immortality_active: bool,
    immortality_remaining: f32,
    #[serde(skip)]
    event_log: Vec<StoreEvent>,
}

impl Default for GameStore {
    fn default() -> Self {
        Self {
            status: GameStatus::Menu,
            score: 0,
            lives: STARTING_LIVES,
            max_lives: STARTING_LIVES,
            collected_letters: BTreeSet::new(),
            level: 1,
            gems_collected: 0,
            distance: 0.0,
            speed: RUN_SPEED_BASE,
            lane_count: BASE_LANES,
            has_double_jump: false,
            has_immortality: false,
            is_immortality_active: false,
            immortality_remaining: 0.0,
            event_log: Vec::new(),
        }
    }
}

impl GameStore {
    /// A fresh store sitting on the main menu.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Indices into [`TARGET_WORD`] collected in the current sector.
    pub fn collected_letters(&self) -> &BTreeSet<usize> {
        &self.collected_letters
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gems_collected(&self) -> u32 {
        self.gems_collected
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    pub fn has_double_jump(&self) -> bool {
        self.has_double_jump
    }

    pub fn has_immortality(&self) -> bool {
        self.has_immortality
    }

    pub fn is_immortality_active(&self) -> bool {
        self.is_immortality_active
    }

    /// Seconds left in the current immortality window, zero when inactive.
    pub fn immortality_remaining(&self) -> f32 {
        self.immortality_remaining
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[StoreEvent] {
        &self.event_log
    }

    /// Leave the menu and begin a fresh run.
    pub fn start_game(&mut self) {
        self.begin_run(false);
    }

    /// Throw away the current run (purchases included) and begin a fresh one.
    pub fn restart_game(&mut self) {
        self.begin_run(true);
    }

    fn begin_run(&mut self, restart: bool) {
        let log = std::mem::take(&mut self.event_log);
        *self = Self {
            status: GameStatus::Playing,
            event_log: log,
            ..Self::default()
        };
        tracing::info!(restart, "run started");
        self.event_log.push(StoreEvent::RunStarted { restart });
    }

    /// Move time forward by `dt` seconds of play.
    pub fn advance(&mut self, dt: f32) {
        if self.status != GameStatus::Playing || dt <= 0.0 {
            return;
        }
        self.distance += self.speed * dt;

        if self.is_immortality_active {
            self.immortality_remaining -= dt;
            if self.immortality_remaining <= 0.0 {
                self.is_immortality_active = false;
                self.immortality_remaining = 0.0;
                tracing::debug!("immortality expired");
                self.event_log.push(StoreEvent::ImmortalityExpired);
            }
        }
    }

    /// Credit a collected gem worth `value` points. Returns whether it counted.
    pub fn collect_gem(&mut self, value: u64) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.gems_collected = self.gems_collected.saturating_add(1);
        self.score = self.score.saturating_add(value);
        self.event_log.push(StoreEvent::GemCollected {
            value,
            total: self.gems_collected,
        });
        true
    }

    /// Record the letter at `index` of the target word.
    ///
    /// Returns `Ok(true)` when the letter was new. Holding all letters clears
    /// the sector: the last sector wins the game, earlier ones open the shop.
    pub fn collect_letter(&mut self, index: usize) -> Result<bool, StoreError> {
        if index >= TARGET_WORD.len() {
            return Err(StoreError::LetterOutOfRange(index));
        }
        if self.status != GameStatus::Playing || !self.collected_letters.insert(index) {
            return Ok(false);
        }
        self.event_log.push(StoreEvent::LetterCollected { index });

        if self.collected_letters.len() == TARGET_WORD.len() {
            self.complete_level();
        }
        Ok(true)
    }

    fn complete_level(&mut self) {
        self.event_log.push(StoreEvent::LevelCompleted { level: self.level });

        if self.level >= TOTAL_LEVELS {
            tracing::info!(score = self.score, "final sector cleared");
            self.status = GameStatus::Victory;
            self.is_immortality_active = false;
            self.immortality_remaining = 0.0;
            self.event_log.push(StoreEvent::Victory);
            return;
        }

        self.level += 1;
        self.collected_letters.clear();
        self.lane_count += LANES_PER_LEVEL;
        self.speed = RUN_SPEED_BASE * (1.0 + SPEED_STEP_PER_LEVEL * (self.level - 1) as f32);
        tracing::info!(
            level = self.level,
            lanes = self.lane_count,
            speed = self.speed,
            "sector cleared"
        );
        self.enter_shop();
    }

    /// Lose one life unless immortality is active. Returns whether a life was lost.
    pub fn take_damage(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        if self.is_immortality_active {
            self.event_log.push(StoreEvent::DamageBlocked);
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        self.event_log.push(StoreEvent::Damaged {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            tracing::info!(score = self.score, distance = self.distance, "run over");
            self.status = GameStatus::GameOver;
            self.event_log.push(StoreEvent::GameOver);
        }
        true
    }

    /// Trigger the owned immortality ability. Returns whether it started.
    pub fn activate_immortality(&mut self) -> bool {
        if self.status != GameStatus::Playing
            || !self.has_immortality
            || self.is_immortality_active
        {
            return false;
        }
        self.is_immortality_active = true;
        self.immortality_remaining = IMMORTALITY_SECONDS;
        self.event_log.push(StoreEvent::ImmortalityActivated);
        true
    }

    /// Pause the run at an upgrade bay.
    pub fn open_shop(&mut self) -> Result<(), StoreError> {
        if self.status != GameStatus::Playing {
            return Err(StoreError::InvalidStatus {
                op: "open_shop",
                status: self.status,
            });
        }
        self.enter_shop();
        Ok(())
    }

    fn enter_shop(&mut self) {
        self.status = GameStatus::Shop;
        self.event_log.push(StoreEvent::ShopOpened);
    }

    /// Resume the run. Does nothing outside the shop.
    pub fn close_shop(&mut self) {
        if self.status != GameStatus::Shop {
            return;
        }
        self.status = GameStatus::Playing;
        self.event_log.push(StoreEvent::ShopClosed);
    }

    /// Buy `item` for `cost` credits.
    pub fn buy_item(&mut self, item: UpgradeId, cost: u64) -> Result<(), StoreError> {
        if self.status != GameStatus::Shop {
            return Err(StoreError::InvalidStatus {
                op: "buy_item",
                status: self.status,
            });
        }
        if self.owns(item) {
            return Err(StoreError::AlreadyOwned(item));
        }
        if self.score < cost {
            return Err(StoreError::InsufficientCredits {
                cost,
                score: self.score,
            });
        }

        self.score -= cost;
        match item {
            UpgradeId::DoubleJump => self.has_double_jump = true,
            UpgradeId::MaxLife => {
                self.max_lives += 1;
                self.lives = (self.lives + 1).min(self.max_lives);
            }
            UpgradeId::Heal => self.lives = (self.lives + 1).min(self.max_lives),
            UpgradeId::Immortal => self.has_immortality = true,
        }
        tracing::info!(%item, cost, score = self.score, "upgrade purchased");
        self.event_log.push(StoreEvent::Purchased { item, cost });
        Ok(())
    }

    /// Whether a one-time upgrade is already owned. Repeatable upgrades never are.
    pub fn owns(&self, item: UpgradeId) -> bool {
        match item {
            UpgradeId::DoubleJump => self.has_double_jump,
            UpgradeId::Immortal => self.has_immortality,
            UpgradeId::MaxLife | UpgradeId::Heal => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> GameStore {
        let mut s = GameStore::new();
        s.start_game();
        s.drain_events();
        s
    }

    fn clear_sector(s: &mut GameStore) {
        for i in 0..TARGET_WORD.len() {
            s.collect_letter(i).unwrap();
        }
    }

    #[test]
    fn store_starts_on_menu() {
        let s = GameStore::new();
        assert_eq!(s.status(), GameStatus::Menu);
        assert_eq!(s.lives(), STARTING_LIVES);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lane_count(), BASE_LANES);
    }

    #[test]
    fn start_game_plays_and_logs() {
        let mut s = GameStore::new();
        s.start_game();
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.events(), &[StoreEvent::RunStarted { restart: false }]);
    }

    #[test]
    fn advance_accumulates_distance_only_while_playing() {
        let mut s = GameStore::new();
        s.advance(1.0);
        assert_eq!(s.distance(), 0.0);

        s.start_game();
        s.advance(2.0);
        assert!((s.distance() - RUN_SPEED_BASE * 2.0).abs() < 1e-4);
        s.advance(-1.0);
        assert!((s.distance() - RUN_SPEED_BASE * 2.0).abs() < 1e-4);
    }

    #[test]
    fn gems_add_score() {
        let mut s = playing();
        assert!(s.collect_gem(50));
        assert!(s.collect_gem(50));
        assert_eq!(s.gems_collected(), 2);
        assert_eq!(s.score(), 100);
    }

    #[test]
    fn score_saturates_instead_of_wrapping() {
        let mut s = playing();
        assert!(s.collect_gem(u64::MAX));
        assert!(s.collect_gem(u64::MAX));
        assert_eq!(s.score(), u64::MAX);
        assert_eq!(s.gems_collected(), 2);
    }

    #[test]
    fn duplicate_and_out_of_range_letters() {
        let mut s = playing();
        assert_eq!(s.collect_letter(2), Ok(true));
        assert_eq!(s.collect_letter(2), Ok(false));
        assert_eq!(s.collect_letter(6), Err(StoreError::LetterOutOfRange(6)));
        assert_eq!(s.collected_letters().len(), 1);
    }

    #[test]
    fn clearing_a_sector_widens_track_and_opens_shop() {
        let mut s = playing();
        clear_sector(&mut s);
        assert_eq!(s.status(), GameStatus::Shop);
        assert_eq!(s.level(), 2);
        assert_eq!(s.lane_count(), BASE_LANES + LANES_PER_LEVEL);
        assert!(s.speed() > RUN_SPEED_BASE);
        assert!(s.collected_letters().is_empty());
        assert!(s.events().contains(&StoreEvent::LevelCompleted { level: 1 }));
    }

    #[test]
    fn clearing_last_sector_is_victory() {
        let mut s = playing();
        for _ in 0..TOTAL_LEVELS - 1 {
            clear_sector(&mut s);
            s.close_shop();
        }
        clear_sector(&mut s);
        assert_eq!(s.status(), GameStatus::Victory);
        assert_eq!(s.level(), TOTAL_LEVELS);
        assert_eq!(s.events().last(), Some(&StoreEvent::Victory));
    }

    #[test]
    fn losing_all_lives_is_game_over() {
        let mut s = playing();
        for _ in 0..STARTING_LIVES {
            assert!(s.take_damage());
        }
        assert_eq!(s.lives(), 0);
        assert_eq!(s.status(), GameStatus::GameOver);
        assert!(!s.take_damage());
        assert_eq!(s.lives(), 0);
    }

    #[test]
    fn immortality_blocks_damage_then_expires() {
        let mut s = playing();
        assert!(!s.activate_immortality(), "not owned yet");

        s.collect_gem(3000);
        s.open_shop().unwrap();
        s.buy_item(UpgradeId::Immortal, 3000).unwrap();
        s.close_shop();

        assert!(s.activate_immortality());
        assert!(!s.activate_immortality(), "already active");
        assert!(!s.take_damage());
        assert_eq!(s.lives(), STARTING_LIVES);

        s.advance(IMMORTALITY_SECONDS + 0.1);
        assert!(!s.is_immortality_active());
        assert!(s.events().contains(&StoreEvent::ImmortalityExpired));
        assert!(s.take_damage());
    }

    #[test]
    fn purchases_check_status_funds_and_ownership() {
        let mut s = playing();
        assert!(matches!(
            s.buy_item(UpgradeId::Heal, 0),
            Err(StoreError::InvalidStatus { op: "buy_item", .. })
        ));

        s.collect_gem(1500);
        s.open_shop().unwrap();
        assert_eq!(
            s.buy_item(UpgradeId::Immortal, 3000),
            Err(StoreError::InsufficientCredits {
                cost: 3000,
                score: 1500
            })
        );
        s.buy_item(UpgradeId::DoubleJump, 1000).unwrap();
        assert!(s.has_double_jump());
        assert_eq!(s.score(), 500);
        assert_eq!(
            s.buy_item(UpgradeId::DoubleJump, 0),
            Err(StoreError::AlreadyOwned(UpgradeId::DoubleJump))
        );
    }

    #[test]
    fn max_life_adds_slot_and_heals() {
        let mut s = playing();
        s.take_damage();
        s.collect_gem(2500);
        s.open_shop().unwrap();
        s.buy_item(UpgradeId::MaxLife, 1500).unwrap();
        assert_eq!(s.max_lives(), STARTING_LIVES + 1);
        assert_eq!(s.lives(), STARTING_LIVES);

        s.buy_item(UpgradeId::Heal, 1000).unwrap();
        assert_eq!(s.lives(), STARTING_LIVES + 1);
        assert!(s.lives() <= s.max_lives());
    }

    #[test]
    fn heal_never_exceeds_max() {
        let mut s = playing();
        s.collect_gem(1000);
        s.open_shop().unwrap();
        s.buy_item(UpgradeId::Heal, 1000).unwrap();
        assert_eq!(s.lives(), s.max_lives());
    }

    #[test]
    fn close_shop_outside_shop_is_noop() {
        let mut s = playing();
        s.close_shop();
        assert_eq!(s.status(), GameStatus::Playing);
        assert!(s.events().is_empty());
    }

    #[test]
    fn restart_resets_run_and_purchases() {
        let mut s = playing();
        s.collect_gem(1000);
        s.open_shop().unwrap();
        s.buy_item(UpgradeId::DoubleJump, 1000).unwrap();
        s.close_shop();
        s.advance(1.0);

        s.restart_game();
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.distance(), 0.0);
        assert!(!s.has_double_jump());
        assert_eq!(
            s.events().last(),
            Some(&StoreEvent::RunStarted { restart: true })
        );
    }

    #[test]
    fn gameplay_ops_ignored_outside_play() {
        let mut s = GameStore::new();
        assert!(!s.collect_gem(10));
        assert_eq!(s.collect_letter(0), Ok(false));
        assert!(!s.take_damage());
        assert!(s.open_shop().is_err());
        assert!(s.events().is_empty());
    }
}
