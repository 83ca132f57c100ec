use runner_kernel::StoreEvent;

/// A short sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Gem,
    Letter,
    LevelUp,
    Damage,
    Shield,
    Purchase,
    GameOver,
    Victory,
    Jump,
}

impl Cue {
    /// The cue a store event should play, if any.
    pub fn for_event(event: &StoreEvent) -> Option<Self> {
        match event {
            StoreEvent::GemCollected { .. } => Some(Self::Gem),
            StoreEvent::LetterCollected { .. } => Some(Self::Letter),
            StoreEvent::LevelCompleted { .. } => Some(Self::LevelUp),
            StoreEvent::Damaged { .. } => Some(Self::Damage),
            StoreEvent::DamageBlocked | StoreEvent::ImmortalityActivated => Some(Self::Shield),
            StoreEvent::Purchased { .. } => Some(Self::Purchase),
            StoreEvent::GameOver => Some(Self::GameOver),
            StoreEvent::Victory => Some(Self::Victory),
            StoreEvent::RunStarted { .. }
            | StoreEvent::ShopOpened
            | StoreEvent::ShopClosed
            | StoreEvent::ImmortalityExpired => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gem => "gem",
            Self::Letter => "letter",
            Self::LevelUp => "level_up",
            Self::Damage => "damage",
            Self::Shield => "shield",
            Self::Purchase => "purchase",
            Self::GameOver => "game_over",
            Self::Victory => "victory",
            Self::Jump => "jump",
        }
    }
}
