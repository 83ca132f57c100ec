use std::collections::BTreeMap;

/// A high-level action that any input device can produce.
///
/// The player rig and the store consume actions, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Shift one lane to the left.
    MoveLeft,
    /// Shift one lane to the right.
    MoveRight,
    /// Jump, or double jump when airborne and owned.
    Jump,
    /// Trigger the immortality ability.
    ActivateImmortality,
}

/// Keyboard keys the game listens to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    KeyA,
    KeyD,
    KeyW,
    Space,
    Shift,
    Enter,
}

/// Key to action table.
#[derive(Debug, Clone)]
pub struct Bindings {
    map: BTreeMap<Key, Action>,
}

impl Default for Bindings {
    fn default() -> Self {
        let map = BTreeMap::from([
            (Key::ArrowLeft, Action::MoveLeft),
            (Key::KeyA, Action::MoveLeft),
            (Key::ArrowRight, Action::MoveRight),
            (Key::KeyD, Action::MoveRight),
            (Key::ArrowUp, Action::Jump),
            (Key::KeyW, Action::Jump),
            (Key::Space, Action::Jump),
            (Key::Shift, Action::ActivateImmortality),
            (Key::Enter, Action::ActivateImmortality),
        ]);
        Self { map }
    }
}

impl Bindings {
    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.map.get(&key).copied()
    }

    /// Rebind `key`, returning the action it was bound to before.
    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        let previous = self.map.insert(key, action);
        tracing::debug!(?key, ?action, ?previous, "rebound key");
        previous
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.map.remove(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_share_actions() {
        let b = Bindings::default();
        assert_eq!(b.action_for(Key::ArrowLeft), b.action_for(Key::KeyA));
        assert_eq!(b.action_for(Key::ArrowRight), Some(Action::MoveRight));
        assert_eq!(b.action_for(Key::Space), Some(Action::Jump));
        assert_eq!(b.action_for(Key::KeyW), Some(Action::Jump));
    }

    #[test]
    fn shift_and_enter_trigger_immortality() {
        let b = Bindings::default();
        assert_eq!(b.action_for(Key::Shift), Some(Action::ActivateImmortality));
        assert_eq!(b.action_for(Key::Enter), Some(Action::ActivateImmortality));
    }

    #[test]
    fn rebinding() {
        let mut b = Bindings::default();
        assert_eq!(b.bind(Key::Space, Action::MoveLeft), Some(Action::Jump));
        assert_eq!(b.action_for(Key::Space), Some(Action::MoveLeft));
        assert_eq!(b.unbind(Key::Space), Some(Action::MoveLeft));
        assert_eq!(b.action_for(Key::Space), None);
    }
}
