use crate::action::Action;
use glam::Vec2;

/// Minimum travel in pixels before a touch counts as a swipe.
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Classify a touch delta (screen space, +y down) into an action.
///
/// The dominant axis wins. Upward swipes jump; downward swipes are ignored.
pub fn classify_swipe(delta: Vec2) -> Option<Action> {
    if delta.length() < MIN_SWIPE_DISTANCE {
        return None;
    }
    if delta.x.abs() > delta.y.abs() {
        Some(if delta.x < 0.0 {
            Action::MoveLeft
        } else {
            Action::MoveRight
        })
    } else if delta.y < 0.0 {
        Some(Action::Jump)
    } else {
        None
    }
}

/// Tracks one touch from press to release.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn begin(&mut self, at: Vec2) {
        self.start = Some(at);
    }

    /// Finish the touch at `at`. Returns the swipe action, if any.
    pub fn end(&mut self, at: Vec2) -> Option<Action> {
        let start = self.start.take()?;
        classify_swipe(at - start)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_drags_are_taps() {
        assert_eq!(classify_swipe(Vec2::new(10.0, -10.0)), None);
    }

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(classify_swipe(Vec2::new(-80.0, 20.0)), Some(Action::MoveLeft));
        assert_eq!(classify_swipe(Vec2::new(80.0, -20.0)), Some(Action::MoveRight));
        assert_eq!(classify_swipe(Vec2::new(5.0, -60.0)), Some(Action::Jump));
        assert_eq!(classify_swipe(Vec2::new(5.0, 60.0)), None);
    }

    #[test]
    fn tracker_needs_a_start() {
        let mut t = SwipeTracker::default();
        assert_eq!(t.end(Vec2::new(100.0, 0.0)), None);

        t.begin(Vec2::new(200.0, 300.0));
        assert_eq!(t.end(Vec2::new(100.0, 300.0)), Some(Action::MoveLeft));
        assert_eq!(t.end(Vec2::new(0.0, 300.0)), None);

        t.begin(Vec2::ZERO);
        t.cancel();
        assert_eq!(t.end(Vec2::new(0.0, -100.0)), None);
    }
}
