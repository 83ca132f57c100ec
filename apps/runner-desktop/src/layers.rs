use glam::Vec3;
use runner_render::{Instance, LANE_WIDTH, SceneLayer, lane_center};

const GRAVITY: f32 = 50.0;
const JUMP_VELOCITY: f32 = 16.0;
/// Fraction of the remaining lane offset closed per second.
const LANE_SWITCH_RATE: f32 = 15.0;

const MARKER_SPACING: f32 = 12.0;
const MARKERS_PER_SIDE: usize = 18;
const MARKER_NEAR_Z: f32 = 10.0;

const PLAYER_COLOR: [f32; 4] = [0.0, 0.9, 1.0, 1.0];
const ENGINE_COLOR: [f32; 4] = [1.0, 0.2, 0.8, 1.0];
const MARKER_COLOR: [f32; 4] = [0.45, 0.1, 0.85, 1.0];
const SHIELD_COLOR: [f32; 4] = [1.0, 0.85, 0.1, 1.0];

/// Pylons along both track edges, scrolling toward the camera as the run advances.
#[derive(Debug, Clone, Copy)]
pub struct TrackLayer {
    pub distance: f32,
    pub lane_count: u32,
}

impl TrackLayer {
    fn edge_x(&self) -> f32 {
        let lanes = self.lane_count.max(1);
        lane_center(lanes - 1, lanes) + LANE_WIDTH * 0.5 + 1.0
    }
}

impl SceneLayer for TrackLayer {
    fn emit(&self, out: &mut Vec<Instance>) {
        let phase = self.distance.rem_euclid(MARKER_SPACING);
        let x = self.edge_x();
        for i in 0..MARKERS_PER_SIDE {
            let z = MARKER_NEAR_Z - i as f32 * MARKER_SPACING + phase;
            for side in [-1.0, 1.0] {
                out.push(Instance::new(
                    Vec3::new(side * x, 1.5, z),
                    Vec3::new(0.3, 3.0, 0.3),
                    MARKER_COLOR,
                ));
            }
        }
    }
}

/// The player's ship: lane position and jump arc.
#[derive(Debug, Clone)]
pub struct PlayerRig {
    lane: u32,
    lane_count: u32,
    x: f32,
    height: f32,
    vertical_speed: f32,
    jumps: u8,
}

impl PlayerRig {
    pub fn new(lane_count: u32) -> Self {
        let lane_count = lane_count.max(1);
        let lane = lane_count / 2;
        Self {
            lane,
            lane_count,
            x: lane_center(lane, lane_count),
            height: 0.0,
            vertical_speed: 0.0,
            jumps: 0,
        }
    }

    pub fn lane(&self) -> u32 {
        self.lane
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.height, 0.0)
    }

    pub fn is_airborne(&self) -> bool {
        self.jumps > 0
    }

    /// Step `dir` lanes sideways. Returns false at the track edge.
    pub fn shift(&mut self, dir: i32) -> bool {
        let target = self.lane as i64 + dir as i64;
        if target < 0 || target >= self.lane_count as i64 {
            return false;
        }
        self.lane = target as u32;
        true
    }

    /// Start a jump, or a second one mid-air when `double_jump` is owned.
    pub fn jump(&mut self, double_jump: bool) -> bool {
        let allowed = if double_jump { 2 } else { 1 };
        if self.jumps >= allowed {
            return false;
        }
        self.jumps += 1;
        self.vertical_speed = JUMP_VELOCITY;
        true
    }

    /// Follow a track that widened or narrowed, staying the same number of
    /// lanes from the center.
    pub fn set_lane_count(&mut self, lane_count: u32) {
        let lane_count = lane_count.max(1);
        if lane_count == self.lane_count {
            return;
        }
        let offset = (lane_count as i64 - self.lane_count as i64) / 2;
        self.lane = (self.lane as i64 + offset).clamp(0, lane_count as i64 - 1) as u32;
        self.lane_count = lane_count;
    }

    pub fn update(&mut self, dt: f32, lane_count: u32) {
        self.set_lane_count(lane_count);

        let target = lane_center(self.lane, self.lane_count);
        let t = (dt * LANE_SWITCH_RATE).clamp(0.0, 1.0);
        self.x += (target - self.x) * t;

        if self.jumps > 0 {
            self.vertical_speed -= GRAVITY * dt;
            self.height += self.vertical_speed * dt;
            if self.height <= 0.0 {
                self.height = 0.0;
                self.vertical_speed = 0.0;
                self.jumps = 0;
            }
        }
    }
}

impl SceneLayer for PlayerRig {
    fn emit(&self, out: &mut Vec<Instance>) {
        let base = self.position();
        out.push(Instance::new(
            base + Vec3::new(0.0, 0.6, 0.0),
            Vec3::new(0.9, 0.8, 1.4),
            PLAYER_COLOR,
        ));
        out.push(Instance::new(
            base + Vec3::new(0.0, 0.6, 0.8),
            Vec3::new(0.5, 0.3, 0.2),
            ENGINE_COLOR,
        ));
    }
}

/// Four plates circling the player while immortality runs.
#[derive(Debug, Clone, Copy)]
pub struct ShieldLayer {
    pub center: Vec3,
    /// Rotation of the ring in radians.
    pub phase: f32,
}

impl SceneLayer for ShieldLayer {
    fn emit(&self, out: &mut Vec<Instance>) {
        for k in 0..4 {
            let angle = self.phase + k as f32 * std::f32::consts::FRAC_PI_2;
            let offset = Vec3::new(angle.cos() * 1.2, 0.6, angle.sin() * 1.2);
            out.push(Instance::new(
                self.center + offset,
                Vec3::new(0.15, 1.4, 0.15),
                SHIELD_COLOR,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(layer: &dyn SceneLayer) -> Vec<Instance> {
        let mut out = Vec::new();
        layer.emit(&mut out);
        out
    }

    #[test]
    fn rig_starts_in_middle_lane() {
        let rig = PlayerRig::new(3);
        assert_eq!(rig.lane(), 1);
        assert_eq!(rig.position().x, 0.0);
    }

    #[test]
    fn shift_stops_at_edges() {
        let mut rig = PlayerRig::new(3);
        assert!(rig.shift(-1));
        assert!(!rig.shift(-1));
        assert_eq!(rig.lane(), 0);
        assert!(rig.shift(1));
        assert!(rig.shift(1));
        assert!(!rig.shift(1));
    }

    #[test]
    fn rig_glides_toward_lane_center() {
        let mut rig = PlayerRig::new(3);
        rig.shift(1);
        rig.update(0.016, 3);
        let x = rig.position().x;
        assert!(x > 0.0 && x < LANE_WIDTH);
        rig.update(1.0, 3);
        assert!((rig.position().x - LANE_WIDTH).abs() < 1e-5);
    }

    #[test]
    fn double_jump_needs_upgrade() {
        let mut rig = PlayerRig::new(3);
        assert!(rig.jump(false));
        rig.update(0.05, 3);
        assert!(!rig.jump(false));
        assert!(rig.jump(true));
        assert!(!rig.jump(true));
    }

    #[test]
    fn jump_lands_and_resets() {
        let mut rig = PlayerRig::new(3);
        rig.jump(false);
        rig.update(0.1, 3);
        assert!(rig.position().y > 0.0);
        for _ in 0..100 {
            rig.update(0.016, 3);
        }
        assert_eq!(rig.position().y, 0.0);
        assert!(!rig.is_airborne());
        assert!(rig.jump(false));
    }

    #[test]
    fn widening_track_keeps_offset_from_center() {
        let mut rig = PlayerRig::new(3);
        rig.shift(1);
        rig.set_lane_count(5);
        assert_eq!(rig.lane(), 3);
        rig.update(1.0, 5);
        assert!((rig.position().x - LANE_WIDTH).abs() < 1e-5);
    }

    #[test]
    fn track_markers_flank_the_lanes() {
        let narrow = emitted(&TrackLayer {
            distance: 0.0,
            lane_count: 3,
        });
        let wide = emitted(&TrackLayer {
            distance: 0.0,
            lane_count: 7,
        });
        assert_eq!(narrow.len(), MARKERS_PER_SIDE * 2);
        let edge = |v: &[Instance]| v.iter().map(|i| i.position.x).fold(0.0, f32::max);
        assert!(edge(&wide) > edge(&narrow));
        assert!(edge(&narrow) > lane_center(2, 3));
    }

    #[test]
    fn track_markers_scroll_with_distance() {
        let at = |d: f32| {
            emitted(&TrackLayer {
                distance: d,
                lane_count: 3,
            })[0]
                .position
                .z
        };
        assert!(at(3.0) > at(0.0));
        assert!((at(MARKER_SPACING) - at(0.0)).abs() < 1e-4);
    }

    #[test]
    fn shield_surrounds_center() {
        let center = Vec3::new(2.0, 0.0, 0.0);
        let plates = emitted(&ShieldLayer { center, phase: 0.3 });
        assert_eq!(plates.len(), 4);
        for p in plates {
            let flat = Vec3::new(p.position.x - center.x, 0.0, p.position.z - center.z);
            assert!((flat.length() - 1.2).abs() < 1e-4);
        }
    }
}
