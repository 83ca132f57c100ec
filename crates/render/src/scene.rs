use glam::{Mat4, Quat, Vec3};
use std::ops::Range;

/// Width of one lane in world units.
pub const LANE_WIDTH: f32 = 2.2;

/// X coordinate of the center of `lane` on a track `lane_count` wide.
/// Lane 0 is the leftmost; the track is centered on x = 0.
pub fn lane_center(lane: u32, lane_count: u32) -> f32 {
    let middle = (lane_count.max(1) - 1) as f32 / 2.0;
    (lane as f32 - middle) * LANE_WIDTH
}

/// One box to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub position: Vec3,
    pub scale: Vec3,
    pub color: [f32; 4],
}

impl Instance {
    pub fn new(position: Vec3, scale: Vec3, color: [f32; 4]) -> Self {
        Self {
            position,
            scale,
            color,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

/// Fixed positions in the scene graph, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Environment,
    /// Instances from this slot are tagged as the player group.
    Player,
    Level,
    Effects,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Environment, Slot::Player, Slot::Level, Slot::Effects];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Player => "player",
            Self::Level => "level",
            Self::Effects => "effects",
        }
    }
}

/// Something that contributes boxes to a frame.
pub trait SceneLayer {
    fn emit(&self, out: &mut Vec<Instance>);
}

/// Static composition of the scene: one optional layer per [`Slot`].
///
/// Built fresh each frame from borrowed layers, the way a scene graph is
/// re-declared every render.
#[derive(Default)]
pub struct Scene<'a> {
    layers: [Option<&'a dyn SceneLayer>; 4],
}

impl<'a> Scene<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `layer` at `slot`, returning the layer it replaces.
    pub fn mount(&mut self, slot: Slot, layer: &'a dyn SceneLayer) -> Option<&'a dyn SceneLayer> {
        self.layers[slot.index()].replace(layer)
    }

    /// Builder form of [`mount`](Self::mount).
    pub fn with(mut self, slot: Slot, layer: &'a dyn SceneLayer) -> Self {
        self.mount(slot, layer);
        self
    }

    pub fn unmount(&mut self, slot: Slot) -> Option<&'a dyn SceneLayer> {
        self.layers[slot.index()].take()
    }

    pub fn is_mounted(&self, slot: Slot) -> bool {
        self.layers[slot.index()].is_some()
    }

    /// Collect every mounted layer's instances in slot order.
    pub fn compose(&self) -> SceneFrame {
        let mut frame = SceneFrame::default();
        for slot in Slot::ALL {
            let start = frame.instances.len();
            if let Some(layer) = self.layers[slot.index()] {
                layer.emit(&mut frame.instances);
            }
            frame.ranges[slot.index()] = start..frame.instances.len();
        }
        tracing::trace!(instances = frame.instances.len(), "scene composed");
        frame
    }
}

/// The composed output of a [`Scene`] for one frame.
#[derive(Debug, Clone, Default)]
pub struct SceneFrame {
    instances: Vec<Instance>,
    ranges: [Range<usize>; 4],
}

impl SceneFrame {
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn slot(&self, slot: Slot) -> &[Instance] {
        &self.instances[self.ranges[slot.index()].clone()]
    }

    /// Instances belonging to the player group.
    pub fn player_instances(&self) -> &[Instance] {
        self.slot(Slot::Player)
    }

    pub fn is_player(&self, index: usize) -> bool {
        self.ranges[Slot::Player.index()].contains(&index)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
