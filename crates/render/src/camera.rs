use glam::{Mat4, Vec3};
use runner_common::{CameraConfig, RenderConfig};

/// Where the camera wants to sit for a viewport `aspect` (width / height) and
/// a track `lanes` wide.
///
/// Narrow (portrait) viewports and wide tracks both push the camera up and
/// back so the outer lanes stay in frame.
pub fn framing_target(cfg: &CameraConfig, aspect: f32, lanes: u32) -> Vec3 {
    let portrait = ((cfg.portrait_pivot - aspect) * cfg.portrait_gain).max(0.0);
    let lane_scaling = lanes.saturating_sub(cfg.base_lanes) as f32 * cfg.per_lane;

    Vec3::new(
        0.0,
        cfg.base_height + lane_scaling + portrait * cfg.portrait_height,
        cfg.base_distance + lane_scaling + portrait * cfg.portrait_distance,
    )
}

/// Chase camera that eases toward its framing target every frame and always
/// looks at a fixed point far down the track.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    tuning: CameraConfig,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), &RenderConfig::default())
    }
}

impl FollowCamera {
    pub fn new(tuning: &CameraConfig, render: &RenderConfig) -> Self {
        Self {
            position: render.initial_camera,
            look_at: tuning.look_at,
            fov: render.fov_deg.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            tuning: tuning.clone(),
        }
    }

    pub fn tuning(&self) -> &CameraConfig {
        &self.tuning
    }

    /// Record the viewport size. A zero height counts as one pixel.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn target(&self, lanes: u32) -> Vec3 {
        framing_target(&self.tuning, self.aspect, lanes)
    }

    /// Per-frame update: close `dt * smoothing` of the gap to the target, then re-aim.
    pub fn update(&mut self, lanes: u32, dt: f32) {
        let target = self.target(lanes);
        let t = (dt * self.tuning.smoothing).clamp(0.0, 1.0);
        self.position = self.position.lerp(target, t);
        self.look_at = self.tuning.look_at;
    }

    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
