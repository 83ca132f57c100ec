use crate::camera::FollowCamera;
use crate::scene::SceneFrame;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a composed frame and the camera, then produces output.
/// It never touches the game store.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &SceneFrame, camera: &FollowCamera) -> Self::Output;
}

/// Plain-text renderer for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &SceneFrame, camera: &FollowCamera) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (instances={}, player={}) ===\n",
            frame.len(),
            frame.player_instances().len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) look_at=({:.1}, {:.1}, {:.1}) aspect={:.3} fov={:.0}\n",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.look_at.x,
            camera.look_at.y,
            camera.look_at.z,
            camera.aspect,
            camera.fov.to_degrees()
        ));

        for (i, inst) in frame.instances().iter().enumerate() {
            let p = inst.position;
            let tag = if frame.is_player(i) { " [player]" } else { "" };
            out.push_str(&format!(
                "  #{i:<3} pos=({:.2}, {:.2}, {:.2}){tag}\n",
                p.x, p.y, p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Instance, Scene, SceneLayer, Slot};
    use glam::Vec3;

    struct One;

    impl SceneLayer for One {
        fn emit(&self, out: &mut Vec<Instance>) {
            out.push(Instance::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE, [1.0; 4]));
        }
    }

    #[test]
    fn debug_renderer_empty_frame() {
        let output = DebugTextRenderer::new().render(&SceneFrame::default(), &FollowCamera::default());
        assert!(output.contains("instances=0"));
        assert!(output.contains("fov=60"));
    }

    #[test]
    fn debug_renderer_tags_player() {
        let scene = Scene::new()
            .with(Slot::Environment, &One)
            .with(Slot::Player, &One);
        let output = DebugTextRenderer::new().render(&scene.compose(), &FollowCamera::default());

        assert!(output.contains("instances=2, player=1"));
        assert_eq!(output.matches("[player]").count(), 1);
        assert!(output.contains("pos=(1.00, 2.00, 3.00)"));
    }
}
