use crate::{
    camera::Camera,
    frame::Frame,
    geometry::ScreenPoint,
    light::Light,
    renderer::{RenderSettings, shading::trace},
    scene::Scene,
};

/// Traces one ray per pixel of the camera's screen, row by row.
pub fn render_frame(
    scene: &Scene,
    camera: &Camera,
    light: &Light,
    settings: &RenderSettings,
) -> Frame {
    let resolution = camera.resolution();
    let mut frame = Frame::new(resolution);

    for row in 0..resolution.y {
        for column in 0..resolution.x {
            let point = ScreenPoint::new(column, row);
            let ray = camera.ray_to_pixel(&point);
            frame.set(&point, trace(&ray, light, scene, settings.max_bounces));
        }
    }

    log::trace!(
        "Rendered {}x{} frame of {} primitives",
        resolution.x,
        resolution.y,
        scene.len()
    );
    frame
}
