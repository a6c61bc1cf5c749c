mod camera;
pub mod demo;
mod frame;
pub mod geometry;
mod light;
mod renderer;
pub mod scene;

pub use camera::{Camera, CameraError};
pub use frame::{Frame, GRADIENT, glyph, gray_level};
pub use light::Light;
pub use renderer::{RenderSettings, Trace, render_frame, trace, trace_detailed};
pub use scene::{Object, PrimitiveIdx, Scene, SceneHit, primitives};
