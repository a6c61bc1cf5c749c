mod machinery;
mod shading;

pub use crate::renderer::machinery::render_frame;
pub use crate::renderer::shading::{Trace, trace, trace_detailed};

use crate::geometry::FloatType;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Maximum number of surfaces a single ray may visit.
    pub max_bounces: u32,
    /// Intensity mapped to the brightest glyph or a white pixel.
    pub max_intensity: FloatType,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            max_bounces: 5,
            max_intensity: 1.0,
        }
    }
}
