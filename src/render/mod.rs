//! Wave rendering over an abstract 2D stroke surface
//!
//! The simulation never touches pixels: anything that can clear itself and
//! stroke a circle can display waves. The canvas 2D backend lives in
//! [`canvas`] on the wasm build.

use glam::Vec2;

use crate::sim::Wave;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// Glow radius applied around the stroke when enabled
pub const GLOW_BLUR: f32 = 3.0;

/// Stroke parameters for one ring. The stroke itself is always white; only
/// alpha, width and glow vary per wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStroke {
    pub center: Vec2,
    pub radius: f32,
    /// 0..1 alpha on the white stroke
    pub alpha: f32,
    pub line_width: f32,
    /// Soft glow radius; zero disables
    pub glow: f32,
}

/// A drawing surface the simulator can be displayed on
pub trait Surface2d {
    fn clear(&mut self);
    fn stroke_ring(&mut self, ring: &RingStroke);
}

/// Clear the surface and stroke every live wave.
pub fn render_waves(surface: &mut dyn Surface2d, waves: &[Wave], glow: bool) {
    surface.clear();
    for wave in waves {
        surface.stroke_ring(&RingStroke {
            center: wave.origin,
            radius: wave.radius,
            alpha: (wave.opacity * wave.life).clamp(0.0, 1.0),
            line_width: wave.thickness,
            glow: if glow { GLOW_BLUR } else { 0.0 },
        });
    }
}
