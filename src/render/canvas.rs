//! Canvas 2D backend
//!
//! Owns the backing raster: `resize` re-derives the pixel resolution from the
//! logical size and the device pixel ratio so strokes stay crisp at any zoom,
//! and is safe to call while waves are animating.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{RingStroke, Surface2d};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    dpr: f64,
}

impl CanvasSurface {
    /// Returns None when the host denies a 2d context; callers then skip the
    /// whole binding and the effect stays a permanent no-op.
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        })
    }

    /// Resize the backing raster to `width x height` logical pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.canvas.set_width((width as f64 * self.dpr) as u32);
        self.canvas.set_height((height as f64 * self.dpr) as u32);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));

        // Setting the raster size reset the context state; restore the DPR
        // scale so draw calls stay in logical pixels
        let _ = self
            .ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Surface2d for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn stroke_ring(&mut self, ring: &RingStroke) {
        let ctx = &self.ctx;
        ctx.save();

        ctx.set_global_alpha(ring.alpha as f64);
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(ring.line_width as f64);
        ctx.set_line_cap("round");
        if ring.glow > 0.0 {
            ctx.set_shadow_color("rgba(255, 255, 255, 0.5)");
            ctx.set_shadow_blur(ring.glow as f64);
        }

        ctx.begin_path();
        let _ = ctx.arc(
            ring.center.x as f64,
            ring.center.y as f64,
            ring.radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.stroke();

        ctx.restore();
    }
}
