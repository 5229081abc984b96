//! Onda - a water-drop ripple effect that rotates a philosophy quote
//!
//! Core modules:
//! - `sim`: Deterministic wave simulation (spawn policy, fixed-step update)
//! - `narrator`: Pointer-driven quote rotation state machine
//! - `render`: Abstract stroke surface + canvas 2D backend
//! - `quotes`, `sections`, `motion`: page support (sentence splitting, scroll
//!   classification, cursor/header kinematics)

pub mod motion;
pub mod narrator;
pub mod quotes;
pub mod render;
pub mod sections;
pub mod settings;
pub mod sim;

pub use narrator::{PhilosophyNarrator, QuoteDisplay};
pub use settings::Settings;
pub use sim::{Wave, WaveSimulator, WaveTuning};

use glam::Vec2;

/// Animation timing constants
pub mod consts {
    /// Fixed nominal frame delta. Physics uses this value regardless of the
    /// actual refresh interval; all decay/growth tuning assumes it.
    pub const NOMINAL_DT: f32 = 0.016;
    /// Radius growth is `speed * dt * FRAME_SCALE` (speed is tuned in pixels
    /// per nominal frame)
    pub const FRAME_SCALE: f32 = 60.0;
}

/// Translate client-space coordinates to surface-local coordinates given the
/// surface's bounding-box origin.
#[inline]
pub fn surface_local(client: Vec2, surface_origin: Vec2) -> Vec2 {
    client - surface_origin
}
