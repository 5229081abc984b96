//! Deterministic wave simulation
//!
//! Everything that advances per frame lives here. This module must be pure
//! and deterministic:
//! - Fixed nominal timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies (drawing goes through
//!   [`crate::render::Surface2d`])

pub mod simulator;
pub mod wave;

pub use simulator::{CycleListener, WaveSimulator};
pub use wave::{Wave, WaveTuning};
