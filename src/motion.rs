//! Page kinematics: trailing cursor, magnetic buttons, header visibility,
//! hero blob parallax
//!
//! All frame-steppable with no platform dependencies; the wasm glue feeds
//! pointer/scroll positions in and applies the returned offsets as CSS
//! transforms.

use glam::Vec2;

/// Per-frame approach factor for the cursor ring
pub const RING_FOLLOW: f32 = 0.15;
/// The crown trails a little tighter than the ring
pub const CROWN_FOLLOW: f32 = 0.2;
/// Fraction of the pointer offset a magnetic element moves
pub const MAGNET_PULL: f32 = 0.25;
/// The header only hides once scrolled past this
pub const HEADER_REVEAL_Y: f32 = 30.0;

/// Parallax gains for the three hero blobs
pub const BLOB_GAINS: [Vec2; 3] = [
    Vec2::new(40.0, 30.0),
    Vec2::new(-35.0, -25.0),
    Vec2::new(25.0, -20.0),
];

/// Trailing follower: each frame moves a constant fraction of the remaining
/// distance toward the target.
#[derive(Debug, Clone, Copy)]
pub struct Follower {
    pub pos: Vec2,
    factor: f32,
}

impl Follower {
    pub fn new(start: Vec2, factor: f32) -> Self {
        Self { pos: start, factor }
    }

    /// Advance one frame toward `target`, returning the new position.
    pub fn step(&mut self, target: Vec2) -> Vec2 {
        self.pos += (target - self.pos) * self.factor;
        self.pos
    }
}

/// Offset for a magnetic element with the pointer at `rel` from its center.
/// Callers reset to zero on pointer leave.
#[inline]
pub fn magnetic_offset(rel: Vec2) -> Vec2 {
    rel * MAGNET_PULL
}

/// Header show/hide driven by scroll direction.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderState {
    last_y: f32,
}

impl HeaderState {
    /// Whether the header stays visible after scrolling to `y`.
    pub fn on_scroll(&mut self, y: f32) -> bool {
        let down = y > self.last_y;
        self.last_y = y;
        !(down && y > HEADER_REVEAL_Y)
    }
}

/// Blob offsets for a pointer at normalized hero coordinates (0..1 per axis).
pub fn blob_offsets(norm: Vec2) -> [Vec2; 3] {
    let centered = norm - Vec2::splat(0.5);
    BLOB_GAINS.map(|gain| centered * gain)
}
