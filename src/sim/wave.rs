//! Wave particle state and spawn policy
//!
//! A wave is one expanding, fading ring. Aliveness is
//! `life > 0 && radius < max_radius`; the simulator removes a wave on the
//! first tick either bound is crossed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::FRAME_SCALE;

/// Tuning knobs for wave spawn and decay. Defaults match the shipped effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// `max_radius` = factor x distance from spawn point to surface center
    pub max_radius_factor: f32,
    /// Lower bound of the spawn-time speed sample (pixels per nominal frame)
    pub speed_base: f32,
    /// Width of the speed sample range
    pub speed_jitter: f32,
    /// Lower bound of the spawn-time stroke width
    pub thickness_base: f32,
    /// Width of the stroke-width sample range
    pub thickness_jitter: f32,
    /// Life lost per simulated second
    pub life_decay: f32,
    /// `opacity = life * opacity_scale`, clamped at zero
    pub opacity_scale: f32,
    /// Stroke width floor while the wave is alive
    pub min_thickness: f32,
    /// Rings spawned per accepted trigger (the multi-ring variant)
    pub rings_per_trigger: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            max_radius_factor: 2.5,
            speed_base: 1.5,
            speed_jitter: 0.3,
            thickness_base: 4.0,
            thickness_jitter: 2.0,
            life_decay: 0.25,
            opacity_scale: 0.8,
            min_thickness: 0.5,
            rings_per_trigger: 1,
        }
    }
}

/// A single expanding ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    /// Spawn point in surface-local pixels, fixed for the wave's lifetime
    pub origin: Vec2,
    /// Current ring radius
    pub radius: f32,
    /// Retirement bound computed at spawn from the surface geometry
    pub max_radius: f32,
    /// 1.0 at spawn, decays to zero
    pub life: f32,
    /// Rendering hint derived from `life` each tick, never persisted on its own
    pub opacity: f32,
    /// Stroke width derived from `life` each tick
    pub thickness: f32,
    /// Radius growth rate, sampled once at spawn and constant thereafter
    pub speed: f32,
    initial_thickness: f32,
}

impl Wave {
    /// Spawn at `origin` on a surface of the given logical size.
    pub fn spawn<R: Rng>(origin: Vec2, surface: Vec2, tuning: &WaveTuning, rng: &mut R) -> Self {
        let center = surface * 0.5;
        let thickness = tuning.thickness_base + rng.random::<f32>() * tuning.thickness_jitter;
        Self {
            origin,
            radius: 0.0,
            max_radius: origin.distance(center) * tuning.max_radius_factor,
            life: 1.0,
            opacity: tuning.opacity_scale,
            thickness,
            speed: tuning.speed_base + rng.random::<f32>() * tuning.speed_jitter,
            initial_thickness: thickness,
        }
    }

    /// Advance one tick. Returns whether the wave survived it.
    pub fn update(&mut self, dt: f32, tuning: &WaveTuning) -> bool {
        self.radius += self.speed * dt * FRAME_SCALE;
        self.life -= dt * tuning.life_decay;
        self.opacity = (self.life * tuning.opacity_scale).max(0.0);
        self.thickness = (self.initial_thickness * self.life).max(tuning.min_thickness);
        self.is_alive()
    }

    /// Alive iff life remains and the ring has not reached its bound.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.radius < self.max_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOMINAL_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_policy() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = WaveTuning::default();
        let wave = Wave::spawn(
            Vec2::new(100.0, 50.0),
            Vec2::new(400.0, 300.0),
            &tuning,
            &mut rng,
        );

        // Center (200, 150), distance sqrt(100^2 + 100^2) ~ 141.42, x2.5
        assert!((wave.max_radius - 353.553).abs() < 0.01);
        assert!(wave.speed >= 1.5 && wave.speed < 1.8);
        assert!(wave.thickness >= 4.0 && wave.thickness < 6.0);
        assert_eq!(wave.life, 1.0);
        assert_eq!(wave.radius, 0.0);
    }

    #[test]
    fn test_update_decays_and_grows() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = WaveTuning::default();
        let mut wave = Wave::spawn(
            Vec2::new(100.0, 50.0),
            Vec2::new(400.0, 300.0),
            &tuning,
            &mut rng,
        );
        let spawn_thickness = wave.thickness;

        assert!(wave.update(NOMINAL_DT, &tuning));
        assert!((wave.radius - wave.speed * 0.96).abs() < 1e-4);
        assert!((wave.life - 0.996).abs() < 1e-5);
        assert!((wave.opacity - wave.life * 0.8).abs() < 1e-5);
        assert!(wave.thickness < spawn_thickness);
    }

    #[test]
    fn test_thickness_floor() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = WaveTuning {
            // Huge bound so only life can end the wave
            max_radius_factor: 1000.0,
            ..WaveTuning::default()
        };
        let mut wave = Wave::spawn(
            Vec2::new(10.0, 10.0),
            Vec2::new(400.0, 300.0),
            &tuning,
            &mut rng,
        );

        while wave.update(NOMINAL_DT, &tuning) {
            assert!(wave.thickness >= tuning.min_thickness);
        }
        assert!(wave.life <= 0.0);
    }

    #[test]
    fn test_retires_at_max_radius() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = WaveTuning::default();
        // Spawn close to center: small max_radius, so the radius bound wins
        let mut wave = Wave::spawn(
            Vec2::new(195.0, 150.0),
            Vec2::new(400.0, 300.0),
            &tuning,
            &mut rng,
        );
        assert!((wave.max_radius - 12.5).abs() < 0.01);

        let mut ticks = 0;
        while wave.update(NOMINAL_DT, &tuning) {
            ticks += 1;
        }
        assert!(wave.radius >= wave.max_radius);
        assert!(wave.life > 0.0);
        assert!(ticks < 12);
    }
}
