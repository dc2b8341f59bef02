//! Pointer trail: short-lived sparks that drift, shrink and fade.

use crate::color::{Rgb, TRAIL_PALETTE};
use crate::constants::*;
use crate::scheduler::Simulation;
use crate::surface::Surface;
use glam::DVec2;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct TrailConfig {
    pub max_particles: usize,
    pub spawn_per_move: usize,
    pub size_min: f64,
    pub size_max: f64,
    pub velocity_span: f64,
    pub life_decay: f64,
    pub size_decay: f64,
    pub min_size: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_particles: TRAIL_MAX_PARTICLES,
            spawn_per_move: TRAIL_SPAWN_PER_MOVE,
            size_min: TRAIL_SIZE_MIN,
            size_max: TRAIL_SIZE_MAX,
            velocity_span: TRAIL_VELOCITY_SPAN,
            life_decay: TRAIL_LIFE_DECAY,
            size_decay: TRAIL_SIZE_DECAY,
            min_size: TRAIL_MIN_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailParticle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: f64,
    pub color: Rgb,
    pub life: f64,
}

impl TrailParticle {
    /// Current opacity; life maps linearly onto alpha.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.life.clamp(0.0, 1.0)
    }

    /// Age by one frame. Returns whether the particle is still alive.
    #[inline]
    fn age(&mut self, cfg: &TrailConfig) -> bool {
        self.life -= cfg.life_decay;
        self.pos += self.vel;
        self.size *= cfg.size_decay;
        self.life > 0.0 && self.size >= cfg.min_size
    }
}

pub struct CursorTrail {
    pub config: TrailConfig,
    enabled: bool,
    particles: Vec<TrailParticle>,
    rng: StdRng,
}

impl CursorTrail {
    /// `enabled` is false on devices without a fine pointer; such a trail
    /// never spawns anything.
    pub fn new(enabled: bool, config: TrailConfig, seed: u64) -> Self {
        Self {
            config,
            enabled,
            particles: Vec::with_capacity(TRAIL_MAX_PARTICLES),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn sparks at the pointer. Requests past the population cap are
    /// dropped, never queued. Returns how many particles were added.
    pub fn spawn_at(&mut self, pos: DVec2) -> usize {
        if !self.enabled {
            return 0;
        }
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = self.config.spawn_per_move.min(room);
        for _ in 0..count {
            let particle = self.make_particle(pos);
            self.particles.push(particle);
        }
        count
    }

    fn make_particle(&mut self, pos: DVec2) -> TrailParticle {
        let cfg = &self.config;
        let size = cfg.size_min + self.rng.gen::<f64>() * (cfg.size_max - cfg.size_min);
        let vel = DVec2::new(
            (self.rng.gen::<f64>() - 0.5) * cfg.velocity_span,
            (self.rng.gen::<f64>() - 0.5) * cfg.velocity_span,
        );
        let color = TRAIL_PALETTE[self.rng.gen_range(0..TRAIL_PALETTE.len())];
        TrailParticle {
            pos,
            vel,
            size,
            color,
            life: 1.0,
        }
    }

    /// Age every particle, compact away the dead ones, draw the survivors.
    pub fn step(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        let cfg = &self.config;
        self.particles.retain_mut(|p| p.age(cfg));
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, p.color.with_alpha(p.alpha()));
        }
    }
}

impl Simulation for CursorTrail {
    fn step(&mut self, surface: &mut dyn Surface) {
        CursorTrail::step(self, surface);
    }

    fn population(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_particles_use_configured_ranges() {
        let mut trail = CursorTrail::new(true, TrailConfig::default(), 3);
        for i in 0..40 {
            trail.spawn_at(DVec2::new(i as f64, 5.0));
        }
        for p in trail.particles() {
            assert!(p.size >= TRAIL_SIZE_MIN && p.size < TRAIL_SIZE_MAX);
            assert!(p.vel.x.abs() <= 0.5 && p.vel.y.abs() <= 0.5);
            assert!(TRAIL_PALETTE.contains(&p.color));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn disabled_trail_never_spawns() {
        let mut trail = CursorTrail::new(false, TrailConfig::default(), 3);
        assert_eq!(trail.spawn_at(DVec2::ZERO), 0);
        assert!(trail.is_empty());
    }
}
