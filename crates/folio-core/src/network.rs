//! Ambient particle field: drifting dots joined by distance-faded lines,
//! with a weak attraction toward the pointer.
//!
//! The field owns its particles and RNG. Every re-initialization (resize,
//! theme change) discards the whole population and builds a fresh one; no
//! particle is ever removed individually.

use crate::color::{Palette, PaletteBucket, Rgb, Theme};
use crate::constants::*;
use crate::scheduler::Simulation;
use crate::surface::Surface;
use crate::viewport::Viewport;
use glam::DVec2;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub area_per_particle: f64,
    pub max_particles: usize,
    pub velocity_span: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub connection_distance: f64,
    pub pointer_distance: f64,
    pub pointer_force: f64,
    /// Speed ceiling applied after the pointer nudge. `f64::INFINITY` disables it.
    pub max_speed: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: FIELD_AREA_PER_PARTICLE,
            max_particles: FIELD_MAX_PARTICLES,
            velocity_span: FIELD_VELOCITY_SPAN,
            size_min: FIELD_SIZE_MIN,
            size_max: FIELD_SIZE_MAX,
            connection_distance: CONNECTION_DISTANCE,
            pointer_distance: POINTER_DISTANCE,
            pointer_force: POINTER_FORCE,
            max_speed: FIELD_MAX_SPEED,
        }
    }
}

impl FieldConfig {
    /// `min(floor(area / area_per_particle), max_particles)`.
    pub fn particle_count_for(&self, viewport: Viewport) -> usize {
        if self.area_per_particle <= 0.0 {
            return 0;
        }
        let n = (viewport.area() / self.area_per_particle).floor();
        (n as usize).min(self.max_particles)
    }
}

/// Particle count for the default configuration.
pub fn particle_count_for(viewport: Viewport) -> usize {
    FieldConfig::default().particle_count_for(viewport)
}

/// `1 - distance / threshold` strictly inside the threshold, `None` at or past it.
#[inline]
pub fn linear_falloff(distance: f64, threshold: f64) -> Option<f64> {
    (distance < threshold && threshold > 0.0).then(|| 1.0 - distance / threshold)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: f64,
    color: Rgb,
    bucket: PaletteBucket,
    generation: u64,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, size: f64, bucket: PaletteBucket, theme: Theme) -> Self {
        Self {
            pos,
            vel,
            size,
            color: theme.style().palette.color(bucket),
            bucket,
            generation: 0,
        }
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn bucket(&self) -> PaletteBucket {
        self.bucket
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move by one frame of velocity and reflect off the viewport walls.
    /// There is no overlap correction: a particle past a wall just heads back.
    #[inline]
    fn advance(&mut self, width: f64, height: f64) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > height {
            self.vel.y = -self.vel.y;
        }
    }
}

pub struct ParticleField {
    pub config: FieldConfig,
    viewport: Viewport,
    theme: Theme,
    pointer: Option<DVec2>,
    particles: Vec<Particle>,
    generation: u64,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(viewport: Viewport, theme: Theme, config: FieldConfig, seed: u64) -> Self {
        let mut field = Self {
            config,
            viewport,
            theme,
            pointer: None,
            particles: Vec::new(),
            generation: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        field.reinitialize();
        field
    }

    /// Build a field around an explicit population instead of a random one.
    pub fn with_particles(
        viewport: Viewport,
        theme: Theme,
        config: FieldConfig,
        seed: u64,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            config,
            viewport,
            theme,
            pointer: None,
            particles,
            generation: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
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

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[inline]
    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop every particle and spawn a fresh population for the current
    /// viewport and theme.
    pub fn reinitialize(&mut self) {
        self.generation += 1;
        let count = self.config.particle_count_for(self.viewport);
        let (w, h) = (self.viewport.width(), self.viewport.height());
        let palette = self.theme.style().palette;
        let span = self.config.velocity_span;
        let (size_min, size_max) = (self.config.size_min, self.config.size_max);

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = DVec2::new(self.rng.gen::<f64>() * w, self.rng.gen::<f64>() * h);
            let vel = DVec2::new(
                (self.rng.gen::<f64>() - 0.5) * span,
                (self.rng.gen::<f64>() - 0.5) * span,
            );
            let size = size_min + self.rng.gen::<f64>() * (size_max - size_min);
            let bucket = Palette::bucket_for(self.rng.gen::<f64>());
            particles.push(Particle {
                pos,
                vel,
                size,
                color: palette.color(bucket),
                bucket,
                generation: self.generation,
            });
        }
        self.particles = particles;
        log::debug!(
            "[field] generation {} with {} particles for {:.0}x{:.0} ({:?})",
            self.generation,
            count,
            w,
            h,
            self.theme
        );
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reinitialize();
    }

    /// Returns whether the theme changed (and the field was rebuilt).
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        self.reinitialize();
        true
    }

    #[inline]
    pub fn set_pointer(&mut self, pos: DVec2) {
        self.pointer = Some(pos);
    }

    #[inline]
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Connection line alpha for a pair at `distance`, if one is drawn.
    pub fn connection_alpha(&self, distance: f64) -> Option<f64> {
        linear_falloff(distance, self.config.connection_distance)
            .map(|f| f * self.theme.style().line_alpha)
    }

    /// Pointer line alpha for a particle at `distance` from the pointer.
    pub fn pointer_alpha(&self, distance: f64) -> Option<f64> {
        linear_falloff(distance, self.config.pointer_distance)
            .map(|f| f * self.theme.style().pointer_line_alpha)
    }

    /// Advance one frame and render it.
    ///
    /// Per particle, in order: move and bounce, draw, connect to every later
    /// particle in range, then draw the pointer line and nudge toward the
    /// pointer. Connections are therefore measured against later particles'
    /// previous-frame positions.
    pub fn step(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        let style = self.theme.style();
        let (w, h) = (self.viewport.width(), self.viewport.height());
        let n = self.particles.len();

        for i in 0..n {
            let pos_i = {
                let p = &mut self.particles[i];
                p.advance(w, h);
                surface.fill_circle(p.pos, p.size, p.color.with_alpha(style.particle_alpha));
                p.pos
            };

            for j in (i + 1)..n {
                let pos_j = self.particles[j].pos;
                if let Some(alpha) = self.connection_alpha(pos_i.distance(pos_j)) {
                    surface.stroke_line(
                        pos_i,
                        pos_j,
                        CONNECTION_LINE_WIDTH,
                        style.line.with_alpha(alpha),
                    );
                }
            }

            if let Some(pointer) = self.pointer {
                if let Some(alpha) = self.pointer_alpha(pos_i.distance(pointer)) {
                    surface.stroke_line(
                        pos_i,
                        pointer,
                        POINTER_LINE_WIDTH,
                        style.palette.primary.with_alpha(alpha),
                    );
                    let force = self.config.pointer_force;
                    let max_speed = self.config.max_speed;
                    let p = &mut self.particles[i];
                    p.vel = (p.vel + (pointer - pos_i) * force).clamp_length_max(max_speed);
                }
            }
        }
    }
}

impl Simulation for ParticleField {
    fn step(&mut self, surface: &mut dyn Surface) {
        ParticleField::step(self, surface);
    }

    fn population(&self) -> usize {
        self.len()
    }
}
