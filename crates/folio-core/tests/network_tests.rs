// Host-side tests for the ambient particle field.

use folio_core::color::{PaletteBucket, DARK_STYLE};
use folio_core::network::{linear_falloff, particle_count_for};
use folio_core::{FieldConfig, Particle, ParticleField, RecordingSurface, Theme, Viewport};
use glam::DVec2;
use std::collections::HashSet;

fn viewport(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn still(x: f64, y: f64) -> Particle {
    Particle::new(
        DVec2::new(x, y),
        DVec2::ZERO,
        1.0,
        PaletteBucket::Neutral,
        Theme::Dark,
    )
}

#[test]
fn full_hd_dark_field_is_capped_and_uses_all_buckets() {
    let vp = viewport(1920.0, 1080.0);
    assert_eq!(particle_count_for(vp), 250);
    let field = ParticleField::new(vp, Theme::Dark, FieldConfig::default(), 42);
    assert_eq!(field.len(), 250);

    let buckets: HashSet<_> = field.particles().iter().map(|p| p.bucket()).collect();
    assert_eq!(buckets.len(), 3);
    let colors: HashSet<_> = field.particles().iter().map(|p| p.color()).collect();
    assert!(colors.contains(&DARK_STYLE.palette.primary));
    assert!(colors.contains(&DARK_STYLE.palette.secondary));
    assert!(colors.contains(&DARK_STYLE.palette.neutral));
}

#[test]
fn neutral_bucket_dominates() {
    let field = ParticleField::new(
        viewport(1920.0, 1080.0),
        Theme::Light,
        FieldConfig::default(),
        7,
    );
    let neutral = field
        .particles()
        .iter()
        .filter(|p| p.bucket() == PaletteBucket::Neutral)
        .count();
    assert!(neutral > field.len() / 2, "neutral={neutral}");
}

#[test]
fn population_never_exceeds_cap() {
    for (w, h) in [(0.0, 0.0), (320.0, 480.0), (1280.0, 720.0), (3840.0, 2160.0)] {
        let mut field =
            ParticleField::new(viewport(w, h), Theme::Dark, FieldConfig::default(), 1);
        assert!(field.len() <= 250);
        field.resize(viewport(h * 3.0, w * 3.0));
        assert!(field.len() <= 250);
    }
}

#[test]
fn particles_spawn_inside_viewport() {
    let vp = viewport(800.0, 600.0);
    let field = ParticleField::new(vp, Theme::Dark, FieldConfig::default(), 9);
    assert_eq!(field.len(), 120);
    for p in field.particles() {
        assert!(vp.contains(p.pos));
        assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
        assert!(p.size >= 0.5 && p.size <= 2.5);
    }
}

#[test]
fn reinitialization_replaces_every_particle() {
    let mut field = ParticleField::new(
        viewport(1024.0, 768.0),
        Theme::Dark,
        FieldConfig::default(),
        5,
    );
    let before = field.generation();
    assert!(field.particles().iter().all(|p| p.generation() == before));

    field.resize(viewport(640.0, 480.0));
    let after_resize = field.generation();
    assert!(after_resize > before);
    assert_eq!(field.len(), 76);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.generation() == after_resize));

    assert!(field.set_theme(Theme::Light));
    let after_theme = field.generation();
    assert!(after_theme > after_resize);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.generation() == after_theme));
}

#[test]
fn same_theme_does_not_rebuild() {
    let mut field = ParticleField::new(
        viewport(500.0, 500.0),
        Theme::Dark,
        FieldConfig::default(),
        5,
    );
    let gen = field.generation();
    assert!(!field.set_theme(Theme::Dark));
    assert_eq!(field.generation(), gen);
}

#[test]
fn connections_drawn_iff_closer_than_threshold() {
    let vp = viewport(1000.0, 1000.0);
    let particles = vec![
        still(100.0, 100.0),
        still(229.0, 100.0), // 129 from first
        still(100.0, 230.0), // 130 from first
        still(600.0, 600.0), // far from everything
    ];
    let mut field =
        ParticleField::with_particles(vp, Theme::Dark, FieldConfig::default(), 0, particles);
    let mut surface = RecordingSurface::new();
    field.step(&mut surface);

    let lines: Vec<_> = surface.lines().collect();
    assert_eq!(lines.len(), 1);
    let (from, to, color) = lines[0];
    assert_eq!(from, DVec2::new(100.0, 100.0));
    assert_eq!(to, DVec2::new(229.0, 100.0));
    assert!(color.a > 0.0);
    assert_eq!(surface.circles().count(), 4);
}

#[test]
fn connection_alpha_decreases_to_zero_at_threshold() {
    let field = ParticleField::with_particles(
        viewport(10.0, 10.0),
        Theme::Dark,
        FieldConfig::default(),
        0,
        Vec::new(),
    );
    let mut prev = f64::INFINITY;
    for d in (0..130).map(|d| d as f64) {
        let a = field.connection_alpha(d).expect("inside threshold");
        assert!(a < prev, "alpha not decreasing at {d}");
        prev = a;
    }
    assert!(field.connection_alpha(130.0).is_none());
    assert!(linear_falloff(129.999_999, 130.0).unwrap() < 1e-6);
}

#[test]
fn walls_reflect_velocity() {
    let vp = viewport(100.0, 100.0);
    let mut p = still(99.9, 0.1);
    p.vel = DVec2::new(0.2, -0.2);
    let mut field = ParticleField::with_particles(vp, Theme::Dark, FieldConfig::default(), 0, vec![p]);
    let mut surface = RecordingSurface::new();
    field.step(&mut surface);
    let q = &field.particles()[0];
    assert!(q.vel.x < 0.0 && q.vel.y > 0.0);
    field.step(&mut surface);
    let q = &field.particles()[0];
    assert!(vp.contains(q.pos));
}

#[test]
fn pointer_attracts_and_draws_line_within_range() {
    let vp = viewport(1000.0, 1000.0);
    let mut field = ParticleField::with_particles(
        vp,
        Theme::Dark,
        FieldConfig::default(),
        0,
        vec![still(100.0, 100.0), still(900.0, 900.0)],
    );
    field.set_pointer(DVec2::new(200.0, 100.0));
    let mut surface = RecordingSurface::new();
    field.step(&mut surface);

    let lines: Vec<_> = surface.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].1, DVec2::new(200.0, 100.0));

    let near = &field.particles()[0];
    assert!((near.vel.x - 100.0 * 0.0001).abs() < 1e-12);
    assert_eq!(near.vel.y, 0.0);
    assert_eq!(field.particles()[1].vel, DVec2::ZERO);
}

#[test]
fn pointer_nudge_is_speed_clamped() {
    let vp = viewport(1000.0, 1000.0);
    let config = FieldConfig {
        pointer_force: 1.0,
        ..FieldConfig::default()
    };
    let mut field =
        ParticleField::with_particles(vp, Theme::Dark, config, 0, vec![still(500.0, 500.0)]);
    field.set_pointer(DVec2::new(700.0, 500.0));
    let mut surface = RecordingSurface::new();
    for _ in 0..20 {
        field.step(&mut surface);
        assert!(field.particles()[0].vel.length() <= 1.0 + 1e-12);
    }
}

#[test]
fn unclamped_config_accumulates_velocity() {
    let vp = viewport(1000.0, 1000.0);
    let config = FieldConfig {
        max_speed: f64::INFINITY,
        ..FieldConfig::default()
    };
    let mut field =
        ParticleField::with_particles(vp, Theme::Dark, config, 0, vec![still(500.0, 500.0)]);
    field.set_pointer(DVec2::new(700.0, 500.0));
    let mut surface = RecordingSurface::new();
    let mut prev = 0.0;
    for _ in 0..10 {
        field.step(&mut surface);
        let vx = field.particles()[0].vel.x;
        assert!(vx > prev);
        prev = vx;
    }
}

#[test]
fn clearing_pointer_stops_attraction() {
    let vp = viewport(1000.0, 1000.0);
    let mut field = ParticleField::with_particles(
        vp,
        Theme::Dark,
        FieldConfig::default(),
        0,
        vec![still(100.0, 100.0)],
    );
    field.set_pointer(DVec2::new(110.0, 100.0));
    field.clear_pointer();
    let mut surface = RecordingSurface::new();
    field.step(&mut surface);
    assert_eq!(surface.lines().count(), 0);
    assert_eq!(field.particles()[0].vel, DVec2::ZERO);
}
