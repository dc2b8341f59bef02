// Host-side tests for tuning constants and their relationships.

use folio_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn population_caps_match_documented_values() {
    assert_eq!(FIELD_MAX_PARTICLES, 250);
    assert_eq!(TRAIL_MAX_PARTICLES, 150);
    assert_eq!(TRAIL_SPAWN_PER_MOVE, 2);
    assert!(FIELD_AREA_PER_PARTICLE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn distances_have_logical_relationships() {
    // the pointer reaches further than particle-to-particle links
    assert!(POINTER_DISTANCE > CONNECTION_DISTANCE);
    assert!(POINTER_FORCE > 0.0 && POINTER_FORCE < 0.01);
    // clamp must not cut the spawn velocity
    assert!(FIELD_MAX_SPEED >= (FIELD_VELOCITY_SPAN / 2.0) * std::f64::consts::SQRT_2);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn palette_weights_leave_neutral_majority() {
    assert!(ACCENT_PRIMARY_WEIGHT > 0.0 && ACCENT_SECONDARY_WEIGHT > 0.0);
    assert!(ACCENT_PRIMARY_WEIGHT + ACCENT_SECONDARY_WEIGHT < 0.5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn trail_decay_bounds_lifetime() {
    assert!(TRAIL_LIFE_DECAY > 0.0);
    assert!((1.0 / TRAIL_LIFE_DECAY - 50.0).abs() < 1e-9);
    assert!(TRAIL_SIZE_DECAY > 0.0 && TRAIL_SIZE_DECAY < 1.0);
    assert!(TRAIL_SIZE_MIN > TRAIL_MIN_SIZE);
    assert!(TRAIL_SIZE_MAX > TRAIL_SIZE_MIN);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn reveal_tuning_is_sane() {
    assert!(TIMELINE_REVEAL_START > 0.0 && TIMELINE_REVEAL_START < 1.0);
    assert!(TIMELINE_REVEAL_OVERSHOOT >= 1.0);
    assert!(TIMELINE_SETTLE_DELAY_MS > 0);
    assert!(TIMELINE_SAMPLES_PER_SEGMENT > 0);
}
