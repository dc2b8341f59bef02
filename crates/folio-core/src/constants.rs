// Shared tuning constants for the folio effects. Distances are CSS pixels,
// rates are per animation frame.

// Ambient field population
pub const FIELD_AREA_PER_PARTICLE: f64 = 4000.0; // one particle per this many px²
pub const FIELD_MAX_PARTICLES: usize = 250;

// Ambient field particle spawn ranges
pub const FIELD_VELOCITY_SPAN: f64 = 0.5; // velocity drawn from ±span/2 per axis
pub const FIELD_SIZE_MIN: f64 = 0.5;
pub const FIELD_SIZE_MAX: f64 = 2.5;

// Ambient field connections
pub const CONNECTION_DISTANCE: f64 = 130.0;
pub const CONNECTION_LINE_WIDTH: f64 = 0.5;

// Pointer attraction
pub const POINTER_DISTANCE: f64 = 250.0;
pub const POINTER_FORCE: f64 = 0.0001; // fraction of the offset added to velocity per frame
pub const POINTER_LINE_WIDTH: f64 = 0.5;
pub const FIELD_MAX_SPEED: f64 = 1.0; // clamp applied after the pointer nudge

// Palette weighting: first accent below A, second accent below B, neutral otherwise
pub const ACCENT_PRIMARY_WEIGHT: f64 = 0.1;
pub const ACCENT_SECONDARY_WEIGHT: f64 = 0.1;

// Cursor trail
pub const TRAIL_MAX_PARTICLES: usize = 150;
pub const TRAIL_SPAWN_PER_MOVE: usize = 2;
pub const TRAIL_SIZE_MIN: f64 = 2.0;
pub const TRAIL_SIZE_MAX: f64 = 6.0;
pub const TRAIL_VELOCITY_SPAN: f64 = 1.0; // ±0.5 per axis
pub const TRAIL_LIFE_DECAY: f64 = 0.02; // 50 frames from full life to zero
pub const TRAIL_SIZE_DECAY: f64 = 0.95;
pub const TRAIL_MIN_SIZE: f64 = 0.5;

// Timeline reveal
pub const TIMELINE_REVEAL_START: f64 = 0.2; // fraction of viewport height
pub const TIMELINE_REVEAL_OVERSHOOT: f64 = 1.2;
pub const TIMELINE_SETTLE_DELAY_MS: i32 = 100;
pub const TIMELINE_SAMPLES_PER_SEGMENT: usize = 32;

// Frame loop diagnostics
pub const FPS_LOG_INTERVAL_FRAMES: u64 = 600;
