pub mod color;
pub mod constants;
pub mod error;
pub mod network;
pub mod scheduler;
pub mod surface;
pub mod timeline;
pub mod trail;
pub mod viewport;

pub use color::{Rgb, Rgba, Theme};
pub use error::CoreError;
pub use network::{FieldConfig, Particle, ParticleField};
pub use scheduler::{Animation, FrameTask, LoopHandle, LoopState, ManualLoop, Simulation};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use timeline::{TimelineConfig, TimelinePath, TimelineReveal};
pub use trail::{CursorTrail, TrailConfig, TrailParticle};
pub use viewport::Viewport;
