//! Tuning constants shared across the workspace.
//!
//! These are the defaults the original canvas shipped with; `EngineConfig`
//! can override the runtime-tunable subset.

/// Per-frame exponential smoothing factor.
///
/// Applied once per display frame, NOT time-corrected: a 120 Hz window
/// glides twice as fast as a 60 Hz one. That is the inherited, documented
/// behavior of the canvas - see `mosaic_core::clock::Smoothing` for the
/// explicit opt-in variant.
pub const FALLOFF: f32 = 0.05;

/// Target display cadence for schedulers that have to fake vsync.
pub const TARGET_FPS: u32 = 60;

/// Peer windows silent for longer than this are pruned from the roster.
pub const HEARTBEAT_TIMEOUT_MS: u64 = 5_000;

/// Cube rotation rates, radians per second, X/Y axes.
pub const CUBE_SPIN: (f32, f32) = (0.5, 0.3);

/// Sphere rotation rates, radians per second, X/Y axes.
pub const SPHERE_SPIN: (f32, f32) = (0.5, 0.3);

/// Label rotation rates, radians per second, X/Y axes.
pub const LABEL_SPIN: (f32, f32) = (1.5, 1.3);

/// Orthographic camera depth half-range.
pub const CAMERA_DEPTH: f32 = 10_000.0;
