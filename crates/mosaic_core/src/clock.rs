//! # Animation Clock
//!
//! Advances every displayed transform toward its target once per frame
//! and drives the shared rotation phase.
//!
//! ## The falloff filter
//!
//! `current += (target - current) * falloff`, independently per axis, same
//! constant for every object and the view offset. This is a discrete
//! exponential low-pass filter and it is FRAME-RATE DEPENDENT: the factor
//! applies per displayed frame, not per elapsed second, so a 120 Hz
//! window converges twice as fast as a 60 Hz one. That is the inherited,
//! documented behavior of the canvas - [`Smoothing::TimeCorrected`] is
//! the explicit opt-in for hosts that want rate independence, and it
//! visibly changes motion, which is why it is never the default.
//!
//! ## The shared phase
//!
//! Rotation is a pure function of wall-clock seconds since the start of
//! the LOCAL calendar day. Every window process on the machine computes
//! the same phase independently, so their objects spin in lockstep
//! without exchanging a single byte of animation state.

use chrono::Timelike;
use std::time::Instant;

use mosaic_shared::Vec2;

use crate::error::SurfaceError;
use crate::offset::ViewOffset;
use crate::reconcile::ReconciliationDriver;
use crate::traits::RenderingSurface;

/// Smoothing law for the per-frame falloff step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Fixed factor per frame. The canvas default; frame-rate dependent
    /// by design.
    PerFrame(f32),

    /// Factor corrected for the actual frame delta:
    /// `1 - (1 - alpha)^(dt / reference_dt)`. Matches `PerFrame(alpha)`
    /// exactly when frames arrive every `reference_dt` seconds.
    TimeCorrected {
        /// Per-reference-frame factor, `(0, 1)`.
        alpha: f32,
        /// The frame interval at which `alpha` applies unchanged, seconds.
        reference_dt: f32,
    },
}

impl Smoothing {
    /// Effective factor for a frame that took `dt` seconds.
    #[must_use]
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            Self::PerFrame(alpha) => alpha,
            Self::TimeCorrected { alpha, reference_dt } => {
                if reference_dt <= 0.0 {
                    return alpha;
                }
                1.0 - (1.0 - alpha).powf(dt / reference_dt)
            }
        }
    }
}

/// Seconds elapsed since the start of the local calendar day.
#[must_use]
pub fn phase_seconds() -> f64 {
    let now = chrono::Local::now();
    f64::from(now.num_seconds_from_midnight()) + f64::from(now.nanosecond()) * 1e-9
}

/// Per-frame advancement of all displayed transforms.
///
/// Mutates `current` transforms and the view offset - nothing else in the
/// process is allowed to touch them.
#[derive(Debug)]
pub struct AnimationClock {
    smoothing: Smoothing,
    last_tick: Option<Instant>,
}

impl AnimationClock {
    /// Creates a clock with the given smoothing law.
    #[must_use]
    pub fn new(smoothing: Smoothing) -> Self {
        Self { smoothing, last_tick: None }
    }

    /// The active smoothing law.
    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Advances one frame using the wall clock. Call exactly once per
    /// frame, after reconciliation.
    ///
    /// # Errors
    ///
    /// Propagates surface failures; the frame must then not be submitted.
    pub fn tick(
        &mut self,
        driver: &mut ReconciliationDriver,
        offset: &mut ViewOffset,
        surface: &mut dyn RenderingSurface,
    ) -> Result<(), SurfaceError> {
        let now = Instant::now();
        // First frame has no delta; assume the reference cadence.
        let dt = self
            .last_tick
            .map_or(1.0 / 60.0, |last| now.duration_since(last).as_secs_f32());
        self.last_tick = Some(now);
        self.tick_at(phase_seconds(), dt, driver, offset, surface)
    }

    /// Deterministic core of [`Self::tick`]: explicit phase and delta.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn tick_at(
        &mut self,
        phase_seconds: f64,
        dt: f32,
        driver: &mut ReconciliationDriver,
        offset: &mut ViewOffset,
        surface: &mut dyn RenderingSurface,
    ) -> Result<(), SurfaceError> {
        let factor = self.smoothing.factor(dt);

        offset.advance(factor);
        surface.set_world_offset(offset.current())?;

        for (config, objects) in driver.layers_mut() {
            #[allow(clippy::cast_possible_truncation)]
            let rotation = Vec2::new(
                (f64::from(config.spin.x) * phase_seconds) as f32,
                (f64::from(config.spin.y) * phase_seconds) as f32,
            );
            for object in objects {
                object.current.position =
                    object.current.position.falloff_toward(object.target.position, factor);
                object.current.rotation = rotation;
                surface.set_transform(object.handle, object.current.position, object.current.rotation)?;
            }
        }

        Ok(())
    }
}
