//! # Frame Loop
//!
//! THE ORCHESTRATION (one window process, one loop, one writer):
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. DRAIN VIEW EVENTS                                                │
//! │    └─ roster-changed pings, local-shape moves (easing or snap)      │
//! │                                                                     │
//! │ 2. REGISTRY UPDATE                                                  │
//! │    └─ heartbeat refresh, stale-peer pruning, snapshot reload        │
//! │                                                                     │
//! │ 3. RECONCILE                                                        │
//! │    └─ tracked objects congruent with the roster, count-exact        │
//! │                                                                     │
//! │ 4. ANIMATE                                                          │
//! │    └─ falloff step for every transform + the view offset            │
//! │                                                                     │
//! │ 5. RENDER                                                           │
//! │    └─ submit the frame                                              │
//! │                                                                     │
//! │ 6. SCHEDULE                                                         │
//! │    └─ request the next display-synchronized callback                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Initialization is deferred until the hosting window is first visible -
//! no GPU work in a backgrounded tab. Resize arrives out-of-band and only
//! ever touches the camera, never tracked state.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use mosaic_shared::{EngineConfig, WindowMetadata};

use crate::clock::{AnimationClock, Smoothing};
use crate::error::FrameError;
use crate::events::{view_event_channel, ViewEvent};
use crate::offset::ViewOffset;
use crate::reconcile::{LayerConfig, ReconciliationDriver};
use crate::traits::{DisplayScheduler, RenderingSurface, WindowRegistry};

/// Maximum frame time before a slow-frame warning.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(33);

/// Lifecycle of one window's loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Created, but the window has never been visible: no registry entry,
    /// no scene objects, no GPU work.
    Uninitialized,
    /// Ticking once per display frame.
    Running,
    /// Window hidden; ticks are skipped until visibility returns.
    Suspended,
}

/// What the host should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was produced; request the next display callback.
    ScheduleNext,
    /// Nothing happened (not running); no callback needed.
    Idle,
}

/// Timing of one frame, microseconds per stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Total frame time.
    pub total_us: u64,
    /// Registry update + reconcile time.
    pub reconcile_us: u64,
    /// Animation clock time.
    pub animate_us: u64,
    /// Frame submission time.
    pub render_us: u64,
    /// Frame number.
    pub frame: u64,
}

/// Accumulated frame statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Max frame time seen.
    pub max_frame_us: u64,
    /// Frames that blew the slow-frame budget.
    pub slow_frames: u64,
}

impl FrameStatsAccumulator {
    /// Records one frame.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        if stats.total_us > u64::try_from(MAX_FRAME_TIME.as_micros()).unwrap_or(u64::MAX) {
            self.slow_frames += 1;
        }
    }

    /// Average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = self.total_us_sum as f64 / self.frames_recorded as f64;
        avg / 1000.0
    }

    /// Average frames per second.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }
}

/// The per-window frame loop: owns every piece of core state and is the
/// single writer for all of it.
///
/// The registry and surface are owned fields, not globals - construction
/// wires the registry's callbacks into the view-event channel and from
/// then on every mutation flows through [`Self::tick`].
pub struct FrameLoop<R: WindowRegistry, S: RenderingSurface> {
    registry: R,
    surface: S,
    driver: ReconciliationDriver,
    clock: AnimationClock,
    offset: ViewOffset,
    events: Receiver<ViewEvent>,
    state: LoopState,
    metadata: WindowMetadata,
    frame_count: u64,
    stats: FrameStatsAccumulator,
}

impl<R: WindowRegistry, S: RenderingSurface> FrameLoop<R, S> {
    /// Creates a loop in the [`LoopState::Uninitialized`] state and wires
    /// the registry callbacks. Nothing touches the surface until the
    /// first visibility signal.
    pub fn new(
        config: &EngineConfig,
        metadata: WindowMetadata,
        mut registry: R,
        surface: S,
        layers: Vec<LayerConfig>,
    ) -> Self {
        let (sender, events) = view_event_channel();

        let roster_sender = sender.clone();
        registry.set_roster_changed_callback(Box::new(move || {
            roster_sender.emit(ViewEvent::RosterChanged);
        }));
        registry.set_local_shape_changed_callback(Box::new(move |shape, easing| {
            sender.emit(ViewEvent::LocalShapeChanged { shape, easing });
        }));

        Self {
            registry,
            surface,
            driver: ReconciliationDriver::new(layers),
            clock: AnimationClock::new(Smoothing::PerFrame(config.falloff)),
            offset: ViewOffset::default(),
            events,
            state: LoopState::Uninitialized,
            metadata,
            frame_count: 0,
            stats: FrameStatsAccumulator::default(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames produced so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Accumulated timing statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// The smoothed view offset.
    #[must_use]
    pub fn offset(&self) -> &ViewOffset {
        &self.offset
    }

    /// The reconciliation driver (read access for hosts and tests).
    #[must_use]
    pub fn driver(&self) -> &ReconciliationDriver {
        &self.driver
    }

    /// The owned registry.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable registry access for host glue (publishing local moves,
    /// scripted rosters in tests). Never call this mid-tick.
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// The owned surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host visibility signal. The first `visible = true` performs the
    /// deferred initialization: registry registration plus an immediate
    /// (easing-off) snap of the view offset to this window's position.
    /// Resuming from suspension discards any view events queued while
    /// hidden and re-anchors the offset from the registry's current
    /// rectangle.
    ///
    /// # Errors
    ///
    /// Propagates registry failure during deferred init.
    pub fn handle_visibility(&mut self, visible: bool) -> Result<(), FrameError> {
        match (self.state, visible) {
            (LoopState::Uninitialized, true) => {
                self.registry.init(self.metadata.clone())?;
                let anchor = ViewOffset::anchor_for(self.registry.local_shape());
                self.offset.set_target(anchor, false);
                self.state = LoopState::Running;
                debug!("frame loop initialized and running");
            }
            (LoopState::Suspended, true) => {
                // Anything queued while hidden is stale, and a long
                // suspension may have overflowed the channel entirely.
                // The registry's current rectangle is authoritative.
                while self.events.try_recv().is_ok() {}
                let anchor = ViewOffset::anchor_for(self.registry.local_shape());
                self.offset.set_target(anchor, true);
                self.state = LoopState::Running;
                debug!("frame loop resumed");
            }
            (LoopState::Running, false) => {
                self.state = LoopState::Suspended;
                debug!("frame loop suspended");
            }
            _ => {}
        }
        Ok(())
    }

    /// Out-of-band resize: rebuild the camera projection and output size.
    /// Tracked object state is never touched.
    ///
    /// # Errors
    ///
    /// Propagates surface failure.
    pub fn handle_resize(&mut self, width: f32, height: f32) -> Result<(), FrameError> {
        self.surface.resize_viewport(width, height)?;
        Ok(())
    }

    /// One frame: drain events, update registry, reconcile, animate,
    /// render - in that order, fully, or fail the frame.
    ///
    /// # Errors
    ///
    /// Any collaborator failure mid-tick. The loop makes no attempt to
    /// continue with inconsistent roster/visual state.
    pub fn tick(&mut self) -> Result<TickOutcome, FrameError> {
        if self.state != LoopState::Running {
            return Ok(TickOutcome::Idle);
        }

        let frame_start = Instant::now();
        self.drain_events();

        let reconcile_start = Instant::now();
        self.registry.update()?;
        let roster = self.registry.windows();
        self.driver.reconcile(roster, &mut self.surface)?;
        let reconcile_us = elapsed_us(reconcile_start);

        let animate_start = Instant::now();
        self.clock.tick(&mut self.driver, &mut self.offset, &mut self.surface)?;
        let animate_us = elapsed_us(animate_start);

        let render_start = Instant::now();
        self.surface.render_frame()?;
        let render_us = elapsed_us(render_start);

        let stats = FrameStats {
            total_us: elapsed_us(frame_start),
            reconcile_us,
            animate_us,
            render_us,
            frame: self.frame_count,
        };
        self.stats.record(stats);
        if stats.total_us > u64::try_from(MAX_FRAME_TIME.as_micros()).unwrap_or(u64::MAX) {
            warn!(frame = stats.frame, total_us = stats.total_us, "slow frame");
        }

        self.frame_count += 1;
        Ok(TickOutcome::ScheduleNext)
    }

    /// Drives the loop against a display scheduler until it stops
    /// producing frames or a collaborator fails.
    ///
    /// # Errors
    ///
    /// The first tick failure ends the loop.
    pub fn run(&mut self, scheduler: &mut dyn DisplayScheduler) -> Result<(), FrameError> {
        while self.tick()? == TickOutcome::ScheduleNext {
            scheduler.await_next_frame();
        }
        Ok(())
    }

    /// Applies pending view events. All mutation happens here, inside the
    /// tick - callbacks only ever enqueue.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ViewEvent::RosterChanged => {
                    debug!("roster changed; next reconcile pass picks it up");
                }
                ViewEvent::LocalShapeChanged { shape, easing } => {
                    self.offset.set_target(ViewOffset::anchor_for(shape), easing);
                }
            }
        }
    }
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
