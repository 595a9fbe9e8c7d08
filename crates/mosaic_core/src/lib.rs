//! # MOSAIC Core
//!
//! The peer-window reconciliation and animation driver: the one piece of
//! the shared canvas with real temporal/state-consistency concerns. An
//! asynchronously updated roster of peer windows drives a continuously
//! running display-synchronized loop, and add/remove/reorder events must
//! never corrupt per-object animation state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ Tick N (strict order, single writer):                               │
//! │  1. Drain view events     (roster-changed / local-shape-changed)    │
//! │  2. registry.update()     (heartbeat + roster bookkeeping)          │
//! │  3. registry.windows()    (positional roster snapshot)              │
//! │  4. reconcile(roster)     (create/destroy/update tracked objects)   │
//! │  5. clock.tick()          (exponential smoothing + shared phase)    │
//! │  6. surface.render_frame()                                          │
//! │  7. request next display frame                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Glass Walls
//!
//! The core never reaches into its collaborators. The registry and the
//! rendering surface implement the traits in [`traits`]; the core calls
//! them synchronously inside the tick and nothing ever pushes back in.
//!
//! ## ARCHITECT'S MANDATE
//!
//! - Reconciliation completes before animation; animation completes before
//!   render. A partially reconciled frame is never submitted.
//! - `current` transforms belong to the clock; `target` transforms belong
//!   to the driver. Nobody else writes either.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod error;
pub mod events;
pub mod frame_loop;
pub mod offset;
pub mod reconcile;
pub mod tracked;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{AnimationClock, Smoothing};
pub use error::{FrameError, RegistryError, SurfaceError};
pub use events::{view_event_channel, ViewEvent, ViewEventSender};
pub use frame_loop::{FrameLoop, FrameStats, FrameStatsAccumulator, LoopState, TickOutcome};
pub use offset::ViewOffset;
pub use reconcile::{LayerConfig, ReconciliationDriver, SlotPalette};
pub use tracked::{TrackedObject, Transform};
pub use traits::{DisplayScheduler, RenderingSurface, RosterCallback, ShapeCallback, WindowRegistry};
