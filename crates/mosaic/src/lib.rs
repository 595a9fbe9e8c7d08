//! # MOSAIC
//!
//! One virtual canvas across every open window of the same page. Each
//! window runs its own frame loop and scrolls its own slice of the
//! canvas; peer windows appear as animated wireframe objects tracking the
//! peers' real on-screen geometry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         MOSAIC (per window)                         │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌──────────────┐    roster     ┌──────────────┐                    │
//! │  │  REGISTRY    │──────────────>│    CORE      │                    │
//! │  │  (tracker +  │               │ (reconcile + │                    │
//! │  │ shared store)│<── heartbeat ─│  animate +   │                    │
//! │  └──────────────┘               │  frame loop) │                    │
//! │                                 └──────┬───────┘                    │
//! │                                        │ transforms + frames        │
//! │                                        ▼                            │
//! │                                 ┌──────────────┐                    │
//! │                                 │  RENDERING   │                    │
//! │                                 │  (camera +   │                    │
//! │                                 │ scene graph) │                    │
//! │                                 └──────────────┘                    │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `scheduler`: fixed-rate stand-in for the host's vsync callback

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod scheduler;

// Re-export the units
pub use mosaic_core as core;
pub use mosaic_registry as registry;
pub use mosaic_rendering as rendering;
pub use mosaic_shared as shared;

// Re-export commonly used types
pub use mosaic_core::{FrameLoop, LayerConfig, LoopState, TickOutcome};
pub use mosaic_registry::{MemoryStore, WindowTracker};
pub use mosaic_rendering::HeadlessSurface;
pub use mosaic_shared::{EngineConfig, WindowShape};
pub use scheduler::FixedRateScheduler;
