//! # Collaborator Traits
//!
//! The seams between the core and the outside world, defined here so the
//! core never depends on a concrete registry or renderer.
//!
//! ## Architecture (Glass Walls Policy)
//!
//! The core DOES NOT reach into collaborator internals. Collaborators
//! implement these traits; the core calls them synchronously inside the
//! tick and they must complete quickly and never block.
//!
//! ```text
//! Core defines:        Collaborator implements:
//! ┌───────────────┐    ┌───────────────┐
//! │ trait Surface │ ←─ │ impl Surface  │
//! └───────────────┘    └───────────────┘
//! ```

use mosaic_shared::{
    ObjectHandle, ObjectKind, ObjectStyle, PeerWindow, Vec2, WindowMetadata, WindowShape,
};

use crate::error::{RegistryError, SurfaceError};

/// Callback fired when peers join or leave the roster.
pub type RosterCallback = Box<dyn FnMut() + Send>;

/// Callback fired when this window's own screen rectangle changes.
///
/// The `bool` is the easing flag: `true` means glide toward the new
/// anchor, `false` means snap immediately (first placement, restores).
pub type ShapeCallback = Box<dyn FnMut(WindowShape, bool) + Send>;

/// The authoritative list of peer windows and their screen geometry.
///
/// One implementation exists per window process; all of them observe one
/// shared medium. From the core's perspective every call completes
/// synchronously and atomically - there is no transaction, by design.
pub trait WindowRegistry {
    /// Registers this window and attaches to the shared roster.
    ///
    /// # Errors
    ///
    /// Fails if the shared store is unreachable or its payload corrupt.
    fn init(&mut self, metadata: WindowMetadata) -> Result<(), RegistryError>;

    /// Installs the peers-joined/left callback.
    fn set_roster_changed_callback(&mut self, callback: RosterCallback);

    /// Installs the local-window-moved callback.
    fn set_local_shape_changed_callback(&mut self, callback: ShapeCallback);

    /// Per-tick bookkeeping: heartbeat refresh, stale-peer pruning,
    /// roster snapshot refresh. Must be called exactly once per tick.
    ///
    /// # Errors
    ///
    /// Fails if the shared store is unreachable or its payload corrupt.
    fn update(&mut self) -> Result<(), RegistryError>;

    /// The current roster snapshot, index-ordered.
    ///
    /// No identity stability is guaranteed across calls: a window closing
    /// mid-roster shifts every later entry down one slot.
    fn windows(&self) -> &[PeerWindow];

    /// This window's own current screen rectangle.
    fn local_shape(&self) -> WindowShape;
}

/// A renderer owning a camera, a world transform node and a frame queue.
///
/// The core only ever creates/destroys positioned objects, pushes
/// transforms, and submits frames; everything GPU-shaped lives behind
/// this wall.
pub trait RenderingSurface {
    /// Creates a positioned visual object, returning its handle.
    ///
    /// # Errors
    ///
    /// Fails if the underlying device is lost.
    fn create_object(
        &mut self,
        kind: ObjectKind,
        style: ObjectStyle,
    ) -> Result<ObjectHandle, SurfaceError>;

    /// Destroys an object and releases its handle.
    ///
    /// # Errors
    ///
    /// Fails on an unknown/stale handle.
    fn destroy_object(&mut self, handle: ObjectHandle) -> Result<(), SurfaceError>;

    /// Updates an object's position and rotation for the next frame.
    ///
    /// # Errors
    ///
    /// Fails on an unknown/stale handle.
    fn set_transform(
        &mut self,
        handle: ObjectHandle,
        position: Vec2,
        rotation: Vec2,
    ) -> Result<(), SurfaceError>;

    /// Moves the world node - the translation that keeps the virtual
    /// canvas stationary in the real world as this window moves.
    ///
    /// # Errors
    ///
    /// Fails if the underlying device is lost.
    fn set_world_offset(&mut self, offset: Vec2) -> Result<(), SurfaceError>;

    /// Rebuilds the camera projection and output size for a new viewport.
    /// Never touches object state.
    ///
    /// # Errors
    ///
    /// Fails if the underlying device is lost.
    fn resize_viewport(&mut self, width: f32, height: f32) -> Result<(), SurfaceError>;

    /// Submits one frame.
    ///
    /// # Errors
    ///
    /// Fails if the underlying device is lost.
    fn render_frame(&mut self) -> Result<(), SurfaceError>;
}

/// The host's display-synchronized callback, as a blocking seam.
///
/// Real hosts tie this to vsync; simulations sleep a fixed budget. Either
/// way there is exactly one logical suspension point per tick and ticks
/// never overlap.
pub trait DisplayScheduler {
    /// Blocks until the display is ready for the next frame.
    fn await_next_frame(&mut self);
}
