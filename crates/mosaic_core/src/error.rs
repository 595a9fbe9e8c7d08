//! # Core Error Types
//!
//! The core has no recoverable-error taxonomy of its own: roster entries
//! and shapes are trusted as-is. What CAN fail are the collaborators, and
//! a failed collaborator call is fatal to the frame - continuing with
//! inconsistent roster/visual state is unsafe, so everything here is
//! propagated with `?`, never swallowed.

use thiserror::Error;

use mosaic_shared::ObjectHandle;

/// Errors surfaced by a [`crate::traits::WindowRegistry`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The shared store backing the roster could not be reached.
    #[error("shared store unavailable: {0}")]
    Store(String),

    /// The roster payload in the store could not be decoded.
    #[error("roster payload corrupt: {0}")]
    Codec(String),

    /// A roster operation was attempted before `init`.
    #[error("registry used before init")]
    NotInitialized,
}

/// Errors surfaced by a [`crate::traits::RenderingSurface`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// An operation referenced a handle the surface does not know.
    #[error("unknown object handle #{}", .0 .0)]
    UnknownHandle(ObjectHandle),

    /// The underlying render device went away.
    #[error("render device lost: {0}")]
    DeviceLost(String),
}

/// Fatal frame-loop errors: any collaborator failure mid-tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The window registry failed during the tick.
    #[error("window registry failed: {0}")]
    Registry(#[from] RegistryError),

    /// The rendering surface failed during the tick.
    #[error("rendering surface failed: {0}")]
    Surface(#[from] SurfaceError),
}
