//! Tracked objects - one locally owned visual per roster slot.
//!
//! Ownership rules (enforced by module visibility, relied on everywhere):
//! - `target` is written only by the reconciliation driver
//! - `current` is written only by the animation clock
//!
//! A tracked object's lifetime is exactly the lifetime of its roster
//! slot's occupancy: created when the slot appears, destroyed when the
//! roster count changes, persistent otherwise.

use mosaic_shared::{ObjectHandle, Vec2};

/// Position + two-axis rotation of one visual object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// Scene position (screen coordinates of the virtual canvas).
    pub position: Vec2,
    /// Rotation around X and Y axes, radians.
    pub rotation: Vec2,
}

impl Transform {
    /// A transform at `position` with zero rotation.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self { position, rotation: Vec2::ZERO }
    }
}

/// One visual object bound to a roster slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedObject {
    /// Owned reference into the rendering surface.
    pub handle: ObjectHandle,
    /// Displayed transform - advanced by the animation clock.
    pub current: Transform,
    /// Goal transform - recomputed by the reconciliation driver.
    pub target: Transform,
}

impl TrackedObject {
    /// Creates an object already at its target: `current == target`, so a
    /// freshly created object never glides in from somewhere stale.
    #[must_use]
    pub const fn pinned(handle: ObjectHandle, transform: Transform) -> Self {
        Self { handle, current: transform, target: transform }
    }

    /// Distance left between displayed and goal positions.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.current.position.distance(self.target.position)
    }
}
