//! View offset - the translation that pins the virtual canvas to the desk.
//!
//! Each window draws the whole canvas translated by the negation of its
//! own screen position, so as the window slides across the desktop it
//! scrolls through the canvas and the canvas itself appears stationary in
//! the real world.

use mosaic_shared::{Vec2, WindowShape};

/// Smoothed world translation. One per window process.
///
/// `target` moves when the local window moves; `current` decays toward it
/// exponentially each frame (monotonic per axis, never overshooting a
/// stationary target), or snaps when easing is off.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewOffset {
    current: Vec2,
    target: Vec2,
}

impl ViewOffset {
    /// Offset that anchors the canvas for a window at `shape`.
    #[must_use]
    pub const fn anchor_for(shape: WindowShape) -> Vec2 {
        Vec2::new(-shape.x, -shape.y)
    }

    /// The displayed offset.
    #[must_use]
    pub const fn current(&self) -> Vec2 {
        self.current
    }

    /// The goal offset.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Sets a new goal. With `easing == false` the displayed offset snaps
    /// immediately - used for the first placement, where gliding in from
    /// `(0, 0)` would look like the whole canvas lurching.
    pub fn set_target(&mut self, target: Vec2, easing: bool) {
        self.target = target;
        if !easing {
            self.current = target;
        }
    }

    /// One smoothing step. Called by the animation clock, nobody else.
    pub(crate) fn advance(&mut self, factor: f32) {
        self.current = self.current.falloff_toward(self.target, factor);
    }
}
