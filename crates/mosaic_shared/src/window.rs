//! Window identity and geometry - the roster element.
//!
//! The registry owns these; the core only ever reads them. Geometry is in
//! physical screen coordinates so that every window process agrees on where
//! a peer sits on the desktop.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Opaque identifier for one window process.
///
/// Assigned by the registry at `init`; unique within one shared store,
/// never reused while the store lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

/// A window's on-screen rectangle in screen coordinates.
///
/// Not validated anywhere: the registry publishes whatever the host
/// reports, and the core renders whatever it is handed. A negative width
/// produces an off-target visual, not an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowShape {
    /// Left edge (screen X of the window's top-left corner).
    pub x: f32,
    /// Top edge (screen Y of the window's top-left corner).
    pub y: f32,
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}

impl WindowShape {
    /// Creates a new shape.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Center of the rectangle - where a peer's visual object sits.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Top-left corner as a vector.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Opaque application payload attached to a window at registration.
///
/// The core never inspects this; it exists so hosts can tag windows with
/// whatever they like (the original system shipped `{"foo": "bar"}`).
pub type WindowMetadata = serde_json::Value;

/// One entry of the peer roster.
///
/// The roster is an ordered sequence; correspondence to visual objects is
/// POSITIONAL, not keyed by `id`. A roster `[A, B, C]` that becomes
/// `[A, C]` moves C into slot 1 and C's visuals inherit slot 1's style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeerWindow {
    /// Registry-assigned identity.
    pub id: WindowId,
    /// Current on-screen rectangle.
    pub shape: WindowShape,
    /// Opaque application payload.
    pub metadata: WindowMetadata,
}

impl PeerWindow {
    /// Creates a roster entry.
    #[must_use]
    pub fn new(id: WindowId, shape: WindowShape, metadata: WindowMetadata) -> Self {
        Self { id, shape, metadata }
    }
}
