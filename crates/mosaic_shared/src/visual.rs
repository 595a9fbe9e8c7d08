//! Visual vocabulary - what the core asks the rendering surface to draw.
//!
//! Styles are computed once per object at creation; the per-frame path
//! only ever touches transforms.

use serde::{Deserialize, Serialize};

/// Opaque ticket for one object living inside a rendering surface.
///
/// Valid from `create_object` until the matching `destroy_object`; using a
/// stale handle is a surface error, never UB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

/// Geometry family of a visual object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Wireframe cube - the primary per-window marker.
    Cube,
    /// Wireframe sphere - the halo around a window's center.
    Sphere,
    /// Floating text label.
    Label,
}

/// RGBA color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// The halo aqua (`#6bbadb`).
    pub const AQUA: Self = Self::rgb(0.42, 0.729, 0.859);

    /// Creates a color from hue/saturation/lightness, all in `0.0..=1.0`.
    ///
    /// Hue wraps; this matches the classic HSL-to-RGB mapping so slot
    /// palettes (`hue = slot * 0.1`) cycle smoothly through the wheel.
    #[must_use]
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s <= 0.0 {
            return Self::rgb(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let hue = |mut t: f32| -> f32 {
            t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };

        Self::rgb(hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0))
    }
}

/// Creation-time style of a visual object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    /// Edge length / diameter / font size, in scene units.
    pub size: f32,
    /// Base color.
    pub color: Color,
    /// Wireframe rendering (the whole aesthetic of the canvas).
    pub wireframe: bool,
}

impl ObjectStyle {
    /// Creates a wireframe style.
    #[must_use]
    pub const fn wireframe(size: f32, color: Color) -> Self {
        Self { size, color, wireframe: true }
    }

    /// Creates a solid style.
    #[must_use]
    pub const fn solid(size: f32, color: Color) -> Self {
        Self { size, color, wireframe: false }
    }
}
