//! Orthographic camera over screen coordinates.
//!
//! The canvas is flat: the projection maps viewport pixels straight to
//! clip space, top-left origin, with a deep near/far range so stacked
//! wireframes never clip.

use bytemuck::{Pod, Zeroable};

use mosaic_shared::constants::CAMERA_DEPTH;

/// Column-major 4x4 projection matrix, GPU-upload friendly.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ProjectionMatrix(pub [[f32; 4]; 4]);

/// Orthographic camera rebuilt from viewport bounds on every resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthographicCamera {
    /// Left clip plane (always 0 - screen space).
    pub left: f32,
    /// Right clip plane (viewport width).
    pub right: f32,
    /// Top clip plane (always 0 - screen space, Y grows downward).
    pub top: f32,
    /// Bottom clip plane (viewport height).
    pub bottom: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl OrthographicCamera {
    /// Camera covering a viewport of `width` x `height` pixels.
    #[must_use]
    pub const fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            right: width,
            top: 0.0,
            bottom: height,
            near: -CAMERA_DEPTH,
            far: CAMERA_DEPTH,
        }
    }

    /// The standard orthographic projection for these bounds.
    #[must_use]
    pub fn projection(&self) -> ProjectionMatrix {
        let rl = self.right - self.left;
        let bt = self.bottom - self.top;
        let fn_ = self.far - self.near;

        ProjectionMatrix([
            [2.0 / rl, 0.0, 0.0, 0.0],
            [0.0, -2.0 / bt, 0.0, 0.0],
            [0.0, 0.0, -2.0 / fn_, 0.0],
            [
                -(self.right + self.left) / rl,
                (self.bottom + self.top) / bt,
                -(self.far + self.near) / fn_,
                1.0,
            ],
        ])
    }
}
