//! 2D math in screen coordinates.
//!
//! These are the canonical representations shared by the roster, the
//! animation core and the rendering surface.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D vector - positions, offsets, rotation phase pairs.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// One exponential-smoothing step toward `target`.
    ///
    /// `current + (target - current) * factor`, independently per axis.
    /// With a factor in `(0, 1)` this converges monotonically and never
    /// overshoots a stationary target.
    #[must_use]
    pub fn falloff_toward(self, target: Self, factor: f32) -> Self {
        Self::new(
            self.x + (target.x - self.x) * factor,
            self.y + (target.y - self.y) * factor,
        )
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_step() {
        let current = Vec2::ZERO;
        let target = Vec2::new(100.0, 50.0);
        let next = current.falloff_toward(target, 0.05);
        assert!((next.x - 5.0).abs() < 1e-6);
        assert!((next.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_falloff_converges_monotonically() {
        let target = Vec2::new(-300.0, 40.0);
        let mut current = Vec2::new(20.0, -10.0);
        let mut last_dist = current.distance(target);

        for _ in 0..500 {
            current = current.falloff_toward(target, 0.05);
            let dist = current.distance(target);
            assert!(dist <= last_dist, "distance must shrink every step");
            // Never overshoots: each axis stays on its starting side
            assert!(current.x >= -300.0 && current.x <= 20.0);
            assert!(current.y <= 40.0 && current.y >= -10.0);
            last_dist = dist;
        }

        assert!(last_dist < 0.001, "must converge below epsilon: {last_dist}");
    }

    #[test]
    fn test_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);
        assert_eq!(a + b, Vec2::new(4.0, -2.0));
        assert_eq!(a - b, Vec2::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }
}
