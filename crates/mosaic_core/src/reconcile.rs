//! # Reconciliation Driver
//!
//! Maps the externally supplied peer roster onto locally owned visual
//! objects, deterministically, every tick.
//!
//! ## The wholesale-replace policy
//!
//! When the roster COUNT changes, every tracked object is destroyed and
//! the full set is rebuilt with `current == target` (no pop-in glide).
//! When the count is stable, objects persist and only their targets move.
//!
//! This trades per-object continuity for simplicity: correspondence is by
//! INDEX, not by window identity. If `[A, B, C]` becomes `[A, C]`, C's
//! geometry is now tracked by slot 1 and C inherits slot 1's size and
//! color. That migration is inherited behavior and callers depend on the
//! invariant `len(objects) == len(roster)` far more than on which window
//! wears which color.

use tracing::debug;

use mosaic_shared::{constants, Color, ObjectKind, ObjectStyle, PeerWindow, Vec2};

use crate::error::SurfaceError;
use crate::tracked::{TrackedObject, Transform};
use crate::traits::RenderingSurface;

/// Per-slot color rule for a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotPalette {
    /// Hue walks the color wheel with the slot index:
    /// `hsl(slot * step, saturation, lightness)`.
    HueRamp {
        /// Hue increment per slot, in turns.
        step: f32,
        /// Saturation, `0.0..=1.0`.
        saturation: f32,
        /// Lightness, `0.0..=1.0`.
        lightness: f32,
    },
    /// Every slot gets the same color.
    Solid(Color),
}

impl SlotPalette {
    /// Color for a given roster slot.
    #[must_use]
    pub fn color_for(&self, slot: usize) -> Color {
        match *self {
            Self::HueRamp { step, saturation, lightness } => {
                #[allow(clippy::cast_precision_loss)]
                Color::from_hsl(slot as f32 * step, saturation, lightness)
            }
            Self::Solid(color) => color,
        }
    }
}

/// One visual layer: a family of objects with one member per roster slot.
///
/// The original canvas stacked three of these per window - a hue-ramped
/// wireframe cube, an aqua halo sphere, and a fast-spinning label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerConfig {
    /// Geometry family.
    pub kind: ObjectKind,
    /// Rotation rates, radians per second of shared phase, X/Y axes.
    pub spin: Vec2,
    /// Size at slot 0.
    pub base_size: f32,
    /// Size increment per slot - visually distinguishes stacking order.
    pub size_step: f32,
    /// Per-slot color rule.
    pub palette: SlotPalette,
    /// Wireframe rendering.
    pub wireframe: bool,
}

impl LayerConfig {
    /// Style of this layer's object at a given roster slot.
    #[must_use]
    pub fn style_for(&self, slot: usize) -> ObjectStyle {
        #[allow(clippy::cast_precision_loss)]
        let size = self.base_size + slot as f32 * self.size_step;
        ObjectStyle { size, color: self.palette.color_for(slot), wireframe: self.wireframe }
    }

    /// The canvas's stock three-layer stack.
    #[must_use]
    pub fn canvas_default() -> Vec<Self> {
        vec![
            Self {
                kind: ObjectKind::Cube,
                spin: Vec2::new(constants::CUBE_SPIN.0, constants::CUBE_SPIN.1),
                base_size: 100.0,
                size_step: 150.0,
                palette: SlotPalette::HueRamp { step: 0.1, saturation: 1.0, lightness: 0.5 },
                wireframe: true,
            },
            Self {
                kind: ObjectKind::Sphere,
                spin: Vec2::new(constants::SPHERE_SPIN.0, constants::SPHERE_SPIN.1),
                base_size: 50.0,
                size_step: 25.0,
                palette: SlotPalette::Solid(Color::AQUA),
                wireframe: true,
            },
            Self {
                kind: ObjectKind::Label,
                spin: Vec2::new(constants::LABEL_SPIN.0, constants::LABEL_SPIN.1),
                base_size: 20.0,
                size_step: 0.0,
                palette: SlotPalette::Solid(Color::WHITE),
                wireframe: false,
            },
        ]
    }
}

/// A layer's config plus its live objects, one per roster slot.
#[derive(Debug)]
struct Layer {
    config: LayerConfig,
    objects: Vec<TrackedObject>,
}

/// Owns every tracked object and keeps them congruent with the roster.
///
/// Invariant after every `reconcile` call: each layer holds exactly
/// `len(roster)` objects - never stale, never short.
#[derive(Debug)]
pub struct ReconciliationDriver {
    layers: Vec<Layer>,
    slot_count: usize,
}

impl ReconciliationDriver {
    /// Creates a driver with the given layer stack and zero objects.
    #[must_use]
    pub fn new(layers: Vec<LayerConfig>) -> Self {
        Self {
            layers: layers.into_iter().map(|config| Layer { config, objects: Vec::new() }).collect(),
            slot_count: 0,
        }
    }

    /// Number of layers in the stack.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of roster slots currently tracked (same for every layer).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Tracked objects of one layer, slot-ordered.
    ///
    /// # Panics
    ///
    /// Panics if `layer` is out of range.
    #[must_use]
    pub fn objects(&self, layer: usize) -> &[TrackedObject] {
        &self.layers[layer].objects
    }

    /// Layer configs and their objects, for the animation clock.
    pub(crate) fn layers_mut(
        &mut self,
    ) -> impl Iterator<Item = (&LayerConfig, &mut [TrackedObject])> {
        self.layers.iter_mut().map(|layer| (&layer.config, layer.objects.as_mut_slice()))
    }

    /// Reconciles tracked objects against the current roster.
    ///
    /// The roster may be empty, may have shrunk or grown by any amount,
    /// and carries no hint about WHY it changed. Count change: destroy
    /// everything, rebuild everything pinned at its target. Count stable:
    /// retarget in place, touch nothing else.
    ///
    /// # Errors
    ///
    /// Propagates any surface failure; the scene is then inconsistent and
    /// the frame must not be submitted.
    pub fn reconcile(
        &mut self,
        roster: &[PeerWindow],
        surface: &mut dyn RenderingSurface,
    ) -> Result<(), SurfaceError> {
        if roster.len() == self.slot_count {
            self.retarget(roster);
            return Ok(());
        }

        debug!(from = self.slot_count, to = roster.len(), "roster count changed, rebuilding");

        for layer in &mut self.layers {
            for object in layer.objects.drain(..) {
                surface.destroy_object(object.handle)?;
            }
        }

        for layer in &mut self.layers {
            layer.objects.reserve_exact(roster.len());
            for (slot, window) in roster.iter().enumerate() {
                let handle =
                    surface.create_object(layer.config.kind, layer.config.style_for(slot))?;
                let transform = Transform::at(window.shape.center());
                layer.objects.push(TrackedObject::pinned(handle, transform));
            }
        }

        self.slot_count = roster.len();
        Ok(())
    }

    /// Recomputes every target from its slot's current window shape.
    fn retarget(&mut self, roster: &[PeerWindow]) {
        for layer in &mut self.layers {
            for (object, window) in layer.objects.iter_mut().zip(roster) {
                object.target.position = window.shape.center();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{peer, RecordingSurface};
    use mosaic_shared::{WindowId, WindowShape};

    fn driver() -> ReconciliationDriver {
        ReconciliationDriver::new(LayerConfig::canvas_default())
    }

    #[test]
    fn test_empty_roster_yields_zero_objects() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        driver.reconcile(&[], &mut surface).unwrap();

        assert_eq!(driver.slot_count(), 0);
        assert_eq!(surface.live_objects(), 0);
    }

    #[test]
    fn test_count_invariant_over_arbitrary_snapshots() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        for count in [0usize, 3, 3, 1, 5, 0, 2] {
            let roster: Vec<_> = (0..count).map(|i| peer(i as u32, i as f32 * 10.0)).collect();
            driver.reconcile(&roster, &mut surface).unwrap();

            assert_eq!(driver.slot_count(), count);
            for layer in 0..driver.layer_count() {
                assert_eq!(driver.objects(layer).len(), count);
            }
            assert_eq!(surface.live_objects(), count * driver.layer_count());
        }
    }

    #[test]
    fn test_single_window_targets_shape_center() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        let roster =
            vec![peer_with_shape(1, WindowShape::new(0.0, 0.0, 100.0, 100.0))];
        driver.reconcile(&roster, &mut surface).unwrap();

        let obj = driver.objects(0)[0];
        assert_eq!(obj.target.position, Vec2::new(50.0, 50.0));
        // Freshly created: no interpolation artifact.
        assert_eq!(obj.current, obj.target);
        assert_eq!(surface.kind_of(obj.handle), Some(ObjectKind::Cube));
    }

    #[test]
    fn test_stable_count_reuses_objects() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        let mut roster = vec![peer(1, 0.0), peer(2, 100.0)];
        driver.reconcile(&roster, &mut surface).unwrap();
        let handles_before: Vec<_> =
            driver.objects(0).iter().map(|o| o.handle).collect();
        let created_before = surface.created_total();

        // Same count, different geometry: targets move, objects survive.
        roster[0].shape.x += 500.0;
        roster[1].shape.y -= 250.0;
        driver.reconcile(&roster, &mut surface).unwrap();

        let handles_after: Vec<_> = driver.objects(0).iter().map(|o| o.handle).collect();
        assert_eq!(handles_before, handles_after);
        assert_eq!(surface.created_total(), created_before, "no churn on stable count");
        assert_eq!(driver.objects(0)[0].target.position, roster[0].shape.center());
    }

    #[test]
    fn test_growth_rebuilds_everything_pinned() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        driver.reconcile(&[peer(1, 0.0)], &mut surface).unwrap();
        driver
            .reconcile(&[peer(1, 0.0), peer(2, 300.0)], &mut surface)
            .unwrap();

        for layer in 0..driver.layer_count() {
            for obj in driver.objects(layer) {
                assert_eq!(obj.current, obj.target, "rebuilt objects must not glide in");
            }
        }
    }

    #[test]
    fn test_identity_follows_index_not_peer_id() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        let a = peer_with_shape(1, WindowShape::new(0.0, 0.0, 10.0, 10.0));
        let b = peer_with_shape(2, WindowShape::new(100.0, 0.0, 10.0, 10.0));
        let c = peer_with_shape(3, WindowShape::new(200.0, 0.0, 10.0, 10.0));

        driver.reconcile(&[a.clone(), b, c.clone()], &mut surface).unwrap();

        // B closes mid-roster: C shifts into slot 1 and inherits slot 1's
        // style. Literal inherited behavior - verify it, don't fix it.
        driver.reconcile(&[a, c.clone()], &mut surface).unwrap();

        assert_eq!(driver.slot_count(), 2);
        let slot1 = driver.objects(0)[1];
        assert_eq!(slot1.target.position, c.shape.center());

        let slot1_style = LayerConfig::canvas_default()[0].style_for(1);
        assert_eq!(surface.style_of(slot1.handle).unwrap(), slot1_style);
    }

    #[test]
    fn test_malformed_shapes_pass_through() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();

        let roster =
            vec![peer_with_shape(1, WindowShape::new(10.0, 10.0, -20.0, -20.0))];
        driver.reconcile(&roster, &mut surface).unwrap();
        assert_eq!(driver.objects(0)[0].target.position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_slot_styles_ramp() {
        let cube = &LayerConfig::canvas_default()[0];
        assert!((cube.style_for(0).size - 100.0).abs() < f32::EPSILON);
        assert!((cube.style_for(2).size - 400.0).abs() < f32::EPSILON);
        assert_ne!(cube.style_for(0).color, cube.style_for(1).color);
    }

    fn peer_with_shape(id: u32, shape: WindowShape) -> PeerWindow {
        PeerWindow::new(WindowId(id), shape, serde_json::Value::Null)
    }
}
