//! The headless rendering surface.
//!
//! Implements the core's `RenderingSurface` contract. A "submitted" frame
//! is an ordered batch of [`RenderCommand`]s with the world offset baked
//! into every position - exactly what a GPU backend would consume, and
//! exactly what tests inspect.

use tracing::trace;

use mosaic_core::{RenderingSurface, SurfaceError};
use mosaic_shared::{ObjectHandle, ObjectKind, ObjectStyle, Vec2};

use crate::camera::OrthographicCamera;
use crate::scene::SceneGraph;

/// One draw of the current frame, world offset already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCommand {
    /// Geometry family.
    pub kind: ObjectKind,
    /// Creation-time style.
    pub style: ObjectStyle,
    /// Final position after the world translation.
    pub position: Vec2,
    /// Two-axis rotation, radians.
    pub rotation: Vec2,
}

/// Camera + scene graph + frame batch, no GPU attached.
pub struct HeadlessSurface {
    camera: OrthographicCamera,
    scene: SceneGraph,
    frame_count: u64,
    batch: Vec<RenderCommand>,
}

impl HeadlessSurface {
    /// Creates a surface for the given viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            camera: OrthographicCamera::from_viewport(width, height),
            scene: SceneGraph::new(),
            frame_count: 0,
            batch: Vec::new(),
        }
    }

    /// The active camera.
    #[must_use]
    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    /// The scene graph (read access for hosts and tests).
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Frames submitted so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The command batch of the most recently submitted frame.
    #[must_use]
    pub fn last_batch(&self) -> &[RenderCommand] {
        &self.batch
    }
}

impl RenderingSurface for HeadlessSurface {
    fn create_object(
        &mut self,
        kind: ObjectKind,
        style: ObjectStyle,
    ) -> Result<ObjectHandle, SurfaceError> {
        Ok(self.scene.insert(kind, style))
    }

    fn destroy_object(&mut self, handle: ObjectHandle) -> Result<(), SurfaceError> {
        self.scene.remove(handle)
    }

    fn set_transform(
        &mut self,
        handle: ObjectHandle,
        position: Vec2,
        rotation: Vec2,
    ) -> Result<(), SurfaceError> {
        let node = self.scene.node_mut(handle)?;
        node.position = position;
        node.rotation = rotation;
        Ok(())
    }

    fn set_world_offset(&mut self, offset: Vec2) -> Result<(), SurfaceError> {
        self.scene.set_world_offset(offset);
        Ok(())
    }

    fn resize_viewport(&mut self, width: f32, height: f32) -> Result<(), SurfaceError> {
        self.camera = OrthographicCamera::from_viewport(width, height);
        trace!(width, height, "projection rebuilt");
        Ok(())
    }

    fn render_frame(&mut self) -> Result<(), SurfaceError> {
        let offset = self.scene.world_offset();
        self.batch.clear();
        self.batch.extend(self.scene.iter().map(|(_, node)| RenderCommand {
            kind: node.kind,
            style: node.style,
            position: node.position + offset,
            rotation: node.rotation,
        }));

        self.frame_count += 1;
        trace!(frame = self.frame_count, draws = self.batch.len(), "frame submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_shared::Color;

    #[test]
    fn test_empty_frame() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        surface.render_frame().unwrap();
        assert!(surface.last_batch().is_empty());
        assert_eq!(surface.frame_count(), 1);
    }

    #[test]
    fn test_world_offset_baked_into_batch() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let handle = surface
            .create_object(ObjectKind::Cube, ObjectStyle::wireframe(100.0, Color::WHITE))
            .unwrap();
        surface.set_transform(handle, Vec2::new(50.0, 50.0), Vec2::ZERO).unwrap();
        surface.set_world_offset(Vec2::new(-30.0, -10.0)).unwrap();
        surface.render_frame().unwrap();

        let batch = surface.last_batch();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].position, Vec2::new(20.0, 40.0));
    }

    #[test]
    fn test_destroyed_objects_leave_the_batch() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let style = ObjectStyle::wireframe(10.0, Color::AQUA);
        let a = surface.create_object(ObjectKind::Sphere, style).unwrap();
        let _b = surface.create_object(ObjectKind::Sphere, style).unwrap();

        surface.destroy_object(a).unwrap();
        surface.render_frame().unwrap();
        assert_eq!(surface.last_batch().len(), 1);
    }

    #[test]
    fn test_resize_rebuilds_camera_only() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let handle = surface
            .create_object(ObjectKind::Label, ObjectStyle::solid(20.0, Color::WHITE))
            .unwrap();
        surface.set_transform(handle, Vec2::new(5.0, 6.0), Vec2::ZERO).unwrap();

        surface.resize_viewport(1920.0, 1080.0).unwrap();

        assert_eq!(surface.camera().right, 1920.0);
        assert_eq!(surface.scene().node(handle).unwrap().position, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_stale_handle_is_an_error() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let handle = surface
            .create_object(ObjectKind::Cube, ObjectStyle::wireframe(1.0, Color::WHITE))
            .unwrap();
        surface.destroy_object(handle).unwrap();
        assert!(surface.set_transform(handle, Vec2::ZERO, Vec2::ZERO).is_err());
    }
}
