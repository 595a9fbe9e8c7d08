//! Shared test doubles: a recording surface and a scripted registry.

use std::collections::HashMap;

use mosaic_shared::{
    ObjectHandle, ObjectKind, ObjectStyle, PeerWindow, Vec2, WindowId, WindowMetadata, WindowShape,
};

use crate::error::{RegistryError, SurfaceError};
use crate::traits::{RenderingSurface, RosterCallback, ShapeCallback, WindowRegistry};

/// A peer with a 100x100 window at `(x, 0)`.
pub fn peer(id: u32, x: f32) -> PeerWindow {
    PeerWindow::new(WindowId(id), WindowShape::new(x, 0.0, 100.0, 100.0), serde_json::Value::Null)
}

struct Recorded {
    kind: ObjectKind,
    style: ObjectStyle,
    position: Vec2,
    rotation: Vec2,
}

/// In-memory surface that records every call for assertions.
#[derive(Default)]
pub struct RecordingSurface {
    next_handle: u32,
    objects: HashMap<u32, Recorded>,
    created_total: usize,
    pub world_offset: Vec2,
    pub frames_rendered: u64,
    pub viewport: (f32, f32),
    pub fail_next_render: bool,
}

impl RecordingSurface {
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn created_total(&self) -> usize {
        self.created_total
    }

    pub fn style_of(&self, handle: ObjectHandle) -> Option<ObjectStyle> {
        self.objects.get(&handle.0).map(|o| o.style)
    }

    pub fn kind_of(&self, handle: ObjectHandle) -> Option<ObjectKind> {
        self.objects.get(&handle.0).map(|o| o.kind)
    }

    pub fn transform_of(&self, handle: ObjectHandle) -> Option<(Vec2, Vec2)> {
        self.objects.get(&handle.0).map(|o| (o.position, o.rotation))
    }
}

impl RenderingSurface for RecordingSurface {
    fn create_object(
        &mut self,
        kind: ObjectKind,
        style: ObjectStyle,
    ) -> Result<ObjectHandle, SurfaceError> {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.created_total += 1;
        self.objects.insert(
            handle.0,
            Recorded { kind, style, position: Vec2::ZERO, rotation: Vec2::ZERO },
        );
        Ok(handle)
    }

    fn destroy_object(&mut self, handle: ObjectHandle) -> Result<(), SurfaceError> {
        self.objects
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(SurfaceError::UnknownHandle(handle))
    }

    fn set_transform(
        &mut self,
        handle: ObjectHandle,
        position: Vec2,
        rotation: Vec2,
    ) -> Result<(), SurfaceError> {
        let object = self
            .objects
            .get_mut(&handle.0)
            .ok_or(SurfaceError::UnknownHandle(handle))?;
        object.position = position;
        object.rotation = rotation;
        Ok(())
    }

    fn set_world_offset(&mut self, offset: Vec2) -> Result<(), SurfaceError> {
        self.world_offset = offset;
        Ok(())
    }

    fn resize_viewport(&mut self, width: f32, height: f32) -> Result<(), SurfaceError> {
        self.viewport = (width, height);
        Ok(())
    }

    fn render_frame(&mut self) -> Result<(), SurfaceError> {
        if self.fail_next_render {
            return Err(SurfaceError::DeviceLost("scripted failure".into()));
        }
        self.frames_rendered += 1;
        Ok(())
    }
}

/// Registry double whose roster is mutated directly by the test script.
#[derive(Default)]
pub struct ScriptedRegistry {
    roster: Vec<PeerWindow>,
    local_shape: WindowShape,
    initialized: bool,
    pub update_calls: u64,
    roster_callback: Option<RosterCallback>,
    shape_callback: Option<ShapeCallback>,
}

impl ScriptedRegistry {
    pub fn with_local_shape(shape: WindowShape) -> Self {
        Self { local_shape: shape, ..Self::default() }
    }

    /// Replaces the roster and fires the roster-changed callback.
    pub fn script_roster(&mut self, roster: Vec<PeerWindow>) {
        self.roster = roster;
        if let Some(callback) = self.roster_callback.as_mut() {
            callback();
        }
    }

    /// Moves the local window and fires the shape-changed callback.
    pub fn script_local_move(&mut self, shape: WindowShape, easing: bool) {
        self.local_shape = shape;
        if let Some(callback) = self.shape_callback.as_mut() {
            callback(shape, easing);
        }
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }
}

impl WindowRegistry for ScriptedRegistry {
    fn init(&mut self, _metadata: WindowMetadata) -> Result<(), RegistryError> {
        self.initialized = true;
        Ok(())
    }

    fn set_roster_changed_callback(&mut self, callback: RosterCallback) {
        self.roster_callback = Some(callback);
    }

    fn set_local_shape_changed_callback(&mut self, callback: ShapeCallback) {
        self.shape_callback = Some(callback);
    }

    fn update(&mut self) -> Result<(), RegistryError> {
        if !self.initialized {
            return Err(RegistryError::NotInitialized);
        }
        self.update_calls += 1;
        Ok(())
    }

    fn windows(&self) -> &[PeerWindow] {
        &self.roster
    }

    fn local_shape(&self) -> WindowShape {
        self.local_shape
    }
}
