//! Scene graph: a slab of positioned nodes under one world node.
//!
//! Handles are indices into the slab; destroyed slots go on a free list
//! and are reused, so long sessions with windows opening and closing do
//! not grow the slab without bound. A handle that was destroyed errors on
//! use until its slot is reissued - the core destroys and recreates in
//! lockstep, so reissue races cannot happen within one process.

use mosaic_shared::{ObjectHandle, ObjectKind, ObjectStyle, Vec2};

use mosaic_core::SurfaceError;

/// One visual object in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneNode {
    /// Geometry family.
    pub kind: ObjectKind,
    /// Creation-time style.
    pub style: ObjectStyle,
    /// Position in canvas coordinates (world offset NOT applied).
    pub position: Vec2,
    /// Two-axis rotation, radians.
    pub rotation: Vec2,
}

/// The slab of live nodes plus the world translation.
#[derive(Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Option<SceneNode>>,
    free: Vec<u32>,
    world_offset: Vec2,
}

impl SceneGraph {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no nodes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The world translation currently applied to every node.
    #[must_use]
    pub fn world_offset(&self) -> Vec2 {
        self.world_offset
    }

    /// Moves the world node.
    pub fn set_world_offset(&mut self, offset: Vec2) {
        self.world_offset = offset;
    }

    /// Inserts a node, reusing a free slot when one exists.
    pub fn insert(&mut self, kind: ObjectKind, style: ObjectStyle) -> ObjectHandle {
        let node =
            SceneNode { kind, style, position: Vec2::ZERO, rotation: Vec2::ZERO };
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(node);
            return ObjectHandle(slot);
        }
        let slot = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Some(node));
        ObjectHandle(slot)
    }

    /// Removes a node and recycles its slot.
    ///
    /// # Errors
    ///
    /// Fails on a stale or unknown handle.
    pub fn remove(&mut self, handle: ObjectHandle) -> Result<(), SurfaceError> {
        let slot = self
            .slots
            .get_mut(handle.0 as usize)
            .ok_or(SurfaceError::UnknownHandle(handle))?;
        if slot.take().is_none() {
            return Err(SurfaceError::UnknownHandle(handle));
        }
        self.free.push(handle.0);
        Ok(())
    }

    /// Looks up a live node.
    ///
    /// # Errors
    ///
    /// Fails on a stale or unknown handle.
    pub fn node(&self, handle: ObjectHandle) -> Result<&SceneNode, SurfaceError> {
        self.slots
            .get(handle.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(SurfaceError::UnknownHandle(handle))
    }

    /// Mutable lookup of a live node.
    ///
    /// # Errors
    ///
    /// Fails on a stale or unknown handle.
    pub fn node_mut(&mut self, handle: ObjectHandle) -> Result<&mut SceneNode, SurfaceError> {
        self.slots
            .get_mut(handle.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(SurfaceError::UnknownHandle(handle))
    }

    /// Live nodes in slab order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SceneNode)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|node| (ObjectHandle(u32::try_from(i).unwrap_or(u32::MAX)), node))
        })
    }
}
