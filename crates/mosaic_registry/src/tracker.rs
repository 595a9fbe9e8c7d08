//! The per-process window tracker.
//!
//! Implements the core's `WindowRegistry` contract over a [`SharedStore`]:
//! self-assigned identity at init, heartbeat refresh and stale-peer
//! pruning on every `update()`, change detection by comparing id
//! sequences across snapshots.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;

use mosaic_core::{RegistryError, RosterCallback, ShapeCallback, WindowRegistry};
use mosaic_shared::{PeerWindow, WindowId, WindowMetadata, WindowShape};

use crate::store::SharedStore;

/// The store key holding the roster document.
pub const ROSTER_KEY: &str = "mosaic.windows";

/// One roster entry as persisted in the shared store.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredWindow {
    id: WindowId,
    shape: WindowShape,
    metadata: WindowMetadata,
    /// Milliseconds since the Unix epoch of the last heartbeat.
    last_seen_ms: u64,
}

impl StoredWindow {
    fn as_peer(&self) -> PeerWindow {
        PeerWindow::new(self.id, self.shape, self.metadata.clone())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// A window process's view of the shared roster.
///
/// Exactly one tracker exists per window. All roster mutation happens in
/// `init`, `update` and `set_local_shape`; the frame loop only ever pulls
/// the cached snapshot through `windows()`.
pub struct WindowTracker {
    store: Arc<dyn SharedStore>,
    heartbeat_timeout_ms: u64,
    id: Option<WindowId>,
    local_shape: WindowShape,
    metadata: WindowMetadata,
    snapshot: Vec<PeerWindow>,
    known_ids: Vec<WindowId>,
    roster_callback: Option<RosterCallback>,
    shape_callback: Option<ShapeCallback>,
}

impl WindowTracker {
    /// Creates an unregistered tracker for a window at `initial_shape`.
    #[must_use]
    pub fn new(
        store: Arc<dyn SharedStore>,
        initial_shape: WindowShape,
        heartbeat_timeout_ms: u64,
    ) -> Self {
        Self {
            store,
            heartbeat_timeout_ms,
            id: None,
            local_shape: initial_shape,
            metadata: WindowMetadata::Null,
            snapshot: Vec::new(),
            known_ids: Vec::new(),
            roster_callback: None,
            shape_callback: None,
        }
    }

    /// This window's registry-assigned identity, once initialized.
    #[must_use]
    pub fn id(&self) -> Option<WindowId> {
        self.id
    }

    /// Publishes a new local rectangle and fires the shape callback.
    ///
    /// `easing == false` asks the consumer to apply the change
    /// immediately (first placement, programmatic jumps).
    ///
    /// # Errors
    ///
    /// Fails before `init`, or when the store is unreachable.
    pub fn set_local_shape(
        &mut self,
        shape: WindowShape,
        easing: bool,
    ) -> Result<(), RegistryError> {
        let id = self.id.ok_or(RegistryError::NotInitialized)?;
        self.local_shape = shape;

        let mut entries = self.load_entries()?;
        for entry in &mut entries {
            if entry.id == id {
                entry.shape = shape;
                entry.last_seen_ms = now_ms();
            }
        }
        self.save_entries(&entries)?;

        if let Some(callback) = self.shape_callback.as_mut() {
            callback(shape, easing);
        }
        Ok(())
    }

    /// Wipes the shared roster document entirely (the host's "clear"
    /// escape hatch for a store poisoned by crashed sessions).
    ///
    /// # Errors
    ///
    /// Fails when the store is unreachable.
    pub fn clear(&self) -> Result<(), RegistryError> {
        self.store.remove(ROSTER_KEY).map_err(|e| RegistryError::Store(e.to_string()))
    }

    fn load_entries(&self) -> Result<Vec<StoredWindow>, RegistryError> {
        let payload = self.store.get(ROSTER_KEY).map_err(|e| RegistryError::Store(e.to_string()))?;
        match payload {
            None => Ok(Vec::new()),
            Some(text) => {
                serde_json::from_str(&text).map_err(|e| RegistryError::Codec(e.to_string()))
            }
        }
    }

    fn save_entries(&self, entries: &[StoredWindow]) -> Result<(), RegistryError> {
        let payload =
            serde_json::to_string(entries).map_err(|e| RegistryError::Codec(e.to_string()))?;
        self.store.set(ROSTER_KEY, &payload).map_err(|e| RegistryError::Store(e.to_string()))
    }

    /// Rebuilds the cached snapshot and fires the roster callback if the
    /// id sequence changed since the last rebuild.
    fn refresh_snapshot(&mut self, entries: &[StoredWindow]) {
        self.snapshot = entries.iter().map(StoredWindow::as_peer).collect();
        let ids: Vec<WindowId> = entries.iter().map(|e| e.id).collect();
        if ids != self.known_ids {
            debug!(?ids, "roster membership changed");
            self.known_ids = ids;
            if let Some(callback) = self.roster_callback.as_mut() {
                callback();
            }
        }
    }
}

impl WindowRegistry for WindowTracker {
    fn init(&mut self, metadata: WindowMetadata) -> Result<(), RegistryError> {
        self.metadata = metadata;
        let mut entries = self.load_entries()?;
        let id = WindowId(entries.iter().map(|e| e.id.0).max().unwrap_or(0) + 1);
        entries.push(StoredWindow {
            id,
            shape: self.local_shape,
            metadata: self.metadata.clone(),
            last_seen_ms: now_ms(),
        });
        self.save_entries(&entries)?;

        self.id = Some(id);
        debug!(%id, "window registered");
        self.refresh_snapshot(&entries);
        Ok(())
    }

    fn set_roster_changed_callback(&mut self, callback: RosterCallback) {
        self.roster_callback = Some(callback);
    }

    fn set_local_shape_changed_callback(&mut self, callback: ShapeCallback) {
        self.shape_callback = Some(callback);
    }

    fn update(&mut self) -> Result<(), RegistryError> {
        let id = self.id.ok_or(RegistryError::NotInitialized)?;
        let now = now_ms();

        let mut entries = self.load_entries()?;
        // Own heartbeat first: a slow frame must not get us pruned by a
        // peer racing this rewrite.
        let mut present = false;
        for entry in &mut entries {
            if entry.id == id {
                entry.last_seen_ms = now;
                entry.shape = self.local_shape;
                present = true;
            }
        }
        // A peer pruned us while we were silent (hidden tab, debugger
        // pause). Re-register under the same id rather than vanish.
        if !present {
            debug!(%id, "own entry missing from roster, re-registering");
            entries.push(StoredWindow {
                id,
                shape: self.local_shape,
                metadata: self.metadata.clone(),
                last_seen_ms: now,
            });
        }
        entries.retain(|e| {
            e.id == id || now.saturating_sub(e.last_seen_ms) <= self.heartbeat_timeout_ms
        });
        self.save_entries(&entries)?;

        self.refresh_snapshot(&entries);
        Ok(())
    }

    fn windows(&self) -> &[PeerWindow] {
        &self.snapshot
    }

    fn local_shape(&self) -> WindowShape {
        self.local_shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tracker(store: &MemoryStore, x: f32) -> WindowTracker {
        WindowTracker::new(
            Arc::new(store.clone()),
            WindowShape::new(x, 0.0, 100.0, 100.0),
            5_000,
        )
    }

    #[test]
    fn test_init_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);
        let mut b = tracker(&store, 200.0);

        a.init(serde_json::Value::Null).unwrap();
        b.init(serde_json::Value::Null).unwrap();

        assert_eq!(a.id(), Some(WindowId(1)));
        assert_eq!(b.id(), Some(WindowId(2)));
    }

    #[test]
    fn test_update_before_init_fails() {
        let store = MemoryStore::new();
        let mut t = tracker(&store, 0.0);
        assert_eq!(t.update().unwrap_err(), RegistryError::NotInitialized);
    }

    #[test]
    fn test_peers_see_each_other_after_update() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);
        let mut b = tracker(&store, 200.0);

        a.init(serde_json::Value::Null).unwrap();
        b.init(serde_json::Value::Null).unwrap();
        a.update().unwrap();

        let ids: Vec<_> = a.windows().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WindowId(1), WindowId(2)]);
        assert_eq!(a.windows()[1].shape.x, 200.0);
    }

    #[test]
    fn test_roster_callback_fires_on_membership_change_only() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        a.set_roster_changed_callback(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        a.init(serde_json::Value::Null).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1, "own registration is a change");

        a.update().unwrap();
        a.update().unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1, "stable roster must not re-fire");

        let mut b = tracker(&store, 200.0);
        b.init(serde_json::Value::Null).unwrap();
        a.update().unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 2, "new peer is a change");
    }

    #[test]
    fn test_stale_peer_is_pruned() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);
        a.init(serde_json::Value::Null).unwrap();

        // Forge a peer whose heartbeat is ancient.
        let mut entries = a.load_entries().unwrap();
        entries.push(StoredWindow {
            id: WindowId(99),
            shape: WindowShape::new(500.0, 0.0, 100.0, 100.0),
            metadata: serde_json::Value::Null,
            last_seen_ms: 1,
        });
        a.save_entries(&entries).unwrap();

        a.update().unwrap();
        let ids: Vec<_> = a.windows().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WindowId(1)], "silent peer must age out");
    }

    #[test]
    fn test_pruned_window_rejoins_on_update() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);
        let mut b = tracker(&store, 200.0);
        a.init(serde_json::Value::Null).unwrap();
        b.init(serde_json::json!({"name": "b"})).unwrap();

        // b goes silent long enough for a to prune it.
        let mut entries = a.load_entries().unwrap();
        entries[1].last_seen_ms = 1;
        a.save_entries(&entries).unwrap();
        a.update().unwrap();
        let ids: Vec<_> = a.windows().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WindowId(1)]);

        // b's next heartbeat re-registers it under its old id, with its
        // original metadata, instead of vanishing from every roster.
        b.update().unwrap();
        let ids: Vec<_> = b.windows().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WindowId(1), WindowId(2)]);
        assert_eq!(b.windows()[1].metadata, serde_json::json!({"name": "b"}));

        // a observes the rejoin on its next pass.
        a.update().unwrap();
        assert_eq!(a.windows().len(), 2);
    }

    #[test]
    fn test_set_local_shape_publishes_and_fires() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);
        let mut b = tracker(&store, 200.0);
        a.init(serde_json::Value::Null).unwrap();
        b.init(serde_json::Value::Null).unwrap();

        let seen = Arc::new(parking_lot::Mutex::new(None));
        let sink = Arc::clone(&seen);
        a.set_local_shape_changed_callback(Box::new(move |shape, easing| {
            *sink.lock() = Some((shape, easing));
        }));

        let moved = WindowShape::new(50.0, 75.0, 100.0, 100.0);
        a.set_local_shape(moved, true).unwrap();

        assert_eq!(*seen.lock(), Some((moved, true)));

        // The peer observes the new geometry on its next update.
        b.update().unwrap();
        assert_eq!(b.windows()[0].shape, moved);
    }

    #[test]
    fn test_clear_wipes_the_roster() {
        let store = MemoryStore::new();
        let mut a = tracker(&store, 0.0);
        a.init(serde_json::Value::Null).unwrap();
        a.clear().unwrap();
        assert!(store.get(ROSTER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_payload_is_a_codec_error() {
        let store = MemoryStore::new();
        store.set(ROSTER_KEY, "not json").unwrap();
        let mut a = tracker(&store, 0.0);
        assert!(matches!(
            a.init(serde_json::Value::Null).unwrap_err(),
            RegistryError::Codec(_)
        ));
    }
}
