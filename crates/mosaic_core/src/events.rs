//! # View Events
//!
//! Registry callbacks fire from host glue, but all core state mutates
//! inside the tick. These events are the bridge: callbacks enqueue, the
//! tick drains. Bounded channel, `try_send`, drop-on-full - a stale
//! roster-changed ping is harmless because reconciliation re-derives the
//! truth from the roster snapshot every tick anyway.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

use mosaic_shared::WindowShape;

/// Events crossing from registry callbacks into the frame tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    /// Peers joined or left. Informational: the next reconcile pass picks
    /// up the new roster regardless.
    RosterChanged,

    /// This window's own screen rectangle changed.
    LocalShapeChanged {
        /// The new rectangle.
        shape: WindowShape,
        /// `false` means snap the view offset immediately.
        easing: bool,
    },
}

/// Capacity of the view-event channel. Events are tiny and coalescible;
/// a full channel only ever drops redundant notifications.
pub const VIEW_EVENT_CAPACITY: usize = 64;

/// Sending half handed to registry callbacks. Cheap to clone.
#[derive(Clone)]
pub struct ViewEventSender {
    tx: Sender<ViewEvent>,
}

impl ViewEventSender {
    /// Enqueues an event without blocking. Drops (with a warning) when
    /// the tick has fallen behind by a full channel.
    pub fn emit(&self, event: ViewEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(?dropped, "view event channel full, dropping");
            }
            Err(TrySendError::Disconnected(_)) => {
                // Frame loop is gone; nothing left to notify.
            }
        }
    }
}

/// Creates the bounded callback-to-tick channel pair.
#[must_use]
pub fn view_event_channel() -> (ViewEventSender, Receiver<ViewEvent>) {
    let (tx, rx) = bounded(VIEW_EVENT_CAPACITY);
    (ViewEventSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_drain() {
        let (sender, receiver) = view_event_channel();
        sender.emit(ViewEvent::RosterChanged);
        sender.emit(ViewEvent::LocalShapeChanged {
            shape: WindowShape::new(1.0, 2.0, 3.0, 4.0),
            easing: true,
        });

        assert_eq!(receiver.try_recv().unwrap(), ViewEvent::RosterChanged);
        assert!(matches!(
            receiver.try_recv().unwrap(),
            ViewEvent::LocalShapeChanged { easing: true, .. }
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let (sender, receiver) = view_event_channel();
        for _ in 0..(VIEW_EVENT_CAPACITY + 10) {
            sender.emit(ViewEvent::RosterChanged);
        }
        // Channel holds exactly its capacity; the rest were dropped.
        let drained = receiver.try_iter().count();
        assert_eq!(drained, VIEW_EVENT_CAPACITY);
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_silent() {
        let (sender, receiver) = view_event_channel();
        drop(receiver);
        sender.emit(ViewEvent::RosterChanged);
    }
}
