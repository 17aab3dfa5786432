//! Event broadcasting for registration and lifecycle observability.
//!
//! Provides [`ResourceEvent`] variants emitted by the registry and the
//! lifecycle, and an [`EventBus`] backed by `tokio::sync::broadcast`.

use tokio::sync::broadcast;

use crate::config::MAX_EVENT_BUFFER;

// ---------------------------------------------------------------------------
// ResourceEvent
// ---------------------------------------------------------------------------

/// Events emitted while resource types are registered and instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEvent {
    /// A resource type was registered under a new name.
    Registered {
        /// The resource name.
        name: String,
    },
    /// A registration replaced an existing resource type.
    Overwritten {
        /// The resource name.
        name: String,
    },
    /// An instance finished construction in the active state.
    Constructed {
        /// The resource name.
        name: String,
    },
    /// An instance was skipped.
    Skipped {
        /// The resource name.
        name: String,
        /// The skip message.
        message: String,
    },
    /// An instance failed.
    Failed {
        /// The resource name.
        name: String,
        /// The failure message.
        message: String,
    },
}

impl ResourceEvent {
    /// The resource name the event refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::Registered { name }
            | Self::Overwritten { name }
            | Self::Constructed { name }
            | Self::Skipped { name, .. }
            | Self::Failed { name, .. } => name,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Broadcast-based event bus.
///
/// Emission is fire-and-forget: if no subscribers are listening or the
/// channel is full, events are dropped (no backpressure on the emitter).
pub struct EventBus {
    sender: broadcast::Sender<ResourceEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer size.
    ///
    /// Subscribers that fall more than `buffer_size` events behind receive a
    /// `Lagged` error and skip ahead. The size is clamped to
    /// `1..=`[`MAX_EVENT_BUFFER`].
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size.clamp(1, MAX_EVENT_BUFFER));
        Self { sender }
    }

    /// Emit an event to all current subscribers.
    pub fn emit(&self, event: ResourceEvent) {
        // Err only means nobody is subscribed.
        let _ = self.sender.send(event);
    }

    /// Subscribe to events emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ResourceEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new(16);
        bus.emit(ResourceEvent::Registered {
            name: "file".to_string(),
        });
    }

    #[test]
    fn zero_buffer_is_clamped() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();
        bus.emit(ResourceEvent::Constructed {
            name: "file".to_string(),
        });
        assert_eq!(rx.try_recv().unwrap().name(), "file");
    }

    #[test]
    fn oversized_buffer_is_clamped() {
        let bus = EventBus::new(usize::MAX);
        let mut rx = bus.subscribe();
        bus.emit(ResourceEvent::Constructed {
            name: "file".to_string(),
        });
        assert_eq!(rx.try_recv().unwrap().name(), "file");
    }

    #[tokio::test]
    async fn multiple_subscribers_all_receive() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(ResourceEvent::Skipped {
            name: "iis_site".to_string(),
            message: "not on linux".to_string(),
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1, e2);
        assert_eq!(e1.name(), "iis_site");
    }
}
