//! Seams for external collaborators.
//!
//! Identity, document storage, and notification delivery are owned by
//! other parts of the application; this core only consumes them
//! through these traits. Implementations live with the application
//! wiring, not here.

use saldo_shared::types::UserId;
use saldo_shared::AppResult;

/// Identity of the caller on whose behalf a write runs.
pub trait ActorContext: Send + Sync {
    /// The acting user's id.
    fn actor_id(&self) -> UserId;

    /// Whether the actor is restricted to read-only operations.
    fn is_read_only(&self) -> bool;
}

/// Opaque binary document storage.
pub trait DocumentStore: Send + Sync {
    /// Stores a document and returns its opaque URL reference.
    fn store(&self, bytes: &[u8]) -> AppResult<String>;
}

/// Fire-and-forget notification delivery.
pub trait NotificationSink: Send + Sync {
    /// Notifies a user about an event. Delivery failures are the
    /// sink's problem; callers do not branch on them.
    fn notify(&self, user: UserId, kind: &str, payload: &serde_json::Value);
}

/// A fixed actor, for tools and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticActor {
    /// The acting user.
    pub user: UserId,
    /// Read-only flag.
    pub read_only: bool,
}

impl ActorContext for StaticActor {
    fn actor_id(&self) -> UserId {
        self.user
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// A sink that drops every notification, for tools and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _user: UserId, _kind: &str, _payload: &serde_json::Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_actor() {
        let user = UserId::new();
        let actor = StaticActor {
            user,
            read_only: true,
        };
        assert_eq!(actor.actor_id(), user);
        assert!(actor.is_read_only());
    }

    #[test]
    fn test_null_sink_accepts_anything() {
        NullSink.notify(UserId::new(), "match.review", &serde_json::json!({"score": 75}));
    }

    #[test]
    fn test_document_store_returns_opaque_url() {
        struct FakeStore;
        impl DocumentStore for FakeStore {
            fn store(&self, bytes: &[u8]) -> saldo_shared::AppResult<String> {
                Ok(format!("mem://doc/{}", bytes.len()))
            }
        }

        let url = FakeStore.store(b"statement.pdf").unwrap();
        assert!(url.starts_with("mem://"));
    }
}
