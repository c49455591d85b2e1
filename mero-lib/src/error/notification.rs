//! Notification store errors

use uuid::Uuid;

/// Error type for [`NotificationStore`](crate::notification::NotificationStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// No notification with this id is held by the store.
    #[error("Notification {id} not found")]
    NotFound { id: Uuid },
}
