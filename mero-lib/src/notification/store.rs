//! Notification store.

use log::debug;
use uuid::Uuid;

use super::Notification;
use crate::error::NotificationError;

/// Default maximum number of notifications kept by a store.
pub const DEFAULT_MAX_NOTIFICATIONS: usize = 100;

/// The notifications of one session, newest first.
///
/// Pushing past `max_len` drops the oldest notifications.
///
/// # Example
///
/// ```
/// use mero_lib::notification::{Notification, NotificationStore};
///
/// let mut store = NotificationStore::new();
/// let id = store.push(Notification::new("Saved", "Document saved"));
/// assert_eq!(store.unread_count(), 1);
///
/// store.mark_read(id).unwrap();
/// assert_eq!(store.unread_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct NotificationStore {
    items: Vec<Notification>,
    max_len: usize,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStore {
    /// Create an empty store with the default capacity.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_NOTIFICATIONS)
    }

    /// Create an empty store that keeps at most `max_len` notifications.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            items: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    /// Add a notification as the newest entry and return its id.
    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.items.insert(0, notification);
        if self.items.len() > self.max_len {
            let dropped = self.items.len() - self.max_len;
            self.items.truncate(self.max_len);
            debug!("notification store full, dropped {} oldest", dropped);
        }
        id
    }

    /// Get a notification by id.
    pub fn get(&self, id: Uuid) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    /// Mark one notification as read.
    pub fn mark_read(&mut self, id: Uuid) -> Result<(), NotificationError> {
        self.find_mut(id)?.read = true;
        Ok(())
    }

    /// Mark one notification as unread.
    pub fn mark_unread(&mut self, id: Uuid) -> Result<(), NotificationError> {
        self.find_mut(id)?.read = false;
        Ok(())
    }

    /// Mark every notification as read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.items.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    /// Remove a notification and return it.
    pub fn dismiss(&mut self, id: Uuid) -> Result<Notification, NotificationError> {
        let index = self
            .items
            .iter()
            .position(|n| n.id == id)
            .ok_or(NotificationError::NotFound { id })?;
        Ok(self.items.remove(index))
    }

    /// Remove every notification.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, id: Uuid) -> Result<&mut Notification, NotificationError> {
        self.items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NotificationError::NotFound { id })
    }
}

impl<'a> IntoIterator for &'a NotificationStore {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
